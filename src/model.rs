use crate::block_types::BlockRegistry;
use crate::symbols::{ConstantRegistry, VariableTable};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Workspace
// ────────────────────────────────────────────────────────────────────────────

/// A snapshot of the editor's block graph plus the tables it refers to.
///
/// `top_blocks` holds the head of every top-level chain in document order;
/// that order becomes line order in the generated program.
///
/// In the JSON form every chain (top-level or in a statement slot) is
/// written as a single block object when it has one block and as an array
/// of blocks otherwise, so long programs stay shallow. Nested `next`
/// objects are also accepted on input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default, rename = "blocks", with = "chain_list")]
    pub top_blocks: Vec<Block>,
    #[serde(default)]
    pub variables: VariableTable,
    #[serde(default)]
    pub constants: ConstantRegistry,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level chain.
    pub fn push(&mut self, head: Block) -> &mut Self {
        self.top_blocks.push(head);
        self
    }

    /// True when no enabled block sits at the top level.
    pub fn is_empty(&self) -> bool {
        self.top_blocks.iter().all(|b| b.disabled)
    }

    /// Total number of blocks reachable from the top level.
    pub fn block_count(&self) -> usize {
        let mut n = 0;
        for head in &self.top_blocks {
            head.walk(&mut |_| n += 1);
        }
        n
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block
// ────────────────────────────────────────────────────────────────────────────

/// One node of the visual program.
///
/// Value slots and statement slots are keyed by slot name; a missing key is
/// an empty slot. Statement slots hold the head of a chain linked through
/// [`Block::next`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Registered block kind (e.g. "sphere", "forever").
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, String>,
    #[serde(default, rename = "inputs", skip_serializing_if = "IndexMap::is_empty")]
    pub values: IndexMap<String, Block>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty", with = "chain_map")]
    pub statements: IndexMap<String, Block>,
    /// Written out through the enclosing chain array, never nested.
    #[serde(default, skip_serializing)]
    pub next: Option<Box<Block>>,
    /// Disabled blocks are skipped by the generator.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Block {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Builder: set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder: connect a block to a value slot.
    pub fn with_value(mut self, slot: impl Into<String>, child: Block) -> Self {
        self.values.insert(slot.into(), child);
        self
    }

    /// Builder: connect a chain to a statement slot.
    pub fn with_statement(mut self, slot: impl Into<String>, head: Block) -> Self {
        self.statements.insert(slot.into(), head);
        self
    }

    /// Builder: attach `next` at the end of this block's chain.
    pub fn then(mut self, next: Block) -> Self {
        let tail = match self.next.take() {
            Some(cur) => (*cur).then(next),
            None => next,
        };
        self.next = Some(Box::new(tail));
        self
    }

    /// Build a chain from a sequence of statement blocks.
    pub fn chain<I>(blocks: I) -> Option<Block>
    where
        I: IntoIterator<Item = Block>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut head: Option<Block> = None;
        for mut blk in blocks.into_iter().rev() {
            blk.next = head.map(Box::new);
            head = Some(blk);
        }
        head
    }

    pub fn disable(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Field text, or `""` when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Enabled block connected to a value slot.
    pub fn value_input(&self, slot: &str) -> Option<&Block> {
        self.values.get(slot).filter(|b| !b.disabled)
    }

    /// Head of the chain connected to a statement slot (may be disabled).
    pub fn statement_input(&self, slot: &str) -> Option<&Block> {
        self.statements.get(slot)
    }

    /// Iterate this block and every block following it through `next`.
    pub fn iter_chain(&self) -> ChainIter<'_> {
        ChainIter { cur: Some(self) }
    }

    /// Whether this block's kind yields a value, per `registry`.
    /// `None` when the kind is not registered.
    pub fn produces_value(&self, registry: &BlockRegistry) -> Option<bool> {
        registry.get(&self.kind).map(|k| k.produces_value())
    }

    /// Visit this block, its slots and its `next` chain depth-first.
    pub fn walk<F>(&self, cb: &mut F)
    where
        F: FnMut(&Block),
    {
        for blk in self.iter_chain() {
            cb(blk);
            for child in blk.values.values() {
                child.walk(cb);
            }
            for head in blk.statements.values() {
                head.walk(cb);
            }
        }
    }
}

/// Iterator over a `next`-linked chain.
pub struct ChainIter<'a> {
    cur: Option<&'a Block>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let cur = self.cur?;
        self.cur = cur.next.as_deref();
        Some(cur)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON chain form
// ────────────────────────────────────────────────────────────────────────────

/// Serializes a chain as one block or as an array of its blocks.
struct ChainRef<'a>(&'a Block);

impl Serialize for ChainRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.next.is_none() {
            self.0.serialize(serializer)
        } else {
            serializer.collect_seq(self.0.iter_chain())
        }
    }
}

/// A chain read from JSON: a block object or an array of them. `None` for
/// an empty array.
struct ChainForm(Option<Block>);

impl<'de> Deserialize<'de> for ChainForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChainVisitor;

        impl<'de> Visitor<'de> for ChainVisitor {
            type Value = ChainForm;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a block object or an array of blocks")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ChainForm, A::Error> {
                let blk = Block::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(ChainForm(Some(blk)))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ChainForm, A::Error> {
                let mut flat = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(mut blk) = seq.next_element::<Block>()? {
                    // Unlink any nested `next` so the array order wins.
                    loop {
                        let next = blk.next.take();
                        flat.push(blk);
                        match next {
                            Some(n) => blk = *n,
                            None => break,
                        }
                    }
                }
                Ok(ChainForm(Block::chain(flat)))
            }
        }

        deserializer.deserialize_any(ChainVisitor)
    }
}

mod chain_list {
    use super::{Block, ChainForm, ChainRef};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(heads: &[Block], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(heads.iter().map(ChainRef))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Block>, D::Error> {
        let chains = Vec::<ChainForm>::deserialize(deserializer)?;
        Ok(chains.into_iter().filter_map(|c| c.0).collect())
    }
}

mod chain_map {
    use super::{Block, ChainForm, ChainRef};
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        slots: &IndexMap<String, Block>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(slots.iter().map(|(k, v)| (k, ChainRef(v))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<String, Block>, D::Error> {
        let slots = IndexMap::<String, ChainForm>::deserialize(deserializer)?;
        Ok(slots
            .into_iter()
            .filter_map(|(k, c)| c.0.map(|head| (k, head)))
            .collect())
    }
}
