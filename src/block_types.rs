//! Registry of block kinds.
//!
//! Every kind pairs a static [`Shape`] (the fields and slots the editor gives
//! it) with exactly one generator. Adding a kind means registering one more
//! entry; nothing else in the generator dispatches on kind names.

use crate::error::Result;
use crate::generator::{self, CodeGen, Expr};
use crate::model::Block;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;

/// Renders a statement block (and its nested bodies) into `out` at `level`.
pub type StatementFn = fn(&mut String, &Block, &mut CodeGen<'_>, usize) -> Result<()>;

/// Renders an expression block.
pub type ExpressionFn = fn(&Block, &mut CodeGen<'_>) -> Result<Expr>;

#[derive(Clone, Copy)]
pub enum Generator {
    Statement(StatementFn),
    Expression(ExpressionFn),
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Statement(_) => f.write_str("Statement"),
            Generator::Expression(_) => f.write_str("Expression"),
        }
    }
}

/// Field and slot names a block kind exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shape {
    pub fields: &'static [&'static str],
    pub values: &'static [&'static str],
    pub statements: &'static [&'static str],
}

impl Shape {
    pub const EMPTY: Shape = Shape {
        fields: &[],
        values: &[],
        statements: &[],
    };

    pub const fn fields(mut self, fields: &'static [&'static str]) -> Self {
        self.fields = fields;
        self
    }

    pub const fn values(mut self, values: &'static [&'static str]) -> Self {
        self.values = values;
        self
    }

    pub const fn statements(mut self, statements: &'static [&'static str]) -> Self {
        self.statements = statements;
        self
    }
}

/// A registered block kind.
#[derive(Debug, Clone)]
pub struct BlockKind {
    pub name: &'static str,
    /// Toolbox category, used for listings only.
    pub category: &'static str,
    pub shape: Shape,
    pub generator: Generator,
}

impl BlockKind {
    pub fn statement(
        name: &'static str,
        category: &'static str,
        shape: Shape,
        f: StatementFn,
    ) -> Self {
        Self {
            name,
            category,
            shape,
            generator: Generator::Statement(f),
        }
    }

    pub fn expression(
        name: &'static str,
        category: &'static str,
        shape: Shape,
        f: ExpressionFn,
    ) -> Self {
        Self {
            name,
            category,
            shape,
            generator: Generator::Expression(f),
        }
    }

    pub fn produces_value(&self) -> bool {
        matches!(self.generator, Generator::Expression(_))
    }
}

/// Block kinds by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    kinds: IndexMap<&'static str, BlockKind>,
}

static STANDARD: Lazy<BlockRegistry> = Lazy::new(|| {
    let mut r = BlockRegistry::new();
    generator::control::register(&mut r);
    generator::variables::register(&mut r);
    generator::physics::register(&mut r);
    generator::objects::register(&mut r);
    generator::scene::register(&mut r);
    generator::telemetry::register(&mut r);
    generator::expressions::register(&mut r);
    r
});

impl BlockRegistry {
    /// An empty registry, for callers assembling their own block set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in block set, built on first use.
    pub fn standard() -> &'static BlockRegistry {
        &STANDARD
    }

    /// Register a kind, returning the entry it replaced.
    pub fn register(&mut self, kind: BlockKind) -> Option<BlockKind> {
        self.kinds.insert(kind.name, kind)
    }

    pub fn get(&self, name: &str) -> Option<&BlockKind> {
        self.kinds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
