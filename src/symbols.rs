//! Variable and constant tables, and the lookups generators use on them.
//!
//! Both tables outlive a single compile: the editor renames variables and the
//! "define constant" dialog appends constants between compiles. The generator
//! only ever reads them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Variables
// ────────────────────────────────────────────────────────────────────────────

/// Lookup from an opaque variable id to its current display name.
pub trait VariableResolver {
    fn resolve(&self, id: &str) -> Option<&str>;
}

/// Ordered map of variable id to display name.
///
/// Two ids may share a name if the user renamed them that way; the table
/// does not deduplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    names: IndexMap<String, String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable, replacing any previous name for `id`.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Rename an existing variable. Returns the old name, or `None` when the
    /// id is unknown (in which case nothing changes).
    pub fn rename(&mut self, id: &str, new_name: impl Into<String>) -> Option<String> {
        self.names
            .get_mut(id)
            .map(|name| std::mem::replace(name, new_name.into()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }
}

impl VariableResolver for VariableTable {
    fn resolve(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

/// Name for a variable field.
///
/// A known id resolves to its current name; otherwise the field's own text is
/// used (free-typed names, or ids the table no longer has); an empty field
/// gives `fallback`. The result is never empty unless `fallback` is.
pub fn resolve_variable<'a>(
    resolver: &'a dyn VariableResolver,
    field_value: &'a str,
    fallback: &'a str,
) -> &'a str {
    if let Some(name) = resolver.resolve(field_value).filter(|n| !n.trim().is_empty()) {
        return name;
    }
    let raw = field_value.trim();
    if raw.is_empty() { fallback } else { raw }
}

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// Built-in physical constants keyed by their short symbol.
pub const BUILTIN_CONSTANTS: &[(&str, &str)] = &[
    ("g", "9.81"),
    ("G", "6.674e-11"),
    ("pi", "pi"),
    ("e", "2.71828"),
    ("c", "3e8"),
    ("k", "8.99e9"),
    ("h", "6.626e-34"),
    ("m_e", "9.109e-31"),
    ("m_p", "1.673e-27"),
];

/// Literal for a built-in constant key.
pub fn builtin_constant(key: &str) -> Option<&'static str> {
    BUILTIN_CONSTANTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// A user-defined named literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomConstant {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantError {
    #[error("`{0}` is not a valid identifier")]
    InvalidName(String),
    #[error("`{0}` is a built-in constant")]
    Builtin(String),
    #[error("constant `{0}` is already defined")]
    Duplicate(String),
}

/// Session-scoped, append-only list of custom constants.
///
/// Created empty, grown through [`ConstantRegistry::define`], and never
/// written back by the workspace loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantRegistry {
    entries: Vec<CustomConstant>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constant. Names must be identifiers, must not shadow a
    /// built-in and must not repeat.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConstantError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ConstantError::InvalidName(name));
        }
        if builtin_constant(&name).is_some() {
            return Err(ConstantError::Builtin(name));
        }
        if self.get(&name).is_some() {
            return Err(ConstantError::Duplicate(name));
        }
        self.entries.push(CustomConstant {
            name,
            value: value.into(),
        });
        Ok(())
    }

    /// Append a constant whose name is fixed in the source, skipping the
    /// checks [`ConstantRegistry::define`] runs on user input.
    pub(crate) fn push_static(&mut self, name: &'static str, value: &'static str) {
        debug_assert!(is_identifier(name) && builtin_constant(name).is_none());
        debug_assert!(self.get(name).is_none());
        self.entries.push(CustomConstant {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&CustomConstant> {
        self.entries.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomConstant> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text for a constant reference.
///
/// Built-ins become their literal; custom constants are referenced by name
/// (their value is emitted once by the `define_constant` block); anything
/// else becomes `0`.
pub fn resolve_constant(registry: &ConstantRegistry, key: &str) -> String {
    let key = key.trim();
    if let Some(lit) = builtin_constant(key) {
        return lit.to_string();
    }
    if let Some(custom) = registry.get(key) {
        return custom.name.clone();
    }
    log::debug!("unresolved constant `{}`, emitting 0", key);
    "0".to_string()
}

/// ASCII Python identifier check.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
