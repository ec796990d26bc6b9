//! Generator configuration.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Knobs for the code generator. Every field has a default, so a JSON file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Deepest block nesting accepted before generation fails.
    pub max_depth: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_depth: 256,
        }
    }
}

impl CompilerConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path))
    }

    pub(crate) fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: CompilerConfig = serde_json::from_str(r#"{ "indent_width": 2 }"#).unwrap();
        assert_eq!(cfg.indent_width, 2);
        assert_eq!(cfg.max_depth, CompilerConfig::default().max_depth);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "max_depth": 8 }"#).unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(path).unwrap();
        let cfg = CompilerConfig::load(&path).unwrap();
        assert_eq!(cfg.max_depth, 8);
        assert_eq!(cfg.indent_width, 4);
    }
}
