//! Workspace loader.
//!
//! Provides [`WorkspaceParser`] to load a saved workspace into a
//! [`Workspace`]. Two on-disk forms are understood:
//!
//! - [`xml`] – the block editor's native XML save format
//! - JSON – the serde form of [`Workspace`] itself
//!
//! File I/O goes through [`ContentSource`] ([`FsSource`] for disk).

pub mod source;
pub mod xml;

pub use source::*;
pub use xml::parse_workspace_xml;

use crate::model::Workspace;
use anyhow::{Context, Result, bail};
use camino::Utf8Path;

/// Serialized workspace format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// Guess the format from a file extension (`.xml`, `.json`).
    pub fn from_path(path: &Utf8Path) -> Option<Format> {
        match path.extension()?.to_ascii_lowercase().as_str() {
            "xml" => Some(Format::Xml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Guess the format from the first non-blank character.
    pub fn sniff(text: &str) -> Option<Format> {
        match text.trim_start().chars().next()? {
            '<' => Some(Format::Xml),
            '{' => Some(Format::Json),
            _ => None,
        }
    }
}

/// Workspace loader. Generic over [`ContentSource`] so it can read from
/// the filesystem ([`FsSource`]) or from memory.
pub struct WorkspaceParser<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> WorkspaceParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Parse a workspace file, choosing the format by extension and
    /// falling back to sniffing the content.
    pub fn parse_file(&mut self, path: impl AsRef<Utf8Path>) -> Result<Workspace> {
        let path = path.as_ref();
        let text = self.source.read_to_string(path)?;
        let format = match Format::from_path(path).or_else(|| Format::sniff(&text)) {
            Some(f) => f,
            None => bail!("Cannot tell whether {} is XML or JSON", path),
        };
        let ws = parse_workspace_str(&text, format).with_context(|| format!("Failed to load {}", path))?;
        log::debug!(
            "loaded {} ({:?}): {} top-level chains, {} blocks, {} variables",
            path,
            format,
            ws.top_blocks.len(),
            ws.block_count(),
            ws.variables.len()
        );
        Ok(ws)
    }
}

/// Parse workspace text in the given format.
pub fn parse_workspace_str(text: &str, format: Format) -> Result<Workspace> {
    match format {
        Format::Xml => parse_workspace_xml(text),
        Format::Json => parse_workspace_json(text),
    }
}

/// Parse the JSON form of a [`Workspace`].
///
/// Custom constants are session state and are never taken from files.
pub fn parse_workspace_json(text: &str) -> Result<Workspace> {
    let mut ws: Workspace = serde_json::from_str(text).context("Failed to parse workspace JSON")?;
    if !ws.constants.is_empty() {
        log::debug!("ignoring {} constants in workspace JSON", ws.constants.len());
        ws.constants = Default::default();
    }
    Ok(ws)
}
