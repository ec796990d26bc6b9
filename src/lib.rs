//! Block workspace to GlowScript VPython compiler.
//!
//! This crate turns a visual-programming block graph (a [`model::Workspace`])
//! into GlowScript VPython source text with [`compile`], and loads saved
//! workspaces from the block editor's XML or from JSON with
//! [`parser::WorkspaceParser`].
//!
//! The binary `glowblocks` compiles files, batch-compiles directories and
//! prints the built-in [`demos`].

pub mod batch;
pub mod block_types;
pub mod color;
pub mod config;
pub mod demos;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod symbols;

pub use block_types::{BlockKind, BlockRegistry};
pub use config::CompilerConfig;
pub use error::GenerateError;
pub use generator::{
    DIALECT_HEADER, EMPTY_WORKSPACE_PLACEHOLDER, GENERATION_FAILED_PLACEHOLDER, compile,
    compile_with_config, try_compile, with_dialect_header,
};
pub use model::{Block, Workspace};
