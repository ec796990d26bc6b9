//! Block graph to GlowScript VPython.
//!
//! - [`CodeGen`] – the renderer handed to every block generator: value slots,
//!   statement slots, indentation and symbol lookups.
//! - [`compile`] – the workspace entry point. It always returns text.
//! - [`literal`] – string and number literals.
//! - The remaining modules hold the generators, one module per toolbox
//!   category, each with a `register` function feeding
//!   [`BlockRegistry::standard`].

pub mod control;
pub mod expressions;
pub mod literal;
pub mod objects;
pub mod physics;
pub mod scene;
pub mod telemetry;
pub mod variables;

use crate::block_types::{BlockRegistry, Generator};
use crate::config::CompilerConfig;
use crate::error::{GenerateError, Result};
use crate::model::{Block, Workspace};
use crate::symbols::{self, ConstantRegistry, VariableResolver};
use std::panic::{self, AssertUnwindSafe};

/// Output for a workspace with nothing on it.
pub const EMPTY_WORKSPACE_PLACEHOLDER: &str = "# Add blocks to the workspace to generate code.\n";

/// Output when generation fails. Partial output is never returned.
pub const GENERATION_FAILED_PLACEHOLDER: &str =
    "# Code generation failed. Check the blocks for errors.\n";

/// First line the runtime expects in every program.
pub const DIALECT_HEADER: &str = "GlowScript 3.2 VPython";

// ────────────────────────────────────────────────────────────────────────────
// Precedence
// ────────────────────────────────────────────────────────────────────────────

/// How tightly an expression binds, tightest first.
///
/// Advisory: generators of arithmetic, comparison and logic blocks wrap their
/// own output and report [`Precedence::Atomic`], so parentheses are only
/// added around text whose structure is unknown or loose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Atomic,
    /// Member access, calls and subscripts.
    Postfix,
    Exponent,
    Unary,
    Multiplicative,
    Additive,
    Relational,
    LogicalNot,
    LogicalAnd,
    LogicalOr,
    /// Free text of unknown shape.
    Unknown,
}

/// Rendered expression text plus its precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub code: String,
    pub precedence: Precedence,
}

impl Expr {
    pub fn new(code: impl Into<String>, precedence: Precedence) -> Self {
        Self {
            code: code.into(),
            precedence,
        }
    }

    pub fn atomic(code: impl Into<String>) -> Self {
        Self::new(code, Precedence::Atomic)
    }

    pub fn postfix(code: impl Into<String>) -> Self {
        Self::new(code, Precedence::Postfix)
    }

    /// Text safe to place where an operator of `outer` precedence applies.
    pub fn wrap_for(self, outer: Precedence) -> String {
        if self.precedence > outer {
            format!("({})", self.code)
        } else {
            self.code
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CodeGen
// ────────────────────────────────────────────────────────────────────────────

/// Renderer state for one compile call.
///
/// Borrows the workspace tables read-only; the only mutable state is the
/// current nesting depth.
pub struct CodeGen<'a> {
    registry: &'a BlockRegistry,
    variables: &'a dyn VariableResolver,
    constants: &'a ConstantRegistry,
    config: &'a CompilerConfig,
    indent_unit: String,
    depth: usize,
}

impl<'a> CodeGen<'a> {
    pub fn new(
        registry: &'a BlockRegistry,
        variables: &'a dyn VariableResolver,
        constants: &'a ConstantRegistry,
        config: &'a CompilerConfig,
    ) -> Self {
        Self {
            registry,
            variables,
            constants,
            config,
            indent_unit: config.indent_unit(),
            depth: 0,
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(GenerateError::TooDeep(self.config.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Render an expression block found in `slot`.
    pub fn expression(&mut self, block: &Block, slot: &str) -> Result<Expr> {
        let kind = self
            .registry
            .get(&block.kind)
            .ok_or_else(|| GenerateError::UnknownKind(block.kind.clone()))?;
        let Generator::Expression(f) = kind.generator else {
            return Err(GenerateError::NotAnExpression {
                kind: block.kind.clone(),
                slot: slot.to_string(),
            });
        };
        self.enter()?;
        let expr = f(block, self)?;
        self.leave();
        Ok(expr)
    }

    /// Text of the block connected to `slot`, or `fallback` when the slot is
    /// empty.
    pub fn value(&mut self, block: &Block, slot: &str, fallback: &str) -> Result<String> {
        match block.value_input(slot) {
            Some(child) => Ok(self.expression(child, slot)?.code),
            None => Ok(fallback.to_string()),
        }
    }

    /// Like [`CodeGen::value`], parenthesized when the child binds more
    /// loosely than `outer`. Fallbacks are used verbatim.
    pub fn value_in(
        &mut self,
        block: &Block,
        slot: &str,
        fallback: &str,
        outer: Precedence,
    ) -> Result<String> {
        match block.value_input(slot) {
            Some(child) => Ok(self.expression(child, slot)?.wrap_for(outer)),
            None => Ok(fallback.to_string()),
        }
    }

    /// Render one statement block at `level`.
    pub fn statement(&mut self, out: &mut String, block: &Block, level: usize) -> Result<()> {
        let kind = self
            .registry
            .get(&block.kind)
            .ok_or_else(|| GenerateError::UnknownKind(block.kind.clone()))?;
        let Generator::Statement(f) = kind.generator else {
            return Err(GenerateError::NotAStatement(block.kind.clone()));
        };
        self.enter()?;
        f(out, block, self, level)?;
        self.leave();
        Ok(())
    }

    /// Render `head` and everything linked after it, skipping disabled blocks.
    pub fn chain(&mut self, out: &mut String, head: &Block, level: usize) -> Result<()> {
        for blk in head.iter_chain().filter(|b| !b.disabled) {
            self.statement(out, blk, level)?;
        }
        Ok(())
    }

    /// Render the body connected to `slot`. A body that renders nothing
    /// becomes a single `pass`.
    pub fn statement_slot(
        &mut self,
        out: &mut String,
        block: &Block,
        slot: &str,
        level: usize,
    ) -> Result<()> {
        let before = out.len();
        if let Some(head) = block.statement_input(slot) {
            self.chain(out, head, level)?;
        }
        if out.len() == before {
            self.line(out, level, "pass");
        }
        Ok(())
    }

    /// Render a top-level chain. Orphan expressions become bare expression
    /// lines.
    pub fn top_level(&mut self, out: &mut String, head: &Block) -> Result<()> {
        for blk in head.iter_chain().filter(|b| !b.disabled) {
            if blk.produces_value(self.registry) == Some(true) {
                let expr = self.expression(blk, "")?;
                self.line(out, 0, &expr.code);
            } else {
                self.statement(out, blk, 0)?;
            }
        }
        Ok(())
    }

    pub fn indent(&self, out: &mut String, level: usize) {
        for _ in 0..level {
            out.push_str(&self.indent_unit);
        }
    }

    /// Write one indented line.
    pub fn line(&self, out: &mut String, level: usize, text: &str) {
        self.indent(out, level);
        out.push_str(text);
        out.push('\n');
    }

    /// Name for the variable in `field`, see [`symbols::resolve_variable`].
    pub fn variable(&self, block: &Block, field: &str, fallback: &str) -> String {
        symbols::resolve_variable(self.variables, block.field(field), fallback).to_string()
    }

    /// Text for a constant key, see [`symbols::resolve_constant`].
    pub fn constant(&self, key: &str) -> String {
        symbols::resolve_constant(self.constants, key)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Workspace compiler
// ────────────────────────────────────────────────────────────────────────────

/// Generate the program for `workspace` with the default configuration.
///
/// Never fails: an empty workspace yields [`EMPTY_WORKSPACE_PLACEHOLDER`] and
/// any generation error yields [`GENERATION_FAILED_PLACEHOLDER`].
pub fn compile(workspace: &Workspace) -> String {
    compile_with_config(workspace, &CompilerConfig::default())
}

pub fn compile_with_config(workspace: &Workspace, config: &CompilerConfig) -> String {
    compile_with_registry(workspace, config, BlockRegistry::standard())
}

/// [`compile`] against a caller-supplied block set.
pub fn compile_with_registry(
    workspace: &Workspace,
    config: &CompilerConfig,
    registry: &BlockRegistry,
) -> String {
    if workspace.is_empty() {
        return EMPTY_WORKSPACE_PLACEHOLDER.to_string();
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        try_compile_with_registry(workspace, config, registry)
    }))
    .unwrap_or_else(|payload| Err(GenerateError::Panicked(panic_message(payload.as_ref()))));
    match result {
        Ok(code) => code,
        Err(err) => {
            log::warn!("code generation failed: {}", err);
            GENERATION_FAILED_PLACEHOLDER.to_string()
        }
    }
}

/// Generate the program, surfacing errors instead of the placeholder.
/// An empty workspace gives an empty string.
pub fn try_compile(workspace: &Workspace, config: &CompilerConfig) -> Result<String> {
    try_compile_with_registry(workspace, config, BlockRegistry::standard())
}

pub fn try_compile_with_registry(
    workspace: &Workspace,
    config: &CompilerConfig,
    registry: &BlockRegistry,
) -> Result<String> {
    log::debug!(
        "compiling {} top-level chains ({} blocks)",
        workspace.top_blocks.len(),
        workspace.block_count()
    );
    let mut cg = CodeGen::new(registry, &workspace.variables, &workspace.constants, config);
    let mut out = String::with_capacity(1024);
    for head in &workspace.top_blocks {
        cg.top_level(&mut out, head)?;
    }
    Ok(out)
}

/// Prepend [`DIALECT_HEADER`] unless the program already starts with it.
pub fn with_dialect_header(code: &str) -> String {
    if code.starts_with(DIALECT_HEADER) {
        code.to_string()
    } else {
        format!("{}\n{}", DIALECT_HEADER, code)
    }
}

/// Value of a dropdown field mapped through `options`.
///
/// Matching ignores ASCII case. A value the dropdown never offers falls back
/// to the first option.
pub(crate) fn choose<T: Copy>(block: &Block, field: &str, options: &[(&'static str, T)]) -> T {
    let raw = block.field(field).trim();
    if let Some((_, v)) = options.iter().find(|(k, _)| k.eq_ignore_ascii_case(raw)) {
        return *v;
    }
    let (first, v) = options[0];
    if !raw.is_empty() {
        log::warn!(
            "{}: unknown {} value `{}`, using `{}`",
            block.kind,
            field,
            raw,
            first
        );
    }
    v
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
