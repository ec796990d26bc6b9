//! Compiling whole directory trees of saved workspaces.

use crate::config::CompilerConfig;
use crate::generator;
use crate::model::Workspace;
use crate::parser::{Format, FsSource, WorkspaceParser};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::collections::HashMap;
use walkdir::WalkDir;

/// How each workspace is turned into program text.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub config: CompilerConfig,
    /// Report generation errors instead of writing the failure placeholder.
    pub strict: bool,
    /// Prepend the dialect header line.
    pub header: bool,
}

/// Program text for `ws` under `opts`.
pub fn emit(ws: &Workspace, opts: &EmitOptions) -> Result<String> {
    let code = if ws.is_empty() {
        generator::EMPTY_WORKSPACE_PLACEHOLDER.to_string()
    } else if opts.strict {
        generator::try_compile(ws, &opts.config)?
    } else {
        generator::compile_with_config(ws, &opts.config)
    };
    Ok(if opts.header {
        generator::with_dialect_header(&code)
    } else {
        code
    })
}

/// Load one workspace file and return its program text.
pub fn compile_file(path: &Utf8Path, opts: &EmitOptions) -> Result<String> {
    let ws = WorkspaceParser::new(FsSource).parse_file(path)?;
    emit(&ws, opts).with_context(|| format!("Failed to compile {}", path))
}

/// Where the program for `path` is written: same stem, `.py` extension.
pub fn output_path(path: &Utf8Path) -> Utf8PathBuf {
    path.with_extension("py")
}

/// Every `.xml` / `.json` file below `root`, sorted.
pub fn find_workspaces(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root.as_std_path()) {
        let entry = entry.with_context(|| format!("Walk {}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
        if Format::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Result of [`compile_tree`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written.
    pub written: Vec<Utf8PathBuf>,
    /// Inputs that could not be loaded or (in strict mode) compiled.
    pub failed: Vec<(Utf8PathBuf, anyhow::Error)>,
}

/// Compile every workspace below `root` in parallel, writing each program
/// next to its source.
///
/// Inputs that share an output path (`a.xml` and `a.json`) all fail and none
/// of them is written.
pub fn compile_tree(root: &Utf8Path, opts: &EmitOptions) -> Result<BatchReport> {
    let inputs = find_workspaces(root)?;
    log::info!("compiling {} workspaces under {}", inputs.len(), root);
    let mut claims: HashMap<Utf8PathBuf, usize> = HashMap::new();
    for p in &inputs {
        *claims.entry(output_path(p)).or_default() += 1;
    }
    let results: Vec<(Utf8PathBuf, Result<Utf8PathBuf>)> = inputs
        .par_iter()
        .map(|p| {
            let out = output_path(p);
            if claims.get(&out).copied().unwrap_or(0) > 1 {
                let err = anyhow::anyhow!("{} would also be written from another workspace", out);
                return (p.clone(), Err(err));
            }
            let res = compile_file(p, opts).and_then(|code| {
                std::fs::write(out.as_std_path(), code)
                    .with_context(|| format!("Failed to write {}", out))?;
                Ok(out)
            });
            (p.clone(), res)
        })
        .collect();
    let mut report = BatchReport::default();
    for (p, res) in results {
        match res {
            Ok(out) => report.written.push(out),
            Err(err) => {
                log::warn!("{}: {:#}", p, err);
                report.failed.push((p, err));
            }
        }
    }
    Ok(report)
}
