use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use glowblocks::batch::{self, EmitOptions};
use glowblocks::parser::{FsSource, WorkspaceParser};
use glowblocks::{BlockRegistry, CompilerConfig, demos};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile block workspaces to GlowScript VPython", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct Emit {
    /// JSON generator configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,
    /// Spaces per indentation level (overrides the config file)
    #[arg(long)]
    indent: Option<usize>,
    /// Prepend the `GlowScript 3.2 VPython` header line
    #[arg(long)]
    header: bool,
    /// Fail on generation errors instead of emitting the failure placeholder
    #[arg(long)]
    strict: bool,
}

impl Emit {
    fn options(&self) -> Result<EmitOptions> {
        let mut config = match &self.config {
            Some(p) => CompilerConfig::load(p)?,
            None => CompilerConfig::default(),
        };
        if let Some(w) = self.indent {
            config.indent_width = w;
        }
        Ok(EmitOptions {
            config,
            strict: self.strict,
            header: self.header,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one workspace file (.xml or .json)
    Compile {
        #[arg(value_name = "WORKSPACE_FILE")]
        file: Utf8PathBuf,
        /// Write the program here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
        /// Define a custom constant, e.g. `--constant spring_k=12.5`
        #[arg(long = "constant", value_name = "NAME=VALUE")]
        constants: Vec<String>,
        #[command(flatten)]
        emit: Emit,
    },
    /// Compile every workspace below a directory, writing `.py` files alongside
    Batch {
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,
        #[command(flatten)]
        emit: Emit,
    },
    /// Print a built-in example program
    Demo {
        /// One of: projectile, bouncing_ball, orbit
        name: String,
        /// Print the workspace as JSON instead of the program
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        emit: Emit,
    },
    /// List the registered block kinds
    Kinds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Compile {
            file,
            output,
            constants,
            emit,
        } => {
            let mut ws = WorkspaceParser::new(FsSource).parse_file(&file)?;
            for def in &constants {
                let (name, value) = def
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected NAME=VALUE, got `{}`", def))?;
                ws.constants
                    .define(name.trim(), value.trim())
                    .with_context(|| format!("Invalid --constant `{}`", def))?;
            }
            let code = batch::emit(&ws, &emit.options()?)
                .with_context(|| format!("Failed to compile {}", file))?;
            match output {
                Some(out) => std::fs::write(out.as_std_path(), code)
                    .with_context(|| format!("Failed to write {}", out))?,
                None => print!("{}", code),
            }
        }
        Command::Batch { dir, emit } => {
            let report = batch::compile_tree(&dir, &emit.options()?)?;
            for out in &report.written {
                println!("{}", out);
            }
            if !report.failed.is_empty() {
                for (p, err) in &report.failed {
                    eprintln!("{}: {:#}", p, err);
                }
                bail!("{} of {} workspaces failed", report.failed.len(), report.failed.len() + report.written.len());
            }
        }
        Command::Demo { name, json, emit } => {
            let ws = demos::demo(&name).ok_or_else(|| {
                anyhow!("Unknown demo `{}` (available: {})", name, demos::DEMOS.join(", "))
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ws)?);
            } else {
                print!("{}", batch::emit(&ws, &emit.options()?)?);
            }
        }
        Command::Kinds => {
            for kind in BlockRegistry::standard().iter() {
                let form = if kind.produces_value() { "expression" } else { "statement" };
                println!("{:<10} {:<18} {}", kind.category, kind.name, form);
            }
        }
    }
    Ok(())
}
