//! apicompat CLI - check that a new API surface is backward compatible with an old one

mod policy;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use apicompat_checker::check_graphs;
use apicompat_types::{GraphError, Info, Type};

#[derive(Parser)]
#[command(name = "apicompat")]
#[command(about = "API backward-compatibility checker for type graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that NEW is backward compatible with OLD
    Check {
        /// Type graph of the old API
        old: PathBuf,
        /// Type graph of the new API
        new: PathBuf,
        /// Compare every method, not just the marshaling ones
        #[arg(long)]
        all_methods: bool,
        /// Compare types that marshal themselves too
        #[arg(long)]
        no_ignore_marshalers: bool,
    },
    /// Check that type graph files are well formed
    Validate {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error loading {}: {source}", path.display())]
    Load { path: PathBuf, source: GraphError },

    #[error("{} is malformed ({count} unresolved types)", path.display())]
    Malformed { path: PathBuf, count: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            old,
            new,
            all_methods,
            no_ignore_marshalers,
        } => cmd_check(&old, &new, all_methods, !no_ignore_marshalers),
        Commands::Validate { files } => cmd_validate(&files),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Logging is off unless `APICOMPAT_LOG` holds a filter, e.g. `apicompat_checker=trace`
fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("APICOMPAT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }
}

fn load_info(path: &Path) -> Result<Info, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let info = Info::from_json(&source).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), types = info.len(), "loaded graph");
    Ok(info)
}

/// Load a graph and reject it if any stub is unresolved
fn load_valid_info(path: &Path) -> Result<Info, CliError> {
    let info = load_info(path)?;
    if let Err(errors) = info.validate() {
        for err in &errors {
            eprintln!("  {}: {}", path.display(), err);
        }
        return Err(CliError::Malformed {
            path: path.to_path_buf(),
            count: errors.len(),
        });
    }
    Ok(info)
}

fn cmd_check(old_path: &Path, new_path: &Path, all_methods: bool, ignore_marshalers: bool) -> Result<bool, CliError> {
    let mut old = load_valid_info(old_path)?;
    let mut new = load_valid_info(new_path)?;

    if !all_methods {
        old.prune_methods(policy::is_marshal_method);
        new.prune_methods(policy::is_marshal_method);
    }

    let ignore = |info: &Info, ty: &Type| ignore_marshalers && policy::has_custom_marshaler(info, ty);
    let report = check_graphs(&old, &new, ignore)?;

    if report.is_compatible() {
        println!(
            "✓ {} is compatible with {} ({} types)",
            new_path.display(),
            old_path.display(),
            report.checked
        );
        return Ok(true);
    }

    print!("{}", report);
    eprintln!(
        "✗ {} types removed, {} types incompatible ({} violations)",
        report.removed.len(),
        report.incompatible.len(),
        report.violation_count()
    );
    Ok(false)
}

fn cmd_validate(files: &[PathBuf]) -> Result<bool, CliError> {
    let mut all_ok = true;

    for file in files {
        let info = match load_info(file) {
            Ok(info) => info,
            Err(e) => {
                eprintln!("✗ {}", e);
                all_ok = false;
                continue;
            }
        };

        match info.validate() {
            Ok(()) => println!("✓ {} - {} types", file.display(), info.len()),
            Err(errors) => {
                eprintln!("✗ {} - {} errors:", file.display(), errors.len());
                for err in errors {
                    eprintln!("  [{}] {}", err.code(), err);
                }
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}
