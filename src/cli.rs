use std::path::PathBuf;

use clap::Parser;

/// Delete the per-example project folders generated inside a port directory.
///
/// With no arguments every path is derived from the directory holding the executable:
/// sources are read from `<base>/../../example` and folders are removed from `<base>/example`.
#[derive(Parser, Debug)]
#[command(
    name = "prune-examples",
    version,
    about = "Delete generated example project folders from a local port tree"
)]
pub struct Cli {
    /// Directory the default paths are computed from (defaults to the executable's directory).
    #[arg(long = "base-dir")]
    pub base_dir: Option<PathBuf>,
    /// TOML file overriding the default paths, subdirectory, or extension.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
    /// Directory holding the example source files.
    #[arg(long = "source")]
    pub source: Option<PathBuf>,
    /// Directory holding the generated example folder.
    #[arg(long = "generated-root")]
    pub generated_root: Option<PathBuf>,
    /// Report what would be removed without touching the filesystem.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
