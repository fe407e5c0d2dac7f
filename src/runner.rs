use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::{self, PruneConfig};
use crate::fsops::{ExampleFs, OsFs};
use crate::prune::{PruneReport, Pruner};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BaseDirSource {
    Explicit,
    Executable,
}

impl BaseDirSource {
    fn as_str(&self) -> &'static str {
        match self {
            BaseDirSource::Explicit => "explicit",
            BaseDirSource::Executable => "executable",
        }
    }
}

#[derive(Clone, Debug)]
struct ResolvedBaseDir {
    path: PathBuf,
    source: BaseDirSource,
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::from(&cli);
    let config = ctx.resolve_config()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = prune_with(&OsFs, &config, ctx.dry_run, &mut out)?;

    if ctx.dry_run {
        info!(
            "(dry-run) {} of {} example folder(s) would be removed",
            report.removed.len(),
            report.examples.len()
        );
    } else {
        info!(
            "removed {} of {} example folder(s)",
            report.removed.len(),
            report.examples.len()
        );
    }
    Ok(())
}

fn prune_with<F: ExampleFs + ?Sized>(
    fs: &F,
    config: &PruneConfig,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<PruneReport> {
    debug!(
        "source={} generated={} extension={}",
        config.source_dir.display(),
        config.example_dir().display(),
        config.extension
    );
    Pruner::new(fs, config).dry_run(dry_run).run(out)
}

#[derive(Clone, Debug)]
struct CliContext {
    base_dir: Option<PathBuf>,
    file: Option<PathBuf>,
    source: Option<PathBuf>,
    generated_root: Option<PathBuf>,
    dry_run: bool,
}

impl CliContext {
    fn resolve_base_dir(&self) -> Result<ResolvedBaseDir> {
        if let Some(path) = &self.base_dir {
            return Ok(ResolvedBaseDir {
                path: path.clone(),
                source: BaseDirSource::Explicit,
            });
        }

        let exe = std::env::current_exe().context("resolving executable location")?;
        let path = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))?;
        Ok(ResolvedBaseDir {
            path,
            source: BaseDirSource::Executable,
        })
    }

    /// Defaults from the base directory, then the config file, then explicit path flags.
    fn resolve_config(&self) -> Result<PruneConfig> {
        let base = self.resolve_base_dir()?;
        debug!("base dir: {} ({})", base.path.display(), base.source.as_str());

        let mut config = PruneConfig::for_base(&base.path);
        if let Some(file) = &self.file {
            let file = Utf8PathBuf::from_path_buf(file.clone())
                .map_err(|_| anyhow!("config path must be valid UTF-8"))?;
            config.merge(&base.path, config::load_from_path(&file)?);
        }
        if let Some(source) = &self.source {
            config.source_dir = source.clone();
        }
        if let Some(root) = &self.generated_root {
            config.generated_root = root.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

impl From<&Cli> for CliContext {
    fn from(cli: &Cli) -> Self {
        Self {
            base_dir: cli.base_dir.clone(),
            file: cli.file.clone(),
            source: cli.source.clone(),
            generated_root: cli.generated_root.clone(),
            dry_run: cli.dry_run,
        }
    }
}
