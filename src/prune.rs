use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Component, Path};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::PruneConfig;
use crate::fsops::ExampleFs;

/// What a run found and removed.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct PruneReport {
    /// Example names in source listing order.
    pub examples: Vec<OsString>,
    /// Names whose generated folder existed (and was removed unless dry-run).
    pub removed: Vec<OsString>,
    pub removed_root: bool,
}

/// Name of the example an entry describes, if it carries the marker.
pub fn example_name<'a>(file_name: &'a OsStr, extension: &str) -> Option<&'a OsStr> {
    let stem = file_name
        .as_encoded_bytes()
        .strip_suffix(extension.as_bytes())?;
    // SAFETY: `stem` ends right before the UTF-8 `extension`, a valid split point.
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(stem) })
}

/// A name that joins to exactly one folder below the container.
fn is_plain_segment(name: &OsStr) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Example names derived from `source_dir`, in listing order. Duplicates are kept.
pub fn list_example_names<F: ExampleFs + ?Sized>(
    fs: &F,
    source_dir: &Path,
    extension: &str,
) -> Result<Vec<OsString>> {
    let entries = fs
        .list_dir(source_dir)
        .with_context(|| format!("listing example sources in {}", source_dir.display()))?;

    let mut names = Vec::new();
    for entry in &entries {
        let Some(name) = example_name(entry, extension) else {
            continue;
        };
        if !is_plain_segment(name) {
            warn!("skipping {:?}: name {:?} is not a plain folder name", entry, name);
            continue;
        }
        names.push(name.to_os_string());
    }
    Ok(names)
}

pub struct Pruner<'a, F: ExampleFs + ?Sized> {
    fs: &'a F,
    config: &'a PruneConfig,
    dry_run: bool,
}

impl<'a, F: ExampleFs + ?Sized> Pruner<'a, F> {
    pub fn new(fs: &'a F, config: &'a PruneConfig) -> Self {
        Self {
            fs,
            config,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Remove the generated folder for `name` if present and print `- <name>` either way.
    /// Returns whether the folder existed.
    pub fn prune_folder(&self, name: &OsStr, out: &mut dyn Write) -> Result<bool> {
        let target = self.config.example_folder(name);
        let existed = self.remove_if_present(&target)?;
        writeln!(out, "- {}", name.to_string_lossy()).context("writing example line")?;
        Ok(existed)
    }

    /// Remove the generated example container if present.
    pub fn prune_root(&self) -> Result<bool> {
        self.remove_if_present(&self.config.example_dir())
    }

    /// List, prune each example, then prune the container. Any filesystem error aborts.
    pub fn run(&self, out: &mut dyn Write) -> Result<PruneReport> {
        writeln!(out, "Deleting example in local folder").context("writing header")?;
        let examples =
            list_example_names(self.fs, &self.config.source_dir, &self.config.extension)?;
        info!(
            "found {} example(s) in {}",
            examples.len(),
            self.config.source_dir.display()
        );

        let mut report = PruneReport::default();
        for name in &examples {
            if self.prune_folder(name, out)? {
                report.removed.push(name.clone());
            }
        }
        report.examples = examples;

        writeln!(out, "Deleting example folder").context("writing footer")?;
        report.removed_root = self.prune_root()?;
        out.flush().context("flushing output")?;
        Ok(report)
    }

    fn remove_if_present(&self, target: &Path) -> Result<bool> {
        if !self.fs.exists(target) {
            debug!("{} absent", target.display());
            return Ok(false);
        }
        if self.dry_run {
            info!("(dry-run) would remove {}", target.display());
            return Ok(true);
        }
        self.fs
            .remove_all(target)
            .with_context(|| format!("removing {}", target.display()))?;
        debug!("removed {}", target.display());
        Ok(true)
    }
}
