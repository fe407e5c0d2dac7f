use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Marker a source entry must end with to count as an example.
pub const DEFAULT_EXTENSION: &str = ".c";
/// Folder under the generated root that holds one project per example.
pub const DEFAULT_SUBDIR: &str = "example";

/// Resolved settings for one pruning run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PruneConfig {
    pub source_dir: PathBuf,
    pub generated_root: PathBuf,
    pub subdir: String,
    pub extension: String,
}

impl PruneConfig {
    /// Layout of a port directory two levels below the repository root.
    pub fn for_base(base: &Path) -> Self {
        Self {
            source_dir: base.join("..").join("..").join("example"),
            generated_root: base.to_path_buf(),
            subdir: DEFAULT_SUBDIR.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Overlay the values present in a config file. Relative paths resolve against `base`.
    pub fn merge(&mut self, base: &Path, file: ConfigFile) {
        if let Some(dir) = file.source_dir {
            self.source_dir = base.join(dir.as_std_path());
        }
        if let Some(dir) = file.generated_root {
            self.generated_root = base.join(dir.as_std_path());
        }
        if let Some(subdir) = file.subdir {
            self.subdir = subdir;
        }
        if let Some(extension) = file.extension {
            self.extension = extension;
        }
    }

    /// Reject settings that would widen a deletion beyond the generated folder.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            bail!("extension marker must not be empty");
        }
        let mut components = Path::new(&self.subdir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => bail!(
                "subdirectory `{}` must be a single plain path segment",
                self.subdir
            ),
        }
    }

    /// The container removed at the end of a run.
    pub fn example_dir(&self) -> PathBuf {
        self.generated_root.join(&self.subdir)
    }

    pub fn example_folder(&self, name: &OsStr) -> PathBuf {
        self.example_dir().join(name)
    }
}

/// On-disk overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source_dir: Option<Utf8PathBuf>,
    pub generated_root: Option<Utf8PathBuf>,
    pub subdir: Option<String>,
    pub extension: Option<String>,
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}
