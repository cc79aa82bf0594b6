//! `stackfix.json` configuration.
//!
//! Every key is optional; missing keys fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::naming::{AcronymRule, AcronymTable};
use crate::walker::FileSelection;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "stackfix.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scan root used when no path argument is given.
    #[serde(default = "default_root")]
    pub root: String,

    /// File name suffix identifying object-definition files.
    #[serde(default = "default_object_suffix")]
    pub object_suffix: String,

    /// Glob patterns (root-relative) excluded from every scan.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extra acronym rules appended to the built-in table.
    #[serde(default)]
    pub acronyms: Vec<AcronymRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            object_suffix: default_object_suffix(),
            exclude: Vec::new(),
            acronyms: Vec::new(),
        }
    }
}

fn default_root() -> String {
    "packages".to_string()
}

fn default_object_suffix() -> String {
    ".object.ts".to_string()
}

impl Config {
    /// Built-in acronym table followed by the configured rules.
    pub fn acronym_table(&self) -> AcronymTable {
        let mut table = AcronymTable::builtin();
        table.extend(self.acronyms.iter().cloned());
        table
    }

    pub fn object_selection(&self) -> FileSelection {
        FileSelection::objects(&self.object_suffix)
    }

    /// Resolve the scan root: explicit argument (tilde expanded) or `root`.
    /// A path naming an existing file is rejected; a missing path is left for
    /// the walker to report.
    pub fn resolve_root(&self, path: Option<&str>) -> Result<PathBuf> {
        let raw = path.unwrap_or(&self.root);
        let root = PathBuf::from(shellexpand::tilde(raw).as_ref());
        if root.exists() && !root.is_dir() {
            return Err(Error::validation_invalid_argument(
                "path",
                "Scan root must be a directory",
                Some(root.display().to_string()),
            ));
        }
        Ok(root)
    }

    fn validate(&self) -> Result<()> {
        if self.object_suffix.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "object_suffix",
                Some(self.object_suffix.clone()),
                "must not be empty",
            ));
        }
        if let Some(rule) = self.acronyms.iter().find(|r| r.pattern.is_empty()) {
            return Err(Error::config_invalid_value(
                "acronyms",
                Some(rule.replacement.clone()),
                "acronym rule pattern must not be empty",
            ));
        }
        Ok(())
    }
}

/// Load configuration from an explicit file, or from `stackfix.json` in the
/// working directory when present, or fall back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = PathBuf::from(CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let raw = crate::utils::io::read_file(&path, &format!("read config {}", path.display()))?;
    parse(&raw, &path.display().to_string())
}

/// Parse and validate configuration JSON.
pub fn parse(raw: &str, origin: &str) -> Result<Config> {
    let config: Config =
        serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(origin, e))?;
    config.validate()?;
    Ok(config)
}
