//! Project-level configuration from `clang-complete.toml`.
//!
//! The file is discovered by walking parent directories from the source
//! file, so one config at a project root covers the whole tree. A missing
//! file yields defaults; a malformed one yields defaults plus a warning.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::args::{ArgumentManager, Dialect};

const CONFIG_FILENAME: &str = "clang-complete.toml";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    pub dialect: Dialect,
    pub standard: Option<u32>,
    pub include_paths: Vec<String>,
    pub definitions: Vec<String>,
    pub extra_flags: Vec<String>,
}

impl ProjectConfig {
    /// Walk parent directories from `start` looking for the config file.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut dir = if start.is_file() {
            start.parent()?
        } else {
            start
        };
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = dir.parent()?;
        }
    }

    /// Read and parse one config file.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("[config] cannot read {}: {err}", path.display());
                return Self::default();
            },
        };
        let raw = match toml::from_str::<ProjectConfigFile>(&content) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("[config] malformed {}: {err}", path.display());
                return Self::default();
            },
        };

        let mut config = Self {
            dialect: raw.dialect.as_deref().map(Dialect::from_setting_value).unwrap_or_default(),
            standard: raw.standard,
            include_paths: raw.include_paths,
            definitions: raw.definitions,
            extra_flags: raw.extra_flags,
        };
        config.normalize();
        config
    }

    /// Resolve the config governing `source_path`, or defaults.
    pub fn resolve(source_path: &Path) -> Self {
        match Self::find(source_path) {
            Some(path) => Self::load(&path),
            None => Self::default(),
        }
    }

    fn normalize(&mut self) {
        let trim = |values: &mut Vec<String>| {
            *values = values.iter().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect();
        };
        trim(&mut self.include_paths);
        trim(&mut self.definitions);
        trim(&mut self.extra_flags);
    }

    /// Build an argument manager seeded from this config.
    pub fn argument_manager(&self) -> ArgumentManager {
        let mut manager = ArgumentManager::new(self.dialect);
        manager.add_include_paths(&self.include_paths);
        manager.add_definitions(&self.definitions);
        manager.add_args(self.extra_flags.iter().cloned());
        if let Some(standard) = self.standard {
            manager.set_standard(standard);
        }
        manager
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigFile {
    dialect: Option<String>,
    standard: Option<u32>,
    include_paths: Vec<String>,
    definitions: Vec<String>,
    extra_flags: Vec<String>,
}

#[cfg(test)]
#[path = "../../tests/src/config_tests.rs"]
mod tests;
