//! Flat JSON persistence for templates and intersections.
//!
//! A file holds one JSON array of `[distance, type]` pairs. Loading returns
//! the pairs in file order; nothing is re-sorted, so an accumulated
//! intersection survives a save/load cycle unchanged.

use crate::template::TemplateEntry;
use crate::util::{RidgeprintError, RidgeprintResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension used for stored templates.
pub const TEMPLATE_EXTENSION: &str = "tmplt";

/// Writes `entries` to `path` as a JSON array of pairs.
pub fn save_entries<P: AsRef<Path>>(path: P, entries: &[TemplateEntry]) -> RidgeprintResult<()> {
    let json = serde_json::to_string(entries).map_err(|err| RidgeprintError::TemplateFormat {
        reason: err.to_string(),
    })?;
    fs::write(path, json).map_err(|err| RidgeprintError::TemplateIo {
        reason: err.to_string(),
    })
}

/// Reads a JSON array of pairs from `path`, preserving order.
pub fn load_entries<P: AsRef<Path>>(path: P) -> RidgeprintResult<Vec<TemplateEntry>> {
    let text = fs::read_to_string(path).map_err(|err| RidgeprintError::TemplateIo {
        reason: err.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|err| RidgeprintError::TemplateFormat {
        reason: err.to_string(),
    })
}

/// Directory of named templates, one `<name>.tmplt` file each.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the file path for a template name.
    pub fn path_for(&self, name: &str) -> RidgeprintResult<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(RidgeprintError::TemplateIo {
                reason: format!("invalid template name {name:?}"),
            });
        }
        Ok(self.root.join(format!("{name}.{TEMPLATE_EXTENSION}")))
    }

    /// Saves `entries` under `name`, creating the store directory if needed.
    pub fn save(&self, name: &str, entries: &[TemplateEntry]) -> RidgeprintResult<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root).map_err(|err| RidgeprintError::TemplateIo {
            reason: err.to_string(),
        })?;
        save_entries(&path, entries)?;
        Ok(path)
    }

    /// Loads the entries stored under `name`.
    pub fn load(&self, name: &str) -> RidgeprintResult<Vec<TemplateEntry>> {
        load_entries(self.path_for(name)?)
    }

    /// True when a template file exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }
}
