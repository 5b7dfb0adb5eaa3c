//! Flower image discovery and the state name to image mapping.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::core::error::AssetError;
use crate::core::table::StateTable;
use crate::io::config::AssetStrategy;

/// Explicit mapping from state name to image path, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetIndex {
    assets: HashMap<String, PathBuf>,
    unavailable: BTreeMap<String, AssetError>,
    unclaimed: Vec<PathBuf>,
}

impl AssetIndex {
    /// Scan `dir` and match its images to the rows of `table`.
    ///
    /// A missing directory yields an index where every lookup fails.
    #[instrument(skip_all, fields(dir = %dir.display(), ?strategy))]
    pub fn resolve(dir: &Path, table: &StateTable, strategy: AssetStrategy) -> Result<Self> {
        let files = if dir.is_dir() {
            list_images(dir)?
        } else {
            warn!("asset directory missing; flower images unavailable");
            Vec::new()
        };
        let index = match strategy {
            AssetStrategy::ByName => Self::by_name(files, table),
            AssetStrategy::Positional => Self::positional(files, table),
        };
        info!(
            mapped = index.assets.len(),
            unavailable = index.unavailable.len(),
            unclaimed = index.unclaimed.len(),
            "asset index resolved"
        );
        Ok(index)
    }

    fn by_name(files: Vec<PathBuf>, table: &StateTable) -> Self {
        let mut by_key: HashMap<String, PathBuf> = HashMap::new();
        let mut unclaimed = Vec::new();
        for file in files {
            let key = file
                .file_stem()
                .map(|stem| normalize_name(&stem.to_string_lossy()))
                .unwrap_or_default();
            if key.is_empty() || by_key.contains_key(&key) {
                unclaimed.push(file);
                continue;
            }
            by_key.insert(key, file);
        }

        let mut index = Self::default();
        for record in table.list_all() {
            if index.assets.contains_key(&record.name) {
                continue;
            }
            match by_key.remove(&normalize_name(&record.name)) {
                Some(file) => {
                    index.assets.insert(record.name.clone(), file);
                }
                None => {
                    index.unavailable.insert(
                        record.name.clone(),
                        AssetError::Unmapped {
                            name: record.name.clone(),
                        },
                    );
                }
            }
        }
        unclaimed.extend(by_key.into_values());
        unclaimed.sort();
        index.unclaimed = unclaimed;
        index
    }

    fn positional(files: Vec<PathBuf>, table: &StateTable) -> Self {
        let available = files.len();
        if available != table.len() {
            warn!(
                images = available,
                rows = table.len(),
                "image count does not match row count; positional pairing is unreliable"
            );
        }
        let mut index = Self::default();
        let mut files = files.into_iter();
        for (position, record) in table.list_all().iter().enumerate() {
            match files.next() {
                Some(file) => {
                    index.assets.entry(record.name.clone()).or_insert(file);
                }
                None => {
                    index
                        .unavailable
                        .entry(record.name.clone())
                        .or_insert_with(|| AssetError::OutOfRange {
                            name: record.name.clone(),
                            position,
                            available,
                        });
                }
            }
        }
        index.unclaimed = files.collect();
        index
    }

    /// Image path for `name`, or the reason none is available.
    pub fn asset_for(&self, name: &str) -> Result<&Path, AssetError> {
        if let Some(path) = self.assets.get(name) {
            return Ok(path);
        }
        Err(self
            .unavailable
            .get(name)
            .cloned()
            .unwrap_or_else(|| AssetError::Unmapped {
                name: name.to_string(),
            }))
    }

    /// States with no image, ordered by name.
    pub fn unavailable(&self) -> impl Iterator<Item = &AssetError> {
        self.unavailable.values()
    }

    /// Image files that no state claimed, sorted by path.
    pub fn unclaimed(&self) -> &[PathBuf] {
        &self.unclaimed
    }

    pub fn mapped_len(&self) -> usize {
        self.assets.len()
    }
}

/// Lowercase, collapse each run of non-alphanumerics into `_`, trim `_`.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Regular, non-hidden files in `dir`, sorted by file name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.context("read entry")?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
