//! The catalog: the loaded state table plus its flower image index.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::error::{AssetError, TableError};
use crate::core::record::StateRecord;
use crate::core::table::StateTable;
use crate::io::assets::AssetIndex;
use crate::io::config::StateInfoConfig;
use crate::io::loader::load_table;

/// Owns all in-memory state for one run. Built once, then passed by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    table: StateTable,
    assets: AssetIndex,
}

impl Catalog {
    pub fn new(table: StateTable, assets: AssetIndex) -> Self {
        Self { table, assets }
    }

    /// Load the record file and resolve images as configured.
    pub fn open(cfg: &StateInfoConfig) -> Result<Self> {
        let table = load_table(&cfg.data_path).context("load state table")?;
        let assets = AssetIndex::resolve(&cfg.assets_dir, &table, cfg.asset_strategy)
            .context("resolve flower images")?;
        Ok(Self::new(table, assets))
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn assets(&self) -> &AssetIndex {
        &self.assets
    }

    pub fn update_population(
        &mut self,
        name: &str,
        value: i64,
    ) -> Result<&StateRecord, TableError> {
        self.table.update_population(name, value)
    }

    /// Image path for a state, or why there is none.
    pub fn flower_image(&self, name: &str) -> Result<&Path, AssetError> {
        self.assets.asset_for(name)
    }
}
