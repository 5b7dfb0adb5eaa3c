//! Application configuration stored in `state_info.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "state_info.toml";

/// How flower images are matched to states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStrategy {
    /// Match each file stem against the normalized state name.
    #[default]
    ByName,
    /// Pair the i-th sorted file with the i-th table row.
    Positional,
}

/// Application configuration (TOML).
///
/// Missing fields default to values that work from a directory holding
/// `state_data.csv` and `flowerimg/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StateInfoConfig {
    /// Record file, one `name,capital,population,flower` row per line.
    pub data_path: PathBuf,

    /// Directory holding flower images.
    pub assets_dir: PathBuf,

    pub asset_strategy: AssetStrategy,

    /// Number of states shown by the population chart.
    pub top_n: usize,

    /// Width in characters of the longest chart bar.
    pub chart_width: usize,

    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Program and leading arguments used to open an image (e.g. `["xdg-open"]`).
    /// The image path is appended. Empty means print the path only.
    pub command: Vec<String>,

    /// How long to wait for the viewer to fail before leaving it running.
    pub launch_grace_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            launch_grace_ms: 500,
        }
    }
}

impl Default for StateInfoConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("state_data.csv"),
            assets_dir: PathBuf::from("flowerimg"),
            asset_strategy: AssetStrategy::default(),
            top_n: 5,
            chart_width: 40,
            viewer: ViewerConfig::default(),
        }
    }
}

impl StateInfoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(anyhow!("data_path must not be empty"));
        }
        if self.top_n == 0 {
            return Err(anyhow!("top_n must be > 0"));
        }
        if self.chart_width == 0 {
            return Err(anyhow!("chart_width must be > 0"));
        }
        if let Some(program) = self.viewer.command.first()
            && program.trim().is_empty()
        {
            return Err(anyhow!("viewer.command must start with a program name"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `StateInfoConfig::default()`.
pub fn load_config(path: &Path) -> Result<StateInfoConfig> {
    if !path.exists() {
        let cfg = StateInfoConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: StateInfoConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &StateInfoConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
