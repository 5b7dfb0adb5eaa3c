//! Test-only helpers for building tables, fixture files, and viewers.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::core::record::StateRecord;
use crate::core::table::StateTable;
use crate::io::viewer::AssetViewer;

/// Rows used by [`sample_table`], in file order.
pub const SAMPLE_CSV: &str = "\
Alaska,Juneau,733391,Forget-Me-Not
California,Sacramento,39538223,California Poppy
Ohio,Columbus,11799448,Scarlet Carnation
Texas,Austin,29145505,Bluebonnet
Vermont,Montpelier,643077,Red Clover
";

/// Create a record with deterministic filler for the non-key columns.
pub fn record(name: &str, population: u64) -> StateRecord {
    StateRecord::new(name, format!("{name} City"), population, format!("{name} Flower"))
}

/// Five-state table with distinct populations (California largest, Texas second).
pub fn sample_table() -> StateTable {
    let records = vec![
        StateRecord::new("Alaska", "Juneau", 733_391, "Forget-Me-Not"),
        StateRecord::new("California", "Sacramento", 39_538_223, "California Poppy"),
        StateRecord::new("Ohio", "Columbus", 11_799_448, "Scarlet Carnation"),
        StateRecord::new("Texas", "Austin", 29_145_505, "Bluebonnet"),
        StateRecord::new("Vermont", "Montpelier", 643_077, "Red Clover"),
    ];
    StateTable::from_records(records)
}

/// Scratch directory holding a record file and an asset directory.
pub struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    /// Create a fixture with `csv` as the record file and an empty asset directory.
    pub fn new(csv: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        fs::write(dir.path().join("state_data.csv"), csv).context("write state_data.csv")?;
        fs::create_dir_all(dir.path().join("flowerimg")).context("create flowerimg")?;
        Ok(Self { dir })
    }

    /// Fixture with [`SAMPLE_CSV`] and one image per sample state, named by state.
    pub fn sample() -> Result<Self> {
        let fixture = Self::new(SAMPLE_CSV)?;
        for name in ["alaska", "california", "ohio", "texas", "vermont"] {
            fixture.add_asset(&format!("{name}.jpg"))?;
        }
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_path(&self) -> PathBuf {
        self.path().join("state_data.csv")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.path().join("flowerimg")
    }

    /// Create an empty file in the asset directory.
    pub fn add_asset(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.assets_dir().join(file_name);
        fs::write(&path, b"").with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// Viewer that records requested paths instead of launching anything.
#[derive(Default)]
pub struct RecordingViewer {
    pub shown: RefCell<Vec<PathBuf>>,
    pub fail: bool,
}

impl AssetViewer for RecordingViewer {
    fn show(&self, asset: &Path) -> Result<()> {
        self.shown.borrow_mut().push(asset.to_path_buf());
        if self.fail {
            bail!("viewer failed for {}", asset.display());
        }
        Ok(())
    }
}
