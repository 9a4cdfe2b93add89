use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::fetch::RemoteSource;
use crate::tables::{load_records, PrefixTables};

/// Province prefix files, loaded in this order.
pub const PROVINCE_FILES: &[&str] = &[
    "prov-army_v1.csv",
    "prov-civil_v1.csv",
    "prov-spec_v1.csv",
];

/// City prefix files, loaded in this order.
pub const CITY_FILES: &[&str] = &[
    "city-civil_v1.csv",
    "city-army_v2.csv",
    "city-contries_v1.csv",
    "city-spec_v1.csv",
    "city-wj_v1.csv",
];

/// Create the base directory if it is missing. Creation failure is ignored
/// here and surfaces as a write error on the first download instead.
// TODO: surface create_dir_all failures directly rather than one step later.
fn ensure_data_dir(base: &Path) {
    if !base.exists() {
        info!(dir = %base.display(), "data directory missing, creating");
        let _ = fs::create_dir_all(base);
    }
}

/// Make sure `dir/name` exists locally, fetching it from `source` if not.
/// Returns the local path. A file already on disk is never re-fetched.
pub fn ensure_file_present(
    source: &dyn RemoteSource,
    dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.exists() {
        return Ok(path);
    }

    info!(file = %name, "data file missing, downloading");
    let bytes = source
        .fetch(name)
        .with_context(|| format!("downloading data file {}", name))?;
    fs::write(&path, &bytes).with_context(|| format!("writing data file {:?}", path))?;
    Ok(path)
}

fn load_all(
    source: &dyn RemoteSource,
    base: &Path,
    names: &[&str],
    table: &mut HashMap<String, String>,
) -> Result<()> {
    for name in names {
        let path = ensure_file_present(source, base, name)?;
        info!(file = %name, "loading data file");
        let merged = load_records(&path, table)
            .with_context(|| format!("loading data file {}", name))?;
        info!(file = %name, records = merged, "loaded");
    }
    Ok(())
}

/// Ensure the base directory and every reference file exist, then parse all
/// of them into fresh lookup tables. The first failure stops the sequence;
/// on error the caller gets no tables at all.
pub fn initialize(base: impl AsRef<Path>, source: &dyn RemoteSource) -> Result<PrefixTables> {
    let base = base.as_ref();
    ensure_data_dir(base);

    let mut tables = PrefixTables::default();
    load_all(source, base, PROVINCE_FILES, &mut tables.provinces)?;
    load_all(source, base, CITY_FILES, &mut tables.cities)?;
    Ok(tables)
}
