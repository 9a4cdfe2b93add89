use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Lookup tables mapping plate-prefix codes to display names, one for
/// provinces and one for cities. Built once by the initializer and read-only
/// afterward.
#[derive(Debug, Default)]
pub struct PrefixTables {
    pub(crate) provinces: HashMap<String, String>,
    pub(crate) cities: HashMap<String, String>,
}

impl PrefixTables {
    pub fn province(&self, code: &str) -> Option<&str> {
        self.provinces.get(code).map(String::as_str)
    }

    pub fn city(&self, code: &str) -> Option<&str> {
        self.cities.get(code).map(String::as_str)
    }

    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

/// Merge a headerless two-column CSV of (code, name) rows into `table`.
/// Later rows overwrite earlier ones on the same code. Returns how many
/// records were merged.
pub fn load_records(path: &Path, table: &mut HashMap<String, String>) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening data file {:?}", path))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut merged = 0;
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading record {} of {:?}", i + 1, path))?;
        if record.len() < 2 {
            bail!("record {} of {:?} has no value column", i + 1, path);
        }
        table.insert(record[0].to_string(), record[1].to_string());
        merged += 1;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_code_name_pairs() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "prov.csv", "11,Beijing\n12,Tianjin\n");

        let mut table = HashMap::new();
        let merged = load_records(&path, &mut table).unwrap();

        assert_eq!(merged, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table["11"], "Beijing");
        assert_eq!(table["12"], "Tianjin");
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "dup.csv", "11,Old\n11,New\n");

        let mut table = HashMap::new();
        load_records(&path, &mut table).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table["11"], "New");
    }

    #[test]
    fn single_column_row_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "bad.csv", "11,Beijing\norphan\n");

        let mut table = HashMap::new();
        assert!(load_records(&path, &mut table).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let mut table = HashMap::new();
        assert!(load_records(&tmp.path().join("nope.csv"), &mut table).is_err());
    }
}
