//! Staged catalog reading

use crate::{CatalogError, CatalogRecord, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Read all rows from a staged catalog CSV.
///
/// Rows are returned in source order. Individual missing columns become
/// `None`; only structural CSV problems fail the read. An empty catalog
/// is an error, since a run without input has nothing to predict.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<CatalogRecord>> {
    let path = path.as_ref();
    info!("Reading catalog rows from {:?}", path);

    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for row in reader.deserialize::<CatalogRecord>() {
        records.push(row?);
    }

    if records.is_empty() {
        return Err(CatalogError::EmptyCatalog(format!("{}", path.display())));
    }

    info!("Read {} catalog rows", records.len());
    Ok(records)
}
