//! GP Element Catalog Ingest
//!
//! Retrieves a public general-perturbations element catalog over HTTP,
//! stages it to local storage, and exposes the staged CSV as a sequence
//! of tolerant, string-typed rows. Interpretation of the fields (unit
//! conversion, epoch handling) belongs to the consumer.

use serde::Deserialize;
use thiserror::Error;

pub mod fetch;
pub mod rows;

pub use fetch::{fetch_catalog, CELESTRAK_GP_URL};
pub use rows::read_records;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog at {0} contains no rows")]
    EmptyCatalog(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// One raw catalog row, column names as published by the GP CSV endpoint.
///
/// Every field is optional text: a missing or malformed column must never
/// fail the read. Downstream parsing decides what a row is worth.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CatalogRecord {
    pub object_name: Option<String>,
    pub norad_cat_id: Option<String>,
    pub epoch: Option<String>,
    pub mean_motion: Option<String>,
    pub eccentricity: Option<String>,
    pub inclination: Option<String>,
    pub ra_of_asc_node: Option<String>,
    pub arg_of_pericenter: Option<String>,
    pub mean_anomaly: Option<String>,
    pub bstar: Option<String>,
    pub mean_motion_dot: Option<String>,
    pub mean_motion_ddot: Option<String>,
}
