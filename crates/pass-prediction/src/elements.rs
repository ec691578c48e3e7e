//! Element set parsing
//!
//! Converts one raw catalog row into a unit-normalized element set. Field
//! parsing is deliberately lenient: textual, numeric, or whitespace-padded
//! values are accepted, and a malformed field degrades to 0.0 (0 for the
//! catalog identifier) instead of failing the row. Changing that would
//! change observable output for dirty catalogs, so the contract stands.
//!
//! The only hard requirement is the epoch: a row whose epoch cannot be
//! parsed yields no element set.

use crate::{julian_date, PredictionError, Result, ENGINE_EPOCH_JD, MINUTES_PER_DAY};
use catalog_ingest::CatalogRecord;
use chrono::{DateTime, NaiveDateTime, Utc};

/// A validated, unit-normalized orbital element set for one satellite.
///
/// Mean motion and its derivatives are converted to the propagation
/// engine's per-minute convention; angles stay in catalog degrees and are
/// converted by the engine adapter.
#[derive(Debug, Clone)]
pub struct OrbitalElementSet {
    pub norad_id: u64,
    pub object_name: String,
    /// Days since the engine zero epoch (JD 2433281.5).
    pub epoch_days: f64,
    /// BSTAR drag term, per Earth radii.
    pub drag_term: f64,
    /// First mean-motion derivative, rev/min.
    pub mean_motion_dot: f64,
    /// Second mean-motion derivative, rev/min².
    pub mean_motion_ddot: f64,
    pub eccentricity: f64,
    /// Argument of pericenter, degrees.
    pub argument_of_pericenter_deg: f64,
    /// Inclination, degrees.
    pub inclination_deg: f64,
    /// Mean anomaly, degrees.
    pub mean_anomaly_deg: f64,
    /// Right ascension of the ascending node, degrees.
    pub right_ascension_deg: f64,
    /// Mean motion, rev/min.
    pub mean_motion: f64,
}

impl OrbitalElementSet {
    /// Julian date of this set's epoch.
    pub fn epoch_julian_date(&self) -> f64 {
        ENGINE_EPOCH_JD + self.epoch_days
    }
}

/// Tolerant numeric field: trimmed parse, 0.0 on anything unusable.
/// NaN and infinities collapse to the same default, so every stored field
/// is a finite real.
fn field_f64(raw: Option<&String>) -> f64 {
    let parsed = raw
        .map(|s| s.trim().parse::<f64>().unwrap_or(0.0))
        .unwrap_or(0.0);
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Tolerant identifier field: trimmed integer parse, 0 on failure. Accepts
/// a numeric representation with a fractional part ("25544.0").
fn field_id(raw: Option<&String>) -> u64 {
    let Some(s) = raw else { return 0 };
    let s = s.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
        .unwrap_or(0)
}

/// Parse the catalog's ISO-8601 epoch into a UTC instant.
fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for format in formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Convert one raw catalog row into an element set.
///
/// Fails only when the epoch is unusable; every other field degrades
/// silently to its default.
pub fn parse_record(record: &CatalogRecord) -> Result<OrbitalElementSet> {
    let epoch_raw = record.epoch.as_deref().unwrap_or("");
    let epoch = parse_epoch(epoch_raw)
        .ok_or_else(|| PredictionError::BadEpoch(epoch_raw.to_string()))?;

    let object_name = record
        .object_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("UNKNOWN")
        .to_string();

    Ok(OrbitalElementSet {
        norad_id: field_id(record.norad_cat_id.as_ref()),
        object_name,
        epoch_days: julian_date(epoch) - ENGINE_EPOCH_JD,
        drag_term: field_f64(record.bstar.as_ref()),
        mean_motion_dot: field_f64(record.mean_motion_dot.as_ref()) / MINUTES_PER_DAY,
        mean_motion_ddot: field_f64(record.mean_motion_ddot.as_ref())
            / (MINUTES_PER_DAY * MINUTES_PER_DAY),
        eccentricity: field_f64(record.eccentricity.as_ref()),
        argument_of_pericenter_deg: field_f64(record.arg_of_pericenter.as_ref()),
        inclination_deg: field_f64(record.inclination.as_ref()),
        mean_anomaly_deg: field_f64(record.mean_anomaly.as_ref()),
        right_ascension_deg: field_f64(record.ra_of_asc_node.as_ref()),
        mean_motion: field_f64(record.mean_motion.as_ref()) / MINUTES_PER_DAY,
    })
}
