//! Geofenced Satellite Pass Prediction
//!
//! Given a snapshot of public orbital elements, predicts which satellites
//! are currently over a fixed rectangular geographic region and which will
//! enter it within a bounded future window, sampled at discrete intervals.
//!
//! Pipeline: catalog row → normalized element set → propagation handle →
//! ground-track samples over a time grid → region filter → report.
//!
//! Ground tracks use a spherical Earth of radius 6371 km; latitude,
//! longitude, and altitude are approximate by design.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod elements;
pub mod predictor;
pub mod propagation;
pub mod region;
pub mod report;
pub mod sampler;

/// Spherical Earth radius in km used for all ground-track geometry.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Julian date of the propagation engine's zero epoch (1949 December 31 0h UT).
/// Element set epochs are stored as day offsets from this instant.
pub const ENGINE_EPOCH_JD: f64 = 2_433_281.5;

/// Julian date of the Unix epoch (1970 January 1 0h UT).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Minutes per day, for mean-motion unit rescaling.
pub const MINUTES_PER_DAY: f64 = 1440.0;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("unusable epoch {0:?}")]
    BadEpoch(String),
    #[error("propagator initialization failed: {0}")]
    InitFailed(String),
    #[error("propagation failed: {0}")]
    PropagationFailed(String),
    #[error("no current position available")]
    NoCurrentPosition,
}

pub type Result<T> = std::result::Result<T, PredictionError>;

/// A point on the ground track: geographic coordinates over the spherical
/// Earth model. Recomputed per sample, never mutated.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoPosition {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, normalized to (-180, 180].
    pub longitude: f64,
    /// Altitude in km above the spherical Earth surface.
    pub altitude_km: f64,
}

/// Rectangular geographic bounds. No antimeridian wraparound: min <= max
/// is required on both axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self {
            lat_min: 34.0,
            lat_max: 37.0,
            lon_min: -86.0,
            lon_max: -74.0,
        }
    }
}

/// Forward-looking sampling window: total duration and sample count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictionWindow {
    /// Total window duration in minutes. Must be > 0.
    pub duration_minutes: f64,
    /// Number of future samples. Must be >= 1.
    pub samples: u32,
}

impl PredictionWindow {
    /// Spacing between consecutive samples in minutes.
    ///
    /// Requires duration > 0 and samples >= 1.
    pub fn step_minutes(&self) -> f64 {
        debug_assert!(self.samples >= 1, "window requires at least one sample");
        debug_assert!(
            self.duration_minutes > 0.0,
            "window duration must be positive"
        );
        self.duration_minutes / self.samples as f64
    }
}

impl Default for PredictionWindow {
    fn default() -> Self {
        Self {
            duration_minutes: 180.0,
            samples: 36,
        }
    }
}

/// Immutable run configuration, injected at the top-level entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictorConfig {
    pub region: RegionBounds,
    pub window: PredictionWindow,
}

/// Continuous Julian date of a UTC instant.
pub fn julian_date(t: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + t.timestamp_millis() as f64 / 86_400_000.0
}
