//! Position sampling
//!
//! Drives a propagation handle across a time grid and converts each raw
//! state vector to geographic coordinates. The same conversion is applied
//! to every sample; there is no caching between instants.

use crate::propagation::PropagationPort;
use crate::region::normalize_longitude;
use crate::{julian_date, GeoPosition, PredictionWindow, Result, EARTH_RADIUS_KM, MINUTES_PER_DAY};
use chrono::{DateTime, Utc};

/// A sampled ground-track point with its offset from the run instant.
#[derive(Debug, Clone, Copy)]
pub struct SampleResult {
    pub position: GeoPosition,
    /// Minutes from the run instant; 0 for the current sample.
    pub minutes_from_now: f64,
}

/// Future sampling offsets in minutes: `step·i` for `i in 0..samples`,
/// with `step = duration / samples`.
pub fn future_offsets(window: &PredictionWindow) -> Vec<f64> {
    let step = window.step_minutes();
    (0..window.samples).map(|i| step * i as f64).collect()
}

/// Convert a Cartesian position (km) to geographic coordinates over the
/// spherical Earth model.
pub fn position_to_geo(position: [f64; 3]) -> GeoPosition {
    let [x, y, z] = position;
    let horizontal = (x * x + y * y).sqrt();
    let radius = (x * x + y * y + z * z).sqrt();

    GeoPosition {
        latitude: z.atan2(horizontal).to_degrees(),
        longitude: normalize_longitude(y.atan2(x).to_degrees()),
        altitude_km: radius - EARTH_RADIUS_KM,
    }
}

/// Sample the ground track at one instant, `minutes_from_now` after `now`.
pub fn sample_at<P: PropagationPort>(
    port: &P,
    handle: &P::Handle,
    now: DateTime<Utc>,
    minutes_from_now: f64,
) -> Result<SampleResult> {
    let jd = julian_date(now) + minutes_from_now / MINUTES_PER_DAY;
    let state = port.propagate(handle, jd)?;
    Ok(SampleResult {
        position: position_to_geo(state.position),
        minutes_from_now,
    })
}

/// Sample the ground track across the future window. A failed instant is
/// dropped; the remaining samples are returned in grid order.
pub fn sample_window<P: PropagationPort>(
    port: &P,
    handle: &P::Handle,
    now: DateTime<Utc>,
    window: &PredictionWindow,
) -> Vec<SampleResult> {
    future_offsets(window)
        .into_iter()
        .filter_map(|offset| sample_at(port, handle, now, offset).ok())
        .collect()
}
