//! Region membership
//!
//! Pure predicates over the configured rectangular bounds. Longitude is
//! always normalized before comparison; regions crossing the ±180°
//! boundary are not supported.

use crate::RegionBounds;

/// Reduce a longitude into (-180, 180] degrees. Idempotent.
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

impl RegionBounds {
    /// True when the coordinate lies inside the bounds, inclusive on all
    /// edges. Longitude is normalized first.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let lon = normalize_longitude(lon);
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}
