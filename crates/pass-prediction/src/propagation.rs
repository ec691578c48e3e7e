//! Propagation capability
//!
//! The orbital-mechanics engine is an external dependency held behind a
//! small port: initialize an element set into an opaque handle, then ask
//! for a state vector at a Julian date. The core never interprets engine
//! internals, only success or failure per instant.

use crate::{elements::OrbitalElementSet, PredictionError, Result, MINUTES_PER_DAY, UNIX_EPOCH_JD};
use chrono::{DateTime, NaiveDateTime};

/// Inertial state at one instant: position and velocity in km and km/s.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

/// Capability interface over the propagation engine.
///
/// A handle is owned by one satellite for one run; it is never reused
/// across satellites or persisted. A propagation failure at one instant
/// carries no implication for other instants of the same handle.
pub trait PropagationPort {
    type Handle;

    fn initialize(&self, elements: &OrbitalElementSet) -> Result<Self::Handle>;

    fn propagate(&self, handle: &Self::Handle, julian_date: f64) -> Result<StateVector>;
}

/// SGP4-backed implementation of the port.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

/// Opaque per-satellite propagation state.
pub struct Sgp4Handle {
    constants: sgp4::Constants,
    epoch_jd: f64,
}

/// Recover a UTC naive datetime from a Julian date.
fn datetime_from_julian(jd: f64) -> Result<NaiveDateTime> {
    let millis = ((jd - UNIX_EPOCH_JD) * 86_400_000.0).round() as i64;
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.naive_utc())
        .ok_or_else(|| PredictionError::InitFailed(format!("epoch out of range: JD {}", jd)))
}

impl PropagationPort for Sgp4Propagator {
    type Handle = Sgp4Handle;

    fn initialize(&self, elements: &OrbitalElementSet) -> Result<Self::Handle> {
        let epoch_jd = elements.epoch_julian_date();

        // The engine consumes catalog-convention units (degrees, rev/day);
        // undo the per-minute normalization here.
        let engine_elements = sgp4::Elements {
            object_name: Some(elements.object_name.clone()),
            international_designator: None,
            norad_id: elements.norad_id,
            classification: sgp4::Classification::Unclassified,
            datetime: datetime_from_julian(epoch_jd)?,
            mean_motion_dot: elements.mean_motion_dot * MINUTES_PER_DAY,
            mean_motion_ddot: elements.mean_motion_ddot * MINUTES_PER_DAY * MINUTES_PER_DAY,
            drag_term: elements.drag_term,
            element_set_number: 0,
            inclination: elements.inclination_deg,
            right_ascension: elements.right_ascension_deg,
            eccentricity: elements.eccentricity,
            argument_of_perigee: elements.argument_of_pericenter_deg,
            mean_anomaly: elements.mean_anomaly_deg,
            mean_motion: elements.mean_motion * MINUTES_PER_DAY,
            revolution_number: 0,
            ephemeris_type: 0,
        };

        let constants = sgp4::Constants::from_elements(&engine_elements)
            .map_err(|e| PredictionError::InitFailed(format!("{:?}", e)))?;

        Ok(Sgp4Handle { constants, epoch_jd })
    }

    fn propagate(&self, handle: &Self::Handle, julian_date: f64) -> Result<StateVector> {
        let minutes_since_epoch = (julian_date - handle.epoch_jd) * MINUTES_PER_DAY;

        let prediction = handle
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes_since_epoch))
            .map_err(|e| PredictionError::PropagationFailed(format!("{:?}", e)))?;

        Ok(StateVector {
            position: prediction.position,
            velocity: prediction.velocity,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::parse_record;
    use crate::EARTH_RADIUS_KM;
    use catalog_ingest::CatalogRecord;

    fn iss_elements() -> OrbitalElementSet {
        let record = CatalogRecord {
            object_name: Some("ISS (ZARYA)".to_string()),
            norad_cat_id: Some("25544".to_string()),
            epoch: Some("2022-11-10T05:26:24.086688".to_string()),
            mean_motion: Some("15.50106675".to_string()),
            eccentricity: Some("0.0004257".to_string()),
            inclination: Some("51.6414".to_string()),
            ra_of_asc_node: Some("17.2241".to_string()),
            arg_of_pericenter: Some("68.3855".to_string()),
            mean_anomaly: Some("291.6687".to_string()),
            bstar: Some("0.000062276".to_string()),
            mean_motion_dot: Some("0.00002799".to_string()),
            mean_motion_ddot: Some("0".to_string()),
        };
        parse_record(&record).unwrap()
    }

    #[test]
    fn test_initialize_and_propagate_at_epoch() {
        let port = Sgp4Propagator;
        let elements = iss_elements();
        let handle = port.initialize(&elements).unwrap();

        let state = port.propagate(&handle, elements.epoch_julian_date()).unwrap();
        let [x, y, z] = state.position;
        let radius = (x * x + y * y + z * z).sqrt();

        assert!(radius.is_finite());
        // LEO: somewhere a few hundred km above the surface
        assert!(radius > EARTH_RADIUS_KM + 200.0, "radius {} too low", radius);
        assert!(radius < EARTH_RADIUS_KM + 2000.0, "radius {} too high", radius);
    }

    #[test]
    fn test_propagation_is_deterministic() {
        let port = Sgp4Propagator;
        let elements = iss_elements();
        let handle = port.initialize(&elements).unwrap();
        let jd = elements.epoch_julian_date() + 0.05;

        let a = port.propagate(&handle, jd).unwrap();
        let b = port.propagate(&handle, jd).unwrap();
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }

    #[test]
    fn test_datetime_from_julian_roundtrip() {
        let jd = 2_459_893.726667; // 2022-11-10 ~05:26 UT
        let datetime = datetime_from_julian(jd).unwrap();
        let back = crate::julian_date(datetime.and_utc());
        assert!((back - jd).abs() < 1e-8);
    }
}
