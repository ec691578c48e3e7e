//! Per-satellite prediction pipeline
//!
//! One catalog row fully completes (parse → initialize → sample → filter
//! → decide) before the next begins. A failing satellite is skipped with
//! its name logged; the batch never aborts on a single row.

use crate::elements::parse_record;
use crate::propagation::PropagationPort;
use crate::report::{FinalReport, FuturePass, ReportBuilder, SatelliteReport};
use crate::sampler::{sample_at, sample_window};
use crate::{PredictionError, PredictorConfig, Result};
use catalog_ingest::CatalogRecord;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Outcome for one catalog row. Skips carry the reason so the batch loop
/// can log and move on without catching anything.
pub enum Disposition {
    Included(SatelliteReport),
    NotInRegion,
    Skipped(String),
}

pub struct PassPredictor<P: PropagationPort> {
    port: P,
    config: PredictorConfig,
}

impl<P: PropagationPort> PassPredictor<P> {
    pub fn new(port: P, config: PredictorConfig) -> Self {
        Self { port, config }
    }

    /// Evaluate a single catalog row at the run instant.
    pub fn evaluate(&self, record: &CatalogRecord, now: DateTime<Utc>) -> Disposition {
        match self.predict(record, now) {
            Ok(Some(report)) => Disposition::Included(report),
            Ok(None) => Disposition::NotInRegion,
            Err(e) => Disposition::Skipped(e.to_string()),
        }
    }

    fn predict(&self, record: &CatalogRecord, now: DateTime<Utc>) -> Result<Option<SatelliteReport>> {
        let elements = parse_record(record)?;
        let handle = self.port.initialize(&elements)?;

        // No report is possible without a current position.
        let current = sample_at(&self.port, &handle, now, 0.0)
            .map_err(|_| PredictionError::NoCurrentPosition)?;
        let current_in_region = self
            .config
            .region
            .contains(current.position.latitude, current.position.longitude);

        let future_passes: Vec<FuturePass> = sample_window(&self.port, &handle, now, &self.config.window)
            .iter()
            .filter(|s| {
                self.config
                    .region
                    .contains(s.position.latitude, s.position.longitude)
            })
            .map(FuturePass::from_sample)
            .collect();

        if !current_in_region && future_passes.is_empty() {
            return Ok(None);
        }

        Ok(Some(SatelliteReport::new(
            elements.object_name.clone(),
            elements.norad_id,
            current.position,
            current_in_region,
            now,
            future_passes,
        )))
    }

    /// Run the whole catalog sequentially and build the final report.
    pub fn run(&self, records: &[CatalogRecord], now: DateTime<Utc>) -> FinalReport {
        let total = records.len();
        let progress_interval = (total / 20).max(1);
        let mut builder = ReportBuilder::new(self.config);
        let mut skipped = 0usize;

        info!(
            "Predicting passes for {} satellites over {} minutes ({} samples)",
            total, self.config.window.duration_minutes, self.config.window.samples
        );

        for (i, record) in records.iter().enumerate() {
            let name = record
                .object_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("UNKNOWN");

            match self.evaluate(record, now) {
                Disposition::Included(report) => {
                    debug!("{} matched the region", name);
                    builder.include(report);
                }
                Disposition::NotInRegion => {}
                Disposition::Skipped(reason) => {
                    skipped += 1;
                    warn!("Skipping {}: {}", name, reason);
                }
            }

            if (i + 1) % progress_interval == 0 {
                info!("Processed {}/{} satellites", i + 1, total);
            }
        }

        info!(
            "Done: {} of {} satellites matched ({} skipped)",
            builder.matched(),
            total,
            skipped
        );

        builder.build(total, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::testing::{FailingPropagator, FixedPropagator};
    use crate::{EARTH_RADIUS_KM, PredictionWindow, RegionBounds};
    use chrono::TimeZone;

    /// Cartesian position over a given geographic point, spherical Earth.
    fn position_over(lat_deg: f64, lon_deg: f64, altitude_km: f64) -> [f64; 3] {
        let r = EARTH_RADIUS_KM + altitude_km;
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        [
            r * lat.cos() * lon.cos(),
            r * lat.cos() * lon.sin(),
            r * lat.sin(),
        ]
    }

    fn record(name: &str) -> CatalogRecord {
        CatalogRecord {
            object_name: Some(name.to_string()),
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
        }
    }

    fn config() -> PredictorConfig {
        PredictorConfig {
            region: RegionBounds::default(),
            window: PredictionWindow::default(),
        }
    }

    #[test]
    fn test_in_region_satellite_is_included() {
        let port = FixedPropagator {
            position: position_over(35.5, -80.0, 420.0),
        };
        let predictor = PassPredictor::new(port, config());

        let report = predictor.run(&[record("SAT-A")], Utc::now());
        assert_eq!(report.total_processed, 1);
        assert_eq!(report.satellites_in_region, 1);

        let sat = &report.satellites[0];
        assert_eq!(sat.name, "SAT-A");
        assert!(sat.current_position.in_region);
        // Fixed position: every future sample is also in-region
        assert_eq!(sat.future_passes.len(), 36);
        assert_eq!(sat.future_passes[0].minutes_from_now, 0.0);
        assert_eq!(sat.future_passes[35].minutes_from_now, 175.0);
        assert!((sat.current_position.lat - 35.5).abs() < 1e-6);
        assert!((sat.current_position.lon - (-80.0)).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_region_satellite_is_discarded() {
        let port = FixedPropagator {
            position: position_over(10.0, 40.0, 500.0),
        };
        let predictor = PassPredictor::new(port, config());

        let report = predictor.run(&[record("SAT-B")], Utc::now());
        assert_eq!(report.total_processed, 1);
        assert_eq!(report.satellites_in_region, 0);
        assert!(report.satellites.is_empty());
    }

    #[test]
    fn test_bad_epoch_skips_without_aborting_batch() {
        let port = FixedPropagator {
            position: position_over(35.5, -80.0, 420.0),
        };
        let predictor = PassPredictor::new(port, config());

        let mut bad = record("SAT-BAD");
        bad.epoch = Some("not-a-date".to_string());

        let report = predictor.run(&[bad, record("SAT-GOOD")], Utc::now());
        assert_eq!(report.total_processed, 2);
        assert_eq!(report.satellites_in_region, 1);
        assert_eq!(report.satellites[0].name, "SAT-GOOD");
    }

    #[test]
    fn test_no_current_position_skips_satellite() {
        let predictor = PassPredictor::new(FailingPropagator, config());
        match predictor.evaluate(&record("SAT-C"), Utc::now()) {
            Disposition::Skipped(reason) => {
                assert!(reason.contains("no current position"), "reason: {}", reason)
            }
            _ => panic!("satellite without a current position must be skipped"),
        }
    }

    #[test]
    fn test_real_propagator_end_to_end() {
        // Whole-Earth region: the ISS must be somewhere over it.
        let everywhere = PredictorConfig {
            region: RegionBounds {
                lat_min: -90.0,
                lat_max: 90.0,
                lon_min: -180.0,
                lon_max: 180.0,
            },
            window: PredictionWindow::default(),
        };
        let predictor = PassPredictor::new(crate::propagation::Sgp4Propagator, everywhere);

        // Evaluate near the element epoch so the propagation stays valid.
        let now = Utc.with_ymd_and_hms(2022, 11, 10, 6, 0, 0).unwrap();
        let report = predictor.run(&[record("ISS (ZARYA)")], now);
        assert_eq!(report.satellites_in_region, 1);

        let sat = &report.satellites[0];
        assert!(sat.current_position.in_region);
        assert!(sat.current_position.lat.abs() <= 52.0); // bounded by inclination
        assert!(sat.current_position.altitude > 300.0 && sat.current_position.altitude < 500.0);
        assert_eq!(sat.future_passes.len(), 36);
    }
}
