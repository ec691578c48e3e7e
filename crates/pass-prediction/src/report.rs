//! Report aggregation
//!
//! Collects the satellites that survived region filtering, plus run
//! metadata, into the final artifact. Region-membership flags serialize
//! as the literal strings "True"/"False"; the downstream consumer parses
//! those tokens, not native booleans.

use crate::sampler::SampleResult;
use crate::{GeoPosition, PredictorConfig, RegionBounds};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::time::Instant;

fn bool_as_text<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

/// Current-position snapshot for one satellite.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentPosition {
    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,
    pub timestamp: String,
    #[serde(serialize_with = "bool_as_text")]
    pub in_region: bool,
}

/// One future in-region ground-track sample.
#[derive(Debug, Clone, Serialize)]
pub struct FuturePass {
    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,
    pub minutes_from_now: f64,
}

impl FuturePass {
    pub fn from_sample(sample: &SampleResult) -> Self {
        Self {
            lat: sample.position.latitude,
            lon: sample.position.longitude,
            altitude: sample.position.altitude_km,
            minutes_from_now: sample.minutes_from_now,
        }
    }
}

/// One satellite that matched the region at least once.
#[derive(Debug, Clone, Serialize)]
pub struct SatelliteReport {
    pub name: String,
    pub norad_id: u64,
    pub current_position: CurrentPosition,
    pub future_passes: Vec<FuturePass>,
    pub details_url: String,
}

impl SatelliteReport {
    pub fn new(
        name: String,
        norad_id: u64,
        current: GeoPosition,
        current_in_region: bool,
        timestamp: DateTime<Utc>,
        future_passes: Vec<FuturePass>,
    ) -> Self {
        Self {
            name,
            norad_id,
            current_position: CurrentPosition {
                lat: current.latitude,
                lon: current.longitude,
                altitude: current.altitude_km,
                timestamp: timestamp.to_rfc3339(),
                in_region: current_in_region,
            },
            future_passes,
            details_url: format!("https://www.n2yo.com/satellite/?s={}", norad_id),
        }
    }
}

/// The complete run output. Built exactly once, immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub satellites: Vec<SatelliteReport>,
    pub timestamp: String,
    pub total_processed: usize,
    pub satellites_in_region: usize,
    pub region: RegionBounds,
    pub prediction_window_minutes: f64,
    pub processing_time: f64,
}

/// Accumulates included satellites and run metadata.
pub struct ReportBuilder {
    config: PredictorConfig,
    started: Instant,
    satellites: Vec<SatelliteReport>,
}

impl ReportBuilder {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
            satellites: Vec::new(),
        }
    }

    pub fn include(&mut self, satellite: SatelliteReport) {
        self.satellites.push(satellite);
    }

    pub fn matched(&self) -> usize {
        self.satellites.len()
    }

    pub fn build(self, total_processed: usize, generated_at: DateTime<Utc>) -> FinalReport {
        let elapsed = self.started.elapsed().as_secs_f64();
        FinalReport {
            satellites_in_region: self.satellites.len(),
            satellites: self.satellites,
            timestamp: generated_at.to_rfc3339(),
            total_processed,
            region: self.config.region,
            prediction_window_minutes: self.config.window.duration_minutes,
            processing_time: (elapsed * 100.0).round() / 100.0,
        }
    }
}
