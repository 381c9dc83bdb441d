//! Station and measurement records plus the derived shapes served by the API.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Length of the trailing window used by the "last year" queries.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// A fixed weather-observation location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub station_id: String,
    pub name: String,
}

/// One station-day of recorded observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub station_id: String,
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
    pub temperature_observation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationObservation {
    pub station_id: String,
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
}

impl From<Measurement> for PrecipitationObservation {
    fn from(m: Measurement) -> Self {
        Self {
            station_id: m.station_id,
            date: m.date,
            precipitation: m.precipitation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    pub station_id: String,
    pub date: NaiveDate,
    pub temperature: Option<f64>,
}

impl From<Measurement> for TemperatureObservation {
    fn from(m: Measurement) -> Self {
        Self {
            station_id: m.station_id,
            date: m.date,
            temperature: m.temperature_observation,
        }
    }
}

/// The most active station and its trailing-window temperature readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTemperatureHistory {
    pub station_id: String,
    pub observations: Vec<TemperatureObservation>,
}

/// Min/max/avg temperature over a set of measurements.
///
/// `avg` is already rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl TemperatureStats {
    pub fn new(min: f64, max: f64, mean: f64) -> Self {
        Self {
            min,
            max,
            avg: round_to_tenth(mean),
        }
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Inclusive lower bound of the trailing window ending at `latest`.
pub fn trailing_window_start(latest: NaiveDate) -> NaiveDate {
    latest - Duration::days(TRAILING_WINDOW_DAYS)
}
