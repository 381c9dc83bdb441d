use chrono::NaiveDate;
use sqlx::FromRow;

use crate::domain::{Measurement, TemperatureStats};

/// `measurement` table row
///
/// `date` is stored as ISO `YYYY-MM-DD` text.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementRow {
    pub station: String,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            station_id: row.station,
            date: row.date,
            precipitation: row.prcp,
            temperature_observation: row.tobs,
        }
    }
}

/// Observation count per station
#[derive(Debug, Clone, FromRow)]
pub struct StationActivityRow {
    pub station: String,
    pub observations: i64,
}

/// Result of `MIN/MAX/AVG/COUNT(tobs)` over a date filter.
///
/// The aggregate always yields exactly one row; with no temperature values
/// in range the count is zero and the other columns are NULL.
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureAggregateRow {
    pub min_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub tobs_count: i64,
}

impl TemperatureAggregateRow {
    /// Convert into stats, or `None` when no temperature matched.
    pub fn into_stats(self) -> Option<TemperatureStats> {
        if self.tobs_count == 0 {
            return None;
        }
        match (self.min_tobs, self.max_tobs, self.avg_tobs) {
            (Some(min), Some(max), Some(avg)) => Some(TemperatureStats::new(min, max, avg)),
            _ => None,
        }
    }
}
