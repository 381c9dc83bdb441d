//! Database models
//!
//! Row shapes for the two read-only tables, `station` and `measurement`.
//! These are kept apart from the domain records so that column names
//! (`station`, `prcp`, `tobs`) stay at the store boundary.

pub mod measurement;
pub mod station;

pub use measurement::{MeasurementRow, StationActivityRow, TemperatureAggregateRow};
pub use station::StationRow;
