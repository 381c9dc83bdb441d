//! Read-only JSON API over weather station metadata and daily
//! precipitation/temperature observations stored in SQLite.

pub mod api;
pub mod config;
pub mod database;
pub mod domain;
pub mod telemetry;
