//! Temporary SQLite climate stores for integration tests
//!
//! The fixture is written through a separate writable pool, then reopened
//! through `Database::connect`, which is read-only like production.

#![allow(dead_code)]

use climate_api::{api, config::Config, config::DbConfig, database::Database};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

const STATION_DDL: &str = "CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    )";

const MEASUREMENT_DDL: &str = "CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    )";

/// `(station, date, prcp, tobs)`
pub type MeasurementFixture<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

pub struct TestStore {
    _dir: TempDir,
    pub db: Database,
}

impl TestStore {
    pub fn router(&self) -> axum::Router {
        api::router(api::AppState::new(self.db.clone()), &Config::default())
    }
}

pub async fn store(stations: &[(&str, &str)], measurements: &[MeasurementFixture<'_>]) -> TestStore {
    build(&[STATION_DDL, MEASUREMENT_DDL], stations, measurements).await
}

/// A store whose `measurement` table was never created; every query on it fails.
pub async fn store_without_measurements(stations: &[(&str, &str)]) -> TestStore {
    build(&[STATION_DDL], stations, &[]).await
}

async fn build(
    schema: &[&str],
    stations: &[(&str, &str)],
    measurements: &[MeasurementFixture<'_>],
) -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("climate.sqlite");

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true),
        )
        .await
        .expect("create fixture store");

    for ddl in schema {
        sqlx::query(ddl).execute(&writer).await.expect("create table");
    }

    for (station, name) in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(*station)
            .bind(*name)
            .execute(&writer)
            .await
            .expect("insert station");
    }

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&writer)
            .await
            .expect("insert measurement");
    }

    writer.close().await;

    let db = Database::connect(&DbConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 2,
        acquire_timeout_secs: 5,
    })
    .await
    .expect("open fixture store read-only");

    TestStore { _dir: dir, db }
}

pub fn hawaii_stations() -> Vec<(&'static str, &'static str)> {
    vec![
        ("USC00519397", "WAIKIKI 717.2, HI US"),
        ("USC00513117", "KANEOHE 838.1, HI US"),
        ("USC00519281", "WAIHEE 837.5, HI US"),
    ]
}

/// Measurements spanning 2016-08-22 to 2017-08-23.
///
/// On or after 2017-01-01 the temperatures are 60, 70 and 75 (mean 68.33).
/// USC00519281 has the most rows.
pub fn hawaii_measurements() -> Vec<MeasurementFixture<'static>> {
    vec![
        ("USC00519397", "2016-08-22", Some(0.40), Some(90.0)),
        ("USC00519397", "2016-08-23", Some(0.00), Some(81.0)),
        ("USC00513117", "2016-08-23", None, Some(76.0)),
        ("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
        ("USC00519281", "2016-12-31", Some(0.10), None),
        ("USC00519281", "2017-01-01", Some(0.02), Some(60.0)),
        ("USC00519281", "2017-05-10", None, Some(70.0)),
        ("USC00519397", "2017-08-23", Some(0.00), Some(75.0)),
    ]
}
