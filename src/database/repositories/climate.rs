//! Read-only queries over the `station` and `measurement` tables

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::debug;

use crate::database::models::{
    MeasurementRow, StationActivityRow, StationRow, TemperatureAggregateRow,
};
use crate::domain::{
    trailing_window_start, Measurement, PrecipitationObservation, Station,
    StationTemperatureHistory, TemperatureObservation, TemperatureStats,
};

#[derive(Debug, Error)]
pub enum QueryError {
    /// A well-formed query matched no measurements.
    #[error("no matching measurements")]
    NoData,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;

const TEMPERATURE_AGGREGATE: &str = r#"
    SELECT MIN(tobs) AS min_tobs,
           MAX(tobs) AS max_tobs,
           AVG(tobs) AS avg_tobs,
           COUNT(tobs) AS tobs_count
    FROM measurement
"#;

/// Query service for the climate store
///
/// Operations issuing more than one statement run inside a single read
/// transaction; it is rolled back on drop if an error cuts the operation
/// short, so no connection outlives the call.
pub struct ClimateRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ClimateRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All rows within 365 days of the most recent measurement date.
    ///
    /// Rows with a NULL precipitation are kept.
    pub async fn precipitation_last_year(&self) -> QueryResult<Vec<PrecipitationObservation>> {
        let mut tx = self.pool.begin().await?;

        let Some(latest) = latest_date(&mut tx, None).await? else {
            debug!("measurement table is empty");
            return Ok(Vec::new());
        };
        let since = trailing_window_start(latest);

        let rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT station, date, prcp, tobs
            FROM measurement
            WHERE date >= ?1
            "#,
        )
        .bind(since)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(%latest, %since, rows = rows.len(), "fetched trailing-year precipitation");

        Ok(rows
            .into_iter()
            .map(Measurement::from)
            .map(PrecipitationObservation::from)
            .collect())
    }

    /// All stations, ordered by station id descending.
    pub async fn list_stations(&self) -> QueryResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT station, name
            FROM station
            ORDER BY station DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        debug!(stations = rows.len(), "listed stations");

        Ok(rows.into_iter().map(Station::from).collect())
    }

    /// Temperature readings of the station with the most measurements,
    /// over the 365 days ending at that station's own latest date.
    ///
    /// Ties on the measurement count go to the smallest station id.
    pub async fn most_active_station_tobs_last_year(
        &self,
    ) -> QueryResult<StationTemperatureHistory> {
        let mut tx = self.pool.begin().await?;

        let most_active = sqlx::query_as::<_, StationActivityRow>(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(QueryError::NoData)?;

        let latest = latest_date(&mut tx, Some(&most_active.station))
            .await?
            .ok_or(QueryError::NoData)?;
        let since = trailing_window_start(latest);

        let rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT station, date, prcp, tobs
            FROM measurement
            WHERE station = ?1 AND date >= ?2
            "#,
        )
        .bind(most_active.station.as_str())
        .bind(since)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            station = %most_active.station,
            observations = most_active.observations,
            %latest,
            %since,
            rows = rows.len(),
            "fetched most active station temperatures"
        );

        Ok(StationTemperatureHistory {
            station_id: most_active.station,
            observations: rows
                .into_iter()
                .map(Measurement::from)
                .map(TemperatureObservation::from)
                .collect(),
        })
    }

    /// Min/max/avg temperature across all stations on or after `start`.
    pub async fn temperature_stats_from(&self, start: NaiveDate) -> QueryResult<TemperatureStats> {
        let row = sqlx::query_as::<_, TemperatureAggregateRow>(&format!(
            "{TEMPERATURE_AGGREGATE} WHERE date >= ?1"
        ))
        .bind(start)
        .fetch_one(self.pool)
        .await?;

        debug!(%start, matched = row.tobs_count, "aggregated temperatures");

        row.into_stats().ok_or(QueryError::NoData)
    }

    /// Min/max/avg temperature across all stations in `[start, end]`.
    pub async fn temperature_stats_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> QueryResult<TemperatureStats> {
        let row = sqlx::query_as::<_, TemperatureAggregateRow>(&format!(
            "{TEMPERATURE_AGGREGATE} WHERE date >= ?1 AND date <= ?2"
        ))
        .bind(start)
        .bind(end)
        .fetch_one(self.pool)
        .await?;

        debug!(%start, %end, matched = row.tobs_count, "aggregated temperatures");

        row.into_stats().ok_or(QueryError::NoData)
    }
}

/// Most recent measurement date, optionally restricted to one station.
async fn latest_date(
    tx: &mut Transaction<'_, Sqlite>,
    station: Option<&str>,
) -> QueryResult<Option<NaiveDate>> {
    let latest = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT date
        FROM measurement
        WHERE ?1 IS NULL OR station = ?1
        ORDER BY date DESC
        LIMIT 1
        "#,
    )
    .bind(station)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(latest)
}
