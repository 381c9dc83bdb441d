use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path, State},
    http::Uri,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    api::{error::ApiError, AppState},
    domain::{
        parse_ddmmyyyy, PrecipitationObservation, Station, StationTemperatureHistory,
        TemperatureObservation, TemperatureStats,
    },
};

pub const WELCOME_PAGE: &str = "Welcome to the Climate App!<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>\
-------------------------------------------<br/>\
# Note: the date should follow the format ddmmyyyy";

/// Routes mounted under `/api/v1.0`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/:start", get(temperature_from))
        .route("/:start/:end", get(temperature_between))
}

#[derive(Debug, Serialize)]
pub struct PrecipitationEntry {
    pub station_id: String,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

impl From<PrecipitationObservation> for PrecipitationEntry {
    fn from(o: PrecipitationObservation) -> Self {
        Self {
            station_id: o.station_id,
            date: o.date,
            prcp: o.precipitation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
}

impl From<Station> for StationEntry {
    fn from(s: Station) -> Self {
        Self {
            station: s.station_id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TobsEntry {
    pub station_id: String,
    pub date: NaiveDate,
    pub tobs: Option<f64>,
}

impl From<TemperatureObservation> for TobsEntry {
    fn from(o: TemperatureObservation) -> Self {
        Self {
            station_id: o.station_id,
            date: o.date,
            tobs: o.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TobsResponse {
    pub station_id: String,
    pub results: Vec<TobsEntry>,
}

impl From<StationTemperatureHistory> for TobsResponse {
    fn from(h: StationTemperatureHistory) -> Self {
        Self {
            station_id: h.station_id,
            results: h.observations.into_iter().map(TobsEntry::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FromDateStats {
    pub from_date: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Serialize)]
pub struct DateRangeStats {
    /// `"YYYY-MM-DD / YYYY-MM-DD"`
    pub date: String,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Serialize)]
pub struct Results<T: Serialize> {
    pub results: T,
}

/// GET / - route listing
pub async fn welcome() -> impl IntoResponse {
    Html(WELCOME_PAGE)
}

/// GET /api/v1.0/precipitation - last twelve months of precipitation, all stations
pub async fn precipitation(
    State(st): State<AppState>,
) -> Result<Json<Vec<PrecipitationEntry>>, ApiError> {
    let rows = st.db.climate().precipitation_last_year().await?;
    Ok(Json(rows.into_iter().map(PrecipitationEntry::from).collect()))
}

/// GET /api/v1.0/stations - all stations, id descending
pub async fn stations(State(st): State<AppState>) -> Result<Json<Vec<StationEntry>>, ApiError> {
    let rows = st.db.climate().list_stations().await?;
    Ok(Json(rows.into_iter().map(StationEntry::from).collect()))
}

/// GET /api/v1.0/tobs - last twelve months of temperatures at the most active station
pub async fn tobs(State(st): State<AppState>) -> Result<Json<TobsResponse>, ApiError> {
    let history = st
        .db
        .climate()
        .most_active_station_tobs_last_year()
        .await
        .map_err(|e| {
            ApiError::from_query(e, || "No temperature observations found.".to_string())
        })?;
    Ok(Json(history.into()))
}

/// Last `n` path segments as sent, still percent-encoded, joined with `/`.
fn raw_date_segments(uri: &Uri, n: usize) -> String {
    let mut segments: Vec<&str> = uri.path().rsplit('/').take(n).collect();
    segments.reverse();
    segments.join("/")
}

/// A path segment that does not decode is bad date input like any other.
fn undecodable_date(rejection: PathRejection, uri: &Uri, segments: usize) -> ApiError {
    tracing::debug!(%rejection, path = uri.path(), "undecodable date segment");
    ApiError::NotFound(format!(
        "Data for the date {} not found.",
        raw_date_segments(uri, segments)
    ))
}

/// GET /api/v1.0/:start - temperature stats from `start` (ddmmyyyy) onwards
pub async fn temperature_from(
    State(st): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Results<FromDateStats>>, ApiError> {
    let Path(start) = path.map_err(|rejection| undecodable_date(rejection, &uri, 1))?;
    let not_found = || format!("Data for the date {start} not found.");

    let from_date = parse_ddmmyyyy(&start).map_err(|_| ApiError::NotFound(not_found()))?;
    let TemperatureStats { min, max, avg } = st
        .db
        .climate()
        .temperature_stats_from(from_date)
        .await
        .map_err(|e| ApiError::from_query(e, not_found))?;

    Ok(Json(Results {
        results: FromDateStats {
            from_date,
            min,
            max,
            avg,
        },
    }))
}

/// GET /api/v1.0/:start/:end - temperature stats for the inclusive range
pub async fn temperature_between(
    State(st): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Results<DateRangeStats>>, ApiError> {
    let Path((start, end)) = path.map_err(|rejection| undecodable_date(rejection, &uri, 2))?;
    let not_found = || format!("Data for the date {start}/{end} not found.");

    let (from, to) = match (parse_ddmmyyyy(&start), parse_ddmmyyyy(&end)) {
        (Ok(from), Ok(to)) => (from, to),
        _ => return Err(ApiError::NotFound(not_found())),
    };
    let TemperatureStats { min, max, avg } = st
        .db
        .climate()
        .temperature_stats_between(from, to)
        .await
        .map_err(|e| ApiError::from_query(e, not_found))?;

    Ok(Json(Results {
        results: DateRangeStats {
            date: format!("{from} / {to}"),
            min,
            max,
            avg,
        },
    }))
}
