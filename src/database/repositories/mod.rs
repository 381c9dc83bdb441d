/// Repository pattern implementations for database access
///
/// - Climate: stations, trailing-year observations and temperature aggregates

pub mod climate;

pub use climate::{ClimateRepository, QueryError, QueryResult};
