use sqlx::FromRow;

use crate::domain::Station;

/// `station` table row
#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub station: String,
    pub name: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            station_id: row.station,
            name: row.name,
        }
    }
}
