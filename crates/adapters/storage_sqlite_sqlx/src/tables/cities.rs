//! `cities` table.

use hbnb_domain::city::City;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO cities (id, created_at, updated_at, state_id, name)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET updated_at = excluded.updated_at, name = excluded.name
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM cities WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM cities";

impl Table for City {
    const SELECT_ALL: &'static str = "SELECT * FROM cities";
    const SELECT_BY_ID: &'static str = "SELECT * FROM cities WHERE id = ?";

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            state_id: get_id(row, "state_id")?,
            name: row.try_get("name")?,
        })
    }
}

pub(crate) async fn upsert(conn: &mut SqliteConnection, city: &City) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(city.id.to_string())
        .bind(timestamp(city.created_at))
        .bind(timestamp(city.updated_at))
        .bind(city.state_id.to_string())
        .bind(&city.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
