//! `amenities` table.

use hbnb_domain::amenity::Amenity;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO amenities (id, created_at, updated_at, name)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET updated_at = excluded.updated_at, name = excluded.name
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM amenities WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM amenities";

impl Table for Amenity {
    const SELECT_ALL: &'static str = "SELECT * FROM amenities";
    const SELECT_BY_ID: &'static str = "SELECT * FROM amenities WHERE id = ?";

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            name: row.try_get("name")?,
        })
    }
}

pub(crate) async fn upsert(
    conn: &mut SqliteConnection,
    amenity: &Amenity,
) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(amenity.id.to_string())
        .bind(timestamp(amenity.created_at))
        .bind(timestamp(amenity.updated_at))
        .bind(&amenity.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
