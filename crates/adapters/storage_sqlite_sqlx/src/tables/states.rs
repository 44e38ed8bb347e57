//! `states` table.

use hbnb_domain::state::State;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO states (id, created_at, updated_at, name)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET updated_at = excluded.updated_at, name = excluded.name
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM states WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM states";

impl Table for State {
    const SELECT_ALL: &'static str = "SELECT * FROM states";
    const SELECT_BY_ID: &'static str = "SELECT * FROM states WHERE id = ?";

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            name: row.try_get("name")?,
        })
    }
}

pub(crate) async fn upsert(conn: &mut SqliteConnection, state: &State) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(state.id.to_string())
        .bind(timestamp(state.created_at))
        .bind(timestamp(state.updated_at))
        .bind(&state.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
