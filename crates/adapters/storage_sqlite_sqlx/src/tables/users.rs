//! `users` table.

use hbnb_domain::user::User;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO users (id, created_at, updated_at, email, password, first_name, last_name)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET
        updated_at = excluded.updated_at,
        password = excluded.password,
        first_name = excluded.first_name,
        last_name = excluded.last_name
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM users";

impl Table for User {
    const SELECT_ALL: &'static str = "SELECT * FROM users";
    const SELECT_BY_ID: &'static str = "SELECT * FROM users WHERE id = ?";

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        })
    }
}

pub(crate) async fn upsert(conn: &mut SqliteConnection, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(user.id.to_string())
        .bind(timestamp(user.created_at))
        .bind(timestamp(user.updated_at))
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
