//! `reviews` table.

use hbnb_domain::review::Review;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO reviews (id, created_at, updated_at, place_id, user_id, text)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET updated_at = excluded.updated_at, text = excluded.text
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM reviews WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM reviews";

impl Table for Review {
    const SELECT_ALL: &'static str = "SELECT * FROM reviews";
    const SELECT_BY_ID: &'static str = "SELECT * FROM reviews WHERE id = ?";

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            place_id: get_id(row, "place_id")?,
            user_id: get_id(row, "user_id")?,
            text: row.try_get("text")?,
        })
    }
}

pub(crate) async fn upsert(
    conn: &mut SqliteConnection,
    review: &Review,
) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(review.id.to_string())
        .bind(timestamp(review.created_at))
        .bind(timestamp(review.updated_at))
        .bind(review.place_id.to_string())
        .bind(review.user_id.to_string())
        .bind(&review.text)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
