//! Row mapping and SQL for each stored kind.
//!
//! Ids and timestamps are stored as TEXT (hyphenated UUID, RFC 3339).

pub(crate) mod amenities;
pub(crate) mod cities;
pub(crate) mod places;
pub(crate) mod reviews;
pub(crate) mod states;
pub(crate) mod users;

use std::str::FromStr;

use hbnb_domain::record::{Kind, Model};
use hbnb_domain::time::Timestamp;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};
use uuid::Uuid;

/// A domain type stored in its own table.
pub(crate) trait Table: Model + Unpin {
    const SELECT_ALL: &'static str;
    const SELECT_BY_ID: &'static str;

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper<T>(T);

impl<'r, T: Table> FromRow<'r, SqliteRow> for Wrapper<T> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        T::decode(row).map(Self)
    }
}

pub(crate) async fn fetch_all<T: Table>(
    conn: &mut SqliteConnection,
) -> Result<Vec<T>, sqlx::Error> {
    let rows: Vec<Wrapper<T>> = sqlx::query_as(T::SELECT_ALL).fetch_all(&mut *conn).await?;
    Ok(rows.into_iter().map(|w| w.0).collect())
}

pub(crate) async fn fetch_one<T: Table>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<T>, sqlx::Error> {
    let row: Option<Wrapper<T>> = sqlx::query_as(T::SELECT_BY_ID)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(|w| w.0))
}

pub(crate) async fn delete(
    conn: &mut SqliteConnection,
    kind: Kind,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    let query = match kind {
        Kind::Amenity => amenities::DELETE_BY_ID,
        Kind::City => cities::DELETE_BY_ID,
        Kind::Place => places::DELETE_BY_ID,
        Kind::Review => reviews::DELETE_BY_ID,
        Kind::State => states::DELETE_BY_ID,
        Kind::User => users::DELETE_BY_ID,
    };
    sqlx::query(query)
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub(crate) async fn count(conn: &mut SqliteConnection, kind: Kind) -> Result<usize, sqlx::Error> {
    let query = match kind {
        Kind::Amenity => amenities::COUNT,
        Kind::City => cities::COUNT,
        Kind::Place => places::COUNT,
        Kind::Review => reviews::COUNT,
        Kind::State => states::COUNT,
        Kind::User => users::COUNT,
    };
    let (count,): (i64,) = sqlx::query_as(query).fetch_one(&mut *conn).await?;
    usize::try_from(count).map_err(decode_error)
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn get_id<I>(row: &SqliteRow, column: &str) -> Result<I, sqlx::Error>
where
    I: FromStr,
    I::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;
    I::from_str(&value).map_err(decode_error)
}

fn get_timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let value: String = row.try_get(column)?;
    Ok(chrono::DateTime::parse_from_rfc3339(&value)
        .map_err(decode_error)?
        .to_utc())
}

fn get_count(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).map_err(decode_error)
}

fn timestamp(value: Timestamp) -> String {
    value.to_rfc3339()
}
