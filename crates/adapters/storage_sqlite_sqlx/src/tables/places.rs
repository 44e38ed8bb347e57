//! `places` table and the `place_amenity` link table.

use std::collections::HashMap;

use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::place::Place;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{Table, get_count, get_id, get_timestamp, timestamp};

const UPSERT: &str = r"
    INSERT INTO places (
        id, created_at, updated_at, city_id, user_id, name, description,
        number_rooms, number_bathrooms, max_guest, price_by_night, latitude, longitude
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET
        updated_at = excluded.updated_at,
        name = excluded.name,
        description = excluded.description,
        number_rooms = excluded.number_rooms,
        number_bathrooms = excluded.number_bathrooms,
        max_guest = excluded.max_guest,
        price_by_night = excluded.price_by_night,
        latitude = excluded.latitude,
        longitude = excluded.longitude
";

pub(crate) const DELETE_BY_ID: &str = "DELETE FROM places WHERE id = ?";
pub(crate) const COUNT: &str = "SELECT COUNT(*) FROM places";

const SELECT_LINKS: &str = "SELECT place_id, amenity_id FROM place_amenity ORDER BY rowid";
const SELECT_LINKS_OF: &str =
    "SELECT place_id, amenity_id FROM place_amenity WHERE place_id = ? ORDER BY rowid";
const DELETE_LINKS_OF: &str = "DELETE FROM place_amenity WHERE place_id = ?";
const INSERT_LINK: &str = "INSERT INTO place_amenity (place_id, amenity_id) VALUES (?, ?)";

impl Table for Place {
    const SELECT_ALL: &'static str = "SELECT * FROM places";
    const SELECT_BY_ID: &'static str = "SELECT * FROM places WHERE id = ?";

    /// Decodes the `places` row only; links are filled by [`attach_amenities`].
    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
            city_id: get_id(row, "city_id")?,
            user_id: get_id(row, "user_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            number_rooms: get_count(row, "number_rooms")?,
            number_bathrooms: get_count(row, "number_bathrooms")?,
            max_guest: get_count(row, "max_guest")?,
            price_by_night: get_count(row, "price_by_night")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            amenity_ids: Vec::new(),
        })
    }
}

/// One `place_amenity` row.
struct Link {
    place_id: PlaceId,
    amenity_id: AmenityId,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for Link {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            place_id: get_id(row, "place_id")?,
            amenity_id: get_id(row, "amenity_id")?,
        })
    }
}

/// Fill `amenity_ids` of every place from the link table, in link order.
pub(crate) async fn attach_amenities(
    conn: &mut SqliteConnection,
    places: &mut [Place],
) -> Result<(), sqlx::Error> {
    let links: Vec<Link> = match &*places {
        [] => return Ok(()),
        [place] => {
            sqlx::query_as(SELECT_LINKS_OF)
                .bind(place.id.to_string())
                .fetch_all(&mut *conn)
                .await?
        }
        _ => sqlx::query_as(SELECT_LINKS).fetch_all(&mut *conn).await?,
    };

    let mut by_place: HashMap<PlaceId, Vec<AmenityId>> = HashMap::new();
    for link in links {
        by_place.entry(link.place_id).or_default().push(link.amenity_id);
    }
    for place in places {
        place.amenity_ids = by_place.remove(&place.id).unwrap_or_default();
    }
    Ok(())
}

pub(crate) async fn upsert(conn: &mut SqliteConnection, place: &Place) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(place.id.to_string())
        .bind(timestamp(place.created_at))
        .bind(timestamp(place.updated_at))
        .bind(place.city_id.to_string())
        .bind(place.user_id.to_string())
        .bind(&place.name)
        .bind(&place.description)
        .bind(i64::from(place.number_rooms))
        .bind(i64::from(place.number_bathrooms))
        .bind(i64::from(place.max_guest))
        .bind(i64::from(place.price_by_night))
        .bind(place.latitude)
        .bind(place.longitude)
        .execute(&mut *conn)
        .await?;

    // rewrite the links so rowid order follows `amenity_ids`
    sqlx::query(DELETE_LINKS_OF)
        .bind(place.id.to_string())
        .execute(&mut *conn)
        .await?;
    for amenity_id in &place.amenity_ids {
        sqlx::query(INSERT_LINK)
            .bind(place.id.to_string())
            .bind(amenity_id.to_string())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
