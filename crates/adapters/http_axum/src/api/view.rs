//! JSON representations returned by the API.

use serde::Serialize;

use hbnb_domain::id::{CityId, PlaceId, UserId};
use hbnb_domain::place::Place;
use hbnb_domain::record::{Kind, Model};
use hbnb_domain::time::Timestamp;
use hbnb_domain::user::User;

/// An entity body tagged with its `__class__`.
#[derive(Debug, Serialize)]
pub struct Resource<T> {
    #[serde(rename = "__class__")]
    class: Kind,
    #[serde(flatten)]
    body: T,
}

impl<T> Resource<T> {
    pub fn new(class: Kind, body: T) -> Self {
        Self { class, body }
    }
}

impl<M: Model + Serialize> Resource<M> {
    /// Tag a domain entity with its own kind.
    pub fn of(model: M) -> Self {
        Self::new(M::KIND, model)
    }

    pub fn all(models: Vec<M>) -> Vec<Self> {
        models.into_iter().map(Self::of).collect()
    }
}

/// A user without its password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    id: UserId,
    created_at: Timestamp,
    updated_at: Timestamp,
    email: String,
    first_name: String,
    last_name: String,
}

impl UserView {
    pub fn resource(user: User) -> Resource<Self> {
        Resource::new(Kind::User, Self::from(user))
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// A place without its amenity links, as returned by search.
#[derive(Debug, Serialize)]
pub struct PlaceSummary {
    id: PlaceId,
    created_at: Timestamp,
    updated_at: Timestamp,
    city_id: CityId,
    user_id: UserId,
    name: String,
    description: String,
    number_rooms: u32,
    number_bathrooms: u32,
    max_guest: u32,
    price_by_night: u32,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl PlaceSummary {
    pub fn resource(place: Place) -> Resource<Self> {
        Resource::new(Kind::Place, Self::from(place))
    }
}

impl From<Place> for PlaceSummary {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            created_at: place.created_at,
            updated_at: place.updated_at,
            city_id: place.city_id,
            user_id: place.user_id,
            name: place.name,
            description: place.description,
            number_rooms: place.number_rooms,
            number_bathrooms: place.number_bathrooms,
            max_guest: place.max_guest,
            price_by_night: place.price_by_night,
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}
