//! Place: a listing in a [`City`](crate::city::City), owned by a
//! [`User`](crate::user::User), linked to any number of
//! [`Amenity`](crate::amenity::Amenity) records.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::{AmenityId, CityId, PlaceId, UserId};
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub city_id: CityId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Linked amenities, in link order.
    #[serde(default)]
    pub amenity_ids: Vec<AmenityId>,
}

impl Place {
    #[must_use]
    pub fn builder(city_id: CityId, user_id: UserId) -> PlaceBuilder {
        PlaceBuilder {
            city_id,
            user_id,
            id: None,
            update: PlaceUpdate::default(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        Ok(())
    }

    /// Apply mutable attributes. Owner, city and amenity links are not
    /// touched here.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: PlaceUpdate) -> Result<(), HbnbError> {
        self.assign(update);
        self.validate()?;
        self.touch();
        Ok(())
    }

    fn assign(&mut self, update: PlaceUpdate) {
        let PlaceUpdate {
            name,
            description,
            number_rooms,
            number_bathrooms,
            max_guest,
            price_by_night,
            latitude,
            longitude,
        } = update;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(number_rooms) = number_rooms {
            self.number_rooms = number_rooms;
        }
        if let Some(number_bathrooms) = number_bathrooms {
            self.number_bathrooms = number_bathrooms;
        }
        if let Some(max_guest) = max_guest {
            self.max_guest = max_guest;
        }
        if let Some(price_by_night) = price_by_night {
            self.price_by_night = price_by_night;
        }
        if latitude.is_some() {
            self.latitude = latitude;
        }
        if longitude.is_some() {
            self.longitude = longitude;
        }
    }

    fn touch(&mut self) {
        self.updated_at = time::touched(self.created_at);
    }

    #[must_use]
    pub fn has_amenity(&self, amenity_id: AmenityId) -> bool {
        self.amenity_ids.contains(&amenity_id)
    }

    /// Link an amenity. Returns `false` if it was already linked.
    pub fn link_amenity(&mut self, amenity_id: AmenityId) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id);
        self.touch();
        true
    }

    /// Unlink an amenity. Returns `false` if it was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: AmenityId) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| *id != amenity_id);
        if self.amenity_ids.len() == before {
            return false;
        }
        self.touch();
        true
    }
}

/// Mutable attributes of a [`Place`].
#[derive(Debug, Default)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Builder for [`Place`]; optional attributes reuse [`PlaceUpdate`].
#[derive(Debug)]
pub struct PlaceBuilder {
    city_id: CityId,
    user_id: UserId,
    id: Option<PlaceId>,
    update: PlaceUpdate,
}

impl PlaceBuilder {
    #[must_use]
    pub fn id(mut self, id: PlaceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.update.name = Some(name.into());
        self
    }

    /// Set every optional attribute present in `attributes`.
    #[must_use]
    pub fn attributes(mut self, attributes: PlaceUpdate) -> Self {
        let name = attributes.name.or(self.update.name.take());
        self.update = PlaceUpdate { name, ..attributes };
        self
    }

    /// Consume the builder, validate, and return a [`Place`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Place, HbnbError> {
        let created_at = time::now();
        let mut place = Place {
            id: self.id.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            city_id: self.city_id,
            user_id: self.user_id,
            name: String::new(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        };
        place.assign(self.update);
        place.validate()?;
        Ok(place)
    }
}
