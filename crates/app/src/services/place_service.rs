//! Place service: place CRUD, amenity links, and place search.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::place::{Place, PlaceUpdate};
use hbnb_domain::record::{Kind, Model};
use hbnb_domain::user::User;

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Filters accepted by [`PlaceService::search`]. Empty lists do not filter.
#[derive(Debug, Default)]
pub struct PlaceSearch {
    pub states: Vec<StateId>,
    pub cities: Vec<CityId>,
    pub amenities: Vec<AmenityId>,
}

impl PlaceSearch {
    fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.amenities.is_empty()
    }
}

/// Application service for place operations.
pub struct PlaceService<S> {
    storage: Arc<S>,
}

impl<S: Storage> PlaceService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the places of a city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist,
    /// or a storage error from the backend.
    pub async fn list_places_of_city(&self, city_id: CityId) -> Result<Vec<Place>, HbnbError> {
        require::<City, _>(self.storage.as_ref(), city_id).await?;
        let places = self.storage.list::<Place>().await?;
        Ok(places
            .into_iter()
            .filter(|place| place.city_id == city_id)
            .collect())
    }

    /// Look up a place by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no place with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_place(&self, id: PlaceId) -> Result<Place, HbnbError> {
        require::<Place, _>(self.storage.as_ref(), id).await
    }

    /// Create a place. Both the city and the owner must exist.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city or user does not
    /// exist, [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(
        skip(self, place),
        fields(id = %place.id, city_id = %place.city_id, user_id = %place.user_id)
    )]
    pub async fn create_place(&self, place: Place) -> Result<Place, HbnbError> {
        require::<City, _>(self.storage.as_ref(), place.city_id).await?;
        require::<User, _>(self.storage.as_ref(), place.user_id).await?;
        place.validate()?;
        persist(self.storage.as_ref(), place).await
    }

    /// Update an existing place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_place(&self, id: PlaceId, update: PlaceUpdate) -> Result<Place, HbnbError> {
        let mut place = self.get_place(id).await?;
        place.apply(update)?;
        persist(self.storage.as_ref(), place).await
    }

    /// Delete a place together with its reviews.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_place(&self, id: PlaceId) -> Result<(), HbnbError> {
        let place = self.get_place(id).await?;
        cascade::delete(self.storage.as_ref(), place.key()).await
    }

    /// Amenities linked to a place, in link order.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// or a storage error from the backend.
    pub async fn list_amenities(&self, id: PlaceId) -> Result<Vec<Amenity>, HbnbError> {
        let place = self.get_place(id).await?;
        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for amenity_id in place.amenity_ids {
            if let Some(amenity) = self.storage.find::<Amenity>(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    /// Link an amenity to a place. The flag is `false` when the link
    /// already existed, in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or amenity does not
    /// exist, or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn link_amenity(
        &self,
        id: PlaceId,
        amenity_id: AmenityId,
    ) -> Result<(Amenity, bool), HbnbError> {
        let mut place = self.get_place(id).await?;
        let amenity = require::<Amenity, _>(self.storage.as_ref(), amenity_id).await?;
        if !place.link_amenity(amenity_id) {
            return Ok((amenity, false));
        }
        persist(self.storage.as_ref(), place).await?;
        Ok((amenity, true))
    }

    /// Remove the link between a place and an amenity.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or amenity does not
    /// exist or they are not linked, or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn unlink_amenity(&self, id: PlaceId, amenity_id: AmenityId) -> Result<(), HbnbError> {
        let mut place = self.get_place(id).await?;
        require::<Amenity, _>(self.storage.as_ref(), amenity_id).await?;
        if !place.unlink_amenity(amenity_id) {
            return Err(NotFoundError::new(Kind::Amenity, amenity_id).into());
        }
        persist(self.storage.as_ref(), place).await?;
        Ok(())
    }

    /// Places matching the given filters.
    ///
    /// `states` selects the places of every city of each state, `cities`
    /// adds the places of those cities, and `amenities` keeps only places
    /// linked to every listed amenity, starting from every place when the
    /// state and city filters selected none. Unknown ids are ignored; an
    /// empty search returns every place.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn search(&self, filter: &PlaceSearch) -> Result<Vec<Place>, HbnbError> {
        let places = self.storage.list::<Place>().await?;
        if filter.is_empty() {
            return Ok(places);
        }

        let cities = self.storage.list::<City>().await?;
        let city_ids = selected_cities(&cities, filter);
        let mut by_city: HashMap<CityId, Vec<Place>> = HashMap::new();
        for place in places.iter().cloned() {
            by_city.entry(place.city_id).or_default().push(place);
        }
        let mut selected: Vec<Place> = city_ids
            .into_iter()
            .filter_map(|city_id| by_city.remove(&city_id))
            .flatten()
            .collect();

        if !filter.amenities.is_empty() {
            // amenities alone filter every place
            if selected.is_empty() {
                selected = places;
            }

            let mut required = Vec::with_capacity(filter.amenities.len());
            for amenity_id in &filter.amenities {
                if self.storage.find::<Amenity>(*amenity_id).await?.is_some() {
                    required.push(*amenity_id);
                }
            }
            selected.retain(|place| required.iter().all(|id| place.has_amenity(*id)));
        }

        Ok(selected)
    }
}

/// Cities of the listed states followed by the listed cities, deduplicated.
fn selected_cities(cities: &[City], filter: &PlaceSearch) -> Vec<CityId> {
    let mut seen = HashSet::new();
    let from_states = filter.states.iter().flat_map(|state_id| {
        cities
            .iter()
            .filter(move |city| city.state_id == *state_id)
            .map(|city| city.id)
    });
    let listed = filter
        .cities
        .iter()
        .copied()
        .filter(|city_id| cities.iter().any(|city| city.id == *city_id));
    from_states
        .chain(listed)
        .filter(|city_id| seen.insert(*city_id))
        .collect()
}
