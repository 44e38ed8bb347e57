//! City service: use-cases for the cities of a state.

use std::sync::Arc;

use hbnb_domain::city::{City, CityUpdate};
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{CityId, StateId};
use hbnb_domain::record::Model;
use hbnb_domain::state::State;

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Application service for city operations.
pub struct CityService<S> {
    storage: Arc<S>,
}

impl<S: Storage> CityService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the cities of a state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// or a storage error from the backend.
    pub async fn list_cities_of_state(&self, state_id: StateId) -> Result<Vec<City>, HbnbError> {
        require::<State, _>(self.storage.as_ref(), state_id).await?;
        let cities = self.storage.list::<City>().await?;
        Ok(cities
            .into_iter()
            .filter(|city| city.state_id == state_id)
            .collect())
    }

    /// Look up a city by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no city with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_city(&self, id: CityId) -> Result<City, HbnbError> {
        require::<City, _>(self.storage.as_ref(), id).await
    }

    /// Create a city under its state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when `city.state_id` does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, city), fields(id = %city.id, state_id = %city.state_id))]
    pub async fn create_city(&self, city: City) -> Result<City, HbnbError> {
        require::<State, _>(self.storage.as_ref(), city.state_id).await?;
        city.validate()?;
        persist(self.storage.as_ref(), city).await
    }

    /// Update an existing city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_city(&self, id: CityId, update: CityUpdate) -> Result<City, HbnbError> {
        let mut city = self.get_city(id).await?;
        city.apply(update)?;
        persist(self.storage.as_ref(), city).await
    }

    /// Delete a city together with its places and their reviews.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_city(&self, id: CityId) -> Result<(), HbnbError> {
        let city = self.get_city(id).await?;
        cascade::delete(self.storage.as_ref(), city.key()).await
    }
}
