//! Amenity service: use-cases for managing amenities.

use std::sync::Arc;

use hbnb_domain::amenity::{Amenity, AmenityUpdate};
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::Model;

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Application service for amenity CRUD operations.
pub struct AmenityService<S> {
    storage: Arc<S>,
}

impl<S: Storage> AmenityService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List all amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        self.storage.list::<Amenity>().await
    }

    /// Look up an amenity by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no amenity with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_amenity(&self, id: AmenityId) -> Result<Amenity, HbnbError> {
        require::<Amenity, _>(self.storage.as_ref(), id).await
    }

    /// Create a new amenity after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail, or a
    /// storage error from the backend.
    #[tracing::instrument(skip(self, amenity), fields(id = %amenity.id))]
    pub async fn create_amenity(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        amenity.validate()?;
        persist(self.storage.as_ref(), amenity).await
    }

    /// Update an existing amenity.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_amenity(
        &self,
        id: AmenityId,
        update: AmenityUpdate,
    ) -> Result<Amenity, HbnbError> {
        let mut amenity = self.get_amenity(id).await?;
        amenity.apply(update)?;
        persist(self.storage.as_ref(), amenity).await
    }

    /// Delete an amenity and unlink it from every place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_amenity(&self, id: AmenityId) -> Result<(), HbnbError> {
        let amenity = self.get_amenity(id).await?;
        cascade::delete(self.storage.as_ref(), amenity.key()).await
    }
}
