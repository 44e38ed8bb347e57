//! Application services: use-case implementations.
//!
//! Each service struct shares one storage implementation via `Arc`
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod amenity_service;
pub mod city_service;
pub mod place_service;
pub mod review_service;
pub mod state_service;
pub mod stats_service;
pub mod user_service;

mod cascade;
#[cfg(test)]
mod testing;

use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::record::Model;

use crate::ports::Storage;

/// Fetch a record by id, turning absence into [`HbnbError::NotFound`].
async fn require<M: Model, S: Storage>(storage: &S, id: M::Id) -> Result<M, HbnbError> {
    storage
        .find::<M>(id)
        .await?
        .ok_or_else(|| NotFoundError::new(M::KIND, id).into())
}

/// Stage `model` and flush it, returning the persisted value.
async fn persist<M: Model, S: Storage>(storage: &S, model: M) -> Result<M, HbnbError> {
    storage.stage(model.clone().into_record()).await?;
    storage.save().await?;
    Ok(model)
}
