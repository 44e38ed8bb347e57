//! City: belongs to exactly one [`State`](crate::state::State).

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::{CityId, StateId};
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub state_id: StateId,
    pub name: String,
}

impl City {
    #[must_use]
    pub fn builder(state_id: StateId) -> CityBuilder {
        CityBuilder {
            state_id,
            id: None,
            name: None,
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

    /// Apply mutable attributes. `state_id` cannot change after creation.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: CityUpdate) -> Result<(), HbnbError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.validate()?;
        self.updated_at = time::touched(self.created_at);
        Ok(())
    }
}

/// Mutable attributes of a [`City`].
#[derive(Debug, Default)]
pub struct CityUpdate {
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct CityBuilder {
    state_id: StateId,
    id: Option<CityId>,
    name: Option<String>,
}

impl CityBuilder {
    #[must_use]
    pub fn id(mut self, id: CityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`City`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<City, HbnbError> {
        let created_at = time::now();
        let city = City {
            id: self.id.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            state_id: self.state_id,
            name: self.name.unwrap_or_default(),
        };
        city.validate()?;
        Ok(city)
    }
}
