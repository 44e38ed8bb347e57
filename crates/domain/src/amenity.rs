//! Amenity: a feature a place can offer (Wifi, Oven, …).

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::AmenityId;
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub name: String,
}

impl Amenity {
    /// Create a new amenity with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HbnbError> {
        let created_at = time::now();
        let amenity = Self {
            id: AmenityId::new(),
            created_at,
            updated_at: created_at,
            name: name.into(),
        };
        amenity.validate()?;
        Ok(amenity)
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

    /// Apply mutable attributes.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: AmenityUpdate) -> Result<(), HbnbError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.validate()?;
        self.updated_at = time::touched(self.created_at);
        Ok(())
    }
}

/// Mutable attributes of an [`Amenity`].
#[derive(Debug, Default)]
pub struct AmenityUpdate {
    pub name: Option<String>,
}
