//! Review: a user's text about a place.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::{PlaceId, ReviewId, UserId};
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub place_id: PlaceId,
    pub user_id: UserId,
    pub text: String,
}

impl Review {
    /// Create a review of `place_id` written by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `text` is empty.
    pub fn new(
        place_id: PlaceId,
        user_id: UserId,
        text: impl Into<String>,
    ) -> Result<Self, HbnbError> {
        let created_at = time::now();
        let review = Self {
            id: ReviewId::new(),
            created_at,
            updated_at: created_at,
            place_id,
            user_id,
            text: text.into(),
        };
        review.validate()?;
        Ok(review)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `text` is empty.
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.text.is_empty() {
            return Err(ValidationError::MissingField("text").into());
        }
        Ok(())
    }

    /// Apply mutable attributes. The place and author are fixed.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: ReviewUpdate) -> Result<(), HbnbError> {
        if let Some(text) = update.text {
            self.text = text;
        }
        self.validate()?;
        self.updated_at = time::touched(self.created_at);
        Ok(())
    }
}

/// Mutable attributes of a [`Review`].
#[derive(Debug, Default)]
pub struct ReviewUpdate {
    pub text: Option<String>,
}
