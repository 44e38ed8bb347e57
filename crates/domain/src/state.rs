//! State: a top-level region that groups cities.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::StateId;
use crate::time::{self, Timestamp};

/// A region such as "California".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub name: String,
}

impl State {
    /// Create a builder for constructing a [`State`].
    #[must_use]
    pub fn builder() -> StateBuilder {
        StateBuilder::default()
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

    /// Apply mutable attributes, re-validate, and advance `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: StateUpdate) -> Result<(), HbnbError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.validate()?;
        self.updated_at = time::touched(self.created_at);
        Ok(())
    }
}

/// Mutable attributes of a [`State`].
#[derive(Debug, Default)]
pub struct StateUpdate {
    pub name: Option<String>,
}

/// Step-by-step builder for [`State`].
#[derive(Debug, Default)]
pub struct StateBuilder {
    id: Option<StateId>,
    name: Option<String>,
}

impl StateBuilder {
    #[must_use]
    pub fn id(mut self, id: StateId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`State`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<State, HbnbError> {
        let created_at = time::now();
        let state = State {
            id: self.id.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            name: self.name.unwrap_or_default(),
        };
        state.validate()?;
        Ok(state)
    }
}
