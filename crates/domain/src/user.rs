//! User: an account that owns places and writes reviews.
//!
//! Once stored, `password` holds an Argon2 hash. Values built here carry
//! whatever the caller supplied; the user service hashes them on write.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::UserId;
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `email` or `password` is empty.
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        Ok(())
    }

    /// Apply mutable attributes. `email` is fixed once the account exists.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: UserUpdate) -> Result<(), HbnbError> {
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        self.validate()?;
        self.updated_at = time::touched(self.created_at);
        Ok(())
    }
}

/// Mutable attributes of a [`User`].
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `email` or `password` is missing.
    pub fn build(self) -> Result<User, HbnbError> {
        let created_at = time::now();
        let user = User {
            id: self.id.unwrap_or_default(),
            created_at,
            updated_at: created_at,
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
        };
        user.validate()?;
        Ok(user)
    }
}
