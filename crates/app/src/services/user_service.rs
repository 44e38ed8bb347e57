//! User service: account management with Argon2 password hashing.
//!
//! Clear-text passwords never reach storage: [`UserService::create_user`]
//! and [`UserService::update_user`] replace them with a PHC-format hash.

use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use hbnb_domain::error::{HbnbError, ValidationError};
use hbnb_domain::id::UserId;
use hbnb_domain::record::Model;
use hbnb_domain::user::{User, UserUpdate};
use rand::rngs::OsRng;

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Application service for user CRUD operations.
pub struct UserService<S> {
    storage: Arc<S>,
}

impl<S: Storage> UserService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_users(&self) -> Result<Vec<User>, HbnbError> {
        self.storage.list::<User>().await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no user with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_user(&self, id: UserId) -> Result<User, HbnbError> {
        require::<User, _>(self.storage.as_ref(), id).await
    }

    /// Create a user. `user.password` is taken as clear text and hashed.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail or the password
    /// cannot be hashed, or a storage error from the backend.
    #[tracing::instrument(skip(self, user), fields(id = %user.id))]
    pub async fn create_user(&self, mut user: User) -> Result<User, HbnbError> {
        user.validate()?;
        user.password = hash_password(&user.password)?;
        persist(self.storage.as_ref(), user).await
    }

    /// Update an existing user, hashing a new password if one is given.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_user(&self, id: UserId, mut update: UserUpdate) -> Result<User, HbnbError> {
        let mut user = self.get_user(id).await?;
        if let Some(password) = update.password.take() {
            if password.is_empty() {
                return Err(ValidationError::MissingField("password").into());
            }
            update.password = Some(hash_password(&password)?);
        }
        user.apply(update)?;
        persist(self.storage.as_ref(), user).await
    }

    /// Delete a user together with their places and reviews.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), HbnbError> {
        let user = self.get_user(id).await?;
        cascade::delete(self.storage.as_ref(), user.key()).await
    }
}

/// Hash a clear-text password with a fresh random salt.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPassword`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, HbnbError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::warn!(error = %err, "failed to hash password");
            ValidationError::InvalidPassword.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStorage;
    use argon2::{PasswordHash, PasswordVerifier};
    use hbnb_domain::id::CityId;
    use hbnb_domain::place::Place;

    fn verify_password(user: &User, password: &str) -> bool {
        PasswordHash::new(&user.password).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
    }

    fn make_service() -> (UserService<InMemoryStorage>, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::default());
        (UserService::new(Arc::clone(&storage)), storage)
    }

    fn valid_user() -> User {
        User::builder()
            .email("betty@holberton.io")
            .password("pwd")
            .first_name("Betty")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_store_hashed_password() {
        let (svc, _) = make_service();
        let created = svc.create_user(valid_user()).await.unwrap();

        assert_ne!(created.password, "pwd");
        assert!(created.password.starts_with("$argon2"));
        assert!(verify_password(&created, "pwd"));
        assert!(!verify_password(&created, "nope"));

        let fetched = svc.get_user(created.id).await.unwrap();
        assert_eq!(fetched.password, created.password);
    }

    #[tokio::test]
    async fn should_return_validation_error_when_email_empty() {
        let (svc, _) = make_service();
        let mut user = valid_user();
        user.email = String::new();

        let result = svc.create_user(user).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("email")))
        ));
    }

    #[tokio::test]
    async fn should_rehash_password_on_update() {
        let (svc, _) = make_service();
        let created = svc.create_user(valid_user()).await.unwrap();

        let updated = svc
            .update_user(
                created.id,
                UserUpdate {
                    password: Some("secret".to_string()),
                    last_name: Some("Holberton".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();

        assert!(verify_password(&updated, "secret"));
        assert!(!verify_password(&updated, "pwd"));
        assert_eq!(updated.last_name, "Holberton");
        assert_eq!(updated.email, created.email);
    }

    #[tokio::test]
    async fn should_keep_password_when_update_omits_it() {
        let (svc, _) = make_service();
        let created = svc.create_user(valid_user()).await.unwrap();

        let updated = svc
            .update_user(
                created.id,
                UserUpdate {
                    first_name: Some("Bob".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.password, created.password);
    }

    #[tokio::test]
    async fn should_delete_user_and_owned_places() {
        let (svc, storage) = make_service();
        let user = svc.create_user(valid_user()).await.unwrap();
        let place = Place::builder(CityId::new(), user.id)
            .name("Loft")
            .build()
            .unwrap();
        storage.stage(place.clone().into_record()).await.unwrap();

        svc.delete_user(user.id).await.unwrap();

        assert!(svc.list_users().await.unwrap().is_empty());
        assert!(storage.find::<Place>(place.id).await.unwrap().is_none());
    }
}
