//! State service: use-cases for managing states.

use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::StateId;
use hbnb_domain::record::Model;
use hbnb_domain::state::{State, StateUpdate};

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Application service for state CRUD operations.
pub struct StateService<S> {
    storage: Arc<S>,
}

impl<S: Storage> StateService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List all states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_states(&self) -> Result<Vec<State>, HbnbError> {
        self.storage.list::<State>().await
    }

    /// Look up a state by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no state with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_state(&self, id: StateId) -> Result<State, HbnbError> {
        require::<State, _>(self.storage.as_ref(), id).await
    }

    /// Create a new state after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail, or a
    /// storage error from the backend.
    #[tracing::instrument(skip(self, state), fields(id = %state.id))]
    pub async fn create_state(&self, state: State) -> Result<State, HbnbError> {
        state.validate()?;
        persist(self.storage.as_ref(), state).await
    }

    /// Update an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_state(&self, id: StateId, update: StateUpdate) -> Result<State, HbnbError> {
        let mut state = self.get_state(id).await?;
        state.apply(update)?;
        persist(self.storage.as_ref(), state).await
    }

    /// Delete a state together with its cities and everything below them.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_state(&self, id: StateId) -> Result<(), HbnbError> {
        let state = self.get_state(id).await?;
        cascade::delete(self.storage.as_ref(), state.key()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStorage;
    use hbnb_domain::city::City;
    use hbnb_domain::error::ValidationError;

    fn make_service() -> (StateService<InMemoryStorage>, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::default());
        (StateService::new(Arc::clone(&storage)), storage)
    }

    fn valid_state() -> State {
        State::builder().name("California").build().unwrap()
    }

    #[tokio::test]
    async fn should_create_state_when_valid() {
        let (svc, storage) = make_service();
        let state = valid_state();
        let id = state.id;

        let created = svc.create_state(state).await.unwrap();
        assert_eq!(created.id, id);
        assert_eq!(storage.saves(), 1);

        let fetched = svc.get_state(id).await.unwrap();
        assert_eq!(fetched.name, "California");
    }

    #[tokio::test]
    async fn should_return_validation_error_when_name_empty() {
        let (svc, _) = make_service();
        let mut state = valid_state();
        state.name = String::new();

        let result = svc.create_state(state).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_state_missing() {
        let (svc, _) = make_service();
        let result = svc.get_state(StateId::new()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_states() {
        let (svc, _) = make_service();
        svc.create_state(valid_state()).await.unwrap();
        svc.create_state(State::builder().name("Nevada").build().unwrap())
            .await
            .unwrap();

        let states = svc.list_states().await.unwrap();
        assert_eq!(states.len(), 2);
    }

    #[tokio::test]
    async fn should_rename_state_and_advance_updated_at() {
        let (svc, _) = make_service();
        let created = svc.create_state(valid_state()).await.unwrap();

        let updated = svc
            .update_state(
                created.id,
                StateUpdate {
                    name: Some("Oregon".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Oregon");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(svc.get_state(created.id).await.unwrap().name, "Oregon");
    }

    #[tokio::test]
    async fn should_delete_state_and_its_cities() {
        let (svc, storage) = make_service();
        let state = svc.create_state(valid_state()).await.unwrap();
        let city = City::builder(state.id).name("Fresno").build().unwrap();
        storage.stage(city.clone().into_record()).await.unwrap();

        svc.delete_state(state.id).await.unwrap();

        assert!(svc.list_states().await.unwrap().is_empty());
        assert!(storage.find::<City>(city.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_state() {
        let (svc, _) = make_service();
        let result = svc.delete_state(StateId::new()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }
}
