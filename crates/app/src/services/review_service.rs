//! Review service: use-cases for the reviews of a place.

use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{PlaceId, ReviewId};
use hbnb_domain::place::Place;
use hbnb_domain::record::Model;
use hbnb_domain::review::{Review, ReviewUpdate};
use hbnb_domain::user::User;

use super::{cascade, persist, require};
use crate::ports::Storage;

/// Application service for review operations.
pub struct ReviewService<S> {
    storage: Arc<S>,
}

impl<S: Storage> ReviewService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the reviews of a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// or a storage error from the backend.
    pub async fn list_reviews_of_place(&self, place_id: PlaceId) -> Result<Vec<Review>, HbnbError> {
        require::<Place, _>(self.storage.as_ref(), place_id).await?;
        let reviews = self.storage.list::<Review>().await?;
        Ok(reviews
            .into_iter()
            .filter(|review| review.place_id == place_id)
            .collect())
    }

    /// Look up a review by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no review with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_review(&self, id: ReviewId) -> Result<Review, HbnbError> {
        require::<Review, _>(self.storage.as_ref(), id).await
    }

    /// Create a review. Both the place and the author must exist.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or user does not
    /// exist, [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(
        skip(self, review),
        fields(id = %review.id, place_id = %review.place_id, user_id = %review.user_id)
    )]
    pub async fn create_review(&self, review: Review) -> Result<Review, HbnbError> {
        require::<Place, _>(self.storage.as_ref(), review.place_id).await?;
        require::<User, _>(self.storage.as_ref(), review.user_id).await?;
        review.validate()?;
        persist(self.storage.as_ref(), review).await
    }

    /// Update an existing review.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the review does not exist,
    /// [`HbnbError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_review(
        &self,
        id: ReviewId,
        update: ReviewUpdate,
    ) -> Result<Review, HbnbError> {
        let mut review = self.get_review(id).await?;
        review.apply(update)?;
        persist(self.storage.as_ref(), review).await
    }

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the review does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), HbnbError> {
        let review = self.get_review(id).await?;
        cascade::delete(self.storage.as_ref(), review.key()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStorage;
    use hbnb_domain::id::{CityId, UserId};

    struct Fixture {
        svc: ReviewService<InMemoryStorage>,
        place: Place,
        user: User,
    }

    async fn setup() -> Fixture {
        let storage = Arc::new(InMemoryStorage::default());
        let user = User::builder()
            .email("a@b.c")
            .password("pwd")
            .build()
            .unwrap();
        let place = Place::builder(CityId::new(), user.id)
            .name("Loft")
            .build()
            .unwrap();
        storage.stage(user.clone().into_record()).await.unwrap();
        storage.stage(place.clone().into_record()).await.unwrap();
        Fixture {
            svc: ReviewService::new(storage),
            place,
            user,
        }
    }

    #[tokio::test]
    async fn should_create_review_for_existing_place_and_user() {
        let fx = setup().await;
        let review = Review::new(fx.place.id, fx.user.id, "Great").unwrap();

        let created = fx.svc.create_review(review).await.unwrap();
        let reviews = fx.svc.list_reviews_of_place(fx.place.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, created.id);
    }

    #[tokio::test]
    async fn should_return_not_found_when_author_missing() {
        let fx = setup().await;
        let review = Review::new(fx.place.id, UserId::new(), "Great").unwrap();

        let result = fx.svc.create_review(review).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_listing_reviews_of_missing_place() {
        let fx = setup().await;
        let result = fx.svc.list_reviews_of_place(PlaceId::new()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_update_then_delete_review() {
        let fx = setup().await;
        let created = fx
            .svc
            .create_review(Review::new(fx.place.id, fx.user.id, "ok").unwrap())
            .await
            .unwrap();

        let updated = fx
            .svc
            .update_review(
                created.id,
                ReviewUpdate {
                    text: Some("great".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.text, "great");
        assert_eq!(updated.place_id, fx.place.id);

        fx.svc.delete_review(created.id).await.unwrap();
        assert!(
            fx.svc
                .list_reviews_of_place(fx.place.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
