//! Shared application state for axum handlers.

use std::sync::Arc;

use hbnb_app::ports::Storage;
use hbnb_app::services::amenity_service::AmenityService;
use hbnb_app::services::city_service::CityService;
use hbnb_app::services::place_service::PlaceService;
use hbnb_app::services::review_service::ReviewService;
use hbnb_app::services::state_service::StateService;
use hbnb_app::services::stats_service::StatsService;
use hbnb_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage backend to avoid dynamic dispatch. Every service
/// shares the same storage instance. `Clone` is implemented manually so the
/// storage itself does not need to be `Clone`: only the `Arc` wrappers are
/// cloned.
pub struct AppState<S> {
    pub state_service: Arc<StateService<S>>,
    pub city_service: Arc<CityService<S>>,
    pub user_service: Arc<UserService<S>>,
    pub place_service: Arc<PlaceService<S>>,
    pub amenity_service: Arc<AmenityService<S>>,
    pub review_service: Arc<ReviewService<S>>,
    pub stats_service: Arc<StatsService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            state_service: Arc::clone(&self.state_service),
            city_service: Arc::clone(&self.city_service),
            user_service: Arc::clone(&self.user_service),
            place_service: Arc::clone(&self.place_service),
            amenity_service: Arc::clone(&self.amenity_service),
            review_service: Arc::clone(&self.review_service),
            stats_service: Arc::clone(&self.stats_service),
        }
    }
}

impl<S: Storage + 'static> AppState<S> {
    /// Create every service on top of one shared storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            state_service: Arc::new(StateService::new(Arc::clone(&storage))),
            city_service: Arc::new(CityService::new(Arc::clone(&storage))),
            user_service: Arc::new(UserService::new(Arc::clone(&storage))),
            place_service: Arc::new(PlaceService::new(Arc::clone(&storage))),
            amenity_service: Arc::new(AmenityService::new(Arc::clone(&storage))),
            review_service: Arc::new(ReviewService::new(Arc::clone(&storage))),
            stats_service: Arc::new(StatsService::new(storage)),
        }
    }
}
