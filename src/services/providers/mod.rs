/// Recommendation backend abstraction
///
/// The view talks to the backend only through [`RecommendationProvider`], so
/// tests can swap the HTTP implementation for a mock.
use crate::{
    error::AppResult,
    models::{HealthStatus, RecommendationList, UserId},
};

pub mod http;

pub use http::HttpRecommendationProvider;

/// Number of recommendations requested when none is configured
pub const DEFAULT_RECOMMENDATION_COUNT: u32 = 5;

/// Trait for recommendation backends
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch up to `count` product ids for a user, best match first
    ///
    /// Status codes map onto the error taxonomy: 404 is `NotFound`, 503 is
    /// `ServiceUnavailable`, anything else non-2xx is `UnexpectedStatus`.
    async fn fetch_recommendations(
        &self,
        user_id: UserId,
        count: u32,
    ) -> AppResult<RecommendationList>;

    /// Probe backend readiness
    async fn health(&self) -> AppResult<HealthStatus>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
