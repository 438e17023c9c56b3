/// HTTP recommendation provider
///
/// Talks to the recommendation API over plain JSON:
/// 1. Recommendations: /recommend/{user_id}?n_recommendations=N → `[int, ...]`
/// 2. Health: /health → `{status, service, model_loaded}`
use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, RequestId},
    models::{HealthStatus, RecommendationList, UserId},
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, Response, StatusCode};
use tracing::Instrument;

#[derive(Clone)]
pub struct HttpRecommendationProvider {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommendationProvider {
    /// Creates a provider for the configured base URL
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: config.api_base_url.clone(),
        }
    }

    fn recommend_url(&self, user_id: UserId) -> String {
        format!("{}/recommend/{}", self.api_url, user_id)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.api_url)
    }

    /// Maps a non-success status onto the error taxonomy
    fn status_error(status: StatusCode, user_id: Option<UserId>) -> AppError {
        match (status, user_id) {
            (StatusCode::NOT_FOUND, Some(user_id)) => AppError::NotFound(user_id),
            (StatusCode::SERVICE_UNAVAILABLE, _) => AppError::ServiceUnavailable,
            (status, _) => AppError::UnexpectedStatus(status),
        }
    }

    async fn check_status(response: Response, user_id: Option<UserId>) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            status = status.as_u16(),
            body = %body,
            "Recommendation API returned an error status"
        );
        Err(Self::status_error(status, user_id))
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpRecommendationProvider {
    async fn fetch_recommendations(
        &self,
        user_id: UserId,
        count: u32,
    ) -> AppResult<RecommendationList> {
        let url = self.recommend_url(user_id);
        let request_id = RequestId::new();
        let span = make_span_with_request_id("GET", &url, &request_id);

        async move {
            let response = request_id
                .attach(self.http_client.get(&url))
                .query(&[("n_recommendations", count)])
                .send()
                .await?;

            let response = Self::check_status(response, Some(user_id)).await?;
            let recommendations: RecommendationList = response.json().await?;

            tracing::info!(
                user_id = %user_id,
                requested = count,
                results = recommendations.len(),
                provider = self.name(),
                "Recommendations fetched"
            );

            Ok(recommendations)
        }
        .instrument(span)
        .await
    }

    async fn health(&self) -> AppResult<HealthStatus> {
        let url = self.health_url();
        let request_id = RequestId::new();
        let span = make_span_with_request_id("GET", &url, &request_id);

        async move {
            let response = request_id
                .attach(self.http_client.get(&url))
                .send()
                .await?;

            let response = Self::check_status(response, None).await?;
            let health: HealthStatus = response.json().await?;

            tracing::info!(
                status = %health.status,
                model_loaded = health.model_loaded,
                "Health probe completed"
            );

            Ok(health)
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> HttpRecommendationProvider {
        HttpRecommendationProvider::new(&Config::default().with_api_base_url("http://test.local/"))
    }

    #[test]
    fn test_recommend_url() {
        let provider = create_test_provider();
        assert_eq!(
            provider.recommend_url(UserId::new(42)),
            "http://test.local/recommend/42"
        );
    }

    #[test]
    fn test_health_url() {
        let provider = create_test_provider();
        assert_eq!(provider.health_url(), "http://test.local/health");
    }

    #[test]
    fn test_status_error_not_found() {
        let err = HttpRecommendationProvider::status_error(
            StatusCode::NOT_FOUND,
            Some(UserId::new(999)),
        );
        assert_eq!(err, AppError::NotFound(UserId::new(999)));
    }

    #[test]
    fn test_status_error_not_found_without_user_is_unexpected() {
        let err = HttpRecommendationProvider::status_error(StatusCode::NOT_FOUND, None);
        assert_eq!(err, AppError::UnexpectedStatus(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_status_error_service_unavailable() {
        let err = HttpRecommendationProvider::status_error(
            StatusCode::SERVICE_UNAVAILABLE,
            Some(UserId::new(1)),
        );
        assert_eq!(err, AppError::ServiceUnavailable);
    }

    #[test]
    fn test_status_error_other() {
        let err = HttpRecommendationProvider::status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some(UserId::new(1)),
        );
        assert_eq!(err, AppError::UnexpectedStatus(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
