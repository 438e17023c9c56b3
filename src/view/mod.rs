use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::{
    models::{UserId, ViewState},
    services::providers::{RecommendationProvider, DEFAULT_RECOMMENDATION_COUNT},
};

pub mod render;

pub use render::render;

/// What happened to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A request was made and its result applied to the state.
    Completed,
    /// The input was not a valid user id; no request was made.
    Rejected,
    /// A fetch was already in flight; the submission was ignored.
    Busy,
    /// The view was unmounted; nothing was applied.
    Discarded,
}

/// Clears `loading` when a fetch is dropped before its result is applied
struct LoadingGuard {
    state: Arc<RwLock<ViewState>>,
    lifetime: CancellationToken,
    armed: bool,
}

impl LoadingGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // A dead view keeps whatever state it had.
        if !self.armed || self.lifetime.is_cancelled() {
            return;
        }

        tracing::debug!("Fetch dropped mid-flight, clearing loading state");
        match self.state.try_write() {
            Ok(mut state) => state.loading = false,
            Err(_) => {
                let state = self.state.clone();
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    handle.spawn(async move {
                        state.write().await.loading = false;
                    });
                }
            }
        }
    }
}

/// The recommendation view: input handling, fetch lifecycle, and state
///
/// Cloning yields another handle to the same view, so a renderer can read the
/// state while a fetch is suspended on the network.
#[derive(Clone)]
pub struct RecommendationView {
    provider: Arc<dyn RecommendationProvider>,
    state: Arc<RwLock<ViewState>>,
    count: u32,
    lifetime: CancellationToken,
}

impl RecommendationView {
    /// Mounts a new view with empty state
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self::with_count(provider, DEFAULT_RECOMMENDATION_COUNT)
    }

    pub fn with_count(provider: Arc<dyn RecommendationProvider>, count: u32) -> Self {
        Self {
            provider,
            state: Arc::new(RwLock::new(ViewState::new())),
            count,
            lifetime: CancellationToken::new(),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn render(&self, input: &str) -> String {
        render(input, &*self.state.read().await)
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    /// Ends the view's lifetime. In-flight fetches drop their results.
    pub fn unmount(&self) {
        tracing::debug!("Recommendation view unmounted");
        self.lifetime.cancel();
    }

    /// Validates the input and fetches recommendations for it
    ///
    /// Loading is cleared on every exit path of a mounted view.
    pub async fn fetch_recommendations(&self, input: &str) -> FetchOutcome {
        if !self.is_mounted() {
            return FetchOutcome::Discarded;
        }

        let user_id = {
            let mut state = self.state.write().await;
            if state.loading {
                tracing::debug!(input = %input, "Fetch already in flight, ignoring submission");
                return FetchOutcome::Busy;
            }

            match input.parse::<UserId>() {
                Ok(user_id) => {
                    state.begin_fetch();
                    user_id
                }
                Err(err) => {
                    tracing::debug!(input = %input, "Rejected non-numeric user id");
                    state.reject_input(&err);
                    return FetchOutcome::Rejected;
                }
            }
        };

        let guard = LoadingGuard {
            state: self.state.clone(),
            lifetime: self.lifetime.clone(),
            armed: true,
        };

        tracing::info!(
            user_id = %user_id,
            count = self.count,
            provider = self.provider.name(),
            "Fetching recommendations"
        );

        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => {
                tracing::debug!(user_id = %user_id, "View unmounted mid-flight, dropping request");
                return FetchOutcome::Discarded;
            }
            result = self.provider.fetch_recommendations(user_id, self.count) => result,
        };

        let mut state = self.state.write().await;
        if !self.is_mounted() {
            return FetchOutcome::Discarded;
        }

        if let Err(e) = &result {
            tracing::warn!(user_id = %user_id, error = %e, "Recommendation fetch failed");
        }
        state.finish_fetch(result);
        guard.disarm();

        FetchOutcome::Completed
    }
}
