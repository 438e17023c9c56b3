use crate::{error::AppError, models::RecommendationList};

/// What the view currently displays
///
/// Created empty at mount and mutated only by the fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub recommendations: Option<RecommendationList>,
}

/// Coarse classification of a [`ViewState`], derived on read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Failed,
    Loaded,
    Empty,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            return ViewPhase::Loading;
        }
        match (&self.error, &self.recommendations) {
            (_, Some(list)) if list.is_empty() => ViewPhase::Empty,
            (Some(_), _) => ViewPhase::Failed,
            (None, Some(_)) => ViewPhase::Loaded,
            (None, None) => ViewPhase::Idle,
        }
    }

    /// Enters the loading state, clearing previous results
    pub(crate) fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
        self.recommendations = None;
    }

    /// Records a validation failure without touching the network
    pub(crate) fn reject_input(&mut self, err: &AppError) {
        self.error = Some(err.user_message());
        self.recommendations = None;
    }

    /// Applies the outcome of a fetch and leaves the loading state
    pub(crate) fn finish_fetch(&mut self, result: Result<RecommendationList, AppError>) {
        match result {
            Ok(list) => self.recommendations = Some(list),
            Err(err) => {
                if err.is_empty_result() {
                    self.recommendations = Some(RecommendationList::empty());
                }
                self.error = Some(err.user_message());
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use reqwest::StatusCode;

    #[test]
    fn test_initial_state_is_idle() {
        let state = ViewState::new();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.recommendations, None);
        assert_eq!(state.phase(), ViewPhase::Idle);
    }

    #[test]
    fn test_begin_fetch_clears_previous_state() {
        let mut state = ViewState {
            loading: false,
            error: Some("old".to_string()),
            recommendations: Some(RecommendationList::new(vec![1])),
        };
        state.begin_fetch();
        assert_eq!(state.phase(), ViewPhase::Loading);
        assert_eq!(state.error, None);
        assert_eq!(state.recommendations, None);
    }

    #[test]
    fn test_success_sets_only_recommendations() {
        let mut state = ViewState::new();
        state.begin_fetch();
        state.finish_fetch(Ok(RecommendationList::new(vec![3, 1, 2])));
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), ViewPhase::Loaded);
    }

    #[test]
    fn test_not_found_sets_empty_list_and_error() {
        let mut state = ViewState::new();
        state.begin_fetch();
        state.finish_fetch(Err(AppError::NotFound(UserId::new(999))));
        assert_eq!(state.recommendations, Some(RecommendationList::empty()));
        assert!(state.error.as_deref().unwrap().contains("999"));
        assert_eq!(state.phase(), ViewPhase::Empty);
    }

    #[test]
    fn test_service_unavailable_leaves_recommendations_unset() {
        let mut state = ViewState::new();
        state.begin_fetch();
        state.finish_fetch(Err(AppError::ServiceUnavailable));
        assert_eq!(state.recommendations, None);
        assert_eq!(state.phase(), ViewPhase::Failed);
    }

    #[test]
    fn test_unexpected_status_is_failure() {
        let mut state = ViewState::new();
        state.begin_fetch();
        state.finish_fetch(Err(AppError::UnexpectedStatus(StatusCode::BAD_GATEWAY)));
        assert!(!state.loading);
        assert!(state.error.as_deref().unwrap().contains("502"));
    }

    #[test]
    fn test_reject_input_drops_stale_results() {
        let mut state = ViewState {
            loading: false,
            error: None,
            recommendations: Some(RecommendationList::new(vec![1, 2])),
        };
        state.reject_input(&AppError::InvalidUserId("abc".to_string()));
        assert_eq!(state.recommendations, None);
        assert_eq!(
            state.error.as_deref(),
            Some("Please enter a valid numeric User ID.")
        );
    }
}
