use std::fmt::Write;

use crate::models::{ViewPhase, ViewState};

pub const TITLE: &str = "AI Product Recommender";
pub const INPUT_PLACEHOLDER: &str = "Enter User ID (e.g., 1)";
pub const BUTTON_LABEL: &str = "Get Recommendations";
pub const BUSY_LABEL: &str = "Analyzing...";
pub const EMPTY_HEADING: &str = "No Recommendations Found";

/// Renders the view as plain text
///
/// Pure function of the current input text and state. The error banner and
/// the results panel are independent, so a not-found response shows both.
pub fn render(input: &str, state: &ViewState) -> String {
    let mut out = String::new();
    let phase = state.phase();

    let _ = writeln!(out, "{}", TITLE);
    let shown_input = if input.trim().is_empty() {
        INPUT_PLACEHOLDER
    } else {
        input.trim()
    };
    if phase == ViewPhase::Loading {
        let _ = writeln!(out, "User ID: {} (disabled) [{}]", shown_input, BUSY_LABEL);
    } else {
        let _ = writeln!(out, "User ID: {} [{}]", shown_input, BUTTON_LABEL);
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {}", error);
    }

    match (phase, &state.recommendations) {
        (ViewPhase::Loaded, Some(recommendations)) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Top {} Recommendations:", recommendations.len());
            for (rank, product_id) in recommendations.ranked() {
                let _ = writeln!(out, "  #{:<3} Product ID: {}", rank, product_id);
            }
        }
        (ViewPhase::Empty, _) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", EMPTY_HEADING);
        }
        _ => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationList;

    #[test]
    fn test_initial_render_shows_only_input() {
        let output = render("", &ViewState::new());
        assert_eq!(
            output,
            "AI Product Recommender\nUser ID: Enter User ID (e.g., 1) [Get Recommendations]\n"
        );
    }

    #[test]
    fn test_loading_disables_input() {
        let state = ViewState {
            loading: true,
            ..ViewState::default()
        };
        let output = render("42", &state);
        assert!(output.contains("User ID: 42 (disabled) [Analyzing...]"));
        assert!(!output.contains(BUTTON_LABEL));
    }

    #[test]
    fn test_recommendations_render_ranked_cards() {
        let state = ViewState {
            recommendations: Some(RecommendationList::new(vec![102, 45, 88, 11, 23])),
            ..ViewState::default()
        };
        let output = render("1", &state);
        assert!(output.contains("Top 5 Recommendations:"));

        let cards: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("Product ID:"))
            .collect();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].trim(), "#1   Product ID: 102");
        assert_eq!(cards[4].trim(), "#5   Product ID: 23");
    }

    #[test]
    fn test_loading_hides_stale_results() {
        let state = ViewState {
            loading: true,
            error: None,
            recommendations: Some(RecommendationList::new(vec![7, 8])),
        };
        let output = render("3", &state);
        assert!(output.contains(BUSY_LABEL));
        assert!(!output.contains("Product ID:"));
        assert!(!output.contains(EMPTY_HEADING));
    }

    #[test]
    fn test_error_banner() {
        let state = ViewState {
            error: Some("API Service Unavailable: Model failed to load.".to_string()),
            ..ViewState::default()
        };
        let output = render("1", &state);
        assert!(output.contains("Error: API Service Unavailable: Model failed to load."));
        assert!(!output.contains(EMPTY_HEADING));
    }

    #[test]
    fn test_not_found_renders_banner_and_empty_panel() {
        let state = ViewState {
            loading: false,
            error: Some("User ID 999 not found in model data.".to_string()),
            recommendations: Some(RecommendationList::empty()),
        };
        let output = render("999", &state);
        assert!(output.contains("Error: User ID 999 not found in model data."));
        assert!(output.contains(EMPTY_HEADING));
        assert!(!output.contains("Product ID:"));
    }
}
