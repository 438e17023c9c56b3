use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

mod view_state;

pub use view_state::{ViewPhase, ViewState};

/// Identifier of a user known to the recommendation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AppError;

    /// Parses raw text input. Surrounding whitespace is ignored; anything that
    /// is not a non-negative integer is rejected.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::InvalidUserId(input.to_string()));
        }

        trimmed
            .parse::<u64>()
            .map(UserId)
            .map_err(|_| AppError::InvalidUserId(input.to_string()))
    }
}

/// Ordered product identifiers, best match first
///
/// Kept exactly as the backend returned them: no dedup, no sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationList(Vec<i64>);

impl RecommendationList {
    pub fn new(product_ids: Vec<i64>) -> Self {
        Self(product_ids)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn product_ids(&self) -> &[i64] {
        &self.0
    }

    /// Iterates `(rank, product_id)` pairs with 1-based ranks
    pub fn ranked(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.0.iter().enumerate().map(|(i, id)| (i + 1, *id))
    }
}

/// Response from the backend's `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok" && self.model_loaded
    }
}
