//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to branch on the failure kind can
//! `downcast_ref::<RatingError>()` the returned error.

use crate::types::PlayerId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Numeric divergence: {reason}")]
    NumericDivergence { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RatingError {
    /// Shorthand for the error raised when a player is queried against a match
    /// they did not take part in
    pub fn not_a_participant(player_id: PlayerId) -> Self {
        RatingError::InvalidInput {
            reason: format!("player {} did not participate in match", player_id),
        }
    }
}
