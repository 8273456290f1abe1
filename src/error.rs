//! Error types for the onboarding core.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Preference store errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store operation on {key} timed out after {after:?}")]
    Timeout { key: String, after: Duration },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Schema setup failed: {0}")]
    Schema(String),
}

/// Platform notification-permission errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PermissionError {
    #[error("Permission request failed: {0}")]
    RequestFailed(String),

    #[error("Notification subsystem unavailable")]
    Unavailable,
}

/// Onboarding flow and question-set errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Option {option:?} is not valid for question {question_id}")]
    InvalidAnswer { question_id: String, option: String },

    #[error("Onboarding already completed")]
    AlreadyCompleted,

    #[error("Another answer is still being processed")]
    TransitionInFlight,

    #[error("Question set is empty")]
    EmptyQuestionSet,

    #[error("Question {id} has no options")]
    QuestionWithoutOptions { id: String },

    #[error("Duplicate question id: {id}")]
    DuplicateQuestionId { id: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
