//! Error types for agentpulse data parsing

use thiserror::Error;

/// Result type for agentpulse type conversions
pub type Result<T> = std::result::Result<T, TypesError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Language code not present in the phrase tables
    #[error("unknown language code: {code}")]
    UnknownLanguage { code: String },

    /// Action name that does not map to an `ActionKind`
    #[error("unknown action kind: {name}")]
    UnknownAction { name: String },

    /// Chat event tag other than agent/tools/error
    #[error("unknown chat event: {event}")]
    UnknownChatEvent { event: String },
}
