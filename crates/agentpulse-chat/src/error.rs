//! Errors from chat backends and holdings sources

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Backend not configured: {message}")]
    NotConfigured { message: String },

    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Asset lookup failed: {message}")]
    AssetLookup { message: String },
}

pub type Result<T> = std::result::Result<T, ChatError>;
