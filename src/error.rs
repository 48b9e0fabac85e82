//! Error handling for the marketplace client

use std::fmt;
use thiserror::Error;

use crate::forms::ValidationErrors;

/// Unified error type for the marketplace client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },

    /// Client-side validation failed before anything was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status of the failed call, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend rejected the caller's credentials or session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403)) || matches!(self, Error::Auth(_))
    }

    /// Whether the error was raised before any request left the client
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Text a view can show to the user
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(errors) => errors.to_string(),
            Error::Auth(_) => "Please log in to continue.".to_string(),
            Error::Api { status: 401, .. } => "Incorrect email or password.".to_string(),
            Error::Api { status: 403, .. } => {
                "You are not allowed to perform this action.".to_string()
            }
            Error::Api { status: 400, message } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            Error::Api { status: 404, .. } => "The requested resource was not found.".to_string(),
            Error::Config(msg) => msg.clone(),
            _ => "An error occurred, please try again later.".to_string(),
        }
    }
}
