//! Error types for the Namecheap client

use serde_json::{Map, Value};
use thiserror::Error;

/// Diagnostic context attached to classified errors
///
/// Always carries the `command` key; authentication and generic API errors
/// also carry the full `errors` list.
pub type ErrorContext = Map<String, Value>;

/// Coarse error category, useful for branching without matching fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid client setup
    Config,
    /// Connection, timeout or HTTP status failure
    Network,
    /// Malformed response body
    Parse,
    /// Rejected credentials
    Authentication,
    /// Rejected or missing parameters
    Validation,
    /// Any other registrar-reported failure
    Api,
}

/// Errors that can occur when using the Namecheap client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client configuration is invalid; raised before any request is made
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed or returned a non-success status
    #[error("Network error: {message}")]
    Network {
        /// Human-readable description of the failure
        message: String,
        /// HTTP status, when the server answered at all
        status: Option<reqwest::StatusCode>,
        /// Underlying transport error
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response body could not be parsed
    #[error("Failed to parse response: {message}")]
    Parse {
        /// What went wrong
        message: String,
        /// The response body exactly as received, when available
        raw_response: Option<String>,
    },

    /// Registrar rejected the credentials
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Primary error message
        message: String,
        /// Numeric error code
        code: u16,
        /// Diagnostic context
        context: ErrorContext,
    },

    /// Registrar rejected the request parameters
    #[error("Validation failed: {message}")]
    Validation {
        /// Primary error message
        message: String,
        /// Numeric error code
        code: u16,
        /// Every error reported for the call, in order
        errors: Vec<String>,
        /// Diagnostic context
        context: ErrorContext,
    },

    /// Any other registrar-reported failure
    #[error("API error: {message}")]
    Api {
        /// Primary error message
        message: String,
        /// Numeric error code
        code: u16,
        /// Diagnostic context
        context: ErrorContext,
    },
}

impl ApiError {
    /// Build a parse error that carries the offending body
    pub(crate) fn parse(message: impl Into<String>, raw_response: &str) -> Self {
        ApiError::Parse {
            message: message.into(),
            raw_response: Some(raw_response.to_string()),
        }
    }

    /// Build a parse error for a well-formed response missing an expected element
    pub(crate) fn missing(element: &str, command: &str) -> Self {
        ApiError::Parse {
            message: format!("missing {} in {} response", element, command),
            raw_response: None,
        }
    }

    /// Build a validation error detected before the request is sent
    pub(crate) fn invalid_argument(command: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut context = ErrorContext::new();
        context.insert("command".to_string(), Value::String(command.to_string()));
        ApiError::Validation {
            errors: vec![message.clone()],
            message,
            code: 400,
            context,
        }
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Config(_) => ErrorKind::Config,
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Parse { .. } => ErrorKind::Parse,
            ApiError::Authentication { .. } => ErrorKind::Authentication,
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::Api { .. } => ErrorKind::Api,
        }
    }

    /// The primary error message, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::Config(message) => message,
            ApiError::Network { message, .. }
            | ApiError::Parse { message, .. }
            | ApiError::Authentication { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Api { message, .. } => message,
        }
    }

    /// Numeric error code: the HTTP status for network errors, the
    /// classification default for registrar errors
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => status.map(|s| s.as_u16()),
            ApiError::Authentication { code, .. }
            | ApiError::Validation { code, .. }
            | ApiError::Api { code, .. } => Some(*code),
            ApiError::Config(_) | ApiError::Parse { .. } => None,
        }
    }

    /// Diagnostic context of a classified error
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ApiError::Authentication { context, .. }
            | ApiError::Validation { context, .. }
            | ApiError::Api { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Command that produced a classified error
    pub fn command(&self) -> Option<&str> {
        self.context()?.get("command")?.as_str()
    }

    /// Every registrar error message attached to this error, in order
    pub fn errors(&self) -> Vec<&str> {
        if let ApiError::Validation { errors, .. } = self {
            return errors.iter().map(String::as_str).collect();
        }
        self.context()
            .and_then(|c| c.get("errors"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The raw body attached to a parse error
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ApiError::Parse { raw_response, .. } => raw_response.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        ApiError::Network {
            message,
            status: err.status(),
            source: Some(err),
        }
    }
}
