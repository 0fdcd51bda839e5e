//! Error types for the CLI

use namecheap_client::{ApiError, ErrorKind};
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Namecheap API error
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Api(e) => match e.kind() {
                ErrorKind::Config => 2,
                ErrorKind::Authentication => 3,
                ErrorKind::Validation => 4,
                ErrorKind::Api => 5,
                ErrorKind::Network => 6,
                ErrorKind::Parse => 7,
            },
        }
    }
}
