use destatis_genesis::GenesisError;
use thiserror::Error;

/// Errors that can occur when using the DESTATIS client
#[derive(Error, Debug)]
pub enum DestatisError {
    /// Error reported by the GENESIS web service or its client
    #[error("GENESIS error: {0}")]
    Genesis(#[from] GenesisError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// File I/O error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The web service has no object with the requested code
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The web service answered a download with a status message instead of a file
    #[error("Download failed: {message}")]
    Download { message: String },
}

impl DestatisError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn download<S: Into<String>>(message: S) -> Self {
        Self::Download {
            message: message.into(),
        }
    }

    /// Whether the error was caused by missing or rejected credentials
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::Genesis(GenesisError::MissingCredentials)
                | Self::Genesis(GenesisError::PermissionDenied { .. })
        )
    }
}

/// Type alias for Results using DestatisError
pub type Result<T> = std::result::Result<T, DestatisError>;
