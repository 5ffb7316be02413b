use thiserror::Error;

/// Errors that can occur when interacting with the GENESIS web service
///
/// Every section wrapper returns this error type. The HTTP status of a failed
/// request is classified before the body is looked at:
///
/// - `401` becomes [`GenesisError::PermissionDenied`]
/// - any `5xx` becomes [`GenesisError::InternalServerError`]
/// - every other non-success status becomes [`GenesisError::Api`]
///
/// Successful responses are parsed; a body that does not match the expected
/// record yields [`GenesisError::Parse`], and a body whose `Status` block reports
/// an error yields [`GenesisError::Database`].
///
/// # Examples
///
/// ```rust
/// # use destatis_genesis::GenesisError;
/// # async fn example() {
/// match some_api_call().await {
///     Ok(()) => println!("done"),
///     Err(GenesisError::PermissionDenied { message }) => {
///         eprintln!("account may not use this method: {}", message);
///     }
///     Err(GenesisError::Database { code, content }) => {
///         eprintln!("GENESIS reported error {}: {}", code, content);
///     }
///     Err(e) => eprintln!("request failed: {}", e),
/// }
/// # async fn some_api_call() -> Result<(), GenesisError> { Ok(()) }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum GenesisError {
    /// An argument did not satisfy the constraints of the web service
    ///
    /// Raised before any request is sent.
    #[error("Invalid value for `{field}`: {message}")]
    Validation {
        /// Name of the offending parameter
        field: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// The method needs credentials but the configuration has none
    #[error("This method requires credentials, but none are configured")]
    MissingCredentials,

    /// HTTP 401: the account may not access the service or method
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Response body returned with the 401
        message: String,
    },

    /// HTTP 5xx: the database failed on its side
    #[error("GENESIS internal server error ({status}): {message}")]
    InternalServerError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Any other non-success HTTP status
    #[error("GENESIS API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The request succeeded but the database reported an error in its status block
    #[error("GENESIS database error {code}: {content}")]
    Database {
        /// GENESIS status code
        code: i64,
        /// Textual description from GENESIS
        content: String,
    },

    /// Network, TLS, or protocol level failure
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not match the expected record
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing a downloaded payload to disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenesisError {
    /// Create a new validation error for the given parameter
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status into the matching error variant
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::PermissionDenied { message },
            500..=599 => Self::InternalServerError { status, message },
            _ => Self::Api { status, message },
        }
    }

    /// Whether retrying the same request later could succeed
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::InternalServerError { .. })
    }
}

/// Type alias for Results using [`GenesisError`]
pub type Result<T> = std::result::Result<T, GenesisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            GenesisError::from_status(401, "nope".into()),
            GenesisError::PermissionDenied { .. }
        ));
        assert!(matches!(
            GenesisError::from_status(500, String::new()),
            GenesisError::InternalServerError { status: 500, .. }
        ));
        assert!(matches!(
            GenesisError::from_status(503, String::new()),
            GenesisError::InternalServerError { status: 503, .. }
        ));
        assert!(matches!(
            GenesisError::from_status(404, "missing".into()),
            GenesisError::Api { status: 404, .. }
        ));
    }

    #[test]
    fn validation_message_names_field() {
        let err = GenesisError::validation("selection", "must not be empty");
        let text = err.to_string();
        assert!(text.contains("selection"));
        assert!(text.contains("must not be empty"));
    }
}
