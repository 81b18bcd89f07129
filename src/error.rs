use thiserror::Error;

/// A failed request, classified by HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("access forbidden")]
    Forbidden,

    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// How the client reacts to an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Clears the session and all cached state.
    Unauthorized,
    /// The server refused the request for this resource; the cache may be stale.
    Rejected,
    /// Nothing is known to be wrong with the cache; state is left alone.
    Transient,
}

impl ApiError {
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            403 => ApiError::Forbidden,
            400..=499 => ApiError::Rejected {
                status,
                message: message.into(),
            },
            _ => ApiError::Server {
                status,
                message: message.into(),
            },
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Forbidden => ErrorClass::Unauthorized,
            ApiError::Rejected { .. } => ErrorClass::Rejected,
            ApiError::Server { .. } | ApiError::Network(_) | ApiError::Decode(_) => {
                ErrorClass::Transient
            }
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Forbidden => Some(403),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }
}
