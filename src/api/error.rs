//! API Error Types
//!
//! Every failed call surfaces as one error whose message is fixed per call
//! site ("Failed to fetch conversations"). Transport failures, non-2xx
//! statuses and undecodable bodies all read the same to the user; the
//! underlying cause stays available through `source()` for logs.

use thiserror::Error;

/// Backend client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, reset, DNS failure
    #[error("{context}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("{context}")]
    Status { context: &'static str, status: u16 },

    /// 2xx response with a body that did not match
    #[error("{context}")]
    Decode {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The user stopped a pending request
    #[error("Request cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Fixed message of the failed call site
    pub fn context(&self) -> &'static str {
        match self {
            ApiError::Transport { context, .. }
            | ApiError::Status { context, .. }
            | ApiError::Decode { context, .. } => context,
            ApiError::Cancelled => "Request cancelled",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;

    #[test]
    fn test_display_is_call_site_message() {
        let err = ApiError::Status {
            context: endpoints::FETCH_CONVERSATIONS,
            status: 503,
        };
        assert_eq!(err.to_string(), "Failed to fetch conversations");
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert_eq!(ApiError::Cancelled.context(), "Request cancelled");
    }
}
