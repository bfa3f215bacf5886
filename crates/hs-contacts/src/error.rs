//! Error types for hs-contacts

use serde_json::Value;
use thiserror::Error;

/// hs-contacts error type
///
/// `Api` is the general remote failure. `Request` and `ContactExists` are
/// narrower kinds of remote failure; [`ContactsError::is_api_error`] is true
/// for all three.
#[derive(Error, Debug)]
pub enum ContactsError {
    /// Service-level failure: bad credentials, server error, unexpected status
    #[error("HubSpot API error: {status} - {body}")]
    Api { status: u16, body: Value },

    /// Client-correctable failure: bad input, unknown vid, malformed request
    #[error("Request error: {status} - {body}")]
    Request { status: u16, body: Value },

    /// Creation rejected because the email already belongs to a contact
    #[error("Contact already exists with email: {email}")]
    ContactExists {
        email: String,
        status: u16,
        body: Value,
    },

    /// Local precondition failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Core(#[from] hs_core::Error),
}

impl ContactsError {
    /// True for every error reported by the remote service
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Request { .. } | Self::ContactExists { .. }
        )
    }

    /// HTTP status of a remote failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. }
            | Self::Request { status, .. }
            | Self::ContactExists { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a remote failure, for diagnostics
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. }
            | Self::Request { body, .. }
            | Self::ContactExists { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContactsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_kinds_are_api_errors() {
        let api = ContactsError::Api { status: 401, body: json!("denied") };
        let request = ContactsError::Request { status: 400, body: Value::Null };
        let exists = ContactsError::ContactExists {
            email: "a@b.com".to_string(),
            status: 409,
            body: Value::Null,
        };

        assert!(api.is_api_error());
        assert!(request.is_api_error());
        assert!(exists.is_api_error());
        assert!(!ContactsError::Validation("no vid".to_string()).is_api_error());
    }

    #[test]
    fn test_status_and_body() {
        let err = ContactsError::Request { status: 404, body: json!({"message": "missing"}) };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&json!({"message": "missing"})));

        let err = ContactsError::Validation("empty email".to_string());
        assert_eq!(err.status(), None);
        assert!(err.body().is_none());
    }

    #[test]
    fn test_display() {
        let err = ContactsError::ContactExists {
            email: "testingapis@hubspot.com".to_string(),
            status: 409,
            body: Value::Null,
        };
        assert_eq!(
            err.to_string(),
            "Contact already exists with email: testingapis@hubspot.com"
        );
    }
}
