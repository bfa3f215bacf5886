//! Maps an HTTP outcome to success, absence, or a [`ContactsError`]

use hs_core::ApiResponse;
use serde_json::Value;
use std::fmt;
use tracing::error;

use crate::error::{ContactsError, Result};

/// The kind of call a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Contact creation for the given email
    Create { email: &'a str },
    /// Lookup by email, vid or utk; 404 means "no such contact"
    Lookup,
    /// Listing page
    List,
    Update,
    Destroy,
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create { .. } => "Create contact",
            Self::Lookup => "Find contact",
            Self::List => "List contacts",
            Self::Update => "Update contact",
            Self::Destroy => "Delete contact",
        };
        f.write_str(name)
    }
}

/// Classify a response.
///
/// Returns `Ok(Some(body))` on 2xx, `Ok(None)` for a lookup miss, and the
/// matching error otherwise. A duplicate-email conflict on create wins over
/// the generic request error.
pub fn classify(operation: Operation<'_>, response: ApiResponse) -> Result<Option<Value>> {
    let ApiResponse { status, body } = response;

    if (200..300).contains(&status) {
        return Ok(Some(body));
    }

    if status == 404 && operation == Operation::Lookup {
        return Ok(None);
    }

    error!("{} failed: {} - {}", operation, status, body);

    if let Operation::Create { email } = operation {
        if is_conflict(status, &body) {
            return Err(ContactsError::ContactExists {
                email: email.to_string(),
                status,
                body,
            });
        }
    }

    if is_request_error(status) {
        Err(ContactsError::Request { status, body })
    } else {
        Err(ContactsError::Api { status, body })
    }
}

/// 4xx statuses that the caller can fix by changing the request.
///
/// Credential, permission and rate-limit failures are service-level instead.
fn is_request_error(status: u16) -> bool {
    (400..500).contains(&status) && !matches!(status, 401 | 403 | 429)
}

fn is_conflict(status: u16, body: &Value) -> bool {
    if status == 409 {
        return true;
    }
    if !(400..500).contains(&status) {
        return false;
    }
    if body.get("error").and_then(Value::as_str) == Some("CONTACT_EXISTS") {
        return true;
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(|m| m.to_lowercase().contains("already exists"))
        .unwrap_or(false)
}
