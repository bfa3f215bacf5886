//! Data models for the contacts resource

use serde_json::Value;
use std::collections::BTreeMap;

use crate::envelope;

/// Flat property bag, name -> value
pub type Properties = BTreeMap<String, String>;

/// A HubSpot contact
///
/// Built either by decoding an API response or locally via [`Contact::new`].
/// A locally built contact has no `vid` until the service assigns one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    vid: Option<u64>,
    properties: Properties,
    utk: Option<String>,
    is_contact: bool,
    destroyed: bool,
}

impl Contact {
    /// Create a local contact with an email
    pub fn new(email: impl Into<String>) -> Self {
        Self::default().with_property("email", email)
    }

    /// Set a property on a local contact
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Decode a contact from a raw response object.
    ///
    /// Never fails: absent or malformed fields decode to absence.
    pub fn from_value(raw: &Value) -> Self {
        Self {
            vid: envelope::extract_vid(raw),
            properties: envelope::unwrap_properties(raw),
            utk: envelope::extract_utk(raw),
            is_contact: envelope::extract_is_contact(raw),
            destroyed: false,
        }
    }

    /// Remote primary identifier
    pub fn vid(&self) -> Option<u64> {
        self.vid
    }

    /// Visitor tracking token
    pub fn utk(&self) -> Option<&str> {
        self.utk.as_deref()
    }

    /// Property value by name; `None` when unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email")
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The service's `is-contact` flag
    pub fn is_contact(&self) -> bool {
        self.is_contact
    }

    /// Whether this instance was deleted through [`crate::ContactsClient::destroy`]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn merge_properties(&mut self, properties: Properties) {
        self.properties.extend(properties);
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }
}

impl From<Value> for Contact {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

/// One page of the all-contacts listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    /// Whether the service has records past this page
    pub has_more: bool,
    /// Offset to pass to fetch the next page
    pub vid_offset: Option<u64>,
}

impl ContactPage {
    /// Decode a listing response; a missing `contacts` array yields an empty page
    pub fn from_value(raw: &Value) -> Self {
        let contacts: Vec<Contact> = raw
            .get("contacts")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Contact::from_value).collect())
            .unwrap_or_default();

        Self {
            contacts,
            has_more: raw.get("has-more").and_then(Value::as_bool).unwrap_or(false),
            vid_offset: raw.get("vid-offset").and_then(Value::as_u64),
        }
    }
}
