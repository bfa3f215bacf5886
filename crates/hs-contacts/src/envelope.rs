//! Wire envelope decoding and encoding
//!
//! HubSpot never returns a flat contact. Properties arrive wrapped as
//! `{"properties": {name: {"value": ..., "versions": [...]}}}` and the visitor
//! token may sit in several places depending on the endpoint. All of that
//! shape knowledge lives here.

use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Identity types that carry the visitor tracking token
const UTK_IDENTITY_TYPES: [&str; 2] = ["UTK", "LEAD_GUID"];

/// Property some portals use to mirror the tracking token
const USERTOKEN_PROPERTY: &str = "usertoken";

/// Read `vid` as a non-negative integer; numeric strings are accepted
pub fn extract_vid(raw: &Value) -> Option<u64> {
    match raw.get("vid")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flatten the `properties` envelope into name -> value
///
/// Entries without a usable `value` are skipped. Bare scalar entries are
/// taken as the value itself.
pub fn unwrap_properties(raw: &Value) -> BTreeMap<String, String> {
    let Some(Value::Object(properties)) = raw.get("properties") else {
        return BTreeMap::new();
    };

    properties
        .iter()
        .filter_map(|(name, entry)| {
            let value = match entry {
                Value::Object(inner) => inner.get("value")?,
                scalar => scalar,
            };
            scalar_to_string(value).map(|v| (name.clone(), v))
        })
        .collect()
}

/// Find the visitor token
///
/// Looks at a top-level `utk`, then the identity profiles, then the
/// `usertoken` property.
pub fn extract_utk(raw: &Value) -> Option<String> {
    if let Some(utk) = raw.get("utk").and_then(Value::as_str) {
        return Some(utk.to_string());
    }

    let from_profiles = raw
        .get("identity-profiles")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|profile| profile.get("identities").or_else(|| profile.get("identity")))
        .filter_map(Value::as_array)
        .flatten()
        .find(|identity| {
            identity
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| UTK_IDENTITY_TYPES.contains(&t))
        })
        .and_then(|identity| identity.get("value"))
        .and_then(scalar_to_string);
    if from_profiles.is_some() {
        return from_profiles;
    }

    raw.get("properties")
        .and_then(|p| p.get(USERTOKEN_PROPERTY))
        .and_then(|entry| match entry {
            Value::Object(inner) => inner.get("value"),
            scalar => Some(scalar),
        })
        .and_then(scalar_to_string)
}

/// Read the `is-contact` flag
pub fn extract_is_contact(raw: &Value) -> bool {
    raw.get("is-contact").and_then(Value::as_bool).unwrap_or(false)
}

/// Build the request envelope `{"properties": [{"property": .., "value": ..}]}`
pub fn wrap_properties<'a, I>(properties: I) -> Value
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let entries: Vec<Value> = properties
        .into_iter()
        .map(|(name, value)| json!({ "property": name, "value": value }))
        .collect();

    let mut envelope = Map::new();
    envelope.insert("properties".to_string(), Value::Array(entries));
    Value::Object(envelope)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
