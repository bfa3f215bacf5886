//! hs-contacts: HubSpot contacts resource client
//!
//! Create, look up, list, update and delete HubSpot contacts without building
//! requests by hand.
//!
//! ## Features
//!
//! - Lookups by email, vid or visitor token; a miss is `Ok(None)`, not an error
//! - Creation with duplicate-email detection
//! - In-place updates and deletes on a `Contact` value
//! - One-page listing with the continuation offset exposed
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hs_contacts::{ContactsClient, ContactsError, HubspotConfig};
//!
//! let client = ContactsClient::new(&HubspotConfig::new("demo"))?;
//!
//! let mut contact = match client.create("new@example.com", [("firstname", "Hugh")]).await {
//!     Ok(contact) => contact,
//!     Err(ContactsError::ContactExists { email, .. }) => {
//!         client.find_by_email(&email).await?.expect("contact exists")
//!     }
//!     Err(e) => return Err(e.into()),
//! };
//!
//! client.update(&mut contact, [("lastname", "Jackman")]).await?;
//! client.destroy(&mut contact).await?;
//! ```

pub mod classify;
pub mod client;
pub mod envelope;
pub mod error;
pub mod models;

pub use client::ContactsClient;
pub use error::{ContactsError, Result};
pub use hs_core::HubspotConfig;
pub use models::{Contact, ContactPage, Properties};

/// Re-export models for easy use
pub mod prelude {
    pub use super::{Contact, ContactPage, ContactsClient, ContactsError, HubspotConfig};
}
