//! Contacts resource client

use hs_core::{HttpRequester, HubspotConfig, HubspotHttp, Method};
use tracing::{debug, info};

use crate::classify::{Operation, classify};
use crate::envelope;
use crate::error::{ContactsError, Result};
use crate::models::{Contact, ContactPage, Properties};

/// Client for the HubSpot contacts API
///
/// Stateless apart from the requester, which carries the credential.
#[derive(Clone)]
pub struct ContactsClient<R = HubspotHttp> {
    requester: R,
}

impl ContactsClient<HubspotHttp> {
    /// Create a client backed by `reqwest`
    pub fn new(config: &HubspotConfig) -> Result<Self> {
        let requester = HubspotHttp::new(config)?;
        info!("Contacts client initialized for: {}", requester.api_root());
        Ok(Self { requester })
    }

    /// Create a client from `.env`, `hubspot.toml` or the environment
    pub fn load() -> Result<Self> {
        let config = HubspotConfig::load()?;
        Self::new(&config)
    }
}

impl<R: HttpRequester> ContactsClient<R> {
    /// Create a client over any requester
    pub fn with_requester(requester: R) -> Self {
        Self { requester }
    }

    /// Create a contact
    ///
    /// # Arguments
    /// * `email` - required, non-empty
    /// * `properties` - extra properties; an `email` entry here is ignored
    ///
    /// # Errors
    /// `ContactExists` when the email is already registered, `Request` for
    /// other rejected input.
    pub async fn create<I, K, V>(&self, email: &str, properties: I) -> Result<Contact>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let email = email.trim();
        if email.is_empty() {
            return Err(ContactsError::Validation("email must not be empty".to_string()));
        }

        let mut wire = collect_properties(properties);
        wire.insert("email".to_string(), email.to_string());
        let body = envelope::wrap_properties(&wire);

        debug!("Creating contact: {}", email);

        let response = self
            .requester
            .request(Method::POST, "/contact/", &[], Some(&body))
            .await?;
        let raw = classify(Operation::Create { email }, response)?.unwrap_or_default();

        let contact = Contact::from_value(&raw);
        info!("Created contact: {:?}", contact.vid());
        Ok(contact)
    }

    /// Look up a contact by email; `Ok(None)` when there is none
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let path = format!("/contact/email/{}/profile", urlencoding::encode(email));
        self.lookup(&path).await
    }

    /// Look up a contact by vid; `Ok(None)` when there is none
    pub async fn find_by_id(&self, vid: u64) -> Result<Option<Contact>> {
        let path = format!("/contact/vid/{}/profile", vid);
        self.lookup(&path).await
    }

    /// Look up a contact by visitor token; `Ok(None)` when there is none
    pub async fn find_by_utk(&self, utk: &str) -> Result<Option<Contact>> {
        let path = format!("/contact/utk/{}/profile", urlencoding::encode(utk));
        self.lookup(&path).await
    }

    async fn lookup(&self, path: &str) -> Result<Option<Contact>> {
        debug!("Looking up contact: {}", path);

        let response = self.requester.request(Method::GET, path, &[], None).await?;

        match classify(Operation::Lookup, response)? {
            Some(raw) => {
                let contact = Contact::from_value(&raw);
                debug!("Found contact: {:?}", contact.vid());
                Ok(Some(contact))
            }
            None => {
                debug!("No contact at: {}", path);
                Ok(None)
            }
        }
    }

    /// Fetch one page of contacts
    ///
    /// `count` defaults to the service's page size (20) when `None`.
    pub async fn all(&self, count: Option<u32>) -> Result<Vec<Contact>> {
        Ok(self.page(count, None).await?.contacts)
    }

    /// Fetch one page of contacts together with the continuation marker
    pub async fn page(&self, count: Option<u32>, vid_offset: Option<u64>) -> Result<ContactPage> {
        let mut query = Vec::new();
        if let Some(count) = count {
            query.push(("count", count.to_string()));
        }
        if let Some(offset) = vid_offset {
            query.push(("vidOffset", offset.to_string()));
        }

        debug!("Listing contacts: count={:?} offset={:?}", count, vid_offset);

        let response = self
            .requester
            .request(Method::GET, "/lists/all/contacts/all", &query, None)
            .await?;
        let raw = classify(Operation::List, response)?.unwrap_or_default();

        let page = ContactPage::from_value(&raw);
        info!("Fetched {} contacts", page.contacts.len());
        Ok(page)
    }

    /// Update properties of an existing contact
    ///
    /// On success the new values are merged into `contact` and it is handed
    /// back. On failure `contact` is left untouched.
    pub async fn update<'c, I, K, V>(
        &self,
        contact: &'c mut Contact,
        properties: I,
    ) -> Result<&'c mut Contact>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vid = require_vid(contact, "update")?;
        let properties = collect_properties(properties);
        let body = envelope::wrap_properties(&properties);

        debug!("Updating contact: {}", vid);

        let path = format!("/contact/vid/{}/profile", vid);
        let response = self
            .requester
            .request(Method::POST, &path, &[], Some(&body))
            .await?;
        classify(Operation::Update, response)?;

        contact.merge_properties(properties);
        info!("Updated contact: {}", vid);
        Ok(contact)
    }

    /// Delete a contact and mark the instance destroyed
    pub async fn destroy(&self, contact: &mut Contact) -> Result<bool> {
        let vid = require_vid(contact, "delete")?;

        debug!("Deleting contact: {}", vid);

        let path = format!("/contact/vid/{}", vid);
        let response = self.requester.request(Method::DELETE, &path, &[], None).await?;
        classify(Operation::Destroy, response)?;

        contact.mark_destroyed();
        info!("Deleted contact: {}", vid);
        Ok(true)
    }
}

fn require_vid(contact: &Contact, action: &str) -> Result<u64> {
    contact.vid().ok_or_else(|| {
        ContactsError::Validation(format!("contact has no vid, cannot {}", action))
    })
}

fn collect_properties<I, K, V>(properties: I) -> Properties
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    properties
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
