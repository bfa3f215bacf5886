//! HTTP requester seam
//!
//! Resource clients never talk to `reqwest` directly. They go through
//! [`HttpRequester`], which returns the raw status plus the decoded body and
//! leaves all status interpretation to the caller.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::HubspotConfig;
use crate::{Error, Result};

pub use reqwest::Method;

/// Status code plus decoded body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body; `Null` when empty, `String` when not JSON
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one request against the API and reports what came back.
///
/// Implementations must not retry and must not treat non-2xx statuses as
/// errors; only transport failures are `Err`.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    /// Issue `method` against `path` (relative to the configured API root).
    ///
    /// # Arguments
    /// * `query` - extra query parameters; the credential is added by the implementation
    /// * `body` - JSON request body, if any
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse>;
}

/// `reqwest`-backed requester that signs every call with the `hapikey` parameter
#[derive(Clone)]
pub struct HubspotHttp {
    client: Client,
    api_root: String,
    api_key: String,
}

impl HubspotHttp {
    /// Create a requester from configuration
    pub fn new(config: &HubspotConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let prefix = config.api_prefix.trim_matches('/');
        let base = config.base_url.trim_end_matches('/');
        let api_root = if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, prefix)
        };

        debug!("HubSpot requester initialized for: {}", api_root);

        Ok(Self {
            client,
            api_root,
            api_key: config.api_key.clone(),
        })
    }

    /// Root URL that resource paths are appended to
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> Result<Url> {
        let url = if path.starts_with('/') {
            format!("{}{}", self.api_root, path)
        } else {
            format!("{}/{}", self.api_root, path)
        };
        Url::parse(&url).map_err(|e| Error::Url(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl HttpRequester for HubspotHttp {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path)?;

        debug!("{} {}", method, path);

        let mut builder = self
            .client
            .request(method, url)
            .query(&[("hapikey", self.api_key.as_str())]);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}

/// Decode a response body, keeping non-JSON payloads as plain strings
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn requester(base_url: &str) -> HubspotHttp {
        HubspotHttp::new(&HubspotConfig::new("demo").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_api_root_joins_prefix() {
        let http = requester("https://api.hubapi.com/");
        assert_eq!(http.api_root(), "https://api.hubapi.com/contacts/v1");

        let http = HubspotHttp::new(
            &HubspotConfig::new("demo")
                .with_base_url("http://localhost:8080")
                .with_api_prefix(""),
        )
        .unwrap();
        assert_eq!(http.api_root(), "http://localhost:8080");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = HubspotHttp::new(&HubspotConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_keeps_trailing_slash() {
        let http = requester("https://api.hubapi.com");
        let url = http.url("/contact/").unwrap();
        assert_eq!(url.as_str(), "https://api.hubapi.com/contacts/v1/contact/");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"vid": 1}"#), json!({"vid": 1}));
        assert_eq!(parse_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_api_response_is_success() {
        assert!(ApiResponse::new(200, Value::Null).is_success());
        assert!(ApiResponse::new(204, Value::Null).is_success());
        assert!(!ApiResponse::new(404, Value::Null).is_success());
        assert!(!ApiResponse::new(500, Value::Null).is_success());
    }

    #[tokio::test]
    async fn test_request_adds_credential_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts/v1/lists/all/contacts/all"))
            .and(query_param("hapikey", "demo"))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contacts": []})))
            .expect(1)
            .mount(&server)
            .await;

        let http = requester(&server.uri());
        let response = http
            .request(
                Method::GET,
                "/lists/all/contacts/all",
                &[("count", "5".to_string())],
                None,
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"contacts": []}));
    }

    #[tokio::test]
    async fn test_request_sends_json_body() {
        let server = MockServer::start().await;
        let payload = json!({"properties": [{"property": "email", "value": "a@b.com"}]});
        Mock::given(method("POST"))
            .and(path("/contacts/v1/contact/"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vid": 7})))
            .mount(&server)
            .await;

        let http = requester(&server.uri());
        let response = http
            .request(Method::POST, "/contact/", &[], Some(&payload))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body["vid"], 7);
    }

    #[tokio::test]
    async fn test_request_reports_error_status_without_failing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/contacts/v1/contact/vid/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let http = requester(&server.uri());
        let response = http
            .request(Method::DELETE, "/contact/vid/1", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!("oops"));
    }
}
