//! hs-core: shared plumbing for the HubSpot resource clients
//!
//! Provides the credential configuration and the HTTP requester seam that
//! resource crates (such as `hs-contacts`) build their requests through.

pub mod config;
pub mod error;
pub mod http;

pub use config::HubspotConfig;
pub use error::{Error, Result};
pub use http::{ApiResponse, HttpRequester, HubspotHttp, Method};
