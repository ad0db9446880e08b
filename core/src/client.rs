//! The RetailCRM client.
//!
//! # Design
//! `RetailCrm` holds a [`RequestBuilder`] (base URL and credentials) and a
//! [`Transport`]. It keeps no per-call state: every operation builds its own
//! [`Endpoint`], so one client can serve concurrent callers. The per-endpoint
//! operations live in [`crate::endpoints`]; each is a pure `Endpoint`
//! constructor plus a method on `RetailCrm` that sends it.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::request::{Endpoint, RequestBuilder};
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};

/// Synchronous client for the RetailCRM v5 API.
#[derive(Debug)]
pub struct RetailCrm<T = UreqTransport> {
    builder: RequestBuilder,
    transport: T,
}

impl RetailCrm<UreqTransport> {
    /// `url` is the account address, e.g. `https://demo.retailcrm.ru`.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(url, api_key)?)
    }

    /// Create from `RETAILCRM_URL` and `RETAILCRM_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config, UreqTransport::new()))
    }
}

impl<T: Transport> RetailCrm<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let (base_url, credentials) = config.into_parts();
        Self {
            builder: RequestBuilder::new(base_url, credentials),
            transport,
        }
    }

    /// The versioned prefix every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `endpoint` without sending it.
    pub fn build(&self, endpoint: &Endpoint) -> Result<HttpRequest> {
        self.builder.build(endpoint)
    }

    /// Send `endpoint` and wrap whatever comes back.
    pub fn send(&self, endpoint: Endpoint) -> Result<Response> {
        let request = self.builder.build(&endpoint)?;
        tracing::debug!(method = %endpoint.method, path = %endpoint.path, "sending request");

        let response = self.transport.execute(&request)?;
        tracing::debug!(
            method = %endpoint.method,
            path = %endpoint.path,
            status = response.status,
            "received response"
        );

        Response::try_from(response)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{client, client_with, RecordingTransport};
    use super::*;
    use crate::error::ApiError;
    use crate::http::HttpMethod;

    #[test]
    fn base_url_is_versioned() {
        assert_eq!(client().base_url(), "https://demo.retailcrm.ru/api/v5");
    }

    #[test]
    fn send_returns_envelope_for_remote_rejection() {
        let transport = RecordingTransport::default()
            .respond(404, r#"{"success":false,"errorMsg":"Not found"}"#);
        let response = client_with(transport).send(Endpoint::get("orders/1")).unwrap();
        assert_eq!(response.status(), 404);
        assert!(!response.is_successful());
        assert_eq!(response.error_message(), Some("Not found"));
    }

    #[test]
    fn send_surfaces_malformed_body() {
        let transport = RecordingTransport::default().respond(200, "not json");
        let err = client_with(transport)
            .send(Endpoint::get("orders"))
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 200, .. }));
    }

    #[test]
    fn send_passes_built_request_to_transport() {
        let crm = client();
        crm.send(Endpoint::post("orders/create").param("order", json!({}).to_string()))
            .unwrap();
        let request = crm.transport().last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://demo.retailcrm.ru/api/v5/orders/create");
        assert_eq!(request.body.as_deref(), Some("order=%7B%7D&apiKey=test-key"));
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_sync<S: Send + Sync>() {}
        assert_sync::<RetailCrm>();
    }
}
