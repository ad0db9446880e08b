//! Client configuration: CRM address and API key.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ApiError, Result};

/// Version segment embedded in every endpoint URL.
pub const API_VERSION: u32 = 5;

/// Name of the credential field sent with every request.
pub const API_KEY_FIELD: &str = "apiKey";

pub const URL_ENV: &str = "RETAILCRM_URL";
pub const API_KEY_ENV: &str = "RETAILCRM_API_KEY";

/// The API key. `Debug` output is redacted by `secrecy`.
#[derive(Debug)]
pub struct Credentials(SecretString);

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(SecretString::from(api_key.into()))
    }

    pub(crate) fn api_key(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Validated connection settings for a [`RetailCrm`](crate::RetailCrm).
#[derive(Debug)]
pub struct ClientConfig {
    url: String,
    credentials: Credentials,
}

impl ClientConfig {
    /// `url` is the CRM account address, e.g. `https://demo.retailcrm.ru`.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ApiError::Config("CRM url is empty".to_string()));
        }
        Url::parse(url)?;

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::Config("API key is empty".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            credentials: Credentials::new(api_key),
        })
    }

    /// Read `RETAILCRM_URL` and `RETAILCRM_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV)
            .map_err(|_| ApiError::Config(format!("{URL_ENV} is not set")))?;
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ApiError::Config(format!("{API_KEY_ENV} is not set")))?;
        Self::new(url, api_key)
    }

    /// The configured account address, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `{url}/api/v5`, the prefix of every endpoint path.
    pub fn base_url(&self) -> String {
        format!("{}/api/v{API_VERSION}", self.url)
    }

    pub(crate) fn into_parts(self) -> (String, Credentials) {
        let base_url = self.base_url();
        (base_url, self.credentials)
    }
}
