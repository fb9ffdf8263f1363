//! Default HTTP transport.
//!
//! This module provides [`HttpConnection`], the blocking `reqwest`
//! implementation of [`Connection`] for the v2 API. It handles base URL
//! construction, basic-auth credentials, JSON headers, and the mapping from
//! HTTP status codes onto [`ConnectionError`] variants.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::ApiConfig;
use crate::connection::{Connection, ConnectionError};

/// Library version from Cargo.toml, reported in the User-Agent header.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Blocking HTTP transport for a BigCommerce store's `/api/v2` endpoint.
///
/// The connection handles:
/// - Base URL construction from the configured store URL
/// - Basic-auth credentials (API username and token) on every request
/// - JSON Accept/Content-Type headers
/// - Status mapping: 204 and empty bodies become
///   [`ConnectionError::EmptyResponse`], 404 becomes
///   [`ConnectionError::NotFound`], other non-2xx become
///   [`ConnectionError::Http`]
///
/// # Thread Safety
///
/// `HttpConnection` is `Send + Sync`; wrap it in a
/// [`SharedConnection`](crate::connection::SharedConnection) to share it
/// across accessors.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use bigcommerce_api::{ApiConfig, ApiToken, HttpConnection, StoreUrl};
/// use bigcommerce_api::connection::Connection;
///
/// let config = ApiConfig::builder()
///     .store_url(StoreUrl::new("https://store-abc123.mybigcommerce.com")?)
///     .username("admin")
///     .token(ApiToken::new("api-token")?)
///     .build()?;
///
/// let connection = HttpConnection::new(config)?;
/// let product = connection.get("/products/123", None)?;
/// ```
#[derive(Debug)]
pub struct HttpConnection {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

// Verify HttpConnection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpConnection>();
};

impl HttpConnection {
    /// Creates a new connection for the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Transport`] if the underlying HTTP client
    /// cannot be constructed (e.g. TLS initialization failure).
    pub fn new(config: ApiConfig) -> Result<Self, ConnectionError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}BigCommerce API Library v{LIB_VERSION}");

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this connection was built from.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, url: &str) -> String {
        format!("{}/api/v2{url}", self.config.store_url())
    }

    fn authed(&self, builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        builder
            .basic_auth(self.config.username(), Some(self.config.token().as_ref()))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn decode(url: &str, response: reqwest::blocking::Response) -> Result<Value, ConnectionError> {
        let status = response.status();
        match status.as_u16() {
            204 => {
                return Err(ConnectionError::EmptyResponse {
                    url: url.to_string(),
                })
            }
            404 => {
                return Err(ConnectionError::NotFound {
                    url: url.to_string(),
                })
            }
            code if !status.is_success() => {
                let message = response.text().unwrap_or_default();
                return Err(ConnectionError::Http {
                    code,
                    url: url.to_string(),
                    message,
                });
            }
            _ => {}
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(ConnectionError::EmptyResponse {
                url: url.to_string(),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn check_status(url: &str, response: &reqwest::blocking::Response) -> Result<(), ConnectionError> {
        let status = response.status();
        match status.as_u16() {
            404 => Err(ConnectionError::NotFound {
                url: url.to_string(),
            }),
            code if !status.is_success() => Err(ConnectionError::Http {
                code,
                url: url.to_string(),
                message: String::new(),
            }),
            _ => Ok(()),
        }
    }
}

impl Connection for HttpConnection {
    fn get(
        &self,
        url: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Value, ConnectionError> {
        tracing::debug!(url, "GET");
        let mut builder = self.authed(self.client.get(self.endpoint(url)));
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let response = builder.send()?;
        Self::decode(url, response)
    }

    fn create(&self, url: &str, data: &Value) -> Result<Value, ConnectionError> {
        tracing::debug!(url, "POST");
        let response = self.authed(self.client.post(self.endpoint(url))).json(data).send()?;
        Self::decode(url, response)
    }

    fn update(&self, url: &str, data: &Value) -> Result<Value, ConnectionError> {
        tracing::debug!(url, "PUT");
        let response = self.authed(self.client.put(self.endpoint(url))).json(data).send()?;
        Self::decode(url, response)
    }

    fn delete(&self, url: &str) -> Result<(), ConnectionError> {
        tracing::debug!(url, "DELETE");
        let response = self.authed(self.client.delete(self.endpoint(url))).send()?;
        Self::check_status(url, &response)
    }

    fn resource_url(&self, name: &str) -> String {
        format!("/{name}")
    }
}
