//! Top-level client facade.
//!
//! A [`Client`] owns one shared connection and hands out
//! [`ResourceAccessor`]s by resource-type name. Every resource the store's
//! API exposes is reachable this way, registered schema or not.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::connection::{ConnectionError, HttpConnection, SharedConnection};
use crate::resources::ResourceAccessor;

/// Client for one BigCommerce store.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_api::{ApiConfig, ApiToken, Client, StoreUrl};
///
/// let config = ApiConfig::builder()
///     .store_url(StoreUrl::new("https://store-abc123.mybigcommerce.com")?)
///     .username("admin")
///     .token(ApiToken::new("api-token")?)
///     .build()?;
///
/// let client = Client::connect(config)?;
/// let product = client.resource("Products").get(123)?;
///
/// // Types without a registered schema work the same way:
/// for redirect in client.resource("Redirects").get_all(Default::default()) {
///     println!("{}", redirect?.to_value());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    connection: SharedConnection,
}

impl Client {
    /// Connects to a store over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn connect(config: ApiConfig) -> Result<Self, ConnectionError> {
        Ok(Self {
            connection: Arc::new(HttpConnection::new(config)?),
        })
    }

    /// Builds a client over an existing connection. Useful for tests and
    /// custom transports.
    #[must_use]
    pub fn with_connection(connection: SharedConnection) -> Self {
        Self { connection }
    }

    /// Returns an accessor for the named resource type.
    ///
    /// Accessors are created fresh on every call; they are cheap and carry
    /// no cache.
    #[must_use]
    pub fn resource(&self, name: &str) -> ResourceAccessor {
        ResourceAccessor::new(name, Arc::clone(&self.connection))
    }

    /// Returns the underlying shared connection.
    #[must_use]
    pub const fn connection(&self) -> &SharedConnection {
        &self.connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connection;
    use serde_json::Value;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct NullConnection;

    impl Connection for NullConnection {
        fn get(
            &self,
            url: &str,
            _query: Option<&HashMap<String, String>>,
        ) -> Result<Value, ConnectionError> {
            Err(ConnectionError::NotFound {
                url: url.to_string(),
            })
        }

        fn create(&self, url: &str, _data: &Value) -> Result<Value, ConnectionError> {
            Err(ConnectionError::NotFound {
                url: url.to_string(),
            })
        }

        fn update(&self, url: &str, _data: &Value) -> Result<Value, ConnectionError> {
            Err(ConnectionError::NotFound {
                url: url.to_string(),
            })
        }

        fn delete(&self, url: &str) -> Result<(), ConnectionError> {
            Err(ConnectionError::NotFound {
                url: url.to_string(),
            })
        }

        fn resource_url(&self, name: &str) -> String {
            format!("/{name}")
        }
    }

    #[test]
    fn test_resource_accessor_carries_the_requested_name() {
        let client = Client::with_connection(Arc::new(NullConnection));
        let accessor = client.resource("Products");
        assert_eq!(accessor.name(), "Products");
        assert_eq!(accessor.url(), "/products");
    }

    #[test]
    fn test_each_resource_call_builds_a_fresh_accessor() {
        let client = Client::with_connection(Arc::new(NullConnection));
        let first = client.resource("Orders");
        let second = client.resource("Orders");
        assert_eq!(first.url(), second.url());
    }
}
