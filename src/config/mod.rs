//! Client configuration.
//!
//! This module provides [`ApiConfig`], the configuration for connecting to a
//! BigCommerce store's legacy v2 API, built via [`ApiConfigBuilder`] with
//! fail-fast validation.
//!
//! The legacy v2 API authenticates with HTTP basic auth: the store's API
//! username and an API token, against the store's `/api/v2` base path.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{ApiConfig, ApiToken, StoreUrl};
//!
//! let config = ApiConfig::builder()
//!     .store_url(StoreUrl::new("https://store-abc123.mybigcommerce.com").unwrap())
//!     .username("admin")
//!     .token(ApiToken::new("api-token").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiToken, StoreUrl};

use crate::error::ConfigError;

/// Configuration for a BigCommerce v2 API connection.
///
/// Create instances with [`ApiConfig::builder`]. All fields are validated at
/// build time; an `ApiConfig` that exists is always usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    store_url: StoreUrl,
    username: String,
    token: ApiToken,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Returns a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Returns the store URL.
    #[must_use]
    pub const fn store_url(&self) -> &StoreUrl {
        &self.store_url
    }

    /// Returns the API username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API token.
    #[must_use]
    pub const fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Returns the optional User-Agent prefix.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`ApiConfig`].
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::{ApiConfig, ApiToken, ConfigError, StoreUrl};
///
/// let result = ApiConfig::builder()
///     .username("admin")
///     .build();
/// assert!(matches!(
///     result,
///     Err(ConfigError::MissingRequiredField { field: "store_url" })
/// ));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ApiConfigBuilder {
    store_url: Option<StoreUrl>,
    username: Option<String>,
    token: Option<ApiToken>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets the store URL.
    #[must_use]
    pub fn store_url(mut self, store_url: StoreUrl) -> Self {
        self.store_url = Some(store_url);
        self
    }

    /// Sets the API username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the API token.
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets an optional prefix for the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration, validating all required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] when `store_url`,
    /// `username`, or `token` is unset, and [`ConfigError::EmptyUsername`]
    /// when the username is empty.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let store_url = self
            .store_url
            .ok_or(ConfigError::MissingRequiredField { field: "store_url" })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(ApiConfig {
            store_url,
            username,
            token,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_builder() -> ApiConfigBuilder {
        ApiConfig::builder()
            .store_url(StoreUrl::new("https://store-abc123.mybigcommerce.com").unwrap())
            .username("admin")
            .token(ApiToken::new("token").unwrap())
    }

    #[test]
    fn test_builder_constructs_valid_config() {
        let config = valid_builder().build().unwrap();
        assert_eq!(
            config.store_url().as_ref(),
            "https://store-abc123.mybigcommerce.com"
        );
        assert_eq!(config.username(), "admin");
        assert_eq!(config.token().as_ref(), "token");
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_missing_store_url_fails() {
        let result = ApiConfig::builder()
            .username("admin")
            .token(ApiToken::new("token").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "store_url" })
        ));
    }

    #[test]
    fn test_builder_missing_token_fails() {
        let result = ApiConfig::builder()
            .store_url(StoreUrl::new("https://example.com").unwrap())
            .username("admin")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_empty_username_fails() {
        let result = valid_builder().username("").build();
        assert!(matches!(result, Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn test_builder_user_agent_prefix_is_optional() {
        let config = valid_builder().user_agent_prefix("my-app").build().unwrap();
        assert_eq!(config.user_agent_prefix(), Some("my-app"));
    }
}
