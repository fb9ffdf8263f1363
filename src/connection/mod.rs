//! Transport boundary for the v2 API.
//!
//! This module defines the [`Connection`] trait, the contract between the
//! resource mapping layer and whatever actually moves bytes. The resource
//! layer never touches HTTP directly; it calls a `Connection` with resource
//! URLs and JSON values and propagates whatever the connection raises.
//!
//! The one condition the mapping layer interprets itself is
//! [`ConnectionError::EmptyResponse`]: during enumeration it marks the normal
//! end of data (the v2 API answers a page past the end with `204 No Content`),
//! and must stay distinct from [`ConnectionError::NotFound`].
//!
//! The default implementation is [`HttpConnection`]; tests substitute
//! in-memory connections.

mod http;

pub use http::HttpConnection;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// A shared handle to a connection, cloned into every accessor and object.
pub type SharedConnection = Arc<dyn Connection>;

/// Blocking transport for the BigCommerce v2 API.
///
/// Implementations execute one HTTP verb per call and block until the server
/// answers. They perform no retries and no error translation beyond mapping
/// the wire status onto [`ConnectionError`]; everything else propagates to
/// the caller unmodified.
///
/// All `url` arguments are v2 resource paths (e.g. `/products/123`), not
/// absolute URLs.
pub trait Connection: fmt::Debug + Send + Sync {
    /// Fetches a record or collection page as decoded JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::EmptyResponse`] when the fetch yields
    /// nothing, which callers must treat as distinct from
    /// [`ConnectionError::NotFound`].
    fn get(
        &self,
        url: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Value, ConnectionError>;

    /// Creates a record and returns it as the server materialized it.
    ///
    /// # Errors
    ///
    /// Propagates any transport failure unmodified.
    fn create(&self, url: &str, data: &Value) -> Result<Value, ConnectionError>;

    /// Applies a partial update and returns the full record after the update.
    ///
    /// # Errors
    ///
    /// Propagates any transport failure unmodified.
    fn update(&self, url: &str, data: &Value) -> Result<Value, ConnectionError>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Propagates any transport failure unmodified.
    fn delete(&self, url: &str) -> Result<(), ConnectionError>;

    /// Returns the collection URL for a lowercased resource name.
    ///
    /// Used as the fallback when no hardcoded sub-resource URL is registered
    /// for a resource type.
    fn resource_url(&self, name: &str) -> String;
}

/// Errors raised by a [`Connection`].
///
/// The mapping layer propagates these unmodified, with one exception:
/// [`ConnectionError::EmptyResponse`] is consumed inside enumeration as the
/// normal end-of-data signal and never leaks out of `get_all`.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The fetch yielded nothing (HTTP 204 or an empty body).
    ///
    /// This is the normal end-of-data condition for paged enumeration, not
    /// an error in itself.
    #[error("empty response from {url}")]
    EmptyResponse {
        /// The URL that produced the empty response.
        url: String,
    },

    /// The record does not exist (HTTP 404).
    #[error("resource not found at {url}")]
    NotFound {
        /// The URL that was requested.
        url: String,
    },

    /// Any other non-success HTTP status.
    #[error("request to {url} failed with status {code}: {message}")]
    Http {
        /// The HTTP status code.
        code: u16,
        /// The URL that was requested.
        url: String,
        /// The response body, verbatim.
        message: String,
    },

    /// A network-level failure (connectivity, TLS, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

// Verify ConnectionError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionError>();
};
