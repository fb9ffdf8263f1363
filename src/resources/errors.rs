//! Error types for resource mapping operations.
//!
//! This module contains [`ResourceError`], the error surface of accessors and
//! realized objects. Transport failures are wrapped transparently and never
//! translated; the remaining variants are raised by the mapping layer itself
//! before or after the wire.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::ResourceError;
//!
//! match accessor.get(123) {
//!     Ok(product) => println!("{:?}", product),
//!     Err(ResourceError::Connection(e)) => eprintln!("transport: {e}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::connection::ConnectionError;

/// Error type for accessor and resource object operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A transport-level failure, propagated unmodified.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The field is present in neither committed nor pending state.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// The field name that was requested.
        field: String,
    },

    /// The field is declared read-only, or falls outside a restricted
    /// writable set.
    #[error("field '{field}' is read-only")]
    ReadOnlyField {
        /// The field name that was written.
        field: String,
    },

    /// A dependent create was attempted against a base URL that is not of
    /// the `/parent/child` shape required for parent-id substitution.
    #[error("cannot splice a parent id into '{url}': expected a /parent/child URL")]
    MalformedUrl {
        /// The base URL that was rejected.
        url: String,
    },

    /// The record lacks the reserved `id` field required to compute its own
    /// URL.
    #[error("record from {url} has no usable 'id' field")]
    MissingId {
        /// The collection URL the record came from.
        url: String,
    },

    /// The field is not declared as a sub-resource, so it cannot be
    /// refreshed.
    #[error("field '{field}' is not a declared sub-resource")]
    NotSubResource {
        /// The field name that was requested.
        field: String,
    },

    /// A sub-resource field held a mapping without a usable `resource`
    /// reference.
    #[error("sub-resource field '{field}' carries no 'resource' reference")]
    InvalidSubResourceRef {
        /// The field name that was being inflated.
        field: String,
    },

    /// The server answered with a JSON shape the operation cannot use
    /// (e.g. a non-array collection page, or a count response without a
    /// `count` key).
    #[error("unexpected payload shape from {url}")]
    UnexpectedPayload {
        /// The URL that produced the payload.
        url: String,
    },
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
