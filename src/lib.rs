//! # BigCommerce API Rust Client
//!
//! A Rust client for the BigCommerce legacy v2 REST API, providing an
//! object-mapping layer over the API's opaque JSON records: lazily realized,
//! diff-tracked objects, transparent sub-resource navigation, and uniform
//! paginated enumeration across every resource type the API exposes.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`ApiConfig`] and validated newtypes
//! - A blocking [`Connection`](connection::Connection) boundary with a
//!   default HTTP transport ([`HttpConnection`])
//! - [`ResourceAccessor`]: create/get/enumerate/count/delete for any
//!   resource type, registered or not
//! - [`ResourceObject`]: committed fields, buffered writes flushed with
//!   `update()`, lazy sub-resource inflation on first read
//! - Lazy paginated enumeration with arbitrary start offsets and limits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bigcommerce_api::{ApiConfig, ApiToken, Client, EnumerateParams, StoreUrl};
//!
//! let config = ApiConfig::builder()
//!     .store_url(StoreUrl::new("https://store-abc123.mybigcommerce.com")?)
//!     .username("admin")
//!     .token(ApiToken::new("api-token")?)
//!     .build()?;
//!
//! let client = Client::connect(config)?;
//!
//! // Enumerate lazily; one network call per page.
//! for product in client.resource("Products").get_all(EnumerateParams::default().limit(20)) {
//!     let product = product?;
//!     println!("{} {}", product.id(), product.to_value()["name"]);
//! }
//!
//! // Realized objects buffer writes until update() flushes them.
//! let mut product = client.resource("Products").get(123)?;
//! product.set("name", serde_json::json!("New name"))?;
//! product.update()?;
//!
//! // Sub-resources inflate transparently on first read.
//! let mut country = client.resource("Countries").get(226)?;
//! let states = country.get("states")?;
//! ```
//!
//! ## Design Principles
//!
//! - **Opaque payloads**: records stay `serde_json::Value`; field names and
//!   nesting are API-defined, only `id`, `resource`, and `count` are
//!   interpreted structurally
//! - **Blocking, single-owner**: every network-touching call blocks until
//!   the transport answers; objects are single-owner, with no write-conflict
//!   detection
//! - **No translation of transport errors**: failures propagate unmodified;
//!   the only condition the mapping layer consumes is the empty-response
//!   end-of-data signal inside enumeration
//! - **No global state** beyond the immutable load-time resource registry

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use client::Client;
pub use config::{ApiConfig, ApiConfigBuilder, ApiToken, StoreUrl};
pub use connection::{Connection, ConnectionError, HttpConnection, SharedConnection};
pub use error::ConfigError;
pub use resources::{
    EnumerateParams, FieldRef, FieldValue, FilterKind, FilterSet, ParentRef, ResourceAccessor,
    ResourceError, ResourceIter, ResourceObject, ResourceRegistry, ResourceSchema,
    SubResourceSpec, PAGE_SIZE_CAP,
};
