//! The object mapping layer: accessors, realized objects, schemas, filters.
//!
//! This module turns opaque JSON records from the v2 API into lazily
//! realized, diff-tracked objects:
//!
//! - [`ResourceAccessor`] resolves a resource-type name to a schema and base
//!   URL and implements create/get/enumerate/count/delete
//! - [`ResourceObject`] is one realized record: committed fields, pending
//!   writes, transparent sub-resource inflation
//! - [`ResourceRegistry`](registry::ResourceRegistry) maps names to static
//!   [`ResourceSchema`]s, with a default for unregistered types
//! - [`FilterSet`] carries declared filters and query values

pub mod accessor;
mod errors;
pub mod fields;
pub mod filters;
pub mod object;
pub mod registry;
pub mod schema;

pub use accessor::{EnumerateParams, ResourceAccessor, ResourceIter, PAGE_SIZE_CAP};
pub use errors::ResourceError;
pub use fields::{FieldContainer, FieldRef, FieldValue};
pub use filters::{FilterKind, FilterSet};
pub use object::ResourceObject;
pub use registry::ResourceRegistry;
pub use schema::{ParentRef, ResourceSchema, SubResourceSpec};
