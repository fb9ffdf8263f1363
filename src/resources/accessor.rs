//! Resource accessors and paginated enumeration.
//!
//! A [`ResourceAccessor`] is the entry point for one resource type over one
//! connection: it resolves the type's schema and base URL once at
//! construction, then exposes create/get/enumerate/count/delete against that
//! URL. Accessors are cheap; nested sub-resource access builds a fresh one
//! per inflation.
//!
//! # Enumeration
//!
//! [`get_all`](ResourceAccessor::get_all) presents a single flat 1-based
//! index over the API's page-based protocol. The returned [`ResourceIter`]
//! fetches one page per network call, lazily, only when the caller iterates
//! past the buffered page; abandoning the iterator is the cancellation
//! mechanism. A short page ends enumeration even when the requested limit is
//! not yet met, and an empty-response answer for a page fetch is the normal
//! end-of-data signal, not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! let products = client.resource("Products");
//! for product in products.get_all(EnumerateParams::default().start(51).limit(10)) {
//!     println!("{}", product?.to_value());
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde_json::Value;

use crate::connection::{ConnectionError, SharedConnection};
use crate::resources::filters::FilterSet;
use crate::resources::registry::ResourceRegistry;
use crate::resources::schema::{ParentRef, ResourceSchema, SubResourceSpec};
use crate::resources::{ResourceError, ResourceObject};

/// Hard cap on page size imposed by the v2 API.
pub const PAGE_SIZE_CAP: u64 = 250;

/// Parameters for [`ResourceAccessor::get_all`].
///
/// `start` is a 1-based logical index into the flat collection; it may land
/// anywhere inside a page. `limit = 0` means all remaining items from
/// `start` to the end of the collection.
#[derive(Debug, Clone)]
pub struct EnumerateParams {
    /// 1-based index of the first item to yield.
    pub start: u64,
    /// Maximum number of items to yield; `0` means unbounded.
    pub limit: u64,
    /// Filter values to send with every page request.
    pub query: FilterSet,
    /// Preferred page size; capped by [`PAGE_SIZE_CAP`] and by what is
    /// still wanted.
    pub max_per_page: u64,
}

impl Default for EnumerateParams {
    fn default() -> Self {
        Self {
            start: 1,
            limit: 0,
            query: FilterSet::new(),
            max_per_page: 50,
        }
    }
}

impl EnumerateParams {
    /// Sets the 1-based start index.
    #[must_use]
    pub const fn start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Sets the item limit; `0` means unbounded.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the filter values sent with every page request.
    #[must_use]
    pub fn query(mut self, query: FilterSet) -> Self {
        self.query = query;
        self
    }

    /// Sets the preferred page size.
    #[must_use]
    pub const fn max_per_page(mut self, max_per_page: u64) -> Self {
        self.max_per_page = max_per_page;
        self
    }
}

/// Entry point for one resource type over one connection.
///
/// Constructed by name for top-level resources, or scoped to an
/// already-known URL for sub-resource access. Unregistered names still work:
/// they resolve to the default schema and to the URL the connection computes
/// for the lowercased name.
#[derive(Debug)]
pub struct ResourceAccessor {
    name: String,
    schema: &'static ResourceSchema,
    url: String,
    connection: SharedConnection,
    parent: Option<ParentRef>,
}

impl ResourceAccessor {
    /// Creates an accessor for a resource type by name.
    ///
    /// The schema comes from the load-time registry (default schema when the
    /// name is unregistered); the base URL comes from the registry's
    /// hardcoded sub-resource table, falling back to
    /// [`Connection::resource_url`](crate::connection::Connection::resource_url)
    /// for the lowercased name.
    #[must_use]
    pub fn new(name: impl Into<String>, connection: SharedConnection) -> Self {
        let name = name.into();
        let registry = ResourceRegistry::global();
        let schema = registry.schema(&name);
        let url = registry.sub_resource_url(&name).map_or_else(
            || connection.resource_url(&name.to_lowercase()),
            ToString::to_string,
        );
        Self {
            name,
            schema,
            url,
            connection,
            parent: None,
        }
    }

    /// Creates an accessor scoped to an already-known (schema, URL, parent)
    /// triple. Used for nested sub-resource access; skips the registry.
    #[must_use]
    pub fn scoped(
        schema: &'static ResourceSchema,
        url: String,
        connection: SharedConnection,
        parent: Option<ParentRef>,
    ) -> Self {
        Self {
            name: schema.name.to_string(),
            schema,
            url,
            connection,
            parent,
        }
    }

    /// Returns the resource type name this accessor was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the schema in effect for this accessor.
    #[must_use]
    pub const fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Retrieves the record with the given id.
    ///
    /// # Errors
    ///
    /// Propagates [`ConnectionError::NotFound`] from the transport when the
    /// record is absent.
    pub fn get(&self, id: u64) -> Result<ResourceObject, ResourceError> {
        let record = self.connection.get(&format!("{}/{id}", self.url), None)?;
        self.wrap(record)
    }

    /// Retrieves the single record a scoped singleton reference points at
    /// (a get with no id suffix).
    ///
    /// # Errors
    ///
    /// Propagates any transport error unmodified.
    pub fn get_scoped(&self) -> Result<ResourceObject, ResourceError> {
        let record = self.connection.get(&self.url, None)?;
        self.wrap(record)
    }

    /// Enumerates the collection lazily; see the module docs for the paging
    /// contract.
    #[must_use]
    pub fn get_all(&self, params: EnumerateParams) -> ResourceIter {
        let plan = PagePlan::new(params.start, params.limit, params.max_per_page);
        ResourceIter {
            connection: Arc::clone(&self.connection),
            schema: self.schema,
            url: self.url.clone(),
            parent: self.parent.clone(),
            query: params.query.query_map(),
            page_size: plan.page_size,
            next_page: plan.first_page,
            skip: plan.skip,
            remaining: plan.remaining,
            buffer: VecDeque::new(),
            last_page: false,
            done: false,
        }
    }

    /// Retrieves the collection count, with optional filter values.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedPayload`] when the response lacks
    /// a numeric `count` key; transport errors propagate unmodified.
    pub fn get_count(&self, query: Option<&FilterSet>) -> Result<u64, ResourceError> {
        let url = format!("{}/count", self.url);
        let params = query.map(FilterSet::query_map).filter(|map| !map.is_empty());
        let body = self.connection.get(&url, params.as_ref())?;
        body.get("count")
            .and_then(Value::as_u64)
            .ok_or(ResourceError::UnexpectedPayload { url })
    }

    /// Creates a record from the given data.
    ///
    /// With `parent_id`, the create targets a dependent sub-resource: the id
    /// is spliced into the second path segment, so an accessor at
    /// `/orders/products` creates under `/orders/{parent_id}/products`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedUrl`], before any network call,
    /// when `parent_id` is given but the base URL is not `/parent/child`
    /// shaped. Transport errors propagate unmodified.
    pub fn create(
        &self,
        data: &Value,
        parent_id: Option<u64>,
    ) -> Result<ResourceObject, ResourceError> {
        let url = match parent_id {
            Some(id) => splice_parent_id(&self.url, id)?,
            None => self.url.clone(),
        };
        let record = self.connection.create(&url, data)?;
        ResourceObject::new(
            self.schema,
            Arc::clone(&self.connection),
            &url,
            record,
            self.parent.clone(),
        )
    }

    /// Deletes the record with the given id. Equivalent to calling
    /// [`ResourceObject::delete`] on the realized record.
    ///
    /// # Errors
    ///
    /// Propagates any transport error unmodified.
    pub fn delete_from_id(&self, id: u64) -> Result<(), ResourceError> {
        self.connection
            .delete(&format!("{}/{id}", self.url))
            .map_err(Into::into)
    }

    /// Returns the filter set the resource type declares, or an empty
    /// default.
    #[must_use]
    pub fn filters(&self) -> FilterSet {
        self.schema.filter_set()
    }

    /// Returns the sub-resource declarations of the resource type
    /// (read-only introspection).
    #[must_use]
    pub const fn sub_resources(&self) -> &'static [SubResourceSpec] {
        self.schema.sub_resources
    }

    fn wrap(&self, record: Value) -> Result<ResourceObject, ResourceError> {
        ResourceObject::new(
            self.schema,
            Arc::clone(&self.connection),
            &self.url,
            record,
            self.parent.clone(),
        )
    }
}

/// Splices a parent id into the second segment of a `/parent/child` URL.
fn splice_parent_id(url: &str, parent_id: u64) -> Result<String, ResourceError> {
    let segments: Vec<&str> = url.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        [parent, child] if !parent.is_empty() && !child.is_empty() => {
            Ok(format!("/{parent}/{parent_id}/{child}"))
        }
        _ => Err(ResourceError::MalformedUrl {
            url: url.to_string(),
        }),
    }
}

/// Precomputed paging state for one enumeration.
struct PagePlan {
    page_size: u64,
    first_page: u64,
    skip: usize,
    remaining: u64,
}

impl PagePlan {
    fn new(start: u64, limit: u64, max_per_page: u64) -> Self {
        let offset = start.saturating_sub(1);
        let remaining = if limit == 0 { u64::MAX } else { limit };
        let page_size = max_per_page.min(PAGE_SIZE_CAP).min(remaining).max(1);
        Self {
            page_size,
            first_page: offset / page_size + 1,
            skip: usize::try_from(offset % page_size).unwrap_or(usize::MAX),
            remaining,
        }
    }
}

/// Lazy, pull-based enumeration over one resource collection.
///
/// Each [`next`](Iterator::next) call performs at most one blocking network
/// operation (a page fetch); items within a fetched page are served from the
/// buffer. Yields `Err` at most once: on the first non-end-of-data transport
/// failure, after which the iterator is exhausted.
#[derive(Debug)]
pub struct ResourceIter {
    connection: SharedConnection,
    schema: &'static ResourceSchema,
    url: String,
    parent: Option<ParentRef>,
    query: HashMap<String, String>,
    page_size: u64,
    next_page: u64,
    skip: usize,
    remaining: u64,
    buffer: VecDeque<Value>,
    last_page: bool,
    done: bool,
}

impl ResourceIter {
    fn fetch_page(&mut self) -> Result<(), ResourceError> {
        let page = self.next_page;
        self.next_page += 1;

        let mut query = self.query.clone();
        query.insert("page".to_string(), page.to_string());
        query.insert("limit".to_string(), self.page_size.to_string());
        tracing::debug!(url = %self.url, page, limit = self.page_size, "fetching page");

        let body = self.connection.get(&self.url, Some(&query))?;
        let Value::Array(records) = body else {
            return Err(ResourceError::UnexpectedPayload {
                url: self.url.clone(),
            });
        };

        if u64::try_from(records.len()).unwrap_or(u64::MAX) < self.page_size {
            self.last_page = true;
        }
        // The within-page offset applies to the first fetched page only.
        let skip = std::mem::take(&mut self.skip);
        self.buffer.extend(records.into_iter().skip(skip));
        Ok(())
    }

    fn wrap(&self, record: Value) -> Result<ResourceObject, ResourceError> {
        ResourceObject::new(
            self.schema,
            Arc::clone(&self.connection),
            &self.url,
            record,
            self.parent.clone(),
        )
    }
}

impl Iterator for ResourceIter {
    type Item = Result<ResourceObject, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.remaining == 0 {
                return None;
            }
            if let Some(record) = self.buffer.pop_front() {
                self.remaining -= 1;
                return Some(self.wrap(record));
            }
            if self.last_page {
                // A short page ends enumeration even when the limit is not
                // yet met.
                self.done = true;
                return None;
            }
            match self.fetch_page() {
                Ok(()) => {}
                Err(ResourceError::Connection(ConnectionError::EmptyResponse { .. })) => {
                    self.done = true;
                    return None;
                }
                Err(error) => {
                    self.done = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for ResourceIter {}
