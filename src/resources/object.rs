//! Realized resource records.
//!
//! A [`ResourceObject`] is the in-memory representation of one server record:
//! committed fields as fetched, pending writes buffered until
//! [`update`](ResourceObject::update), and transparent inflation of embedded
//! sub-resource references on first read.
//!
//! # Field access
//!
//! Reads resolve pending writes first, then committed state, and fail with
//! [`ResourceError::UnknownField`] when the name exists in neither. When the
//! read lands on a field the schema declares as a sub-resource and the stored
//! value is still its raw reference mapping, the reference is inflated: a
//! scoped accessor is built from the mapping's `resource` URL, the nested
//! records are fetched, and the realization replaces the raw mapping in
//! place. Inflation runs at most once per field per instance;
//! [`refresh`](ResourceObject::refresh) re-runs it on demand.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut country = client.resource("Countries").get(226)?;
//! let states = country.get("states")?; // one network round per page, then cached
//! for state in states.as_collection().unwrap() {
//!     println!("{}", state.to_value());
//! }
//!
//! let mut order = client.resource("Orders").get(101)?;
//! order.set("status_id", serde_json::json!(2))?;
//! order.update()?; // flushes the staged write, reloads from the response
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::connection::SharedConnection;
use crate::resources::accessor::{EnumerateParams, ResourceAccessor};
use crate::resources::fields::{FieldContainer, FieldRef, FieldValue};
use crate::resources::schema::{ParentRef, ResourceSchema, SubResourceSpec};
use crate::resources::ResourceError;

/// One realized record of a resource type.
#[derive(Debug)]
pub struct ResourceObject {
    schema: &'static ResourceSchema,
    connection: SharedConnection,
    id: String,
    url: String,
    fields: FieldContainer,
    parent: Option<ParentRef>,
}

impl ResourceObject {
    /// Wraps one raw server record.
    ///
    /// `collection_url` is the URL of the collection the record belongs to;
    /// the object's own URL is `collection_url/id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedPayload`] when the record is not a
    /// JSON object, and [`ResourceError::MissingId`] when it lacks a numeric
    /// or string `id` field.
    pub fn new(
        schema: &'static ResourceSchema,
        connection: SharedConnection,
        collection_url: &str,
        record: Value,
        parent: Option<ParentRef>,
    ) -> Result<Self, ResourceError> {
        let Value::Object(map) = record else {
            return Err(ResourceError::UnexpectedPayload {
                url: collection_url.to_string(),
            });
        };
        let id = match map.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(ResourceError::MissingId {
                    url: collection_url.to_string(),
                })
            }
        };
        let url = format!("{collection_url}/{id}");
        Ok(Self {
            schema,
            connection,
            id,
            url,
            fields: FieldContainer::from_record(map),
            parent,
        })
    }

    /// Returns the record's `id`, as a string.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the record's own URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the schema this record was realized with.
    #[must_use]
    pub const fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Returns the informational back-reference to the record this one was
    /// reached through, if it was reached through one.
    #[must_use]
    pub const fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    /// Returns `true` when writes are staged but not yet flushed.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.fields.pending_is_empty()
    }

    /// Reads a field: pending writes first, then committed state.
    ///
    /// First read of a declared sub-resource field whose value is still a
    /// raw reference mapping inflates it (one or more network calls) and
    /// caches the realization; later reads return the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] when the field exists in
    /// neither pending nor committed state,
    /// [`ResourceError::InvalidSubResourceRef`] when a sub-resource mapping
    /// carries no `resource` URL, and any transport error raised during
    /// inflation.
    pub fn get(&mut self, name: &str) -> Result<FieldRef<'_>, ResourceError> {
        if !self.fields.contains(name) {
            return Err(ResourceError::UnknownField {
                field: name.to_string(),
            });
        }

        if !self.fields.has_pending(name) {
            let plan = match (self.schema.sub_resource(name), self.fields.committed(name)) {
                (Some(spec), Some(FieldValue::Raw(reference @ Value::Object(_)))) => {
                    Some((spec, reference.clone()))
                }
                _ => None,
            };
            if let Some((spec, reference)) = plan {
                let url = resource_ref_url(&reference).ok_or_else(|| {
                    ResourceError::InvalidSubResourceRef {
                        field: name.to_string(),
                    }
                })?;
                let realized = self.inflate(spec, &url)?;
                self.fields.cache(name, realized);
            }
        }

        self.fields
            .get(name)
            .ok_or_else(|| ResourceError::UnknownField {
                field: name.to_string(),
            })
    }

    /// Re-runs sub-resource inflation for `name` against
    /// `self.url/name`, overwriting the cached realization.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSubResource`] when the schema does not
    /// declare `name` as a sub-resource, plus any transport error.
    pub fn refresh(&mut self, name: &str) -> Result<FieldRef<'_>, ResourceError> {
        let spec =
            self.schema
                .sub_resource(name)
                .ok_or_else(|| ResourceError::NotSubResource {
                    field: name.to_string(),
                })?;
        let url = format!("{}/{name}", self.url);
        let realized = self.inflate(spec, &url)?;
        self.fields.cache(name, realized);
        self.fields
            .get(name)
            .ok_or_else(|| ResourceError::UnknownField {
                field: name.to_string(),
            })
    }

    /// Stages a write. The value is buffered locally until
    /// [`update`](Self::update) flushes it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] for names present in neither
    /// committed nor pending state, and [`ResourceError::ReadOnlyField`]
    /// when the schema's writable policy rejects the field.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        if !self.fields.contains(name) {
            return Err(ResourceError::UnknownField {
                field: name.to_string(),
            });
        }
        if !self.schema.is_writable(name) {
            return Err(ResourceError::ReadOnlyField {
                field: name.to_string(),
            });
        }
        self.fields.stage(name, value);
        Ok(())
    }

    /// Flushes staged writes as a partial update to the record's own URL.
    ///
    /// No-op when nothing is staged. On success the committed state is
    /// replaced wholesale by the server's response body (fields the response
    /// omits disappear) and the staged writes are cleared. On failure the
    /// staged writes survive, so calling again retries the same update.
    ///
    /// # Errors
    ///
    /// Propagates any transport error unmodified; returns
    /// [`ResourceError::UnexpectedPayload`] when the response body is not a
    /// JSON object.
    pub fn update(&mut self) -> Result<(), ResourceError> {
        if self.fields.pending_is_empty() {
            return Ok(());
        }
        let payload = self.fields.pending_object();
        tracing::info!(url = %self.url, resource = self.schema.name, "updating resource");
        tracing::debug!(payload = %payload, "update payload");

        let body = self.connection.update(&self.url, &payload)?;
        let Value::Object(map) = body else {
            return Err(ResourceError::UnexpectedPayload {
                url: self.url.clone(),
            });
        };
        self.fields.replace_committed(map);
        self.fields.clear_pending();
        Ok(())
    }

    /// Deletes the record server-side. Local state is untouched; discard
    /// the instance afterwards.
    ///
    /// # Errors
    ///
    /// Propagates any transport error unmodified.
    pub fn delete(&self) -> Result<(), ResourceError> {
        self.connection.delete(&self.url).map_err(Into::into)
    }

    /// Renders the committed view as JSON. Staged writes are not merged;
    /// flush them with [`update`](Self::update) first.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.fields.to_value()
    }

    fn inflate(
        &self,
        spec: &'static SubResourceSpec,
        url: &str,
    ) -> Result<FieldValue, ResourceError> {
        let accessor = ResourceAccessor::scoped(
            spec.schema,
            url.to_string(),
            Arc::clone(&self.connection),
            Some(self.as_parent_ref()),
        );
        if spec.single {
            Ok(FieldValue::Object(accessor.get_scoped()?))
        } else {
            let mut items = Vec::new();
            for item in accessor.get_all(EnumerateParams::default()) {
                items.push(item?);
            }
            Ok(FieldValue::Collection(items))
        }
    }

    fn as_parent_ref(&self) -> ParentRef {
        ParentRef {
            resource: self.schema.name,
            url: self.url.clone(),
        }
    }
}

/// Resolves a sub-resource reference to its URL: either the value is the URL
/// string itself, or a mapping carrying the URL under the reserved
/// `resource` key.
fn resource_ref_url(reference: &Value) -> Option<String> {
    match reference {
        Value::String(url) => Some(url.clone()),
        Value::Object(map) => map
            .get("resource")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}
