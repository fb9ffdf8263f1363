//! Field storage for realized resource objects.
//!
//! A [`FieldContainer`] keeps two maps: `committed` holds what the server
//! returned (raw JSON or previously inflated sub-resources), `pending` holds
//! local writes that have not been flushed. Reads resolve pending first, so
//! a staged value always wins over fetched state. Pending values are always
//! [`FieldValue::Raw`]; inflated values only ever live in the committed map.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::resources::ResourceObject;

/// One stored field value: raw JSON as fetched, or a realized sub-resource.
#[derive(Debug)]
pub enum FieldValue {
    /// A raw JSON value, exactly as the server returned it.
    Raw(Value),
    /// A realized singleton sub-resource.
    Object(ResourceObject),
    /// A realized sub-resource collection, in server order.
    Collection(Vec<ResourceObject>),
}

impl FieldValue {
    /// Returns the raw JSON value, if this field has not been inflated.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the realized singleton, if this field was inflated as one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ResourceObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the realized collection, if this field was inflated as one.
    #[must_use]
    pub fn as_collection(&self) -> Option<&[ResourceObject]> {
        match self {
            Self::Collection(items) => Some(items),
            _ => None,
        }
    }

    /// Renders the value back to JSON. Realized sub-resources render their
    /// committed fields.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Raw(value) => value.clone(),
            Self::Object(object) => object.to_value(),
            Self::Collection(items) => {
                Value::Array(items.iter().map(ResourceObject::to_value).collect())
            }
        }
    }
}

/// Committed and pending field state for one realized object.
#[derive(Debug, Default)]
pub struct FieldContainer {
    committed: BTreeMap<String, FieldValue>,
    pending: BTreeMap<String, Value>,
}

impl FieldContainer {
    /// Builds a container from one raw server record.
    #[must_use]
    pub fn from_record(record: Map<String, Value>) -> Self {
        let committed = record
            .into_iter()
            .map(|(name, value)| (name, FieldValue::Raw(value)))
            .collect();
        Self {
            committed,
            pending: BTreeMap::new(),
        }
    }

    /// Resolves a field: pending first, then committed.
    ///
    /// A pending value is returned as a borrowed raw view even though it is
    /// stored as plain JSON.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldRef<'_>> {
        if let Some(value) = self.pending.get(name) {
            return Some(FieldRef::Pending(value));
        }
        self.committed.get(name).map(FieldRef::Committed)
    }

    /// Returns the committed value only, ignoring pending state.
    #[must_use]
    pub fn committed(&self, name: &str) -> Option<&FieldValue> {
        self.committed.get(name)
    }

    /// Returns `true` when the field exists in either map.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pending.contains_key(name) || self.committed.contains_key(name)
    }

    /// Returns `true` when the field has a staged, unflushed write.
    #[must_use]
    pub fn has_pending(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    /// Returns `true` when no writes are staged.
    #[must_use]
    pub fn pending_is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Stages a write. The value stays buffered until flushed or the
    /// container is told the flush succeeded.
    pub fn stage(&mut self, name: impl Into<String>, value: Value) {
        self.pending.insert(name.into(), value);
    }

    /// Renders the staged writes as one JSON object for the wire. Does not
    /// clear them; staged writes survive a failed flush.
    #[must_use]
    pub fn pending_object(&self) -> Value {
        let map: Map<String, Value> = self
            .pending
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }

    /// Drops all staged writes. Called after a successful flush.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Overwrites one committed slot, e.g. with an inflated sub-resource.
    pub fn cache(&mut self, name: impl Into<String>, value: FieldValue) {
        self.committed.insert(name.into(), value);
    }

    /// Replaces the committed state wholesale with a fresh server record.
    /// Fields absent from the record disappear; inflation caches are lost.
    pub fn replace_committed(&mut self, record: Map<String, Value>) {
        self.committed = record
            .into_iter()
            .map(|(name, value)| (name, FieldValue::Raw(value)))
            .collect();
    }

    /// Renders the committed view as one JSON object. Pending writes are
    /// not merged.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .committed
            .iter()
            .map(|(name, value)| (name.clone(), value.to_value()))
            .collect();
        Value::Object(map)
    }
}

/// A resolved field read: either a staged raw value or committed state.
#[derive(Debug)]
pub enum FieldRef<'a> {
    /// A staged, unflushed write.
    Pending(&'a Value),
    /// Committed state, possibly inflated.
    Committed(&'a FieldValue),
}

impl FieldRef<'_> {
    /// Returns the raw JSON view of this field, if it has one.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Pending(value) => Some(value),
            Self::Committed(value) => value.as_raw(),
        }
    }

    /// Returns the realized singleton, if this field was inflated as one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ResourceObject> {
        match self {
            Self::Pending(_) => None,
            Self::Committed(value) => value.as_object(),
        }
    }

    /// Returns the realized collection, if this field was inflated as one.
    #[must_use]
    pub fn as_collection(&self) -> Option<&[ResourceObject]> {
        match self {
            Self::Pending(_) => None,
            Self::Committed(value) => value.as_collection(),
        }
    }
}
