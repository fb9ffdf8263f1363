//! Query filter declarations and values.
//!
//! A [`FilterSet`] carries two things: the filters a resource type declares
//! (name and kind, for introspection via
//! [`ResourceAccessor::filters`](crate::resources::ResourceAccessor::filters))
//! and the values a caller has assigned, which become query string parameters
//! on `get_all` and `get_count` requests.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{FilterKind, FilterSet};
//!
//! let mut filters = FilterSet::new().declare("country_iso2", FilterKind::String);
//! filters.set("country_iso2", "US");
//! assert_eq!(filters.query_map().get("country_iso2").map(String::as_str), Some("US"));
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// The kind of value a declared filter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// A free-form string filter.
    String,
    /// A numeric filter.
    Number,
    /// A date filter, formatted RFC 2822 on the wire as the v2 API expects.
    Date,
    /// A boolean filter.
    Bool,
}

/// Declared filters and assigned filter values for one resource type.
///
/// Declarations are introspective only; value assignment is permissive, so
/// callers can pass parameters the schema does not declare (the API itself
/// is the authority on what it accepts).
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    declared: BTreeMap<&'static str, FilterKind>,
    values: BTreeMap<String, String>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a filter, builder-style. Used by resource schemas.
    #[must_use]
    pub fn declare(mut self, name: &'static str, kind: FilterKind) -> Self {
        self.declared.insert(name, kind);
        self
    }

    /// Returns the kind of a declared filter, if any.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<FilterKind> {
        self.declared.get(name).copied()
    }

    /// Iterates the declared filter names.
    pub fn declared_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declared.keys().copied()
    }

    /// Assigns a string value to a filter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Assigns a numeric value to a filter.
    pub fn set_number(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Assigns a boolean value to a filter.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Assigns a date value to a filter, formatted as RFC 2822.
    pub fn set_date(&mut self, name: impl Into<String>, value: DateTime<Utc>) -> &mut Self {
        self.values.insert(name.into(), value.to_rfc2822());
        self
    }

    /// Returns `true` when no values have been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the assigned values as query string parameters.
    #[must_use]
    pub fn query_map(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
