//! Static resource type descriptors.
//!
//! A [`ResourceSchema`] is the load-time description of one resource type:
//! which fields may be written, which are read-only, which fields embed
//! sub-resources, and whether the API supports create/update for the type.
//! Schemas are `'static` and shared by every accessor and object of the
//! type; nothing in them mutates after load.
//!
//! Capability flags (`can_create`, `can_update`) describe the API, they are
//! not enforced centrally; callers are expected to consult them.

use crate::resources::FilterSet;

/// Static descriptor for one resource type.
#[derive(Debug)]
pub struct ResourceSchema {
    /// The resource type name (e.g. "Product").
    pub name: &'static str,
    /// Fields that accept writes. An empty slice means every field is
    /// writable unless it appears in `read_only`.
    pub writable: &'static [&'static str],
    /// Fields that reject writes outright.
    pub read_only: &'static [&'static str],
    /// Fields that embed sub-resource references.
    pub sub_resources: &'static [SubResourceSpec],
    /// Whether the API supports creating records of this type.
    pub can_create: bool,
    /// Whether the API supports updating records of this type.
    pub can_update: bool,
    /// The filters this type declares, if any.
    pub filters: Option<fn() -> FilterSet>,
}

impl ResourceSchema {
    /// Looks up the sub-resource spec for a field, if one is declared.
    #[must_use]
    pub fn sub_resource(&self, field: &str) -> Option<&'static SubResourceSpec> {
        let specs: &'static [SubResourceSpec] = self.sub_resources;
        specs.iter().find(|spec| spec.field == field)
    }

    /// Returns `true` when the writable policy accepts a write to `field`.
    ///
    /// Read-only declarations always win; otherwise an empty writable list
    /// means unrestricted.
    #[must_use]
    pub fn is_writable(&self, field: &str) -> bool {
        if self.read_only.iter().any(|name| *name == field) {
            return false;
        }
        self.writable.is_empty() || self.writable.iter().any(|name| *name == field)
    }

    /// Returns the declared filter set, or an empty default.
    #[must_use]
    pub fn filter_set(&self) -> FilterSet {
        self.filters.map_or_else(FilterSet::new, |filters| filters())
    }
}

/// Declaration of one sub-resource field on a resource type.
#[derive(Debug)]
pub struct SubResourceSpec {
    /// The field name carrying the sub-resource reference.
    pub field: &'static str,
    /// The schema realized records of the sub-resource use.
    pub schema: &'static ResourceSchema,
    /// `true` when the field references a single record rather than a
    /// collection.
    pub single: bool,
}

/// Informational back-reference from a nested accessor or object to the
/// record it was reached through.
///
/// Never traversed by any algorithm in this crate; carried for callers that
/// want to know where a nested object came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    /// The parent's resource type name.
    pub resource: &'static str,
    /// The parent record's own URL.
    pub url: String,
}
