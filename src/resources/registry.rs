//! Load-time registry of resource types.
//!
//! The v2 API's resource index does not describe sub-resource URLs, so the
//! URLs for types like `Images` or `Shipments` are hardcoded here; any other
//! resource name resolves through
//! [`Connection::resource_url`](crate::connection::Connection::resource_url).
//! The registry also maps resource names to their [`ResourceSchema`]; names
//! with no registered schema fall back to [`DEFAULT`], so every resource the
//! API exposes stays reachable (e.g. `client.resource("Redirects")` works
//! with no schema registered for redirects).
//!
//! The registry is built once, on first use, and never mutated afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::resources::filters::{FilterKind, FilterSet};
use crate::resources::schema::{ResourceSchema, SubResourceSpec};

/// Fallback schema for resource types with no registered schema: every field
/// writable, nothing read-only, no sub-resources, capabilities unknown so
/// both flags stay off.
pub static DEFAULT: ResourceSchema = ResourceSchema {
    name: "Resource",
    writable: &[],
    read_only: &[],
    sub_resources: &[],
    can_create: false,
    can_update: false,
    filters: None,
};

pub static STATES: ResourceSchema = ResourceSchema {
    name: "State",
    writable: &[],
    read_only: &["id", "country_id"],
    sub_resources: &[],
    can_create: false,
    can_update: false,
    filters: Some(|| {
        FilterSet::new()
            .declare("state", FilterKind::String)
            .declare("state_abbreviation", FilterKind::String)
    }),
};

pub static COUNTRIES: ResourceSchema = ResourceSchema {
    name: "Country",
    writable: &[],
    read_only: &["id"],
    sub_resources: &[SubResourceSpec {
        field: "states",
        schema: &STATES,
        single: false,
    }],
    can_create: false,
    can_update: false,
    filters: Some(|| {
        FilterSet::new()
            .declare("country", FilterKind::String)
            .declare("country_iso2", FilterKind::String)
            .declare("country_iso3", FilterKind::String)
    }),
};

pub static BRANDS: ResourceSchema = ResourceSchema {
    name: "Brand",
    writable: &[],
    read_only: &["id"],
    sub_resources: &[],
    can_create: true,
    can_update: true,
    filters: Some(|| FilterSet::new().declare("name", FilterKind::String)),
};

pub static IMAGES: ResourceSchema = ResourceSchema {
    name: "Image",
    writable: &[],
    read_only: &["id", "product_id", "date_created"],
    sub_resources: &[],
    can_create: true,
    can_update: true,
    filters: None,
};

pub static SKUS: ResourceSchema = ResourceSchema {
    name: "Sku",
    writable: &[],
    read_only: &["id", "product_id"],
    sub_resources: &[],
    can_create: true,
    can_update: true,
    filters: Some(|| FilterSet::new().declare("sku", FilterKind::String)),
};

pub static RULES: ResourceSchema = ResourceSchema {
    name: "Rule",
    writable: &[],
    read_only: &["id", "product_id"],
    sub_resources: &[],
    can_create: true,
    can_update: true,
    filters: None,
};

pub static PRODUCTS: ResourceSchema = ResourceSchema {
    name: "Product",
    writable: &[],
    read_only: &["id", "date_created", "date_modified", "date_last_imported"],
    sub_resources: &[
        SubResourceSpec {
            field: "images",
            schema: &IMAGES,
            single: false,
        },
        SubResourceSpec {
            field: "skus",
            schema: &SKUS,
            single: false,
        },
        SubResourceSpec {
            field: "rules",
            schema: &RULES,
            single: false,
        },
        SubResourceSpec {
            field: "brand",
            schema: &BRANDS,
            single: true,
        },
    ],
    can_create: true,
    can_update: true,
    filters: Some(|| {
        FilterSet::new()
            .declare("name", FilterKind::String)
            .declare("sku", FilterKind::String)
            .declare("brand_id", FilterKind::Number)
            .declare("is_visible", FilterKind::Bool)
            .declare("min_date_created", FilterKind::Date)
            .declare("max_date_created", FilterKind::Date)
    }),
};

pub static ORDER_PRODUCTS: ResourceSchema = ResourceSchema {
    name: "OrderProduct",
    writable: &[],
    read_only: &["id", "order_id", "product_id"],
    sub_resources: &[],
    can_create: false,
    can_update: false,
    filters: None,
};

pub static SHIPPING_ADDRESSES: ResourceSchema = ResourceSchema {
    name: "ShippingAddress",
    writable: &[],
    read_only: &["id", "order_id"],
    sub_resources: &[],
    can_create: false,
    can_update: false,
    filters: None,
};

pub static SHIPMENTS: ResourceSchema = ResourceSchema {
    name: "Shipment",
    writable: &[
        "tracking_number",
        "comments",
        "order_address_id",
        "shipping_provider",
        "items",
    ],
    read_only: &["id", "order_id", "date_created"],
    sub_resources: &[],
    can_create: true,
    can_update: true,
    filters: None,
};

pub static ORDERS: ResourceSchema = ResourceSchema {
    name: "Order",
    writable: &[],
    read_only: &["id", "date_created", "date_modified"],
    sub_resources: &[
        SubResourceSpec {
            field: "products",
            schema: &ORDER_PRODUCTS,
            single: false,
        },
        SubResourceSpec {
            field: "shipping_addresses",
            schema: &SHIPPING_ADDRESSES,
            single: false,
        },
    ],
    can_create: true,
    can_update: true,
    filters: Some(|| {
        FilterSet::new()
            .declare("status_id", FilterKind::Number)
            .declare("customer_id", FilterKind::Number)
            .declare("is_deleted", FilterKind::Bool)
            .declare("min_date_created", FilterKind::Date)
            .declare("max_date_created", FilterKind::Date)
    }),
};

pub static CUSTOMERS: ResourceSchema = ResourceSchema {
    name: "Customer",
    writable: &[],
    read_only: &["id", "date_created"],
    sub_resources: &[SubResourceSpec {
        field: "addresses",
        schema: &DEFAULT,
        single: false,
    }],
    can_create: true,
    can_update: true,
    filters: Some(|| {
        FilterSet::new()
            .declare("first_name", FilterKind::String)
            .declare("last_name", FilterKind::String)
            .declare("email", FilterKind::String)
            .declare("customer_group_id", FilterKind::Number)
    }),
};

pub static OPTION_SETS: ResourceSchema = ResourceSchema {
    name: "OptionSet",
    writable: &[],
    read_only: &["id"],
    sub_resources: &[SubResourceSpec {
        field: "options",
        schema: &DEFAULT,
        single: false,
    }],
    can_create: true,
    can_update: true,
    filters: None,
};

struct RegistryEntry {
    schema: &'static ResourceSchema,
    url: Option<&'static str>,
}

/// Process-wide resource type registry.
///
/// Immutable once loaded; used only for lookup.
pub struct ResourceRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl ResourceRegistry {
    /// Returns the process-wide registry, building it on first use.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<ResourceRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::builtin)
    }

    /// Returns the schema registered for a resource name, or [`DEFAULT`].
    #[must_use]
    pub fn schema(&self, name: &str) -> &'static ResourceSchema {
        self.entries.get(name).map_or(&DEFAULT, |entry| entry.schema)
    }

    /// Returns the hardcoded sub-resource URL for a resource name, if any.
    #[must_use]
    pub fn sub_resource_url(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).and_then(|entry| entry.url)
    }

    fn builtin() -> Self {
        let mut entries = HashMap::new();
        let mut register = |name: &'static str,
                            schema: &'static ResourceSchema,
                            url: Option<&'static str>| {
            entries.insert(name, RegistryEntry { schema, url });
        };

        register("Countries", &COUNTRIES, None);
        register("Products", &PRODUCTS, None);
        register("Brands", &BRANDS, None);
        register("Orders", &ORDERS, None);
        register("Customers", &CUSTOMERS, None);
        register("OptionSets", &OPTION_SETS, None);

        // Sub-resource collections; the API's resource index does not list
        // their URLs, so they are pinned here.
        register("States", &STATES, Some("/countries/states"));
        register("Images", &IMAGES, Some("/products/images"));
        register("SKU", &SKUS, Some("/products/skus"));
        register("Rules", &RULES, Some("/products/rules"));
        register("OrderProducts", &ORDER_PRODUCTS, Some("/orders/products"));
        register(
            "ShippingAddresses",
            &SHIPPING_ADDRESSES,
            Some("/orders/shippingaddresses"),
        );
        register("Shipments", &SHIPMENTS, Some("/orders/shipments"));
        register("OptionValues", &DEFAULT, Some("/options/values"));
        register("ProductOptions", &DEFAULT, Some("/products/options"));
        register("Videos", &DEFAULT, Some("/products/videos"));
        register("DiscountRules", &DEFAULT, Some("/products/discountrules"));
        register(
            "ConfigurableFields",
            &DEFAULT,
            Some("/products/configurablefields"),
        );
        register("CustomFields", &DEFAULT, Some("/products/customfields"));
        register("ShippingMethods", &DEFAULT, Some("/shipping/methods"));

        Self { entries }
    }
}
