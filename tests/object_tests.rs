//! Integration tests for realized objects: sub-resource inflation, staged
//! writes, and the update flow.

mod common;

use std::sync::Arc;

use bigcommerce_api::{Client, ResourceError};
use serde_json::json;

use common::{CannedError, MockConnection, Verb};

fn client_over(mock: MockConnection) -> (Arc<MockConnection>, Client) {
    let mock = Arc::new(mock);
    let client = Client::with_connection(mock.clone());
    (mock, client)
}

fn country_fixture() -> MockConnection {
    MockConnection::new()
        .with_collection(
            "/countries",
            vec![json!({
                "id": 226,
                "country": "United States",
                "country_iso2": "US",
                "states": {
                    "url": "https://store.example/api/v2/countries/226/states.json",
                    "resource": "/countries/226/states"
                }
            })],
        )
        .with_collection(
            "/countries/226/states",
            vec![
                json!({"id": 1, "state": "Alabama", "state_abbreviation": "AL"}),
                json!({"id": 2, "state": "Alaska", "state_abbreviation": "AK"}),
            ],
        )
}

#[test]
fn test_sub_resource_collection_inflates_on_first_read() {
    let (_, client) = client_over(country_fixture());

    let mut country = client.resource("Countries").get(226).unwrap();
    let states = country.get("states").unwrap();

    let states = states.as_collection().unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].to_value()["state"], json!("Alabama"));
    assert_eq!(states[1].to_value()["state"], json!("Alaska"));
}

#[test]
fn test_inflation_runs_at_most_once_per_field() {
    let (mock, client) = client_over(country_fixture());

    let mut country = client.resource("Countries").get(226).unwrap();
    country.get("states").unwrap();
    let calls_after_first = mock.call_count();
    country.get("states").unwrap();

    assert_eq!(mock.call_count(), calls_after_first);
}

#[test]
fn test_inflated_records_carry_a_parent_reference() {
    let (_, client) = client_over(country_fixture());

    let mut country = client.resource("Countries").get(226).unwrap();
    let states = country.get("states").unwrap();

    let parent = states.as_collection().unwrap()[0].parent().unwrap();
    assert_eq!(parent.resource, "Country");
    assert_eq!(parent.url, "/countries/226");
}

#[test]
fn test_refresh_refetches_from_the_objects_own_url() {
    let (mock, client) = client_over(country_fixture());

    let mut country = client.resource("Countries").get(226).unwrap();
    country.get("states").unwrap();
    country.refresh("states").unwrap();

    let state_fetches = mock
        .calls()
        .into_iter()
        .filter(|call| call.verb == Verb::Get && call.url == "/countries/226/states")
        .count();
    assert_eq!(state_fetches, 2);
}

#[test]
fn test_sub_resource_reference_without_resource_url_is_rejected() {
    let (_, client) = client_over(MockConnection::new().with_collection(
        "/countries",
        vec![json!({
            "id": 226,
            "country": "United States",
            "states": {"url": "https://store.example/api/v2/countries/226/states.json"}
        })],
    ));

    let mut country = client.resource("Countries").get(226).unwrap();
    let result = country.get("states");

    assert!(matches!(
        result,
        Err(ResourceError::InvalidSubResourceRef { field }) if field == "states"
    ));
}

#[test]
fn test_singleton_sub_resource_inflates_to_one_object() {
    let (_, client) = client_over(
        MockConnection::new()
            .with_collection(
                "/products",
                vec![json!({
                    "id": 32,
                    "name": "Widget",
                    "brand": {
                        "url": "https://store.example/api/v2/brands/17.json",
                        "resource": "/brands/17"
                    }
                })],
            )
            .with_collection("/brands", vec![json!({"id": 17, "name": "Acme"})]),
    );

    let mut product = client.resource("Products").get(32).unwrap();
    let brand = product.get("brand").unwrap();

    let brand = brand.as_object().unwrap();
    assert_eq!(brand.id(), "17");
    assert_eq!(brand.to_value()["name"], json!("Acme"));
}

#[test]
fn test_update_flushes_staged_writes_and_reloads_from_the_response() {
    let mock = MockConnection::new().with_collection(
        "/products",
        vec![json!({"id": 32, "name": "old", "extra": "dropped by server"})],
    );
    mock.respond(
        "PUT /products/32",
        Ok(json!({"id": 32, "name": "server name", "price": "5.00"})),
    );
    let (mock, client) = client_over(mock);

    let mut product = client.resource("Products").get(32).unwrap();
    product.set("name", json!("client name")).unwrap();
    product.update().unwrap();

    let puts: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|call| call.verb == Verb::Update)
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body.as_ref().unwrap(), &json!({"name": "client name"}));

    // Committed state is the server's response, wholesale.
    assert!(!product.has_pending_changes());
    assert_eq!(
        product.get("name").unwrap().as_raw(),
        Some(&json!("server name"))
    );
    assert_eq!(product.get("price").unwrap().as_raw(), Some(&json!("5.00")));
    assert!(matches!(
        product.get("extra"),
        Err(ResourceError::UnknownField { .. })
    ));
}

#[test]
fn test_failed_update_keeps_staged_writes_for_retry() {
    let mock =
        MockConnection::new().with_collection("/products", vec![json!({"id": 32, "name": "old"})]);
    mock.respond("PUT /products/32", Err(CannedError::Http(409)));
    mock.respond("PUT /products/32", Ok(json!({"id": 32, "name": "new"})));
    let (mock, client) = client_over(mock);

    let mut product = client.resource("Products").get(32).unwrap();
    product.set("name", json!("new")).unwrap();

    assert!(product.update().is_err());
    assert!(product.has_pending_changes());

    product.update().unwrap();
    assert!(!product.has_pending_changes());

    let put_bodies: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|call| call.verb == Verb::Update)
        .map(|call| call.body.unwrap())
        .collect();
    assert_eq!(put_bodies, vec![json!({"name": "new"}), json!({"name": "new"})]);
}

#[test]
fn test_restricted_writable_list_rejects_other_fields() {
    let (_, client) = client_over(MockConnection::new().with_collection(
        "/orders/shipments",
        vec![json!({
            "id": 5,
            "order_id": 101,
            "tracking_number": "",
            "shipping_method": "Standard"
        })],
    ));

    let mut shipment = client.resource("Shipments").get(5).unwrap();

    shipment.set("tracking_number", json!("1Z999AA1")).unwrap();
    assert!(matches!(
        shipment.set("shipping_method", json!("Express")),
        Err(ResourceError::ReadOnlyField { .. })
    ));
    assert!(matches!(
        shipment.set("order_id", json!(202)),
        Err(ResourceError::ReadOnlyField { .. })
    ));
}

#[test]
fn test_staged_write_is_visible_before_the_flush() {
    let (mock, client) = client_over(
        MockConnection::new().with_collection("/products", vec![json!({"id": 32, "name": "old"})]),
    );

    let mut product = client.resource("Products").get(32).unwrap();
    product.set("name", json!("staged")).unwrap();

    assert_eq!(product.get("name").unwrap().as_raw(), Some(&json!("staged")));
    assert_eq!(product.to_value()["name"], json!("old"));
    // Nothing was flushed.
    assert!(mock.calls().iter().all(|call| call.verb == Verb::Get));
}
