//! Integration tests for the sales API.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sales_core::error::StoreResult;
use sales_core::events::{NoOpEmitter, RecordingEmitter, SaleEvent};
use sales_core::store::InMemorySaleStore;
use sales_core::{Sale, SaleService, SaleStore};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn setup() -> (Router, RecordingEmitter) {
    let emitter = RecordingEmitter::new();
    let service =
        SaleService::with_emitter(InMemorySaleStore::new(), Arc::new(emitter.clone()));
    (sales_api::create_app(sales_api::create_state(service)), emitter)
}

fn draft(items: Value) -> Value {
    json!({
        "saleNumber": "S-1001",
        "saleDate": "2024-03-01T10:00:00Z",
        "customerName": "Ada Lovelace",
        "branch": "Downtown",
        "items": items
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, items: Value) -> String {
    let (status, json) = send(app, "POST", "/api/sales", Some(draft(items))).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

fn amount(value: &Value) -> f64 {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_returns_location_and_stored_sale() {
    let (app, emitter) = setup();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sales")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&draft(json!([
                        {"productName": "Widget", "quantity": 5, "unitPrice": "10.00"}
                    ])))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let id = json["id"].as_str().unwrap();

    assert_eq!(location, format!("/api/sales/{id}"));
    assert_eq!(json["isCancelled"], false);
    assert_eq!(json["items"][0]["productName"], "Widget");
    assert!(json.get("version").is_none());
    assert_eq!(
        emitter.events(),
        vec![SaleEvent::SaleCreated {
            sale_id: Uuid::parse_str(id).unwrap()
        }]
    );
}

#[tokio::test]
async fn test_widget_sale_is_priced_on_get() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Widget", "quantity": 5, "unitPrice": "10.00"}]),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["saleNumber"], "S-1001");
    assert_eq!(json["customerName"], "Ada Lovelace");
    assert_eq!(json["items"][0]["quantity"], 5);
    assert_eq!(amount(&json["items"][0]["discount"]), 5.0);
    assert_eq!(amount(&json["items"][0]["total"]), 45.0);
    assert_eq!(amount(&json["totalAmount"]), 45.0);
}

#[tokio::test]
async fn test_numeric_prices_are_accepted() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Bolt", "quantity": 10, "unitPrice": 2.5}]),
    )
    .await;

    let (_, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;

    assert_eq!(amount(&json["items"][0]["discount"]), 5.0);
    assert_eq!(amount(&json["totalAmount"]), 20.0);
}

#[tokio::test]
async fn test_over_cap_line_is_stored_but_unreadable() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Gadget", "quantity": 25, "unitPrice": "1.00"}]),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_QUANTITY");
}

#[tokio::test]
async fn test_unknown_sale_is_404_everywhere() {
    let (app, _) = setup();
    let id = Uuid::new_v4();

    let cases = [
        ("GET", format!("/api/sales/{id}"), None),
        ("PUT", format!("/api/sales/{id}"), Some(draft(json!([])))),
        ("POST", format!("/api/sales/{id}/cancel"), None),
        ("POST", format!("/api/sales/{id}/items/Widget/cancel"), None),
    ];

    for (method, uri, body) in cases {
        let (status, json) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_replace_overwrites_fields_and_items() {
    let (app, emitter) = setup();
    let id = create(
        &app,
        json!([{"productName": "Widget", "quantity": 5, "unitPrice": "10.00"}]),
    )
    .await;

    let mut replacement = draft(json!([
        {"productName": "Nut", "quantity": 4, "unitPrice": "1.00"},
        {"productName": "Bolt", "quantity": 1, "unitPrice": "0.50"}
    ]));
    replacement["customerName"] = json!("Grace Hopper");

    let (status, _) = send(&app, "PUT", &format!("/api/sales/{id}"), Some(replacement)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;
    assert_eq!(json["customerName"], "Grace Hopper");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["productName"], "Nut");
    assert_eq!(amount(&json["totalAmount"]), 4.1);
    assert!(matches!(
        emitter.events().last(),
        Some(SaleEvent::SaleModified { .. })
    ));
}

#[tokio::test]
async fn test_replace_with_no_items_empties_the_sale() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Widget", "quantity": 5, "unitPrice": "10.00"}]),
    )
    .await;

    let (status, _) = send(&app, "PUT", &format!("/api/sales/{id}"), Some(draft(json!([])))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;
    assert!(json["items"].as_array().unwrap().is_empty());
    assert_eq!(amount(&json["totalAmount"]), 0.0);
}

#[tokio::test]
async fn test_invalid_draft_is_400() {
    let (app, _) = setup();
    let mut body = draft(json!([]));
    body["customerName"] = json!("  ");

    let (status, json) = send(&app, "POST", "/api/sales", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_body_missing_field_gets_error_body() {
    let (app, emitter) = setup();
    let mut body = draft(json!([]));
    body.as_object_mut().unwrap().remove("customerName");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sales")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert!(json["message"].as_str().unwrap().contains("customerName"));
    assert!(emitter.events().is_empty());
}

#[tokio::test]
async fn test_ill_typed_replace_body_is_400() {
    let (app, _) = setup();
    let id = create(&app, json!([])).await;
    let body = draft(json!([
        {"productName": "Widget", "quantity": "five", "unitPrice": "1.00"}
    ]));

    let (status, json) = send(&app, "PUT", &format!("/api/sales/{id}"), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_amount_overflow_is_422() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Yacht", "quantity": 2, "unitPrice": "79228162514264337593543950335"}]),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "AMOUNT_OVERFLOW");
}

#[tokio::test]
async fn test_cancel_sale_is_not_idempotent() {
    let (app, _) = setup();
    let id = create(&app, json!([])).await;
    let uri = format!("/api/sales/{id}/cancel");

    let (first, _) = send(&app, "POST", &uri, None).await;
    let (second, json) = send(&app, "POST", &uri, None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ALREADY_CANCELLED");

    let (_, sale) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;
    assert_eq!(sale["isCancelled"], true);
}

#[tokio::test]
async fn test_cancel_item_removes_first_exact_match() {
    let (app, emitter) = setup();
    let id = create(
        &app,
        json!([
            {"productName": "Widget", "quantity": 1, "unitPrice": "1.00"},
            {"productName": "Widget", "quantity": 2, "unitPrice": "1.00"},
            {"productName": "Gizmo", "quantity": 1, "unitPrice": "3.00"}
        ]),
    )
    .await;

    let (status, _) = send(&app, "POST", &format!("/api/sales/{id}/items/Widget/cancel"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "GET", &format!("/api/sales/{id}"), None).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["productName"], "Widget");
    assert_eq!(items[0]["quantity"], 2);

    let (status, json) = send(&app, "POST", &format!("/api/sales/{id}/items/widget/cancel"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    assert!(matches!(
        emitter.events().last(),
        Some(SaleEvent::ItemCancelled { product_name, .. }) if product_name == "Widget"
    ));
}

#[tokio::test]
async fn test_cancel_item_decodes_product_name() {
    let (app, _) = setup();
    let id = create(
        &app,
        json!([{"productName": "Blue Widget", "quantity": 1, "unitPrice": "1.00"}]),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sales/{id}/items/Blue%20Widget/cancel"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

// =============================================================================
// Store failures
// =============================================================================

/// A store whose writes always lose the version race.
#[derive(Clone, Default)]
struct ConflictingStore {
    inner: InMemorySaleStore,
}

#[async_trait]
impl SaleStore for ConflictingStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>> {
        self.inner.get_by_id(id).await
    }

    async fn insert(&self, sale: &Sale) -> StoreResult<()> {
        self.inner.insert(sale).await
    }

    async fn update(&self, sale: &Sale) -> StoreResult<i64> {
        Err(sales_core::StoreError::Conflict { sale_id: sale.id })
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn test_conflict_is_409_and_unhealthy_store_is_503() {
    let service = SaleService::with_emitter(ConflictingStore::default(), Arc::new(NoOpEmitter));
    let app = sales_api::create_app(sales_api::create_state(service));
    let id = create(&app, json!([])).await;

    let (status, json) = send(&app, "POST", &format!("/api/sales/{id}/cancel"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unavailable");
}

/// Loses every sale between the read and the write.
#[derive(Default)]
struct VanishingStore {
    inner: InMemorySaleStore,
}

#[async_trait]
impl SaleStore for VanishingStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Sale>> {
        self.inner.get_by_id(id).await
    }

    async fn insert(&self, sale: &Sale) -> StoreResult<()> {
        self.inner.insert(sale).await
    }

    async fn update(&self, sale: &Sale) -> StoreResult<i64> {
        self.inner.delete(sale.id).await?;
        self.inner.update(sale).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_sale_deleted_mid_update_is_404_not_409() {
    let service = SaleService::with_emitter(VanishingStore::default(), Arc::new(NoOpEmitter));
    let app = sales_api::create_app(sales_api::create_state(service));
    let id = create(&app, json!([])).await;

    let (status, json) = send(&app, "POST", &format!("/api/sales/{id}/cancel"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
