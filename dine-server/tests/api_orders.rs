//! End-to-end tests through the assembled router (in-memory database)

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use dine_server::{Config, ServerState, build_app};

async fn test_app() -> Router {
    let state = ServerState::initialize(&Config::for_tests()).await.unwrap();
    build_app(&state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn add_table(app: &Router, number: i32, size: i32) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/table",
        Some(json!({"name": format!("T{number}"), "number": number, "tableSize": size})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

async fn add_chef(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/chef", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

fn order_body(party_size: i32, dine_in: bool) -> Value {
    json!({
        "name": "Ada",
        "numberOfPeople": party_size,
        "address": "1 Main St",
        "phoneNumber": 5551234,
        "orderItem": [
            {"name": "Margherita", "category": "pizza", "price": 9.5},
            {"name": "Cola", "category": "drinks", "quantity": 2, "price": 2.0}
        ],
        "dineIn": dine_in
    })
}

async fn get_table(app: &Router, id: &str) -> Value {
    let (status, body) = send(app, "GET", &format!("/api/table/{id}"), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn health_reports_database() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = test_app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert_eq!(generated.len(), 36);

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn table_provisioning_rules() {
    let app = test_app().await;

    let table = add_table(&app, 1, 4).await;
    assert_eq!(table["tableSize"], 4);
    assert_eq!(table["occupied"], false);
    assert!(table["id"].as_str().unwrap().starts_with("dining_table:"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/table",
        Some(json!({"name": "Again", "number": 1, "tableSize": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7007);

    let (status, body) = send(
        &app,
        "POST",
        "/api/table",
        Some(json!({"name": "Odd", "number": 2, "tableSize": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7006);

    let (status, body) = send(&app, "POST", "/api/table", Some(json!({"number": 3, "tableSize": 2}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = send(&app, "GET", "/api/table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/table/dining_table:nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
}

#[tokio::test]
async fn chef_provisioning() {
    let app = test_app().await;
    let chef = add_chef(&app, "Remy").await;
    assert_eq!(chef["activeOrders"], 0);

    let (status, _) = send(&app, "POST", "/api/chef", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/chef", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Remy");
}

#[tokio::test]
async fn dine_in_order_lifecycle() {
    let app = test_app().await;
    add_chef(&app, "Remy").await;
    let table = add_table(&app, 7, 4).await;
    let table_id = table["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "POST", "/api/order", Some(order_body(3, true))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let order = &body["data"];
    assert_eq!(order["status"], "processing");
    assert_eq!(order["averageTime"], 15);
    assert_eq!(order["phoneNumber"], "5551234");
    assert_eq!(order["orderItem"][0]["quantity"], 1);
    assert_eq!(order["table"]["id"], table_id.as_str());
    assert_eq!(order["table"]["occupied"], true);
    assert_eq!(order["chef"]["activeOrders"], 1);
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/api/order/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], order_id.as_str());

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/order/{order_id}"),
        Some(json!({"status": "served", "averageTime": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "served");
    assert_eq!(body["data"]["averageTime"], 20);
    assert_eq!(body["data"]["chef"]["activeOrders"], 0);
    assert_eq!(get_table(&app, &table_id).await["occupied"], false);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/order/{order_id}"),
        Some(json!({"status": "processing"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (status, body) = send(&app, "GET", "/api/order", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn takeaway_order_has_no_table() {
    let app = test_app().await;
    add_chef(&app, "Remy").await;

    let (status, body) = send(&app, "POST", "/api/order", Some(order_body(2, false))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(body["data"]["table"].is_null());
    assert_eq!(body["data"]["dineIn"], false);
}

#[tokio::test]
async fn oversized_party_is_rejected() {
    let app = test_app().await;
    add_chef(&app, "Remy").await;
    let table = add_table(&app, 1, 8).await;

    let (status, body) = send(&app, "POST", "/api/order", Some(order_body(9, true))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7005);
    assert_eq!(body["details"]["party_size"], 9);
    assert_eq!(get_table(&app, table["id"].as_str().unwrap()).await["occupied"], false);
}

#[tokio::test]
async fn no_free_table_is_conflict() {
    let app = test_app().await;
    add_chef(&app, "Remy").await;
    add_table(&app, 1, 2).await;

    let (status, body) = send(&app, "POST", "/api/order", Some(order_body(6, true))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7004);
    assert_eq!(body["details"]["party_size"], 6);
}

#[tokio::test]
async fn missing_chefs_leave_no_table_occupied() {
    let app = test_app().await;
    let table = add_table(&app, 1, 2).await;

    let (status, body) = send(&app, "POST", "/api/order", Some(order_body(2, true))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 5002);
    assert_eq!(get_table(&app, table["id"].as_str().unwrap()).await["occupied"], false);

    let (_, body) = send(&app, "GET", "/api/order", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_order_payload() {
    let app = test_app().await;
    add_chef(&app, "Remy").await;

    let mut body = order_body(2, false);
    body["orderItem"] = json!([]);
    let (status, response) = send(&app, "POST", "/api/order", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], 4007);

    let mut body = order_body(2, false);
    body.as_object_mut().unwrap().remove("address");
    let (status, response) = send(&app, "POST", "/api/order", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], 2);
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/order/orders:missing",
        Some(json!({"status": "served"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = send(&app, "GET", "/api/order/chef:wrong-table", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
