//! HTTP surface driven through the router without binding a socket.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use card_pricer::server::{self, AppState};
use card_pricer::storage::MemoryStore;
use card_pricer::variants::VariantCatalog;
use card_pricer::SearchFailurePolicy;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(site: &MockServer, policy: SearchFailurePolicy) -> Router {
    let state = Arc::new(AppState {
        resolver: common::resolver_for(site, policy),
        store: Box::new(MemoryStore::new()),
        catalog: VariantCatalog::builtin().unwrap(),
    });
    server::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn submit(cards: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "cards": cards }).to_string()))
        .unwrap()
}

fn row(name: &str, id: &str) -> Value {
    json!({
        "card_name": name,
        "card_id": id,
        "holo": false,
        "reverse_holo": false,
        "first_edition": false,
        "card_count": 1,
    })
}

async fn mount_pikachu(site: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search-products"))
        .and(query_param("q", "pikachu 58"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/game/pokemon-base-set/pikachu-58"))
        .mount(site)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/pokemon-base-set/pikachu-58"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::product_page(
            &[("Ungraded", "$4.00"), ("PSA 10", "$95.00")],
            None,
        )))
        .mount(site)
        .await;
}

#[tokio::test]
async fn health_reports_ok() {
    let site = MockServer::start().await;
    let (status, body) = send(&app(&site, SearchFailurePolicy::Fallback), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn results_before_any_submission_is_not_found() {
    let site = MockServer::start().await;
    let (status, body) = send(&app(&site, SearchFailurePolicy::Fallback), get("/results")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No results found");
}

#[tokio::test]
async fn blank_rows_only_is_a_bad_request() {
    let site = MockServer::start().await;
    let app = app(&site, SearchFailurePolicy::Fallback);
    let (status, body) = send(&app, submit(json!([row("  ", "58"), row("Pikachu", "")]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No valid rows to submit");
}

#[tokio::test]
async fn submitted_batch_is_retrievable() {
    let site = MockServer::start().await;
    mount_pikachu(&site).await;
    let app = app(&site, SearchFailurePolicy::Fallback);

    let mut graded = row("  Pikachu ", " 58 ");
    graded["estimated_grades"] = json!("PSA 9,PSA 10");
    let (status, body) = send(&app, submit(json!([graded, row("", "1")]))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data submitted successfully");
    let valid_rows = body["valid_rows"].as_array().unwrap();
    assert_eq!(valid_rows.len(), 1);
    assert_eq!(valid_rows[0]["card"], "pikachu");
    assert_eq!(valid_rows[0]["id"], "58");
    assert_eq!(valid_rows[0]["estimated_grades"], json!(["PSA 9", "PSA 10"]));
    let batch_id = body["batch_id"].as_str().unwrap().to_string();

    let (status, latest) = send(&app, get("/results")).await;
    assert_eq!(status, StatusCode::OK);
    let record = &latest["results"][0];
    assert_eq!(record["card"], "pikachu");
    assert_eq!(record["id"], "58");
    assert_eq!(record["Ungraded"], "$4.00");
    assert_eq!(record["PSA 10"], "$95.00");
    assert_eq!(record["BGS 10 Black"], "not_available");
    assert_eq!(record["card_count"], 1);

    let (status, by_id) = send(&app, get(&format!("/results/{batch_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["results"], latest["results"]);
}

#[tokio::test]
async fn zero_count_rows_are_dropped() {
    let site = MockServer::start().await;
    let app = app(&site, SearchFailurePolicy::Fallback);

    let mut empty = row("Pikachu", "58");
    empty["card_count"] = json!(0);
    let (status, body) = send(&app, submit(json!([empty]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No valid rows to submit");
}

#[tokio::test]
async fn unknown_batch_is_not_found() {
    let site = MockServer::start().await;
    let (status, _) = send(
        &app(&site, SearchFailurePolicy::Fallback),
        get("/results/0123456789abcdef"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn aborted_batch_is_a_bad_gateway() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search-products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&site)
        .await;
    let app = app(&site, SearchFailurePolicy::Abort);

    let (status, body) = send(&app, submit(json!([row("Pikachu", "58")]))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].as_str().unwrap().contains("pikachu"));

    let (status, _) = send(&app, get("/results")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn variants_come_from_the_catalog() {
    let site = MockServer::start().await;
    let (status, body) = send(
        &app(&site, SearchFailurePolicy::Fallback),
        get("/variants?card=Charizard&id=4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "type": "shadowless",
            "name": "Charizard (Shadowless)",
            "id": "4_shadowless",
            "img_link": "https://your-image-cdn.com/cards/4_shadowless.jpg",
            "final_link": "https://your-site.com/cards/4_shadowless",
            "price_modifier": 2.5,
        }])
    );
}
