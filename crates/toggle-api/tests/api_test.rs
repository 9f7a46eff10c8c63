//! End-to-end tests for the HTTP surface, on an in-memory settings store.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use toggle_api::{auth::AdminAuth, create_router, AppConfig, AppState};
use toggle_core::{Gateway, GatewayRegistry, Rule, RuleSet};
use toggle_store::MemoryStore;

const ADMIN_SECRET: &str = "test-admin-secret";

fn test_registry() -> GatewayRegistry {
    GatewayRegistry::new()
        .with_gateway(Gateway::new("bacs", "Direct bank transfer"))
        .with_gateway(Gateway::new("cod", "Cash on delivery"))
        .with_gateway(Gateway::new("stripe", "Card payment"))
}

fn test_server(rules: RuleSet) -> TestServer {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        settings_path: "unused".to_string(),
        gateways_path: None,
    };

    let state = AppState::with_parts(
        Arc::new(MemoryStore::with_rules(rules)),
        test_registry(),
        AdminAuth::new(ADMIN_SECRET),
        config,
    );

    TestServer::new(create_router(state)).unwrap()
}

fn signature_header(body: &str) -> (HeaderName, HeaderValue) {
    let auth = AdminAuth::new(ADMIN_SECRET);
    let value = auth.sign(body.as_bytes(), chrono::Utc::now().timestamp());
    (
        HeaderName::from_static("x-toggle-signature"),
        HeaderValue::from_str(&value).unwrap(),
    )
}

#[tokio::test]
async fn test_health() {
    let server = test_server(RuleSet::new());

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["service"], "toggle-checkout");
}

#[tokio::test]
async fn test_preview_applies_hide_wins_tie_break() {
    let rules = RuleSet::new()
        .with_rule(Rule::hide("1", "cod"))
        .with_rule(Rule::show("1", "cod"));
    let server = test_server(rules);

    let response = server
        .post("/api/v1/preview")
        .json(&json!({"categories": [1]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["hidden_methods"], json!(["cod"]));
}

#[tokio::test]
async fn test_preview_accepts_string_and_numeric_category_ids() {
    let rules = RuleSet::new()
        .with_rule(Rule::hide("5", "bacs"))
        .with_rule(Rule::hide("7", "cod"));
    let server = test_server(rules);

    let response = server
        .post("/api/v1/preview")
        .json(&json!({"categories": [5, "7"]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["hidden_methods"], json!(["bacs", "cod"]));
}

#[tokio::test]
async fn test_checkout_filter_removes_hidden_gateway_in_order() {
    let rules = RuleSet::new().with_rule(Rule::hide("5", "cod"));
    let server = test_server(rules);

    let cart = json!({
        "cart": {
            "items": [
                {"product_id": "hoodie", "quantity": 1, "categories": [5]}
            ]
        }
    });

    let response = server.post("/api/v1/checkout/gateways").json(&cart).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let ids: Vec<&str> = body["gateways"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec!["bacs", "stripe"]);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_checkout_filter_without_cart_passes_through() {
    let rules = RuleSet::new().with_rule(Rule::hide("5", "cod"));
    let server = test_server(rules);

    let response = server
        .post("/api/v1/checkout/gateways")
        .json(&json!({}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_update_rules_requires_signature() {
    let server = test_server(RuleSet::new());

    let response = server
        .put("/api/v1/rules")
        .json(&json!({"rules": [{"category": "5", "method": "cod", "visibility": "hide"}]}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Rule set untouched
    let rules: Value = server.get("/api/v1/rules").await.json();
    assert_eq!(rules["count"], 0);
}

#[tokio::test]
async fn test_update_rules_rejects_bad_signature() {
    let server = test_server(RuleSet::new());
    let body = r#"{"rules": []}"#;

    let (name, _) = signature_header(body);
    let response = server
        .put("/api/v1/rules")
        .add_header(name, HeaderValue::from_static("t=1,v1=deadbeef"))
        .text(body)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_rules_saves_sanitized_set() {
    let server = test_server(RuleSet::new());

    // Second rule is missing its method and must be dropped, not rejected;
    // third has a malformed visibility that defaults to show.
    let body = json!({
        "rules": [
            {"category": 5, "method": "cod", "visibility": "hide"},
            {"category": 7, "method": "", "visibility": "hide"},
            {"category": 9, "method": "bacs", "visibility": "sometimes"}
        ]
    })
    .to_string();

    let (name, value) = signature_header(&body);
    let response = server
        .put("/api/v1/rules")
        .add_header(name, value)
        .text(body)
        .await;
    response.assert_status_ok();

    let summary: Value = response.json();
    assert_eq!(summary["saved"], 2);
    assert_eq!(summary["dropped"], 1);

    let rules: Value = server.get("/api/v1/rules").await.json();
    assert_eq!(rules["count"], 2);
    assert_eq!(rules["rules"][0]["category"], "5");
    assert_eq!(rules["rules"][1]["visibility"], "show");

    // "stripe" has no rule yet; the dropped row never landed
    assert_eq!(rules["unassigned_gateways"], json!(["stripe"]));
}

#[tokio::test]
async fn test_saved_rules_drive_the_preview() {
    let server = test_server(RuleSet::new());

    let body = json!({
        "rules": [{"category": 5, "method": "cod", "visibility": "hide"}]
    })
    .to_string();

    let (name, value) = signature_header(&body);
    server
        .put("/api/v1/rules")
        .add_header(name, value)
        .text(body)
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/preview")
        .json(&json!({"categories": [5]}))
        .await;

    let preview: Value = response.json();
    assert_eq!(preview["hidden_methods"], json!(["cod"]));
}
