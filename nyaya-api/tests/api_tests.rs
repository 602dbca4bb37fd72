//! Integration tests for nyaya-api endpoints
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it with `oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use nyaya_api::speech::SpeechServices;
use nyaya_api::{build_router, AppState, HttpSettings};
use nyaya_common::db::init_memory_database;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app over an empty in-memory database
async fn setup_app() -> axum::Router {
    let db = init_memory_database()
        .await
        .expect("Should open in-memory database");
    build_router(AppState::new(db, SpeechServices::disabled()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Send a request and return status plus JSON body
async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_app().await;

    for uri in ["/health", "/api/health"] {
        let (status, body) = send(&app, empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["module"], "nyaya-api");
        assert!(body["version"].is_string());
    }

    let (status, body) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Legal Aid API running");
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_create_query_classifies_and_persists() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/queries",
            json!({"query_text": "  My phone was stolen at the market  "}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query_text"], "My phone was stolen at the market");
    assert_eq!(body["category"], "fir");
    assert_eq!(body["detected_language"], "en");
    assert!(body["response_text"]
        .as_str()
        .unwrap()
        .starts_with("To file an FIR"));

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = send(&app, empty_request("GET", &format!("/api/queries/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);

    let (status, listed) = send(&app, empty_request("GET", "/api/queries?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_query_in_hindi() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/queries",
            json!({"query_text": "How to file RTI", "language": "hi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "rti");
    assert_eq!(body["detected_language"], "hi");
    assert!(body["response_text"].as_str().unwrap().contains("आरटीआई"));
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/queries", json!({"query_text": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], "Query cannot be empty");
}

#[tokio::test]
async fn test_unknown_query_is_404() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/api/queries/{}", uuid::Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_text_query_returns_answer_only() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/text-query",
            json!({"query": "defective product refund"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["answer"]
        .as_str()
        .unwrap()
        .starts_with("Consumer Protection remedies"));
    assert!(body.get("id").is_none());
}

// =============================================================================
// Documents
// =============================================================================

#[tokio::test]
async fn test_generate_fir_document() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            json!({
                "doc_type": "fir",
                "details": {"name": "Ravi Kumar", "incident_place": "MG Road"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doc_type"], "FIR");
    assert_eq!(body["language"], "en");
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("Complainant Name: Ravi Kumar"));

    let id = body["id"].as_str().unwrap();
    let (status, fetched) =
        send(&app, empty_request("GET", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["content"], body["content"]);
}

#[tokio::test]
async fn test_null_language_and_numeric_details_accepted() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/queries",
            json!({"query_text": "my bike was stolen", "language": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detected_language"], "en");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/text-query",
            json!({"query": "rti request", "language": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            json!({"doc_type": "FIR", "details": {"name": "Ravi", "age": 34}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["content"].as_str().unwrap().contains("Age: 34"));

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            json!({"doc_type": "FIR", "details": {"name": {"first": "Ravi"}}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_invalid_document_type_rejected() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            json!({"doc_type": "NOC", "details": {}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid document type. Use 'FIR' or 'RTI'"
    );
}

// =============================================================================
// Students and cases
// =============================================================================

#[tokio::test]
async fn test_student_lifecycle() {
    let app = setup_app().await;

    let (status, student) = send(
        &app,
        json_request(
            "POST",
            "/api/students",
            json!({
                "name": "Asha Rao",
                "email": "asha@nls.ac.in",
                "college": "NLSIU",
                "skills": ["Labour Law", "  "]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(student["skills"], json!(["Labour Law"]));

    let id = student["id"].as_str().unwrap().to_string();
    let (status, listed) = send(&app, empty_request("GET", "/api/students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) =
        send(&app, empty_request("DELETE", &format!("/api/students/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (status, _) = send(&app, empty_request("GET", &format!("/api/students/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_validation() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/students",
            json!({"name": "", "email": "x@y.z", "college": "NLU"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "name is required");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/students",
            json!({"name": "A", "email": "not-an-email", "college": "NLU"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same rule as the client form: any non-empty host label is fine
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/students",
            json!({"name": "A", "email": "a@.example.org", "college": "NLU"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@.example.org");
}

#[tokio::test]
async fn test_case_assignment_flow() {
    let app = setup_app().await;

    let (_, student) = send(
        &app,
        json_request(
            "POST",
            "/api/students",
            json!({"name": "Priya", "email": "priya@college.edu", "college": "MLS"}),
        ),
    )
    .await;
    let student_id = student["id"].as_str().unwrap().to_string();

    let (status, case) = send(
        &app,
        json_request(
            "POST",
            "/api/cases",
            json!({
                "title": "Unpaid wages",
                "description": "Employer withheld two months of salary",
                "category": "employment"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case["status"], "open");
    assert!(case["assigned_student_id"].is_null());
    let case_id = case["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/cases/{}", case_id),
            json!({"assigned_student_id": student_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "assigned");
    assert_eq!(updated["assigned_student_id"], student_id.as_str());

    let (status, assigned) = send(
        &app,
        empty_request("GET", &format!("/api/students/{}/assigned-cases", student_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/cases/{}", case_id),
            json!({"status": "in_progress"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "in_progress");

    let (status, body) =
        send(&app, empty_request("DELETE", &format!("/api/cases/{}", case_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Case deleted successfully");
}

#[tokio::test]
async fn test_case_update_errors() {
    let app = setup_app().await;

    let (_, case) = send(
        &app,
        json_request(
            "POST",
            "/api/cases",
            json!({"title": "T", "description": "D", "category": "general"}),
        ),
    )
    .await;
    let case_id = case["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request("PATCH", &format!("/api/cases/{}", case_id), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No update data provided");

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/cases/{}", case_id),
            json!({"assigned_student_id": uuid::Uuid::new_v4()}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/cases/{}", uuid::Uuid::new_v4()),
            json!({"status": "closed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seed_replaces_data() {
    let app = setup_app().await;

    send(
        &app,
        json_request(
            "POST",
            "/api/cases",
            json!({"title": "Old", "description": "Old case", "category": "general"}),
        ),
    )
    .await;

    let (status, body) = send(&app, empty_request("POST", "/api/seed")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["students"], 2);
    assert_eq!(body["cases"], 2);

    let (_, students) = send(&app, empty_request("GET", "/api/students")).await;
    let (_, cases) = send(&app, empty_request("GET", "/api/cases")).await;
    assert_eq!(students.as_array().unwrap().len(), 2);
    assert_eq!(cases.as_array().unwrap().len(), 2);
    assert!(cases
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["title"] != "Old"));
}

// =============================================================================
// Speech disabled
// =============================================================================

#[tokio::test]
async fn test_tts_without_engine_is_503() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/text-to-speech", json!({"text": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "SPEECH_UNAVAILABLE");
}

#[tokio::test]
async fn test_tts_empty_text_rejected_before_engine() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/text-to-speech", json!({"text": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Text cannot be empty");
}

// =============================================================================
// Extractor rejections
// =============================================================================

#[tokio::test]
async fn test_malformed_id_uses_error_envelope() {
    let app = setup_app().await;

    let (status, body) = send(&app, empty_request("GET", "/api/cases/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_unknown_status_rejected() {
    let app = setup_app().await;

    let (_, case) = send(
        &app,
        json_request(
            "POST",
            "/api/cases",
            json!({"title": "T", "description": "D", "category": "general"}),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/cases/{}", case["id"].as_str().unwrap()),
            json!({"status": "archived"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_origin_list() {
    let db = init_memory_database().await.unwrap();
    let app = build_router(
        AppState::new(db, SpeechServices::disabled()).with_settings(HttpSettings {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..HttpSettings::default()
        }),
    );

    let request = |origin: &str| {
        Request::builder()
            .uri("/api/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request("http://localhost:3000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );

    let response = app.oneshot(request("http://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_wildcard_by_default() {
    let app = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
