use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn test_app() -> Router {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("GROQ_API_KEY", "gsk-test");
    // Unroutable on purpose; no test below should reach the network.
    env::set_var("GROQ_API_BASE", "http://127.0.0.1:9/v1");
    env::set_var("PUBLIC_RPS", "100");

    let _ = quizbee_backend::config::init_config();
    let app_state = quizbee_backend::AppState::new();

    Router::new()
        .route("/", get(quizbee_backend::routes::pages::index))
        .route("/health", get(quizbee_backend::routes::health::health))
        .route(
            "/api/quiz/generate",
            post(quizbee_backend::routes::quiz::generate_quiz),
        )
        .route(
            "/api/quiz/grade",
            post(quizbee_backend::routes::quiz::grade_quiz),
        )
        .route(
            "/api/quiz/export",
            post(quizbee_backend::routes::quiz::export_quiz),
        )
        .layer(axum::middleware::from_fn_with_state(
            quizbee_backend::middleware::rate_limit::RateLimiter::new(100),
            quizbee_backend::middleware::rate_limit::throttle,
        ))
        .with_state(app_state)
}

fn sample_quiz() -> JsonValue {
    json!({
        "title": "Solar System Quiz",
        "topic": "Solar System",
        "difficulty": "easy",
        "questions": [
            {
                "id": 1,
                "question": "Which planet is closest to the Sun?",
                "options": ["Venus", "Mercury", "Mars", "Earth"],
                "correct_answer": "Mercury",
                "explanation": "Mercury orbits closest to the Sun."
            },
            {
                "id": 2,
                "question": "Which planet has rings?",
                "options": ["Saturn", "Mars", "Venus", "Mercury"],
                "correct_answer": "Saturn"
            }
        ]
    })
}

async fn post_json(app: Router, uri: &str, body: JsonValue) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(req).await.unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "quizbee-backend");
}

#[tokio::test]
async fn index_serves_the_quiz_page() {
    let app = test_app();
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("QuizBee"));
    assert!(page.contains("/api/quiz/generate"));
}

#[tokio::test]
async fn zero_count_is_rejected_before_any_network_call() {
    let app = test_app();
    let resp = post_json(
        app,
        "/api/quiz/generate",
        json!({"topic": "Solar System", "difficulty": "easy", "count": 0}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("count"));
}

#[tokio::test]
async fn empty_topic_is_rejected() {
    let app = test_app();
    let resp = post_json(
        app,
        "/api/quiz/generate",
        json!({"topic": "", "difficulty": "medium", "count": 5}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_returns_a_pdf_attachment() {
    let app = test_app();
    let resp = post_json(
        app,
        "/api/quiz/export",
        json!({"quiz": sample_quiz(), "include_answer_key": true}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("quiz_solar_system_"));
    let bytes = to_bytes(resp.into_body(), 10 * 1024 * 1024).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn export_of_an_empty_quiz_is_rejected() {
    let app = test_app();
    let empty = json!({
        "title": "Empty", "topic": "Empty", "difficulty": "easy", "questions": []
    });
    let resp = post_json(app, "/api/quiz/export", json!({"quiz": empty})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grading_scores_and_reviews() {
    let app = test_app();
    let resp = post_json(
        app,
        "/api/quiz/grade",
        json!({
            "quiz": sample_quiz(),
            "answers": [
                {"question_id": 1, "selected": "Mercury"},
                {"question_id": 2, "selected": "Mars"}
            ]
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let report: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["score"], 1);
    assert_eq!(report["total"], 2);
    assert_eq!(report["review"].as_array().unwrap().len(), 1);
    assert_eq!(report["review"][0]["correct"], "Saturn");
}
