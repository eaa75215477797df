#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use scribe_api::auth::jwt::{generate_access_token, JwtConfig};
use scribe_api::config::ServerConfig;
use scribe_api::router::build_app_router;
use scribe_api::state::AppState;
use scribe_core::eligibility::TokenLimits;
use scribe_core::tokens::TokenCounter;
use scribe_db::models::asset::CreateAsset;
use scribe_db::repositories::AssetRepo;
use scribe_llm::testing::ScriptedGenerator;
use scribe_pipeline::{GenerationConfig, GenerationOrchestrator};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// User every helper authenticates as unless told otherwise.
pub const USER: &str = "user_writer";

const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        token_limits: TokenLimits::default(),
    }
}

/// Generation settings with a budget short enough for tests.
pub fn test_generation_config() -> GenerationConfig {
    GenerationConfig {
        max_duration: Duration::from_secs(10),
        ..GenerationConfig::default()
    }
}

/// Build the full application router backed by a default `ScriptedGenerator`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, ScriptedGenerator::new(), test_config())
}

/// Build the full application router with a scripted provider and config.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(pool: PgPool, generator: ScriptedGenerator, config: ServerConfig) -> Router {
    let orchestrator = Arc::new(GenerationOrchestrator::new(
        pool.clone(),
        Arc::new(generator),
        test_generation_config(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator,
        tokens: TokenCounter::shared(),
    };

    build_app_router(state, &config)
}

/// A valid Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, user: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token_for(user)));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, user: &str) -> Response {
    send(app, Method::GET, uri, Some(user), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, user: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

/// Authenticated POST without a body.
pub async fn post_auth(app: Router, uri: &str, user: &str) -> Response {
    send(app, Method::POST, uri, Some(user), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, user: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(user), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, user: &str) -> Response {
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Send a request with an arbitrary raw `Authorization` header value.
pub async fn get_with_authorization(app: Router, uri: &str, authorization: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project through the API and return its id.
pub async fn create_project(app: Router, user: &str, title: &str) -> Uuid {
    let response = post_json_auth(app, "/api/v1/projects", user, serde_json::json!({ "title": title })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().parse().unwrap()
}

/// Create a prompt through the API and return the response JSON.
pub async fn create_prompt(app: Router, project_id: Uuid, name: &str, prompt: &str, order: i32) -> serde_json::Value {
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/prompts"),
        USER,
        serde_json::json!({ "name": name, "prompt": prompt, "order": order }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Insert an asset directly; assets are written by the upload service.
pub async fn seed_asset(pool: &PgPool, project_id: Uuid, content: Option<&str>, token_count: i32) {
    AssetRepo::create(
        pool,
        &CreateAsset {
            project_id,
            title: "Keynote".into(),
            file_name: "keynote.txt".into(),
            file_url: "https://blob.example/keynote.txt".into(),
            file_type: "text".into(),
            mime_type: "text/plain".into(),
            size: 42,
            content: content.map(str::to_string),
            token_count,
        },
    )
    .await
    .unwrap();
}
