//! `run_generation` against an in-process stand-in for the Scribe API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use scribe_client::{ClientConfig, ClientError, PollEvent, ScribeClient};
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Clone, Default)]
struct Fake {
    calls: Arc<Mutex<Vec<&'static str>>>,
    eligible: bool,
    fail_generation: bool,
    finished: Arc<Mutex<bool>>,
}

impl Fake {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn row(project_id: Uuid, order: i32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "project_id": project_id,
        "prompt_id": Uuid::new_v4(),
        "name": format!("prompt {order}"),
        "result": format!("result {order}"),
        "order": order,
        "created_at": "2024-06-01T12:00:00Z",
        "updated_at": "2024-06-01T12:00:00Z",
    })
}

async fn eligibility(State(fake): State<Fake>) -> Json<Value> {
    fake.record("eligibility");
    let outcome = if fake.eligible {
        json!({ "status": "eligible" })
    } else {
        json!({
            "status": "blocked",
            "reasons": ["missing_prompts"],
            "message": "Please add prompts before generating content.",
        })
    };
    let mut body = json!({
        "asset_tokens": 6,
        "prompt_tokens": 4,
        "prompt_count": 2,
        "limits": { "max_asset_tokens": 50000, "max_prompt_tokens": 10000 },
    });
    body.as_object_mut()
        .unwrap()
        .extend(outcome.as_object().unwrap().clone());
    Json(body)
}

async fn list(State(fake): State<Fake>, Path(project_id): Path<Uuid>) -> Json<Value> {
    fake.record("list");
    if *fake.finished.lock().unwrap() {
        Json(json!([row(project_id, 0), row(project_id, 1)]))
    } else {
        Json(json!([]))
    }
}

async fn generate(
    State(fake): State<Fake>,
    Path(project_id): Path<Uuid>,
) -> (StatusCode, Json<Value>) {
    fake.record("generate");
    tokio::time::sleep(Duration::from_millis(80)).await;
    if fake.fail_generation {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to generate content", "code": "GENERATION_FAILED" })),
        );
    }
    *fake.finished.lock().unwrap() = true;
    (
        StatusCode::CREATED,
        Json(json!([row(project_id, 0), row(project_id, 1)])),
    )
}

async fn clear(State(fake): State<Fake>) -> Json<Value> {
    fake.record("clear");
    Json(json!({ "message": "Generated content deleted successfully" }))
}

/// Serve `fake` on an ephemeral port and return a client pointed at it.
async fn serve(fake: Fake) -> ScribeClient {
    let app = Router::new()
        .route(
            "/api/v1/projects/{project_id}/generation-eligibility",
            get(eligibility),
        )
        .route(
            "/api/v1/projects/{project_id}/generated-content",
            get(list).post(generate).delete(clear),
        )
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ScribeClient::new(&ClientConfig {
        api_url: format!("http://{addr}"),
        api_token: "test-token".into(),
        poll_interval: Duration::from_millis(10),
    })
}

#[tokio::test]
async fn eligible_run_clears_polls_and_returns_rows() {
    let fake = Fake {
        eligible: true,
        ..Fake::default()
    };
    let client = serve(fake.clone()).await;
    let mut events = Vec::new();

    let rows = client
        .run_generation(Uuid::new_v4(), |event| events.push(event))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(events[0], PollEvent::Progress { generated: 0, total: 2 });

    let calls = fake.calls.lock().unwrap().clone();
    assert_eq!(&calls[..2], &["eligibility", "clear"]);
    assert!(calls.contains(&"generate"));
    assert!(calls.contains(&"list"));
}

#[tokio::test]
async fn blocked_project_is_refused_before_clearing() {
    let fake = Fake::default();
    let client = serve(fake.clone()).await;

    let err = client
        .run_generation(Uuid::new_v4(), |_| {})
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ClientError::NotEligible { ref message } if message == "Please add prompts before generating content."
    );
    assert_eq!(*fake.calls.lock().unwrap(), vec!["eligibility"]);
}

#[tokio::test]
async fn failed_generation_surfaces_server_message() {
    let fake = Fake {
        eligible: true,
        fail_generation: true,
        ..Fake::default()
    };
    let client = serve(fake).await;

    let err = client
        .run_generation(Uuid::new_v4(), |_| {})
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Api { status: 500, .. });
    assert_eq!(err.api_message().as_deref(), Some("Failed to generate content"));
}
