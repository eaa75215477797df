//! HTTP-level integration tests for the `/templates` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, USER};
use scribe_db::models::template::{CreateTemplate, CreateTemplatePrompt};
use scribe_db::repositories::TemplateRepo;
use sqlx::PgPool;
use uuid::Uuid;

async fn create_template(app: axum::Router, user: &str, title: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/v1/templates",
        user,
        serde_json::json!({ "title": title, "description": "Posts for launch day" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn seed_shared(pool: &PgPool) -> Uuid {
    let template = TemplateRepo::create(
        pool,
        None,
        &CreateTemplate {
            title: "Starter pack".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    TemplateRepo::add_prompt(
        pool,
        template.id,
        &CreateTemplatePrompt {
            name: "Tweet".into(),
            prompt: "Write a tweet".into(),
            token_count: 3,
            order: 0,
        },
    )
    .await
    .unwrap();
    template.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_template_is_owned_by_caller(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = create_template(app, USER, "Launch").await;

    assert_eq!(json["title"], "Launch");
    assert_eq!(json["description"], "Posts for launch day");
    assert_eq!(json["user_id"], USER);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_template_without_title_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/templates", USER, serde_json::json!({ "title": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["title"][0]["message"], "Title is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_includes_own_and_shared_templates(pool: PgPool) {
    seed_shared(&pool).await;
    let app = common::build_test_app(pool);
    create_template(app.clone(), USER, "Mine").await;
    create_template(app.clone(), "user_other", "Theirs").await;

    let response = get_auth(app, "/api/v1/templates", USER).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let mut titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Mine", "Starter pack"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_shared_template_includes_prompts(pool: PgPool) {
    let template_id = seed_shared(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/templates/{template_id}"), USER).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Starter pack");
    assert!(json["user_id"].is_null());
    assert_eq!(json["prompts"][0]["name"], "Tweet");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_own_template(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_template(app.clone(), USER, "Draft").await;
    let id = created["id"].as_str().unwrap();

    let response = patch_json_auth(
        app,
        &format!("/api/v1/templates/{id}"),
        USER,
        serde_json::json!({ "title": "Final" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Final");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn shared_template_is_read_only(pool: PgPool) {
    let template_id = seed_shared(&pool).await;
    let app = common::build_test_app(pool);

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/v1/templates/{template_id}"),
        USER,
        serde_json::json!({ "title": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/templates/{template_id}"), USER).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_own_template_returns_204(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_template(app.clone(), USER, "Draft").await;
    let id = created["id"].as_str().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/templates/{id}"), USER).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/templates/{id}"), USER).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_users_template_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_template(app.clone(), "user_other", "Theirs").await;
    let id = created["id"].as_str().unwrap();

    let response = get_auth(app, &format!("/api/v1/templates/{id}"), USER).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
