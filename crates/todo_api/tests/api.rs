use axum::http::{self, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_api::{app, AppState, FixedClock};
use todo_core::db::open_db_in_memory;
use tower::ServiceExt;

const USER_HEADER: &str = "x-authenticated-user";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("date should be valid")
}

fn test_app() -> Router {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let state = AppState::new(conn, http::HeaderName::from_static(USER_HEADER))
        .with_clock(FixedClock(today()));
    app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.expect("body should be readable").to_bytes();
    serde_json::from_slice(&bytes).expect("body should be json")
}

fn json_request(method: &str, uri: &str, user: Option<&str>, body: Value) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(body.to_string()).expect("request should build")
}

fn get_request(uri: &str, user: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(USER_HEADER, user)
        .body(String::new())
        .expect("request should build")
}

async fn send(app: &Router, request: Request<String>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router should respond");
    let status = response.status();
    (status, body_json(response).await)
}

async fn create(app: &Router, user: &str, title: &str, date: NaiveDate) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/v1/todos",
            Some(user),
            json!({ "title": title, "date": date.to_string() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["data"].clone()
}

// --- info ---

#[tokio::test]
async fn app_info_needs_no_principal() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder().uri("/").body(String::new()).expect("request should build"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application_name"], "todo_api");
    assert!(!body["version"].as_str().expect("field should be a string").is_empty());
}

// --- auth ---

#[tokio::test]
async fn missing_principal_returns_401() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            None,
            json!({ "title": "Buy milk", "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["notifications"][0]["key"], "User");
}

#[tokio::test]
async fn blank_principal_returns_401() {
    let app = test_app();
    let (status, _) = send(&app, get_request("/v1/todos", "   ")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_open_task() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some("alice1"),
            json!({ "title": "Buy milk", "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Task saved");
    assert_eq!(body["data"]["title"], "Buy milk");
    assert_eq!(body["data"]["owner"], "alice1");
    assert_eq!(body["data"]["done"], false);
    assert_eq!(body["notifications"], json!([]));
}

#[tokio::test]
async fn create_ignores_owner_sent_in_body() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some("alice1"),
            json!({ "title": "Buy milk", "date": "2026-10-17", "user": "thiago", "owner": "thiago" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["owner"], "alice1");
}

#[tokio::test]
async fn create_with_empty_title_returns_400_with_title_notification() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some("alice1"),
            json!({ "title": "", "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "There is a problem with the task.");
    assert!(body["data"].is_null());
    assert_eq!(body["notifications"][0]["key"], "Title");

    let (_, listed) = send(&app, get_request("/v1/todos", "alice1")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_with_oversized_title_returns_400() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some("alice1"),
            json!({ "title": "x".repeat(161), "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["notifications"][0]["key"], "Title");

    let (_, listed) = send(&app, get_request("/v1/todos", "alice1")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn oversized_principal_fails_user_rule() {
    let app = test_app();
    let owner = "a".repeat(121);
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some(owner.as_str()),
            json!({ "title": "Buy milk", "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notifications"][0]["key"], "User");
}

#[tokio::test]
async fn short_principal_fails_user_rule() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/todos",
            Some("bob"),
            json!({ "title": "Buy milk", "date": "2026-10-17" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notifications"][0]["key"], "User");
}

#[tokio::test]
async fn create_without_date_is_rejected_by_extractor() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/todos",
            Some("alice1"),
            json!({ "title": "Buy milk" }),
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update / mark ---

#[tokio::test]
async fn update_renames_task() {
    let app = test_app();
    let created = create(&app, "alice1", "Buy milk", today()).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/todos",
            Some("alice1"),
            json!({ "id": created["id"], "title": "Buy oat milk" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated");
    assert_eq!(body["data"]["title"], "Buy oat milk");
    assert_eq!(body["data"]["id"], created["id"]);
}

#[tokio::test]
async fn mark_as_done_then_undone() {
    let app = test_app();
    let created = create(&app, "alice1", "Buy milk", today()).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/todos/mark-as-done",
            Some("alice1"),
            json!({ "id": created["id"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["done"], true);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/todos/mark-as-undone",
            Some("alice1"),
            json!({ "id": created["id"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task marked as undone");
    assert_eq!(body["data"]["done"], false);
}

#[tokio::test]
async fn foreign_task_returns_404_and_stays_untouched() {
    let app = test_app();
    let created = create(&app, "alice1", "Buy milk", today()).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/todos/mark-as-done",
            Some("mallory"),
            json!({ "id": created["id"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["notifications"][0]["key"], "Id");

    let (_, done) = send(&app, get_request("/v1/todos/done", "alice1")).await;
    assert_eq!(done, json!([]));
}

#[tokio::test]
async fn unknown_id_returns_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/todos",
            Some("alice1"),
            json!({ "id": "00000000-0000-4000-8000-000000000000", "title": "Whatever" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");
}

// --- queries ---

#[tokio::test]
async fn list_routes_are_scoped_to_principal() {
    let app = test_app();
    create(&app, "Thiago", "Task 1", today()).await;
    create(&app, "Thiago", "Task 2", today()).await;
    create(&app, "Ronaldo", "Task 3", today()).await;
    create(&app, "Lisa12", "Task 4", today()).await;
    create(&app, "Ronaldo", "Task 5", today()).await;

    let (status, body) = send(&app, get_request("/v1/todos", "Thiago")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("body should be an array");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["owner"] == "Thiago"));
}

#[tokio::test]
async fn done_and_undone_routes_split_tasks() {
    let app = test_app();
    let first = create(&app, "alice1", "First", today()).await;
    create(&app, "alice1", "Second", today()).await;
    send(
        &app,
        json_request(
            "PUT",
            "/v1/todos/mark-as-done",
            Some("alice1"),
            json!({ "id": first["id"] }),
        ),
    )
    .await;

    let (_, done) = send(&app, get_request("/v1/todos/done", "alice1")).await;
    let (_, undone) = send(&app, get_request("/v1/todos/undone", "alice1")).await;

    assert_eq!(done.as_array().expect("body should be an array").len(), 1);
    assert_eq!(done[0]["title"], "First");
    assert_eq!(undone.as_array().expect("body should be an array").len(), 1);
    assert_eq!(undone[0]["title"], "Second");
}

#[tokio::test]
async fn period_routes_use_injected_clock() {
    let app = test_app();
    let tomorrow = today().succ_opt().expect("next day should exist");
    let done_now = create(&app, "alice1", "Done today", today()).await;
    create(&app, "alice1", "Open today", today()).await;
    create(&app, "alice1", "Open tomorrow", tomorrow).await;
    create(&app, "alice1", "Next week", today() + chrono::Days::new(7)).await;
    send(
        &app,
        json_request(
            "PUT",
            "/v1/todos/mark-as-done",
            Some("alice1"),
            json!({ "id": done_now["id"] }),
        ),
    )
    .await;

    let titles = |body: Value| -> Vec<String> {
        body.as_array()
            .expect("body should be an array")
            .iter()
            .map(|item| item["title"].as_str().expect("field should be a string").to_string())
            .collect()
    };

    let (_, body) = send(&app, get_request("/v1/todos/done/today", "alice1")).await;
    assert_eq!(titles(body), ["Done today"]);

    let (_, body) = send(&app, get_request("/v1/todos/undone/today", "alice1")).await;
    assert_eq!(titles(body), ["Open today"]);

    let (_, body) = send(&app, get_request("/v1/todos/undone/tomorrow", "alice1")).await;
    assert_eq!(titles(body), ["Open tomorrow"]);

    let (_, body) = send(&app, get_request("/v1/todos/done/tomorrow", "alice1")).await;
    assert!(titles(body).is_empty());
}
