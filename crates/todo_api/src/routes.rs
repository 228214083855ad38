//! Route handlers for `/v1/todos`.
//!
//! Writes build a command and hand it to `TodoHandler`; reads call the
//! repository directly. Both run on the blocking pool via
//! `AppState::with_connection`.

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use todo_core::{
    CommandResult, CreateTodoCommand, FailureKind, MarkTodoAsDoneCommand,
    MarkTodoAsUndoneCommand, SqliteTodoRepository, TodoCommand, TodoHandler, TodoId, TodoItem,
    TodoQuery, TodoRepository, UpdateTodoCommand,
};

/// Body of `POST /v1/todos`. Any owner field sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    pub date: NaiveDate,
}

/// Body of `PUT /v1/todos`.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    #[serde(default)]
    pub title: String,
}

/// Body of the mark-as-done/undone routes.
#[derive(Debug, Deserialize)]
pub struct MarkTodoRequest {
    pub id: TodoId,
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub application_name: &'static str,
    pub version: &'static str,
}

pub async fn app_info() -> Json<AppInfo> {
    Json(AppInfo {
        application_name: env!("CARGO_PKG_NAME"),
        version: todo_core::core_version(),
    })
}

pub async fn list_all(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    list(&state, TodoQuery::all(user.into_owner())).await
}

pub async fn list_done(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    list(&state, TodoQuery::done(user.into_owner())).await
}

pub async fn list_undone(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    list(&state, TodoQuery::undone(user.into_owner())).await
}

pub async fn done_today(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let today = state.today();
    list(&state, TodoQuery::period(user.into_owner(), today, true)).await
}

pub async fn undone_today(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let today = state.today();
    list(&state, TodoQuery::period(user.into_owner(), today, false)).await
}

pub async fn done_tomorrow(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let tomorrow = tomorrow(&state)?;
    list(&state, TodoQuery::period(user.into_owner(), tomorrow, true)).await
}

pub async fn undone_tomorrow(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let tomorrow = tomorrow(&state)?;
    list(&state, TodoQuery::period(user.into_owner(), tomorrow, false)).await
}

pub async fn create_todo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let command = CreateTodoCommand::new(body.title, user.into_owner(), body.date);
    execute(&state, command.into(), StatusCode::CREATED).await
}

pub async fn update_todo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let command = UpdateTodoCommand::new(body.id, body.title, user.into_owner());
    execute(&state, command.into(), StatusCode::OK).await
}

pub async fn mark_as_done(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<MarkTodoRequest>,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let command = MarkTodoAsDoneCommand::new(body.id, user.into_owner());
    execute(&state, command.into(), StatusCode::OK).await
}

pub async fn mark_as_undone(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<MarkTodoRequest>,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let command = MarkTodoAsUndoneCommand::new(body.id, user.into_owner());
    execute(&state, command.into(), StatusCode::OK).await
}

async fn execute(
    state: &AppState,
    command: TodoCommand,
    success_status: StatusCode,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let result = state
        .with_connection(move |conn| {
            let handler = TodoHandler::new(SqliteTodoRepository::try_new(conn)?);
            Ok(handler.handle(command)?)
        })
        .await?;

    let status = match result.failure_kind() {
        None => success_status,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(result)))
}

async fn list(state: &AppState, query: TodoQuery) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let items = state
        .with_connection(move |conn| Ok(SqliteTodoRepository::try_new(conn)?.list(&query)?))
        .await?;
    Ok(Json(items))
}

fn tomorrow(state: &AppState) -> Result<NaiveDate, ApiError> {
    state
        .today()
        .succ_opt()
        .ok_or_else(|| ApiError::Unavailable("calendar date out of range".to_string()))
}
