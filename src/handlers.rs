use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{CreateTodo, ListTodosQuery, Todo, TodoPage, UpdateTodo},
    state::AppState,
    validation::{parse_todo_id, validate_todo},
};

const TODO_NOT_FOUND: &str = "Todo not found";

pub async fn list_todos(
    State(state): State<AppState>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> AppResult<Json<TodoPage>> {
    let Query(query) = query?;
    let page = state.todos.get_all_todos(query).await?;
    Ok(Json(page))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Todo>> {
    let id = parse_todo_id(&raw_id)?;
    let todo = state
        .todos
        .get_todo_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(TODO_NOT_FOUND))?;

    Ok(Json(todo))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let Json(body) = payload?;
    validate_todo(&body)?;
    let request: CreateTodo = decode_body(body)?;

    let todo = state.todos.create_todo(request).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let id = parse_todo_id(&raw_id)?;
    let Json(body) = payload?;
    validate_todo(&body)?;
    let update: UpdateTodo = decode_body(body)?;

    let todo = state
        .todos
        .update_todo(id, update)
        .await?
        .ok_or_else(|| AppError::not_found(TODO_NOT_FOUND))?;

    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_todo_id(&raw_id)?;
    if !state.todos.delete_todo(id).await? {
        return Err(AppError::not_found(TODO_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

fn decode_body<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    serde_json::from_value(body)
        .map_err(|err| AppError::bad_request(format!("Invalid request body: {err}")))
}
