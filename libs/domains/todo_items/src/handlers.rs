use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonBody,
    errors::responses::{
        BadRequestIdResponse, BadRequestJsonResponse, InternalServerErrorResponse,
        ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{TodoItemError, TodoItemResult};
use crate::models::{CreateTodoItem, TodoItem};
use crate::repository::TodoItemRepository;
use crate::service::TodoItemService;

/// OpenAPI documentation for the Todo Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_todo_items,
        create_todo_item,
        get_todo_item,
        update_todo_item,
        delete_todo_item,
    ),
    components(
        schemas(TodoItem, CreateTodoItem),
        responses(
            BadRequestIdResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Todo item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the todo item router; routes are absolute (`/items`, `/items/{id}`)
pub fn router<R: TodoItemRepository + 'static>(service: TodoItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/items", get(list_todo_items).post(create_todo_item))
        .route(
            "/items/{id}",
            get(get_todo_item)
                .put(update_todo_item)
                .delete(delete_todo_item),
        )
        .with_state(shared_service)
}

/// List all todo items
#[utoipa::path(
    get,
    path = "/items",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All todo items", body = Vec<TodoItem>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_todo_items<R: TodoItemRepository>(
    State(service): State<Arc<TodoItemService<R>>>,
) -> TodoItemResult<Json<Vec<TodoItem>>> {
    let items = service.list().await?;
    Ok(Json(items))
}

/// Create a todo item
#[utoipa::path(
    post,
    path = "/items",
    tag = entity::Model::TAG,
    request_body = CreateTodoItem,
    responses(
        (status = 201, description = "Todo item created", body = TodoItem,
            headers(("Location" = String, description = "URL of the created item"))),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_todo_item<R: TodoItemRepository>(
    State(service): State<Arc<TodoItemService<R>>>,
    JsonBody(input): JsonBody<CreateTodoItem>,
) -> TodoItemResult<impl IntoResponse> {
    let item = service.create(input).await?;
    let location = format!("{}/{}", entity::Model::URL, item.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Get a todo item by id
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Todo item id")
    ),
    responses(
        (status = 200, description = "Todo item found", body = TodoItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "Todo item not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo_item<R: TodoItemRepository>(
    State(service): State<Arc<TodoItemService<R>>>,
    IdPath(id): IdPath,
) -> TodoItemResult<Json<TodoItem>> {
    let item = service.get(id).await?.ok_or(TodoItemError::NotFound(id))?;
    Ok(Json(item))
}

/// Replace a todo item
///
/// The body's `id` must equal the path id.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Todo item id")
    ),
    request_body = TodoItem,
    responses(
        (status = 200, description = "Todo item updated", body = TodoItem),
        (status = 400, description = "Path id and body id differ, or the id is not an integer"),
        (status = 404, description = "Todo item not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_todo_item<R: TodoItemRepository>(
    State(service): State<Arc<TodoItemService<R>>>,
    IdPath(id): IdPath,
    JsonBody(item): JsonBody<TodoItem>,
) -> TodoItemResult<Json<TodoItem>> {
    if item.id != id {
        return Err(TodoItemError::IdMismatch {
            path: id,
            body: item.id,
        });
    }

    let updated = service
        .update(item)
        .await?
        .ok_or(TodoItemError::NotFound(id))?;
    Ok(Json(updated))
}

/// Delete a todo item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Todo item id")
    ),
    responses(
        (status = 204, description = "Todo item deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "Todo item not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_todo_item<R: TodoItemRepository>(
    State(service): State<Arc<TodoItemService<R>>>,
    IdPath(id): IdPath,
) -> TodoItemResult<StatusCode> {
    service.delete(id).await?.ok_or(TodoItemError::NotFound(id))?;
    Ok(StatusCode::NO_CONTENT)
}
