use axum::Router;
use domain_todo_items::{PgTodoItemRepository, TodoItemService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTodoItemRepository::new(state.db.clone());
    let service = TodoItemService::new(repository);
    handlers::router(service)
}
