use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TodoItemError, TodoItemResult};
use crate::models::{CreateTodoItem, TodoItem};

/// Repository trait for TodoItem persistence
///
/// Updates and deletes that match no row are reported distinctly
/// (`Conflict` for update, `false` for delete) so the service can tell a
/// vanished record from a storage fault.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// All records, ascending by id
    async fn list(&self) -> TodoItemResult<Vec<TodoItem>>;

    async fn find_by_id(&self, id: i64) -> TodoItemResult<Option<TodoItem>>;

    /// Insert a new record, assigning an id unless a positive one is supplied
    async fn insert(&self, input: CreateTodoItem) -> TodoItemResult<TodoItem>;

    /// Replace title, description and completion of `item.id`.
    ///
    /// Returns `TodoItemError::Conflict` when no row matched.
    async fn update(&self, item: TodoItem) -> TodoItemResult<TodoItem>;

    /// Remove a record; `false` when no row matched
    async fn delete(&self, id: i64) -> TodoItemResult<bool>;

    async fn exists(&self, id: i64) -> TodoItemResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, TodoItem>,
    last_id: i64,
}

/// In-memory implementation of TodoItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTodoItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTodoItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoItemRepository for InMemoryTodoItemRepository {
    async fn list(&self) -> TodoItemResult<Vec<TodoItem>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> TodoItemResult<Option<TodoItem>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn insert(&self, input: CreateTodoItem) -> TodoItemResult<TodoItem> {
        let mut store = self.store.write().await;

        let id = match input.id {
            Some(id) if id > 0 => {
                if store.items.contains_key(&id) {
                    return Err(TodoItemError::Database(DbErr::RecordNotInserted));
                }
                id
            }
            // Ids past i64::MAX cannot be assigned
            _ => store
                .last_id
                .checked_add(1)
                .ok_or(TodoItemError::Database(DbErr::RecordNotInserted))?,
        };
        store.last_id = store.last_id.max(id);

        let item = input.into_item(id);
        store.items.insert(id, item.clone());

        tracing::info!(todo_item_id = %id, "Created todo item");
        Ok(item)
    }

    async fn update(&self, item: TodoItem) -> TodoItemResult<TodoItem> {
        let mut store = self.store.write().await;

        let existing = store
            .items
            .get_mut(&item.id)
            .ok_or(TodoItemError::Conflict(item.id))?;
        *existing = item.clone();

        tracing::info!(todo_item_id = %item.id, "Updated todo item");
        Ok(item)
    }

    async fn delete(&self, id: i64) -> TodoItemResult<bool> {
        let mut store = self.store.write().await;

        if store.items.remove(&id).is_some() {
            tracing::info!(todo_item_id = %id, "Deleted todo item");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists(&self, id: i64) -> TodoItemResult<bool> {
        let store = self.store.read().await;
        Ok(store.items.contains_key(&id))
    }
}
