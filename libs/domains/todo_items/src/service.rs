use std::sync::Arc;

use crate::error::{TodoItemError, TodoItemResult};
use crate::models::{CreateTodoItem, TodoItem};
use crate::repository::TodoItemRepository;

/// Service layer for TodoItem business logic
///
/// "Not found" is an `Ok(None)`, never an error; only storage faults and
/// unresolved conflicts surface as `Err`.
#[derive(Clone)]
pub struct TodoItemService<R: TodoItemRepository> {
    repository: Arc<R>,
}

impl<R: TodoItemRepository> TodoItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list(&self) -> TodoItemResult<Vec<TodoItem>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: i64) -> TodoItemResult<Option<TodoItem>> {
        self.repository.find_by_id(id).await
    }

    pub async fn create(&self, input: CreateTodoItem) -> TodoItemResult<TodoItem> {
        self.repository.insert(input).await
    }

    /// Replace an existing record.
    ///
    /// A conflict from the store is resolved by checking whether the record
    /// still exists: if it is gone the caller gets `None`, otherwise the
    /// conflict propagates.
    pub async fn update(&self, item: TodoItem) -> TodoItemResult<Option<TodoItem>> {
        let id = item.id;

        match self.repository.update(item).await {
            Ok(updated) => Ok(Some(updated)),
            Err(TodoItemError::Conflict(_)) => {
                if self.repository.exists(id).await? {
                    Err(TodoItemError::Conflict(id))
                } else {
                    Ok(None)
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a record, returning it as it was before removal
    pub async fn delete(&self, id: i64) -> TodoItemResult<Option<TodoItem>> {
        let Some(item) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        if !self.repository.delete(id).await? {
            return Err(TodoItemError::Conflict(id));
        }

        Ok(Some(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTodoItemRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn item(id: i64) -> TodoItem {
        TodoItem {
            id,
            title: "Test".to_string(),
            description: Some("Description".to_string()),
            is_complete: false,
        }
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = TodoItemService::new(mock_repo);

        assert_eq!(service.get(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_delegates_to_insert() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|input| Ok(input.into_item(1)));

        let service = TodoItemService::new(mock_repo);
        let created = service
            .create(CreateTodoItem::new("Test", Some("Description".to_string())))
            .await
            .unwrap();

        assert_eq!(created, item(1));
    }

    #[tokio::test]
    async fn test_update_success_returns_updated_item() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo.expect_update().returning(Ok);
        mock_repo.expect_exists().never();

        let service = TodoItemService::new(mock_repo);

        assert_eq!(service.update(item(1)).await.unwrap(), Some(item(1)));
    }

    #[tokio::test]
    async fn test_update_conflict_on_missing_record_is_not_found() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_update()
            .returning(|item| Err(TodoItemError::Conflict(item.id)));
        mock_repo
            .expect_exists()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(false));

        let service = TodoItemService::new(mock_repo);

        assert_eq!(service.update(item(5)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_conflict_on_existing_record_propagates() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_update()
            .returning(|item| Err(TodoItemError::Conflict(item.id)));
        mock_repo.expect_exists().returning(|_| Ok(true));

        let service = TodoItemService::new(mock_repo);
        let result = service.update(item(5)).await;

        assert!(matches!(result, Err(TodoItemError::Conflict(5))));
    }

    #[tokio::test]
    async fn test_update_storage_error_skips_existence_check() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_update()
            .returning(|_| Err(TodoItemError::Database(DbErr::Custom("down".to_string()))));
        mock_repo.expect_exists().never();

        let service = TodoItemService::new(mock_repo);

        assert!(matches!(
            service.update(item(1)).await,
            Err(TodoItemError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_record_does_not_mutate() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = TodoItemService::new(mock_repo);

        assert_eq!(service.delete(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_item() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(item(id))));
        mock_repo
            .expect_delete()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(true));

        let service = TodoItemService::new(mock_repo);

        assert_eq!(service.delete(2).await.unwrap(), Some(item(2)));
    }

    #[tokio::test]
    async fn test_delete_race_is_conflict() {
        let mut mock_repo = MockTodoItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(item(id))));
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = TodoItemService::new(mock_repo);

        assert!(matches!(
            service.delete(3).await,
            Err(TodoItemError::Conflict(3))
        ));
    }
}
