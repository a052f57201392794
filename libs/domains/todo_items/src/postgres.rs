use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};

use crate::{
    entity,
    error::{TodoItemError, TodoItemResult},
    models::{CreateTodoItem, TodoItem},
    repository::TodoItemRepository,
};

/// Moves the BIGSERIAL sequence past ids that were inserted explicitly
const SYNC_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('todo_items', 'id'), \
     (SELECT COALESCE(MAX(id), 1) FROM todo_items))";

pub struct PgTodoItemRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTodoItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TodoItemRepository for PgTodoItemRepository {
    async fn list(&self) -> TodoItemResult<Vec<TodoItem>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> TodoItemResult<Option<TodoItem>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, input: CreateTodoItem) -> TodoItemResult<TodoItem> {
        let explicit_id = matches!(input.id, Some(id) if id > 0);
        let active_model: entity::ActiveModel = input.into();

        let model = if explicit_id {
            // Row and sequence move together; dropping the transaction rolls back
            let txn = self.base.db().begin().await?;
            let model = active_model.insert(&txn).await?;
            txn.execute_unprepared(SYNC_ID_SEQUENCE).await?;
            txn.commit().await?;
            model
        } else {
            self.base.insert(active_model).await?
        };

        tracing::info!(todo_item_id = %model.id, "Created todo item");
        Ok(model.into())
    }

    async fn update(&self, item: TodoItem) -> TodoItemResult<TodoItem> {
        let id = item.id;
        let active_model: entity::ActiveModel = item.into();

        let model = self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TodoItemError::Conflict(id),
            other => TodoItemError::Database(other),
        })?;

        tracing::info!(todo_item_id = %id, "Updated todo item");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> TodoItemResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(todo_item_id = %id, "Deleted todo item");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists(&self, id: i64) -> TodoItemResult<bool> {
        Ok(self.base.exists(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, title: &str) -> entity::Model {
        entity::Model {
            id,
            title: title.to_string(),
            description: Some(format!("{title} description")),
            is_complete: false,
        }
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "a"), model(2, "b")]])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        let items = repo.list().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "b");
        assert_eq!(items[1].description.as_deref(), Some("b description"));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_empty_result() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        assert_eq!(repo.find_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_without_id_skips_sequence_sync() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Test")]])
            .into_connection();
        let repo = PgTodoItemRepository::new(db.clone());

        let item = repo.insert(CreateTodoItem::new("Test", None)).await.unwrap();
        assert_eq!(item.id, 1);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_with_explicit_id_syncs_sequence() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(10, "Explicit")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgTodoItemRepository::new(db.clone());

        let input = CreateTodoItem {
            id: Some(10),
            ..CreateTodoItem::new("Explicit", None)
        };
        assert_eq!(repo.insert(input).await.unwrap().id, 10);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("setval"));
        assert!(log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_insert_with_explicit_id_rolls_back_when_sequence_sync_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(10, "Explicit")]])
            .append_exec_errors([DbErr::Custom("setval failed".to_string())])
            .into_connection();
        let repo = PgTodoItemRepository::new(db.clone());

        let input = CreateTodoItem {
            id: Some(10),
            ..CreateTodoItem::new("Explicit", None)
        };
        let result = repo.insert(input).await;

        assert!(matches!(result, Err(TodoItemError::Database(_))));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_update_with_no_matching_row_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        let result = repo.update(model(7, "Gone").into()).await;

        assert!(matches!(result, Err(TodoItemError::Conflict(7))));
    }

    #[tokio::test]
    async fn test_update_returns_stored_row() {
        let mut updated = model(3, "Renamed");
        updated.is_complete = true;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![updated.clone()]])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        let item = repo.update(updated.into()).await.unwrap();

        assert_eq!(item.id, 3);
        assert!(item.is_complete);
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        assert!(repo.delete(4).await.unwrap());
        assert!(!repo.delete(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_connection_error_propagates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgTodoItemRepository::new(db);

        assert!(matches!(repo.list().await, Err(TodoItemError::Database(_))));
    }
}
