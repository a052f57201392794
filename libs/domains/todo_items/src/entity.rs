use crate::models::{CreateTodoItem, TodoItem};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the todo_items table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_complete: bool,
}

impl Model {
    /// OpenAPI tag shared by every todo item route
    pub const TAG: &'static str = "TodoItems";
    /// Collection route; single items live at `{URL}/{id}`
    pub const URL: &'static str = "/items";
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TodoItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_complete: model.is_complete,
        }
    }
}

// Only a positive client-supplied id is written; otherwise BIGSERIAL assigns one.
impl From<CreateTodoItem> for ActiveModel {
    fn from(input: CreateTodoItem) -> Self {
        ActiveModel {
            id: match input.id {
                Some(id) if id > 0 => Set(id),
                _ => NotSet,
            },
            title: Set(input.title),
            description: Set(input.description),
            is_complete: Set(input.is_complete),
        }
    }
}

/// Full replacement of every mutable column, keyed on the unchanged id
impl From<TodoItem> for ActiveModel {
    fn from(item: TodoItem) -> Self {
        ActiveModel {
            id: Unchanged(item.id),
            title: Set(item.title),
            description: Set(item.description),
            is_complete: Set(item.is_complete),
        }
    }
}
