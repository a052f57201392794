use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A todo item as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Server-assigned identifier; a missing id in a PUT body reads as 0
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}

/// Body of `POST /items`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItem {
    /// Honored when positive, otherwise the store assigns one
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}

impl CreateTodoItem {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
            ..Self::default()
        }
    }

    /// The record this input becomes once the store has picked `id`
    pub fn into_item(self, id: i64) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            description: self.description,
            is_complete: self.is_complete,
        }
    }
}
