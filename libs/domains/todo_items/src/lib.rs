//! Todo Items Domain
//!
//! CRUD over a single `TodoItem` record type.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /items routes, status-code mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← existence checks, conflict resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← TodoItem, CreateTodoItem
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todo_items::{
//!     handlers,
//!     repository::InMemoryTodoItemRepository,
//!     service::TodoItemService,
//! };
//!
//! let repository = InMemoryTodoItemRepository::new();
//! let service = TodoItemService::new(repository);
//!
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TodoItemError, TodoItemResult};
pub use models::{CreateTodoItem, TodoItem};
pub use postgres::PgTodoItemRepository;
pub use repository::{InMemoryTodoItemRepository, TodoItemRepository};
pub use service::TodoItemService;
