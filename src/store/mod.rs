//! Persistence boundary.
//!
//! Services talk to storage only through the [`Store`] trait. Two backends ship
//! with the crate: [`MemoryStore`] for tests and local runs without a database,
//! and [`PgStore`] for PostgreSQL.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, AppError>;

/// Document-style access to users, projects and tasks.
///
/// Listing returns records in insertion order. `update_*` apply a partial merge
/// and return the post-update record, or `None` when the id does not resolve.
/// `delete_*` return whether a record was removed.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Fails with `DuplicateUser` if the email is already taken.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    async fn list_projects(&self, creator: Uuid) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>>;
    async fn insert_project(&self, project: Project) -> StoreResult<Project>;
    async fn update_project(
        &self,
        id: Uuid,
        changes: &ProjectUpdate,
    ) -> StoreResult<Option<Project>>;
    async fn delete_project(&self, id: Uuid) -> StoreResult<bool>;

    async fn list_tasks(&self, creator: Uuid, project: Uuid) -> StoreResult<Vec<Task>>;
    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;
    async fn insert_task(&self, task: Task) -> StoreResult<Task>;
    async fn update_task(
        &self,
        id: Uuid,
        changes: &TaskUpdate,
        state: bool,
    ) -> StoreResult<Option<Task>>;
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;
}

/// Opens the backend selected by configuration: PostgreSQL when a database URL
/// is configured, otherwise an empty in-memory store.
pub async fn open(database_url: Option<&str>) -> StoreResult<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match database_url {
        Some(url) => Arc::new(PgStore::connect(url).await?),
        None => {
            log::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
