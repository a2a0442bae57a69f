use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{authorize, log_write_failure};
use crate::auth::AuthContext;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskUpdate};
use crate::store::Store;

/// Confirmation returned by `eliminarTarea`.
pub const TASK_DELETED: &str = "Tarea eliminada con éxito";

const ENTITY: &str = "task";

/// CRUD over tasks, scoped to their creator and project.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Tasks created by the caller inside `project`.
    pub async fn list(&self, caller: &AuthContext, project: Uuid) -> Result<Vec<Task>, AppError> {
        self.store.list_tasks(caller.id, project).await
    }

    /// Stores a new pending task owned by the caller.
    ///
    /// The project reference is taken from the input as-is.
    pub async fn create(&self, input: NewTask, caller: &AuthContext) -> Result<Task, AppError> {
        input.validate()?;
        let task = Task::new(input, caller.id);
        self.store
            .insert_task(task)
            .await
            .inspect_err(|err| log_write_failure("create task", err))
    }

    /// Merges `changes` and overwrites the task state with `state`.
    ///
    /// A missing `state` resets the task to pending.
    pub async fn update(
        &self,
        id: Uuid,
        changes: TaskUpdate,
        state: Option<bool>,
        caller: &AuthContext,
    ) -> Result<Task, AppError> {
        authorize(self.store.find_task(id).await?, ENTITY, caller)?;
        changes.validate()?;

        self.store
            .update_task(id, &changes, state.unwrap_or(false))
            .await
            .inspect_err(|err| log_write_failure("update task", err))?
            .ok_or(AppError::NotFound(ENTITY))
    }

    /// Removes a task and returns a confirmation message.
    pub async fn delete(&self, id: Uuid, caller: &AuthContext) -> Result<String, AppError> {
        authorize(self.store.find_task(id).await?, ENTITY, caller)?;

        let removed = self
            .store
            .delete_task(id)
            .await
            .inspect_err(|err| log_write_failure("delete task", err))?;
        if !removed {
            return Err(AppError::NotFound(ENTITY));
        }
        Ok(TASK_DELETED.to_string())
    }
}
