use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::Owned;

/// Represents a task entity as stored in the database and returned by the API (`Tarea`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, SimpleObject)]
#[graphql(name = "Tarea")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The name of the task.
    #[graphql(name = "nombre")]
    pub name: String,
    /// Completion flag. New tasks start out pending (`false`).
    #[graphql(name = "estado")]
    pub state: bool,
    /// Project the task belongs to.
    #[graphql(name = "proyecto")]
    pub project: Uuid,
    /// Identifier of the user who created the task.
    #[graphql(name = "creador")]
    pub creator: Uuid,
    /// Timestamp of when the task was created.
    #[graphql(name = "creado")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending `Task` from `NewTask` and the creator's id.
    pub fn new(input: NewTask, creator: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            state: false,
            project: input.project,
            creator,
            created_at: Utc::now(),
        }
    }
}

impl Owned for Task {
    fn owner_id(&self) -> Uuid {
        self.creator
    }
}

/// Input structure for creating a task (`nuevaTarea`).
#[derive(Debug, Clone, InputObject, Validate)]
#[graphql(name = "TareaInput")]
pub struct NewTask {
    /// Must be between 1 and 200 characters.
    #[graphql(name = "nombre")]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[graphql(name = "proyecto")]
    pub project: Uuid,
}

/// Partial input for `actualizarTarea`. The state travels separately.
#[derive(Debug, Clone, Default, InputObject, Validate)]
#[graphql(name = "TareaUpdateInput")]
pub struct TaskUpdate {
    #[graphql(name = "nombre")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[graphql(name = "proyecto")]
    pub project: Option<Uuid>,
}

impl TaskUpdate {
    /// Merges the present fields into `task` and overwrites its state.
    pub fn apply(&self, task: &mut Task, state: bool) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(project) = self.project {
            task.project = project;
        }
        task.state = state;
    }
}
