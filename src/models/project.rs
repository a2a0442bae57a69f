use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::Owned;

/// A project as stored and returned by the API (`Proyecto`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, SimpleObject)]
#[graphql(name = "Proyecto")]
pub struct Project {
    pub id: Uuid,
    #[graphql(name = "nombre")]
    pub name: String,
    /// Identifier of the user who created the project.
    #[graphql(name = "creador")]
    pub creator: Uuid,
    #[graphql(name = "creado")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project owned by `creator`.
    pub fn new(input: NewProject, creator: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            creator,
            created_at: Utc::now(),
        }
    }
}

impl Owned for Project {
    fn owner_id(&self) -> Uuid {
        self.creator
    }
}

/// Input for `nuevoProyecto`.
#[derive(Debug, Clone, InputObject, Validate)]
#[graphql(name = "ProyectoInput")]
pub struct NewProject {
    #[graphql(name = "nombre")]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Partial input for `actualizarProyecto`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, InputObject, Validate)]
#[graphql(name = "ProyectoUpdateInput")]
pub struct ProjectUpdate {
    #[graphql(name = "nombre")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

impl ProjectUpdate {
    /// Merges the present fields into `project`.
    pub fn apply(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
    }
}
