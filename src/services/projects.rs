use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{authorize, log_write_failure};
use crate::auth::AuthContext;
use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectUpdate};
use crate::store::Store;

/// Confirmation returned by `eliminarProyecto`.
pub const PROJECT_DELETED: &str = "Proyecto eliminado con éxito";

const ENTITY: &str = "project";

/// CRUD over projects, scoped to their creator.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All projects created by the caller, in insertion order.
    pub async fn list(&self, caller: &AuthContext) -> Result<Vec<Project>, AppError> {
        self.store.list_projects(caller.id).await
    }

    /// Stores a new project owned by the caller and returns the stored record.
    pub async fn create(
        &self,
        input: NewProject,
        caller: &AuthContext,
    ) -> Result<Project, AppError> {
        input.validate()?;
        let project = Project::new(input, caller.id);
        self.store
            .insert_project(project)
            .await
            .inspect_err(|err| log_write_failure("create project", err))
    }

    /// Applies a partial update and returns the post-update record.
    pub async fn update(
        &self,
        id: Uuid,
        changes: ProjectUpdate,
        caller: &AuthContext,
    ) -> Result<Project, AppError> {
        authorize(self.store.find_project(id).await?, ENTITY, caller)?;
        changes.validate()?;

        self.store
            .update_project(id, &changes)
            .await
            .inspect_err(|err| log_write_failure("update project", err))?
            .ok_or(AppError::NotFound(ENTITY))
    }

    /// Removes a project and returns a confirmation message.
    pub async fn delete(&self, id: Uuid, caller: &AuthContext) -> Result<String, AppError> {
        authorize(self.store.find_project(id).await?, ENTITY, caller)?;

        let removed = self
            .store
            .delete_project(id)
            .await
            .inspect_err(|err| log_write_failure("delete project", err))?;
        if !removed {
            return Err(AppError::NotFound(ENTITY));
        }
        Ok(PROJECT_DELETED.to_string())
    }
}
