use async_graphql::{Context, ErrorExtensions, Object, Result};
use uuid::Uuid;

use super::schema::{require_auth, services};
use crate::models::{
    AuthToken, Credentials, NewProject, NewTask, NewUser, Project, ProjectUpdate, Task,
    TaskUpdate,
};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[graphql(name = "crearUsuario")]
    async fn register(&self, ctx: &Context<'_>, input: NewUser) -> Result<String> {
        services(ctx)?
            .users
            .register(input)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "autenticarUsuario")]
    async fn authenticate(&self, ctx: &Context<'_>, input: Credentials) -> Result<AuthToken> {
        services(ctx)?
            .users
            .authenticate(input)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "nuevoProyecto")]
    async fn create_project(&self, ctx: &Context<'_>, input: NewProject) -> Result<Project> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .projects
            .create(input, caller)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "actualizarProyecto")]
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: ProjectUpdate,
    ) -> Result<Project> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .projects
            .update(id, input, caller)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "eliminarProyecto")]
    async fn delete_project(&self, ctx: &Context<'_>, id: Uuid) -> Result<String> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .projects
            .delete(id, caller)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "nuevaTarea")]
    async fn create_task(&self, ctx: &Context<'_>, input: NewTask) -> Result<Task> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .tasks
            .create(input, caller)
            .await
            .map_err(|e| e.extend())
    }

    /// `estado` always replaces the stored state; omitting it marks the task pending.
    #[graphql(name = "actualizarTarea")]
    async fn update_task(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        #[graphql(default)] input: TaskUpdate,
        #[graphql(name = "estado")] state: Option<bool>,
    ) -> Result<Task> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .tasks
            .update(id, input, state, caller)
            .await
            .map_err(|e| e.extend())
    }

    #[graphql(name = "eliminarTarea")]
    async fn delete_task(&self, ctx: &Context<'_>, id: Uuid) -> Result<String> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .tasks
            .delete(id, caller)
            .await
            .map_err(|e| e.extend())
    }
}
