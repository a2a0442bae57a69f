use async_graphql::{Context, ErrorExtensions, Object, Result};
use uuid::Uuid;

use super::schema::{require_auth, services};
use crate::models::{Project, Task};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Projects created by the authenticated user.
    #[graphql(name = "obtenerProyectos")]
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .projects
            .list(caller)
            .await
            .map_err(|e| e.extend())
    }

    /// Tasks of one project created by the authenticated user.
    #[graphql(name = "obtenerTareas")]
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "proyecto")] project: Uuid,
    ) -> Result<Vec<Task>> {
        let caller = require_auth(ctx)?;
        services(ctx)?
            .tasks
            .list(caller, project)
            .await
            .map_err(|e| e.extend())
    }
}
