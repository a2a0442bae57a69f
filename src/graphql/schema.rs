use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, Schema};

use super::{MutationRoot, QueryRoot};
use crate::auth::AuthContext;
use crate::error::AppError;
use crate::services::Services;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with `services` available to every resolver.
///
/// The caller's `AuthContext`, when present, is attached per request.
pub fn build_schema(services: Services) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> Error {
        Error::new(self.public_message()).extend_with(|_, extensions| {
            extensions.set("code", self.code().to_string());
        })
    }
}

pub(crate) fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Services> {
    ctx.data::<Services>()
}

/// The caller's identity, or `Unauthenticated` for anonymous requests.
pub(crate) fn require_auth<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AuthContext> {
    ctx.data_opt::<AuthContext>()
        .ok_or_else(|| AppError::Unauthenticated.extend())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{caller, services};
    use async_graphql::{Request, Variables};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    async fn run(schema: &AppSchema, auth: Option<&AuthContext>, query: &str, vars: Value) -> Value {
        let mut request = Request::new(query).variables(Variables::from_json(vars));
        if let Some(auth) = auth {
            request = request.data(auth.clone());
        }
        serde_json::to_value(schema.execute(request).await).unwrap()
    }

    #[actix_rt::test]
    async fn test_queries_require_authentication() {
        let schema = build_schema(services());

        let response = run(&schema, None, "{ obtenerProyectos { id } }", json!({})).await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");

        let response = run(
            &schema,
            None,
            "mutation { nuevoProyecto(input: { nombre: \"x\" }) { id } }",
            json!({}),
        )
        .await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
    }

    #[actix_rt::test]
    async fn test_duplicate_user_error_code() {
        let schema = build_schema(services());
        let query = "mutation($input: UsuarioInput!) { crearUsuario(input: $input) }";
        let vars = json!({
            "input": { "nombre": "Ana", "email": "ana@example.com", "password": "secreto123" }
        });

        let first = run(&schema, None, query, vars.clone()).await;
        assert_eq!(first["data"]["crearUsuario"], "Usuario creado correctamente");

        let second = run(&schema, None, query, vars).await;
        assert_eq!(second["errors"][0]["extensions"]["code"], "DUPLICATE_USER");
        assert_eq!(second["errors"][0]["message"], "user is already registered");
    }

    #[actix_rt::test]
    async fn test_project_crud_through_schema() {
        let schema = build_schema(services());
        let owner = caller();

        let created = run(
            &schema,
            Some(&owner),
            "mutation { nuevoProyecto(input: { nombre: \"Tienda\" }) { id nombre creador } }",
            json!({}),
        )
        .await;
        let project = &created["data"]["nuevoProyecto"];
        assert_eq!(project["nombre"], "Tienda");
        assert_eq!(project["creador"], owner.id.to_string());
        let id = project["id"].clone();

        let renamed = run(
            &schema,
            Some(&owner),
            "mutation($id: UUID!) { actualizarProyecto(id: $id, input: { nombre: \"Tienda online\" }) { nombre } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(renamed["data"]["actualizarProyecto"]["nombre"], "Tienda online");

        let foreign = run(
            &schema,
            Some(&caller()),
            "mutation($id: UUID!) { eliminarProyecto(id: $id) }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(foreign["errors"][0]["extensions"]["code"], "FORBIDDEN");

        let deleted = run(
            &schema,
            Some(&owner),
            "mutation($id: UUID!) { eliminarProyecto(id: $id) }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(deleted["data"]["eliminarProyecto"], "Proyecto eliminado con éxito");

        let listed = run(&schema, Some(&owner), "{ obtenerProyectos { id } }", json!({})).await;
        assert_eq!(listed["data"]["obtenerProyectos"], json!([]));
    }

    #[actix_rt::test]
    async fn test_update_task_without_state_resets_it() {
        let schema = build_schema(services());
        let owner = caller();
        let project = uuid::Uuid::new_v4();

        let created = run(
            &schema,
            Some(&owner),
            "mutation($p: UUID!) { nuevaTarea(input: { nombre: \"Logo\", proyecto: $p }) { id estado } }",
            json!({ "p": project }),
        )
        .await;
        assert_eq!(created["data"]["nuevaTarea"]["estado"], false);
        let id = created["data"]["nuevaTarea"]["id"].clone();

        let done = run(
            &schema,
            Some(&owner),
            "mutation($id: UUID!) { actualizarTarea(id: $id, estado: true) { estado nombre } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(done["data"]["actualizarTarea"]["estado"], true);
        assert_eq!(done["data"]["actualizarTarea"]["nombre"], "Logo");

        let renamed = run(
            &schema,
            Some(&owner),
            "mutation($id: UUID!) { actualizarTarea(id: $id, input: { nombre: \"Logo v2\" }) { estado nombre } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(renamed["data"]["actualizarTarea"]["estado"], false);
        assert_eq!(renamed["data"]["actualizarTarea"]["nombre"], "Logo v2");
    }

    #[actix_rt::test]
    async fn test_missing_task_reports_not_found() {
        let schema = build_schema(services());
        let response = run(
            &schema,
            Some(&caller()),
            "mutation($id: UUID!) { eliminarTarea(id: $id) }",
            json!({ "id": uuid::Uuid::new_v4() }),
        )
        .await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");
        assert_eq!(response["errors"][0]["message"], "task not found");
    }
}
