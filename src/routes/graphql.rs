use actix_web::{get, post, web, HttpResponse, Responder};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::auth::MaybeAuthenticated;
use crate::graphql::AppSchema;

/// Executes a GraphQL operation.
///
/// The caller's identity, resolved by `AuthMiddleware`, is attached to the
/// request data so resolvers can require it.
#[post("/graphql")]
pub async fn execute(
    schema: web::Data<AppSchema>,
    auth: MaybeAuthenticated,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(context) = auth.0 {
        request = request.data(context);
    }
    schema.execute(request).await.into()
}

/// Serves the GraphiQL explorer.
#[get("/graphql")]
pub async fn graphiql() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
