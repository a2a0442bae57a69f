use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test;
use chrono::Duration;
use serde_json::{json, Value};
use uptask::auth::{PasswordHasher, TokenIssuer};
use uptask::graphql::{build_schema, AppSchema};
use uptask::store::MemoryStore;
use uptask::Services;

pub const SECRET: &str = "integration-secret";

pub fn tokens() -> TokenIssuer {
    TokenIssuer::new(SECRET, Duration::hours(12))
}

/// Schema over a fresh in-memory store with a cheap bcrypt cost.
pub fn schema() -> AppSchema {
    build_schema(Services::new(
        Arc::new(MemoryStore::new()),
        PasswordHasher::new(4),
        tokens(),
    ))
}

pub fn graphql_request(token: Option<&str>, query: &str, variables: Value) -> actix_http::Request {
    let mut req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": query, "variables": variables }));
    if let Some(token) = token {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
    }
    req.to_request()
}

/// Posts a GraphQL operation and returns the JSON response body.
pub async fn graphql<S, B>(app: &S, token: Option<&str>, query: &str, variables: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, graphql_request(token, query, variables)).await;
    assert!(resp.status().is_success(), "status: {}", resp.status());
    test::read_body_json(resp).await
}

/// Registers a user and logs them in, returning the access token.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let registered = graphql(
        app,
        None,
        "mutation($input: UsuarioInput!) { crearUsuario(input: $input) }",
        json!({ "input": { "nombre": "Integration", "email": email, "password": password } }),
    )
    .await;
    assert_eq!(registered["data"]["crearUsuario"], "Usuario creado correctamente");

    let login = graphql(
        app,
        None,
        "mutation($input: AutenticarInput!) { autenticarUsuario(input: $input) { token } }",
        json!({ "input": { "email": email, "password": password } }),
    )
    .await;
    login["data"]["autenticarUsuario"]["token"]
        .as_str()
        .expect("login should return a token")
        .to_string()
}
