//! GraphQL schema and resolvers.
//!
//! - `query`: `obtenerProyectos`, `obtenerTareas`
//! - `mutation`: user registration/authentication and project/task CRUD
//! - `schema`: schema construction and the shared resolver helpers

pub mod mutation;
pub mod query;
pub mod schema;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use schema::{build_schema, AppSchema};
