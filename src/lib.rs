#![doc = "The `uptask` library crate."]
#![doc = ""]
#![doc = "GraphQL backend for a project/task manager: user registration and"]
#![doc = "authentication, plus project and task CRUD scoped to the authenticated user."]
#![doc = "The binary (`main.rs`) wires these modules into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::error::AppError;
pub use crate::services::Services;
