//! Use-case services behind the GraphQL resolvers.
//!
//! Every operation on an existing project or task first resolves the entity
//! (`NotFound` if absent), then checks ownership (`Forbidden`), and only then
//! validates input and touches storage. The caller's identity is always an
//! explicit `&AuthContext` argument.

pub mod projects;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use crate::auth::{ensure_owner, AuthContext, PasswordHasher, TokenIssuer};
use crate::error::AppError;
use crate::models::Owned;
use crate::store::Store;

pub use projects::ProjectService;
pub use tasks::TaskService;
pub use users::UserService;

/// All services sharing one store. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users: UserService::new(Arc::clone(&store), hasher, tokens),
            projects: ProjectService::new(Arc::clone(&store)),
            tasks: TaskService::new(store),
        }
    }
}

/// Resolves a looked-up entity and checks that `caller` owns it.
pub(crate) fn authorize<T: Owned>(
    found: Option<T>,
    entity: &'static str,
    caller: &AuthContext,
) -> Result<T, AppError> {
    let entity = found.ok_or(AppError::NotFound(entity))?;
    ensure_owner(&entity, caller)?;
    Ok(entity)
}

/// Logs a failed write before handing the error back to the caller.
pub(crate) fn log_write_failure(action: &str, err: &AppError) {
    match err {
        AppError::Persistence(details) => log::error!("failed to {}: {}", action, details),
        other => log::debug!("{} rejected: {}", action, other),
    }
}
