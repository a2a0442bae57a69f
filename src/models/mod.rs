pub mod project;
pub mod task;
pub mod user;

use uuid::Uuid;

pub use project::{NewProject, Project, ProjectUpdate};
pub use task::{NewTask, Task, TaskUpdate};
pub use user::{AuthToken, Credentials, NewUser, User};

/// Entities that record the user who created them.
///
/// Only the creator may mutate or delete an `Owned` entity; see
/// [`crate::auth::ensure_owner`].
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}
