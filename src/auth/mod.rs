pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Owned;

pub use extractors::MaybeAuthenticated;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenIssuer};

/// Identity of the caller, decoded from a verified access token.
///
/// Built per request by [`AuthMiddleware`] and passed explicitly to every
/// service call that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Rejects the operation unless `caller` created `entity`.
pub fn ensure_owner<T: Owned>(entity: &T, caller: &AuthContext) -> Result<(), AppError> {
    if entity.owner_id() == caller.id {
        Ok(())
    } else {
        log::warn!(
            "user {} attempted to modify an entity owned by {}",
            caller.id,
            entity.owner_id()
        );
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProject, Project};

    fn context(id: Uuid) -> AuthContext {
        AuthContext {
            id,
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
        }
    }

    #[test]
    fn test_owner_passes() {
        let owner = Uuid::new_v4();
        let project = Project::new(
            NewProject {
                name: "Mine".to_string(),
            },
            owner,
        );
        assert!(ensure_owner(&project, &context(owner)).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let project = Project::new(
            NewProject {
                name: "Theirs".to_string(),
            },
            Uuid::new_v4(),
        );
        assert!(matches!(
            ensure_owner(&project, &context(Uuid::new_v4())),
            Err(AppError::Forbidden)
        ));
    }
}
