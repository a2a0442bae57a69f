use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A registered account. Never exposed through the API; `password` holds the
/// bcrypt hash, not the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a user record from registration input and an already hashed password.
    pub fn new(input: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password: password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Registration payload (`crearUsuario`).
#[derive(Debug, Clone, InputObject, Validate)]
#[graphql(name = "UsuarioInput")]
pub struct NewUser {
    #[graphql(name = "nombre")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Login payload (`autenticarUsuario`).
///
/// Not validated: any email/password pair that does not match a stored user
/// fails with `UserNotFound` or `InvalidCredentials`.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "AutenticarInput")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Result of a successful `autenticarUsuario`.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "Token")]
pub struct AuthToken {
    pub token: String,
}
