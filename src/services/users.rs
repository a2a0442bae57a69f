use std::sync::Arc;

use validator::Validate;

use super::log_write_failure;
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::error::AppError;
use crate::models::{AuthToken, Credentials, NewUser, User};
use crate::store::Store;

/// Confirmation returned by `crearUsuario`.
pub const USER_CREATED: &str = "Usuario creado correctamente";

/// Registration and authentication.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Registers a new user and returns a confirmation message.
    ///
    /// Fails with `DuplicateUser` when the email is already registered.
    pub async fn register(&self, input: NewUser) -> Result<String, AppError> {
        input.validate()?;

        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(AppError::DuplicateUser);
        }

        let password_hash = self.hash_password(input.password.clone()).await?;
        let user = User::new(input, password_hash);
        let id = user.id;

        self.store
            .insert_user(user)
            .await
            .inspect_err(|err| log_write_failure("register user", err))?;

        log::info!("registered user {}", id);
        Ok(USER_CREATED.to_string())
    }

    /// Checks the credentials and issues an access token.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<AuthToken, AppError> {
        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let hasher = self.hasher;
        let stored_hash = user.password.clone();
        let matches = tokio::task::spawn_blocking(move || {
            hasher.verify(&credentials.password, &stored_hash)
        })
        .await
        .map_err(|e| AppError::Internal(format!("password verification task failed: {}", e)))??;

        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        log::info!("user {} authenticated", user.id);
        Ok(AuthToken { token })
    }

    // bcrypt is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
    }
}
