use crate::error::AppError;
use bcrypt::{hash, verify};

/// Cost factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Salted one-way hashing for stored passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Checks `password` against a stored hash using bcrypt's own comparison.
    pub fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AppError> {
        verify(password, hashed_password)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }
}
