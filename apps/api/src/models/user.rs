use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub msg_id: Option<String>,
    pub role: Option<String>,
    /// Argon2id PHC string of the password. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub client_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub msg_id: Option<String>,
    pub role: Option<String>,
    /// Plain text on the way in; hashed before it reaches the database.
    pub password: String,
    pub client_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub msg_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<i32>>,
}

/// Argon2id with a fresh random salt; the salt travels inside the PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

impl NewUser {
    pub fn password_hash(&self) -> Result<String, AppError> {
        hash_password(&self.password)
    }
}

impl UserRow {
    pub fn merged(mut self, patch: UserPatch) -> Result<Self, AppError> {
        let password = patch.password.as_deref().map(hash_password).transpose()?;
        apply(&mut self.name, patch.name);
        apply(&mut self.email, patch.email);
        apply(&mut self.msg_id, patch.msg_id);
        apply(&mut self.role, patch.role);
        apply(&mut self.password, password);
        apply(&mut self.client_id, patch.client_id);
        Ok(self)
    }
}
