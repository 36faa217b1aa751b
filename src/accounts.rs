//! Persistent user accounts: registration and credential checks.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use thiserror::Error;
use tokio::task;

use crate::entities::users;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdentityField {
    Username,
    Email,
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityField::Username => {
                f.write_str("Username already exists. Please choose a different one.")
            },
            IdentityField::Email => f.write_str("Email address is already registered."),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    DuplicateIdentity(IdentityField),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username, email and password are all required.")]
    MissingField,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AccountError {
    /// Faults the user can fix by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AccountError::DuplicateIdentity(_)
                | AccountError::InvalidCredentials
                | AccountError::MissingField
        )
    }
}

/// Account record without the password hash.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: i64,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingField);
        }

        if self.find_by(users::Column::Username, username).await?.is_some() {
            return Err(AccountError::DuplicateIdentity(IdentityField::Username));
        }
        if self.find_by(users::Column::Email, email).await?.is_some() {
            return Err(AccountError::DuplicateIdentity(IdentityField::Email));
        }

        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))??;

        let model = users::ActiveModel {
            id: Default::default(),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(jiff::Timestamp::now().as_second()),
        };

        // The unique indexes still guard against a concurrent registration.
        let user = model.insert(&self.db).await.map_err(classify_insert_error)?;

        tracing::info!(user_id = user.id, username = %user.username, "registered account");
        Ok(user.into())
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let Some(user) = self.find_by(users::Column::Username, username.trim()).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))??;

        if !is_valid {
            tracing::debug!(username = %user.username, "password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user.into())
    }

    async fn find_by(
        &self,
        column: users::Column,
        value: &str,
    ) -> Result<Option<users::Model>, AccountError> {
        Ok(users::Entity::find().filter(column.eq(value)).one(&self.db).await?)
    }
}

fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AccountError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool, AccountError> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| AccountError::Hashing(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

fn classify_insert_error(err: DbErr) -> AccountError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AccountError::DuplicateIdentity(IdentityField::Email)
        },
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AccountError::DuplicateIdentity(IdentityField::Username)
        },
        _ => AccountError::Database(err),
    }
}
