use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, user::User};
use crate::infrastructure::security::{SessionKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService<R: UserRepository + 'static> {
    repo: Arc<R>,
    keys: SessionKeys,
}

impl<R> AuthService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>, keys: SessionKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    /// Creates an account. The phone number doubles as the login
    /// identifier, so duplicates are rejected before anything is written;
    /// the UNIQUE constraint backs this up under concurrent signups.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        phone: String,
        email: String,
        password: String,
    ) -> Result<User, DomainError> {
        let phone = phone.trim().to_owned();
        if phone.is_empty() {
            return Err(DomainError::MissingField("phone"));
        }
        if password.is_empty() {
            return Err(DomainError::MissingField("password"));
        }

        if self.repo.find_by_phone(&phone).await?.is_some() {
            return Err(DomainError::DuplicatePhone);
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = User::new(name.trim().to_owned(), phone, email.trim().to_lowercase(), hash);
        self.repo.create(user).await
    }

    /// Verifies the credentials and issues a signed session token. A
    /// missing user and a wrong password are indistinguishable to the
    /// caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, phone: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .repo
            .find_by_phone(phone.trim())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        self.keys
            .issue(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }
}
