//! Users service
//!
//! Account creation and login. Failures are logged and collapsed to `None`.

use crate::crypto;
use crate::database::{Repository, User};
use crate::error::Result;

/// Service for managing user accounts
#[derive(Clone)]
pub struct UsersService {
    repo: Repository,
}

impl UsersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Register a new account.
    ///
    /// Returns `None` when the name or email is blank, the email is already
    /// taken, or the store fails.
    pub async fn create_user(&self, full_name: &str, email: &str, password: &str) -> Option<User> {
        if full_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            tracing::warn!("Rejected signup with missing fields");
            return None;
        }

        match self.try_create_user(full_name, email, password).await {
            Ok(Some(user)) => {
                tracing::info!("User created successfully: {}", user.id);
                Some(user)
            }
            Ok(None) => {
                tracing::warn!("Signup rejected, email already registered: {}", email);
                None
            }
            Err(e) => {
                tracing::error!("Failed to create user {}: {}", email, e);
                None
            }
        }
    }

    async fn try_create_user(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        // Skip hashing for a taken email; the unique index still decides races
        if self.repo.count_users_with_email(email).await? > 0 {
            return Ok(None);
        }

        let password_hash = crypto::hash_password_blocking(password).await?;
        self.repo
            .create_user(full_name, email, &password_hash)
            .await
            .map(Some)
    }

    /// Check credentials and return the matching account
    pub async fn login_user(&self, email: &str, password: &str) -> Option<User> {
        match self.try_login(email, password).await {
            Ok(Some(user)) => {
                tracing::info!("User logged in: {}", user.id);
                Some(user)
            }
            Ok(None) => {
                tracing::warn!("Login failed for {}", email);
                None
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {}", email, e);
                None
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(credentials) = self.repo.find_credentials(email).await? else {
            return Ok(None);
        };

        if !crypto::verify_password_blocking(password, &credentials.password_hash).await? {
            return Ok(None);
        }

        self.repo.get_user(credentials.id).await.map(Some)
    }
}
