//! Account commands
//!
//! Signup and login forms, with the same validation the screens apply.

use crate::app::AppState;
use crate::config;
use crate::database::User;
use crate::error::{AppError, Result};

/// Register and log in a new user
pub async fn signup(
    state: &AppState,
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<User> {
    let full_name = full_name.trim();
    let email = email.trim();

    if full_name.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty()
    {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    if !email.contains('@') {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    if password.chars().count() < config::MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            config::MIN_PASSWORD_LENGTH
        )));
    }

    let user = state
        .users_service
        .create_user(full_name, email, password)
        .await
        .ok_or_else(|| AppError::Generic("Email already exists or signup failed".to_string()))?;

    state.login(user.clone()).await?;
    Ok(user)
}

/// Log in with email and password
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<User> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    let user = state
        .users_service
        .login_user(email, password)
        .await
        .ok_or_else(|| AppError::Generic("Invalid email or password".to_string()))?;

    state.login(user.clone()).await?;
    Ok(user)
}

pub async fn logout(state: &AppState) -> Result<()> {
    state.logout().await
}

pub async fn current_user(state: &AppState) -> Result<Option<User>> {
    Ok(state.current_user().await)
}
