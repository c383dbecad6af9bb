//! Aquarium commands

use super::require_user;
use crate::app::AppState;
use crate::database::Aquarium;
use crate::error::{AppError, Result};

/// Save a new aquarium for the logged-in user
pub async fn add_aquarium(
    state: &AppState,
    name: &str,
    height: f64,
    width: f64,
    length: f64,
    fish_count: i64,
) -> Result<Aquarium> {
    let user = require_user(state).await?;

    if name.trim().is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    if [height, width, length].iter().any(|d| !d.is_finite() || *d <= 0.0) || fish_count <= 0 {
        return Err(AppError::Validation("Please enter valid numbers".to_string()));
    }

    state
        .aquariums_service
        .create_aquarium(user.id, name, height, width, length, fish_count)
        .await
        .ok_or_else(|| AppError::Generic("Failed to save aquarium".to_string()))
}

pub async fn list_aquariums(state: &AppState) -> Result<Vec<Aquarium>> {
    let user = require_user(state).await?;
    Ok(state.aquariums_service.get_user_aquariums(user.id).await)
}
