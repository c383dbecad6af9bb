//! Commands exposed to the front end
//!
//! All commands follow the pattern:
//! - Take AppState as first parameter
//! - Return Result<T, AppError> whose error is a one-line user-facing message
//! - Are async when performing I/O
//!
//! Submodules:
//! - `account`: signup, login, logout
//! - `aquariums`: aquarium records
//! - `monitoring`: water quality, fish analysis and reports
//! - `notifications`: notification inbox

pub mod account;
pub mod aquariums;
pub mod monitoring;
pub mod notifications;

pub use account::*;
pub use aquariums::*;
pub use monitoring::*;
pub use notifications::*;

use crate::app::AppState;
use crate::database::User;
use crate::error::{AppError, Result};

/// The logged-in user, or [`AppError::NotLoggedIn`]
pub(crate) async fn require_user(state: &AppState) -> Result<User> {
    state.current_user().await.ok_or(AppError::NotLoggedIn)
}
