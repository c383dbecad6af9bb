//! Notification inbox commands

use super::require_user;
use crate::app::AppState;
use crate::database::Notification;
use crate::error::{AppError, Result};
use serde::Serialize;

/// Notifications plus the unread badge count
#[derive(Debug, Serialize)]
pub struct Inbox {
    pub unread: i64,
    pub notifications: Vec<Notification>,
}

pub async fn list_notifications(state: &AppState) -> Result<Inbox> {
    let user = require_user(state).await?;

    Ok(Inbox {
        unread: state.notifications_service.unread_count(user.id).await,
        notifications: state
            .notifications_service
            .get_user_notifications(user.id)
            .await,
    })
}

/// Mark one of the logged-in user's notifications as read
pub async fn mark_notification_read(state: &AppState, notification_id: i64) -> Result<()> {
    let user = require_user(state).await?;

    let owned = state
        .notifications_service
        .get_user_notifications(user.id)
        .await
        .iter()
        .any(|n| n.id == notification_id);

    if !owned || !state.notifications_service.mark_as_read(notification_id).await {
        return Err(AppError::NotFound(format!("notification {}", notification_id)));
    }

    Ok(())
}
