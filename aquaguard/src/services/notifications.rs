//! Notifications service

use crate::database::{Notification, NotificationType, Repository};

/// Service for user notifications
#[derive(Clone)]
pub struct NotificationsService {
    repo: Repository,
}

impl NotificationsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create an unread notification
    pub async fn create_notification(
        &self,
        user_id: i64,
        message: &str,
        kind: NotificationType,
    ) -> Option<Notification> {
        match self.repo.create_notification(user_id, message, kind).await {
            Ok(notification) => Some(notification),
            Err(e) => {
                tracing::error!("Failed to create notification for user {}: {}", user_id, e);
                None
            }
        }
    }

    /// A user's notifications, newest first
    pub async fn get_user_notifications(&self, user_id: i64) -> Vec<Notification> {
        self.repo.list_notifications(user_id).await.unwrap_or_else(|e| {
            tracing::error!("Failed to get notifications for user {}: {}", user_id, e);
            Vec::new()
        })
    }

    /// Mark a notification as read. Marking it again is a successful no-op.
    pub async fn mark_as_read(&self, notification_id: i64) -> bool {
        match self.repo.mark_notification_read(notification_id).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("Notification not found: {}", notification_id);
                false
            }
            Err(e) => {
                tracing::error!("Failed to mark notification {} as read: {}", notification_id, e);
                false
            }
        }
    }

    /// Number of unread notifications, 0 on failure
    pub async fn unread_count(&self, user_id: i64) -> i64 {
        self.repo
            .count_unread_notifications(user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to count notifications for user {}: {}", user_id, e);
                0
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    async fn create_test_service() -> (NotificationsService, i64) {
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        let user = repo
            .create_user("Reader", "reader@example.com", "$argon2id$placeholder")
            .await
            .unwrap();
        (NotificationsService::new(repo), user.id)
    }

    #[tokio::test]
    async fn test_mark_as_read_is_idempotent() {
        let (service, user_id) = create_test_service().await;

        let notification = service
            .create_notification(user_id, "Water change due", NotificationType::Reminder)
            .await
            .unwrap();

        assert!(service.mark_as_read(notification.id).await);
        let first = service.get_user_notifications(user_id).await;
        assert!(first[0].is_read);

        assert!(service.mark_as_read(notification.id).await);
        let second = service.get_user_notifications(user_id).await;
        assert!(second[0].is_read);
    }

    #[tokio::test]
    async fn test_mark_unknown_notification() {
        let (service, _user_id) = create_test_service().await;
        assert!(!service.mark_as_read(404).await);
    }

    #[tokio::test]
    async fn test_unread_count() {
        let (service, user_id) = create_test_service().await;

        let a = service
            .create_notification(user_id, "a", NotificationType::WaterQuality)
            .await
            .unwrap();
        service
            .create_notification(user_id, "b", NotificationType::FishStress)
            .await
            .unwrap();
        assert_eq!(service.unread_count(user_id).await, 2);

        service.mark_as_read(a.id).await;
        assert_eq!(service.unread_count(user_id).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected_and_empty_list() {
        let (service, user_id) = create_test_service().await;

        assert!(service
            .create_notification(user_id + 1, "nobody", NotificationType::Reminder)
            .await
            .is_none());
        assert!(service.get_user_notifications(user_id).await.is_empty());
    }
}
