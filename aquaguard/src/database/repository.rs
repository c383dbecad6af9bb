//! Repository layer for database operations
//!
//! This module provides CRUD operations for all entities.
//! Every method is a single parameterized statement.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Users =====

    /// Create a new user with an already hashed password
    pub async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, full_name, email, created_at
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created user: {}", user.id);
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, full_name, email, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    /// Look up the stored password hash for an email
    pub async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    /// Count accounts registered under an email
    pub async fn count_users_with_email(&self, email: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ===== Aquariums =====

    /// Create an aquarium
    pub async fn create_aquarium(&self, req: &CreateAquariumRequest) -> Result<Aquarium> {
        let now = Utc::now();

        let aquarium = sqlx::query_as::<_, Aquarium>(
            r#"
            INSERT INTO aquariums (user_id, name, height, width, length, fish_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.name)
        .bind(req.height)
        .bind(req.width)
        .bind(req.length)
        .bind(req.fish_count)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created aquarium: {} for user: {}", aquarium.id, req.user_id);
        Ok(aquarium)
    }

    /// List a user's aquariums, newest first
    pub async fn list_aquariums(&self, user_id: i64) -> Result<Vec<Aquarium>> {
        let aquariums = sqlx::query_as::<_, Aquarium>(
            r#"
            SELECT * FROM aquariums
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(aquariums)
    }

    // ===== Fish reports =====

    /// Store a fish-behavior report
    pub async fn create_report(&self, report: &NewFishReport) -> Result<FishReport> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, FishReport>(
            r#"
            INSERT INTO fish_reports (
                user_id, aquarium_id, video_uri, fish_condition, suggestion,
                temperature, ph_level, water_status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(report.user_id)
        .bind(report.aquarium_id)
        .bind(&report.video_uri)
        .bind(report.fish_condition)
        .bind(&report.suggestion)
        .bind(report.temperature)
        .bind(report.ph_level)
        .bind(report.water_status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created report: {} for user: {}", created.id, report.user_id);
        Ok(created)
    }

    /// List a user's reports, newest first
    pub async fn list_reports(&self, user_id: i64) -> Result<Vec<FishReport>> {
        let reports = sqlx::query_as::<_, FishReport>(
            r#"
            SELECT * FROM fish_reports
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Delete a report. Returns whether a row was removed.
    pub async fn delete_report(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM fish_reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Deleted report: {} ({} rows)", id, rows);
        Ok(rows > 0)
    }

    // ===== Notifications =====

    /// Create a notification
    pub async fn create_notification(
        &self,
        user_id: i64,
        message: &str,
        kind: NotificationType,
    ) -> Result<Notification> {
        let now = Utc::now();

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, message, type, is_read, created_at)
            VALUES (?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(kind)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            "Created {} notification: {} for user: {}",
            kind,
            notification.id,
            user_id
        );
        Ok(notification)
    }

    /// List a user's notifications, newest first
    pub async fn list_notifications(&self, user_id: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark a notification as read. Returns whether the row exists.
    pub async fn mark_notification_read(&self, id: i64) -> Result<bool> {
        // SQLite counts matched rows, so an already-read row still reports 1
        let rows = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Marked notification as read: {}", id);
        Ok(rows > 0)
    }

    /// Count a user's unread notifications
    pub async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    async fn create_test_repo() -> Repository {
        let pool = create_memory_pool().await.unwrap();
        Repository::new(pool)
    }

    async fn create_test_user(repo: &Repository, email: &str) -> User {
        repo.create_user("Test User", email, "$argon2id$placeholder")
            .await
            .unwrap()
    }

    fn report_for(user_id: i64, condition: FishCondition) -> NewFishReport {
        NewFishReport {
            user_id,
            aquarium_id: None,
            video_uri: Some("file:///videos/tank.mp4".to_string()),
            fish_condition: condition,
            suggestion: condition.suggestion().to_string(),
            temperature: 25.3,
            ph_level: 7.1,
            water_status: WaterStatus::Safe,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = create_test_repo().await;

        let user = create_test_user(&repo, "ana@example.com").await;
        assert_eq!(user.email, "ana@example.com");

        let fetched = repo.get_user(user.id).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = create_test_repo().await;

        create_test_user(&repo, "dup@example.com").await;
        let second = repo
            .create_user("Other", "dup@example.com", "$argon2id$other")
            .await;

        assert!(matches!(second, Err(AppError::Database(_))));
        assert_eq!(repo.count_users_with_email("dup@example.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_credentials() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "cred@example.com").await;

        let found = repo.find_credentials("cred@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "$argon2id$placeholder");

        assert!(repo.find_credentials("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_aquarium_requires_existing_user() {
        let repo = create_test_repo().await;

        let result = repo
            .create_aquarium(&CreateAquariumRequest {
                user_id: 999,
                name: "Orphan".to_string(),
                height: 40.0,
                width: 30.0,
                length: 60.0,
                fish_count: 4,
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_aquariums_listed_newest_first() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "tanks@example.com").await;

        for name in ["Reef", "Planted", "Shrimp"] {
            repo.create_aquarium(&CreateAquariumRequest {
                user_id: user.id,
                name: name.to_string(),
                height: 40.0,
                width: 30.0,
                length: 60.0,
                fish_count: 6,
            })
            .await
            .unwrap();
        }

        let aquariums = repo.list_aquariums(user.id).await.unwrap();
        let names: Vec<&str> = aquariums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Shrimp", "Planted", "Reef"]);
    }

    #[tokio::test]
    async fn test_report_round_trip_and_delete() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "reports@example.com").await;

        let created = repo
            .create_report(&report_for(user.id, FishCondition::Hungry))
            .await
            .unwrap();
        assert_eq!(created.fish_condition, FishCondition::Hungry);
        assert_eq!(created.water_status, WaterStatus::Safe);

        assert!(repo.delete_report(created.id).await.unwrap());
        assert!(!repo.delete_report(created.id).await.unwrap());
        assert!(repo.list_reports(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notifications_mark_read() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "notify@example.com").await;

        let notification = repo
            .create_notification(user.id, "Feed the fish", NotificationType::Reminder)
            .await
            .unwrap();
        assert!(!notification.is_read);
        assert_eq!(notification.kind, NotificationType::Reminder);
        assert_eq!(repo.count_unread_notifications(user.id).await.unwrap(), 1);

        assert!(repo.mark_notification_read(notification.id).await.unwrap());
        assert!(repo.mark_notification_read(notification.id).await.unwrap());
        assert!(!repo.mark_notification_read(notification.id + 100).await.unwrap());

        let listed = repo.list_notifications(user.id).await.unwrap();
        assert!(listed[0].is_read);
        assert_eq!(repo.count_unread_notifications(user.id).await.unwrap(), 0);
    }
}
