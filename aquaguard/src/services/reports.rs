//! Fish reports service

use crate::database::{FishReport, NewFishReport, Repository};

/// Service for fish-behavior reports
#[derive(Clone)]
pub struct ReportsService {
    repo: Repository,
}

impl ReportsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Store a report, returning the created row
    pub async fn create_report(&self, report: NewFishReport) -> Option<FishReport> {
        match self.repo.create_report(&report).await {
            Ok(created) => {
                tracing::info!(
                    "Report created: {} ({}, water {})",
                    created.id,
                    created.fish_condition,
                    created.water_status
                );
                Some(created)
            }
            Err(e) => {
                tracing::error!("Failed to create report: {}", e);
                None
            }
        }
    }

    /// A user's reports, newest first
    pub async fn get_user_reports(&self, user_id: i64) -> Vec<FishReport> {
        self.repo.list_reports(user_id).await.unwrap_or_else(|e| {
            tracing::error!("Failed to get reports for user {}: {}", user_id, e);
            Vec::new()
        })
    }

    /// Delete a report. `false` when nothing was removed.
    pub async fn delete_report(&self, report_id: i64) -> bool {
        match self.repo.delete_report(report_id).await {
            Ok(true) => {
                tracing::info!("Report deleted: {}", report_id);
                true
            }
            Ok(false) => {
                tracing::warn!("Report not found: {}", report_id);
                false
            }
            Err(e) => {
                tracing::error!("Failed to delete report {}: {}", report_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, FishCondition, WaterStatus};

    async fn create_test_service() -> (ReportsService, i64) {
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        let user = repo
            .create_user("Reporter", "reporter@example.com", "$argon2id$placeholder")
            .await
            .unwrap();
        (ReportsService::new(repo), user.id)
    }

    fn new_report(user_id: i64, condition: FishCondition) -> NewFishReport {
        NewFishReport {
            user_id,
            aquarium_id: None,
            video_uri: Some(format!("file:///videos/{}.mp4", condition)),
            fish_condition: condition,
            suggestion: condition.suggestion().to_string(),
            temperature: 26.1,
            ph_level: 7.7,
            water_status: WaterStatus::Warning,
        }
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (service, user_id) = create_test_service().await;

        let mut created = Vec::new();
        for condition in FishCondition::ALL {
            created.push(service.create_report(new_report(user_id, condition)).await.unwrap());
        }

        assert!(service.delete_report(created[1].id).await);

        let remaining = service.get_user_reports(user_id).await;
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|r| r.id != created[1].id));
        assert!(remaining.contains(&created[0]));
        assert!(remaining.contains(&created[2]));
    }

    #[tokio::test]
    async fn test_delete_unknown_report() {
        let (service, _user_id) = create_test_service().await;
        assert!(!service.delete_report(42).await);
    }

    #[tokio::test]
    async fn test_unknown_aquarium_rejected() {
        let (service, user_id) = create_test_service().await;

        let mut report = new_report(user_id, FishCondition::Normal);
        report.aquarium_id = Some(77);

        assert!(service.create_report(report).await.is_none());
    }

    #[tokio::test]
    async fn test_no_reports_is_empty() {
        let (service, user_id) = create_test_service().await;
        assert!(service.get_user_reports(user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_reports_newest_first() {
        let (service, user_id) = create_test_service().await;

        let first = service.create_report(new_report(user_id, FishCondition::Normal)).await.unwrap();
        let second = service.create_report(new_report(user_id, FishCondition::Hungry)).await.unwrap();

        let reports = service.get_user_reports(user_id).await;
        assert_eq!(reports[0].id, second.id);
        assert_eq!(reports[1].id, first.id);
    }
}
