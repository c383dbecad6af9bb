//! Aquariums service

use crate::database::{Aquarium, CreateAquariumRequest, Repository};

/// Service for managing aquariums
#[derive(Clone)]
pub struct AquariumsService {
    repo: Repository,
}

impl AquariumsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create an aquarium for a user.
    ///
    /// Returns `None` when the name is blank, a dimension or the fish count is
    /// not positive, the user does not exist, or the store fails.
    pub async fn create_aquarium(
        &self,
        user_id: i64,
        name: &str,
        height: f64,
        width: f64,
        length: f64,
        fish_count: i64,
    ) -> Option<Aquarium> {
        let dimensions_valid = [height, width, length]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0);

        if name.trim().is_empty() || !dimensions_valid || fish_count <= 0 {
            tracing::warn!("Rejected aquarium with invalid fields for user {}", user_id);
            return None;
        }

        let req = CreateAquariumRequest {
            user_id,
            name: name.trim().to_string(),
            height,
            width,
            length,
            fish_count,
        };

        match self.repo.create_aquarium(&req).await {
            Ok(aquarium) => {
                tracing::info!("Aquarium created successfully: {}", aquarium.id);
                Some(aquarium)
            }
            Err(e) => {
                tracing::error!("Failed to create aquarium: {}", e);
                None
            }
        }
    }

    /// A user's aquariums, newest first
    pub async fn get_user_aquariums(&self, user_id: i64) -> Vec<Aquarium> {
        self.repo.list_aquariums(user_id).await.unwrap_or_else(|e| {
            tracing::error!("Failed to get aquariums for user {}: {}", user_id, e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    async fn create_test_service() -> (AquariumsService, i64) {
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        let user = repo
            .create_user("Keeper", "keeper@example.com", "$argon2id$placeholder")
            .await
            .unwrap();
        (AquariumsService::new(repo), user.id)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, user_id) = create_test_service().await;

        let aquarium = service
            .create_aquarium(user_id, "Living Room", 45.0, 35.0, 90.0, 12)
            .await
            .unwrap();
        assert_eq!(aquarium.name, "Living Room");
        assert_eq!(aquarium.fish_count, 12);

        let listed = service.get_user_aquariums(user_id).await;
        assert_eq!(listed, vec![aquarium]);
    }

    #[tokio::test]
    async fn test_invalid_dimensions_rejected() {
        let (service, user_id) = create_test_service().await;

        assert!(service.create_aquarium(user_id, "Flat", 0.0, 35.0, 90.0, 3).await.is_none());
        assert!(service.create_aquarium(user_id, "Neg", 40.0, -1.0, 90.0, 3).await.is_none());
        assert!(service.create_aquarium(user_id, "NaN", 40.0, 35.0, f64::NAN, 3).await.is_none());
        assert!(service.create_aquarium(user_id, "Empty", 40.0, 35.0, 90.0, 0).await.is_none());
        assert!(service.create_aquarium(user_id, " ", 40.0, 35.0, 90.0, 3).await.is_none());

        assert!(service.get_user_aquariums(user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_returns_none() {
        let (service, user_id) = create_test_service().await;

        let result = service
            .create_aquarium(user_id + 1, "Nobody's", 40.0, 35.0, 90.0, 3)
            .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_list_for_new_user() {
        let (service, user_id) = create_test_service().await;
        assert!(service.get_user_aquariums(user_id).await.is_empty());
    }
}
