//! Mock fish-behavior analysis
//!
//! Stands in for a video-inference service: after a fixed delay it returns
//! one of the three fish-condition labels, chosen uniformly at random.
//! Dropping the returned future cancels the pending delay.

use super::random::RandomSource;
use crate::database::FishCondition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Label and advice produced by one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fish_condition: FishCondition,
    pub suggestion: String,
}

impl From<FishCondition> for AnalysisResult {
    fn from(fish_condition: FishCondition) -> Self {
        Self {
            fish_condition,
            suggestion: fish_condition.suggestion().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    random: Arc<dyn RandomSource>,
    delay: Duration,
}

impl AnalysisService {
    pub fn new(random: Arc<dyn RandomSource>, delay: Duration) -> Self {
        Self { random, delay }
    }

    /// Map a uniform draw onto a label
    pub fn condition_for(unit: f64) -> FishCondition {
        let count = FishCondition::ALL.len();
        let index = ((unit * count as f64) as usize).min(count - 1);
        FishCondition::ALL[index]
    }

    /// Analyze the video behind `video_uri`
    pub async fn analyze(&self, video_uri: &str) -> AnalysisResult {
        tracing::info!("Analyzing fish behavior in {}", video_uri);

        tokio::time::sleep(self.delay).await;

        let result = AnalysisResult::from(Self::condition_for(self.random.next_unit()));
        tracing::info!("Analysis finished: {}", result.fish_condition);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::random::ScriptedRandom;

    #[test]
    fn test_condition_for_buckets() {
        assert_eq!(AnalysisService::condition_for(0.0), FishCondition::Normal);
        assert_eq!(AnalysisService::condition_for(0.33), FishCondition::Normal);
        assert_eq!(AnalysisService::condition_for(0.34), FishCondition::Stressed);
        assert_eq!(AnalysisService::condition_for(0.66), FishCondition::Stressed);
        assert_eq!(AnalysisService::condition_for(0.67), FishCondition::Hungry);
        assert_eq!(AnalysisService::condition_for(0.999_999), FishCondition::Hungry);
    }

    #[test]
    fn test_result_carries_fixed_advice() {
        let result = AnalysisResult::from(FishCondition::Hungry);
        assert_eq!(
            result.suggestion,
            "Feed your fish now. Consider adjusting feeding schedule."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_waits_for_delay() {
        let service = AnalysisService::new(
            Arc::new(ScriptedRandom::new(vec![0.5])),
            Duration::from_secs(3),
        );

        let started = tokio::time::Instant::now();
        let result = service.analyze("file:///videos/tank.mp4").await;

        assert_eq!(result.fish_condition, FishCondition::Stressed);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_analysis_is_cancelled() {
        let service = AnalysisService::new(
            Arc::new(ScriptedRandom::new(vec![0.1])),
            Duration::from_secs(3),
        );

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            service.analyze("file:///videos/tank.mp4"),
        )
        .await;

        assert!(outcome.is_err());
    }
}
