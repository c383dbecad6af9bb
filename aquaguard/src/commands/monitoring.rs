//! Water-quality and fish-behavior commands

use super::require_user;
use crate::app::AppState;
use crate::database::FishReport;
use crate::error::{AppError, Result};
use crate::services::WaterQuality;

/// Latest simulated reading
pub async fn water_quality(state: &AppState) -> Result<WaterQuality> {
    require_user(state).await?;
    Ok(state.water_quality())
}

/// Run the mock analysis on an uploaded video.
///
/// A session that has not simulated a reading yet takes one first, so the
/// report never records the startup placeholder.
pub async fn analyze_video(state: &AppState, video_uri: &str) -> Result<FishReport> {
    if !video_uri.trim().is_empty() && !state.has_live_reading() {
        state.tick_water_quality().await;
    }
    state.analyze_fish_behavior(video_uri).await
}

pub async fn list_reports(state: &AppState) -> Result<Vec<FishReport>> {
    let user = require_user(state).await?;
    Ok(state.reports_service.get_user_reports(user.id).await)
}

/// Delete one of the logged-in user's reports
pub async fn delete_report(state: &AppState, report_id: i64) -> Result<()> {
    let user = require_user(state).await?;

    let owned = state
        .reports_service
        .get_user_reports(user.id)
        .await
        .iter()
        .any(|r| r.id == report_id);

    if !owned || !state.reports_service.delete_report(report_id).await {
        return Err(AppError::NotFound(format!("report {}", report_id)));
    }

    Ok(())
}
