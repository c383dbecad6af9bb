//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to the front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A registered account.
///
/// The password hash is never loaded into this struct, so a serialized user
/// is safe to persist in key-value storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Stored login credentials for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub password_hash: String,
}

/// An aquarium owned by a user. Dimensions are in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Aquarium {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub fish_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Create aquarium request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAquariumRequest {
    pub user_id: i64,
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub fish_count: i64,
}

/// Fish condition label produced by the behavior analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum FishCondition {
    Normal,
    Stressed,
    Hungry,
}

impl FishCondition {
    pub const ALL: [FishCondition; 3] = [
        FishCondition::Normal,
        FishCondition::Stressed,
        FishCondition::Hungry,
    ];

    /// Care advice attached to each label
    pub fn suggestion(self) -> &'static str {
        match self {
            FishCondition::Normal => "Fish are healthy and active. Continue current care routine.",
            FishCondition::Stressed => {
                "Fish may be stressed. Check tank environment, water parameters, and reduce disturbances."
            }
            FishCondition::Hungry => "Feed your fish now. Consider adjusting feeding schedule.",
        }
    }
}

impl fmt::Display for FishCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FishCondition::Normal => "Normal",
            FishCondition::Stressed => "Stressed",
            FishCondition::Hungry => "Hungry",
        };
        f.write_str(label)
    }
}

/// Water-quality status tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum WaterStatus {
    Safe,
    Warning,
    Dangerous,
}

impl WaterStatus {
    /// Fixed advisory message for each tier
    pub fn advisory(self) -> &'static str {
        match self {
            WaterStatus::Safe => "Water quality is optimal",
            WaterStatus::Warning => "Water quality dropping, consider partial change",
            WaterStatus::Dangerous => "Immediate water change needed!",
        }
    }
}

impl fmt::Display for WaterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WaterStatus::Safe => "Safe",
            WaterStatus::Warning => "Warning",
            WaterStatus::Dangerous => "Dangerous",
        };
        f.write_str(label)
    }
}

/// A stored fish-behavior analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FishReport {
    pub id: i64,
    pub user_id: i64,
    pub aquarium_id: Option<i64>,
    pub video_uri: Option<String>,
    pub fish_condition: FishCondition,
    pub suggestion: String,
    pub temperature: f64,
    pub ph_level: f64,
    pub water_status: WaterStatus,
    pub created_at: DateTime<Utc>,
}

/// Create report request
#[derive(Debug, Clone, Deserialize)]
pub struct NewFishReport {
    pub user_id: i64,
    pub aquarium_id: Option<i64>,
    pub video_uri: Option<String>,
    pub fish_condition: FishCondition,
    pub suggestion: String,
    pub temperature: f64,
    pub ph_level: f64,
    pub water_status: WaterStatus,
}

/// What raised a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    WaterQuality,
    FishStress,
    Reminder,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationType::WaterQuality => "water_quality",
            NotificationType::FishStress => "fish_stress",
            NotificationType::Reminder => "reminder",
        };
        f.write_str(label)
    }
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
