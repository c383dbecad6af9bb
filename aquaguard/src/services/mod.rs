//! Services module
//!
//! Business logic services that coordinate between commands and repository.

pub mod analysis;
pub mod aquariums;
pub mod notifications;
pub mod random;
pub mod reports;
pub mod users;
pub mod water_quality;

pub use analysis::{AnalysisResult, AnalysisService};
pub use aquariums::AquariumsService;
pub use notifications::NotificationsService;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use reports::ReportsService;
pub use users::UsersService;
pub use water_quality::{WaterQuality, WaterQualitySimulator};
