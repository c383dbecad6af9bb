//! Application configuration constants
//!
//! Central location for file names, timings, simulation ranges and
//! validation boundaries used throughout the application.

use std::time::Duration;

// ===== Storage =====

/// SQLite database file inside the app data directory
pub const DATABASE_FILE_NAME: &str = "aquaguard.db";

/// Key-value store file inside the app data directory
pub const KV_STORE_FILE_NAME: &str = "storage.json";

/// Key under which the logged-in user is persisted
pub const CURRENT_USER_KEY: &str = "current_user";

/// Default app data directory when none is given on the command line
pub const DEFAULT_DATA_DIR: &str = "./aquaguard-data";

// ===== Timings =====

/// Interval between simulated water-quality readings
pub const SIMULATION_INTERVAL: Duration = Duration::from_secs(5);

/// Delay before the mock fish-behavior analysis returns
pub const ANALYSIS_DELAY: Duration = Duration::from_secs(3);

// ===== Simulation Ranges =====

/// Lower bound of generated temperatures in °C
pub const SIM_TEMPERATURE_MIN: f64 = 22.0;
/// Width of the generated temperature range (upper bound exclusive)
pub const SIM_TEMPERATURE_SPAN: f64 = 6.0;
/// Lower bound of generated pH values
pub const SIM_PH_MIN: f64 = 6.5;
/// Width of the generated pH range (upper bound exclusive)
pub const SIM_PH_SPAN: f64 = 2.0;

// ===== Classification Thresholds =====

/// Outside these bounds the water is Dangerous
pub const DANGER_TEMPERATURE_MIN: f64 = 22.0;
pub const DANGER_TEMPERATURE_MAX: f64 = 30.0;
pub const DANGER_PH_MIN: f64 = 6.5;
pub const DANGER_PH_MAX: f64 = 8.0;

/// Outside these bounds (but inside the danger bounds) the water is a Warning
pub const WARNING_TEMPERATURE_MIN: f64 = 24.0;
pub const WARNING_TEMPERATURE_MAX: f64 = 28.0;
pub const WARNING_PH_MIN: f64 = 6.8;
pub const WARNING_PH_MAX: f64 = 7.5;

// ===== Account Validation =====

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LENGTH: usize = 6;
