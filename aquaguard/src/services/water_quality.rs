//! Water-quality simulation
//!
//! Generates a random temperature/pH reading on every tick, classifies it
//! into a status tier and raises a notification when the tank gets worse.
//! Any tier may follow any other; the signal is deliberately unfiltered.

use super::random::RandomSource;
use super::NotificationsService;
use crate::config;
use crate::database::{NotificationType, WaterStatus};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const DANGEROUS_ALERT: &str = "🔔 Alert! Water quality is unsafe. Please change water immediately.";
const WARNING_ALERT: &str = "⚠️ Water quality is dropping. Consider partial water change.";

/// Classify a temperature/pH pair. First matching tier wins.
pub fn classify(temperature: f64, ph_level: f64) -> WaterStatus {
    if temperature < config::DANGER_TEMPERATURE_MIN
        || temperature > config::DANGER_TEMPERATURE_MAX
        || ph_level < config::DANGER_PH_MIN
        || ph_level > config::DANGER_PH_MAX
    {
        return WaterStatus::Dangerous;
    }

    if temperature < config::WARNING_TEMPERATURE_MIN
        || temperature > config::WARNING_TEMPERATURE_MAX
        || ph_level < config::WARNING_PH_MIN
        || ph_level > config::WARNING_PH_MAX
    {
        return WaterStatus::Warning;
    }

    WaterStatus::Safe
}

/// The current water-quality reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    pub temperature: f64,
    pub ph_level: f64,
    pub status: WaterStatus,
    pub suggestion: String,
}

impl WaterQuality {
    /// Classify a raw measurement and round it to display precision
    pub fn from_measurement(temperature: f64, ph_level: f64) -> Self {
        let status = classify(temperature, ph_level);

        Self {
            temperature: round_one_decimal(temperature),
            ph_level: round_one_decimal(ph_level),
            status,
            suggestion: status.advisory().to_string(),
        }
    }
}

impl Default for WaterQuality {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            ph_level: 7.0,
            status: WaterStatus::Safe,
            suggestion: WaterStatus::Safe.advisory().to_string(),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Remembers the last tier a notification was raised for
#[derive(Debug, Default)]
pub struct AlertTracker {
    last_notified: Option<WaterStatus>,
}

impl AlertTracker {
    /// Record a new status; returns the alert message when one is due
    pub fn observe(&mut self, status: WaterStatus) -> Option<&'static str> {
        match (status, self.last_notified) {
            (WaterStatus::Dangerous, Some(WaterStatus::Dangerous)) => None,
            (WaterStatus::Dangerous, _) => {
                self.last_notified = Some(WaterStatus::Dangerous);
                Some(DANGEROUS_ALERT)
            }
            // A Warning right after Dangerous is an improvement, not an alert
            (WaterStatus::Warning, Some(WaterStatus::Warning | WaterStatus::Dangerous)) => None,
            (WaterStatus::Warning, _) => {
                self.last_notified = Some(WaterStatus::Warning);
                Some(WARNING_ALERT)
            }
            (WaterStatus::Safe, _) => {
                self.last_notified = Some(WaterStatus::Safe);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_notified = None;
    }
}

/// Produces readings and publishes them to subscribers
#[derive(Clone)]
pub struct WaterQualitySimulator {
    random: Arc<dyn RandomSource>,
    reading: Arc<watch::Sender<WaterQuality>>,
    alerts: Arc<Mutex<AlertTracker>>,
    // Set once the placeholder reading has been replaced
    sampled: Arc<AtomicBool>,
    notifications: NotificationsService,
}

impl WaterQualitySimulator {
    pub fn new(random: Arc<dyn RandomSource>, notifications: NotificationsService) -> Self {
        let (reading, _) = watch::channel(WaterQuality::default());

        Self {
            random,
            reading: Arc::new(reading),
            alerts: Arc::new(Mutex::new(AlertTracker::default())),
            sampled: Arc::new(AtomicBool::new(false)),
            notifications,
        }
    }

    /// Draw a new reading without publishing it
    pub fn sample(&self) -> WaterQuality {
        let temperature =
            config::SIM_TEMPERATURE_MIN + self.random.next_unit() * config::SIM_TEMPERATURE_SPAN;
        let ph_level = config::SIM_PH_MIN + self.random.next_unit() * config::SIM_PH_SPAN;

        WaterQuality::from_measurement(temperature, ph_level)
    }

    /// One simulation step for a user: draw, publish, alert if due
    pub async fn tick(&self, user_id: i64) -> WaterQuality {
        let reading = self.sample();
        self.reading.send_replace(reading.clone());
        self.sampled.store(true, Ordering::Release);

        tracing::debug!(
            "Water reading: {:.1}°C pH {:.1} ({})",
            reading.temperature,
            reading.ph_level,
            reading.status
        );

        let alert = self.alerts.lock().await.observe(reading.status);
        if let Some(message) = alert {
            tracing::info!("Water quality alert for user {}: {}", user_id, reading.status);
            self.notifications
                .create_notification(user_id, message, NotificationType::WaterQuality)
                .await;
        }

        reading
    }

    /// Latest published reading
    pub fn current(&self) -> WaterQuality {
        self.reading.borrow().clone()
    }

    /// Whether any tick has published a reading yet
    pub fn has_reading(&self) -> bool {
        self.sampled.load(Ordering::Acquire)
    }

    /// Receiver that wakes on every new reading
    pub fn subscribe(&self) -> watch::Receiver<WaterQuality> {
        self.reading.subscribe()
    }

    pub async fn reset_alerts(&self) {
        self.alerts.lock().await.reset();
    }

    /// Run `tick` every `period`, first tick one period from now.
    ///
    /// The task runs until its handle is aborted.
    pub fn spawn(self, user_id: i64, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!("Starting water-quality simulation for user {}", user_id);

            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                self.tick(user_id).await;
            }
        })
    }
}
