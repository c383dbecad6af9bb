//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState,
//! together with the logged-in user and the live water-quality reading.

use crate::config;
use crate::database::{self, FishCondition, FishReport, NewFishReport, NotificationType, Repository, User};
use crate::error::{AppError, Result};
use crate::services::{
    AnalysisService, AquariumsService, NotificationsService, RandomSource, ReportsService,
    ThreadRandom, UsersService, WaterQuality, WaterQualitySimulator,
};
use crate::storage::KvStore;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;

const FISH_STRESS_MESSAGE: &str = "🐠 Fish stress detected. Please check your tank environment.";

/// Injectable timings and randomness
#[derive(Clone)]
pub struct AppOptions {
    pub simulation_interval: Duration,
    pub analysis_delay: Duration,
    pub random: Arc<dyn RandomSource>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            simulation_interval: config::SIMULATION_INTERVAL,
            analysis_delay: config::ANALYSIS_DELAY,
            random: Arc::new(ThreadRandom),
        }
    }
}

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub users_service: UsersService,
    pub aquariums_service: AquariumsService,
    pub reports_service: ReportsService,
    pub notifications_service: NotificationsService,
    pub analysis_service: AnalysisService,
    kv_store: KvStore,
    current_user: Arc<RwLock<Option<User>>>,
    simulator: WaterQualitySimulator,
    simulation: Arc<Mutex<Option<JoinHandle<()>>>>,
    simulation_interval: Duration,
}

impl AppState {
    /// Open the store and key-value file under `app_data_dir` and restore
    /// the persisted session.
    pub async fn initialize(app_data_dir: &Path, options: AppOptions) -> Result<Self> {
        tracing::info!("Initializing application in {:?}", app_data_dir);

        std::fs::create_dir_all(app_data_dir)
            .map_err(|e| AppError::StoreInit(format!("Failed to create data dir: {}", e)))?;

        let pool = database::create_pool(&app_data_dir.join(config::DATABASE_FILE_NAME)).await?;
        let kv_store = KvStore::new(app_data_dir.join(config::KV_STORE_FILE_NAME));

        let state = Self::with_options(pool, kv_store, options);
        state.restore_session().await;

        tracing::info!("Application initialized successfully");
        Ok(state)
    }

    /// Build the state from an open pool without touching the session
    pub fn with_options(pool: SqlitePool, kv_store: KvStore, options: AppOptions) -> Self {
        let repo = Repository::new(pool);
        let notifications_service = NotificationsService::new(repo.clone());

        Self {
            users_service: UsersService::new(repo.clone()),
            aquariums_service: AquariumsService::new(repo.clone()),
            reports_service: ReportsService::new(repo),
            analysis_service: AnalysisService::new(options.random.clone(), options.analysis_delay),
            simulator: WaterQualitySimulator::new(options.random, notifications_service.clone()),
            notifications_service,
            kv_store,
            current_user: Arc::new(RwLock::new(None)),
            simulation: Arc::new(Mutex::new(None)),
            simulation_interval: options.simulation_interval,
        }
    }

    /// Load the persisted user, if any, and resume the simulation for it
    pub async fn restore_session(&self) {
        match self.kv_store.get_json::<User>(config::CURRENT_USER_KEY).await {
            Ok(Some(user)) => {
                tracing::info!("Restored session for user {}", user.id);
                let user_id = user.id;
                *self.current_user.write().await = Some(user);
                self.start_simulation(user_id).await;
            }
            Ok(None) => {
                tracing::debug!("No persisted session");
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                if let Err(e) = self.kv_store.remove_item(config::CURRENT_USER_KEY).await {
                    tracing::error!("Failed to clear session: {}", e);
                }
            }
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_user.read().await.clone()
    }

    /// Make `user` the logged-in user and persist it
    pub async fn login(&self, user: User) -> Result<()> {
        let user_id = user.id;

        // Persist first so a failed write leaves the previous session intact
        self.kv_store.set_json(config::CURRENT_USER_KEY, &user).await?;
        *self.current_user.write().await = Some(user);

        self.start_simulation(user_id).await;

        tracing::info!("User {} logged in", user_id);
        Ok(())
    }

    /// Forget the logged-in user and stop the simulation
    pub async fn logout(&self) -> Result<()> {
        self.stop_simulation().await;

        let previous = self.current_user.write().await.take();
        self.kv_store.remove_item(config::CURRENT_USER_KEY).await?;

        if let Some(user) = previous {
            tracing::info!("User {} logged out", user.id);
        }
        Ok(())
    }

    /// Latest water-quality reading
    pub fn water_quality(&self) -> WaterQuality {
        self.simulator.current()
    }

    /// Whether the reading came from the simulation rather than the
    /// startup placeholder
    pub fn has_live_reading(&self) -> bool {
        self.simulator.has_reading()
    }

    pub fn subscribe_water_quality(&self) -> watch::Receiver<WaterQuality> {
        self.simulator.subscribe()
    }

    /// Run one simulation step now. `None` when nobody is logged in.
    pub async fn tick_water_quality(&self) -> Option<WaterQuality> {
        let user_id = self.current_user.read().await.as_ref()?.id;
        Some(self.simulator.tick(user_id).await)
    }

    /// Whether the periodic simulation task is running
    pub async fn is_simulating(&self) -> bool {
        self.simulation
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    async fn start_simulation(&self, user_id: i64) {
        let mut simulation = self.simulation.lock().await;

        if let Some(previous) = simulation.take() {
            previous.abort();
        }

        self.simulator.reset_alerts().await;
        *simulation = Some(
            self.simulator
                .clone()
                .spawn(user_id, self.simulation_interval),
        );
    }

    async fn stop_simulation(&self) {
        if let Some(handle) = self.simulation.lock().await.take() {
            handle.abort();
            tracing::info!("Water-quality simulation stopped");
        }
    }

    /// Run the mock analysis on a video and store the outcome.
    ///
    /// The report carries the water reading current when the analysis
    /// started. A `Stressed` result also raises a fish-stress notification.
    pub async fn analyze_fish_behavior(&self, video_uri: &str) -> Result<FishReport> {
        let video_uri = video_uri.trim();
        if video_uri.is_empty() {
            return Err(AppError::Validation("Please upload a video first".to_string()));
        }

        let user = self.current_user().await.ok_or(AppError::NotLoggedIn)?;
        let water = self.water_quality();

        let result = self.analysis_service.analyze(video_uri).await;

        // The session may have changed while the analysis was pending
        if self.current_user().await.map(|u| u.id) != Some(user.id) {
            tracing::warn!("Discarding analysis for user {} after logout", user.id);
            return Err(AppError::NotLoggedIn);
        }

        let report = self
            .reports_service
            .create_report(NewFishReport {
                user_id: user.id,
                aquarium_id: None,
                video_uri: Some(video_uri.to_string()),
                fish_condition: result.fish_condition,
                suggestion: result.suggestion,
                temperature: water.temperature,
                ph_level: water.ph_level,
                water_status: water.status,
            })
            .await
            .ok_or_else(|| AppError::Generic("Analysis failed. Please try again.".to_string()))?;

        if report.fish_condition == FishCondition::Stressed {
            self.notifications_service
                .create_notification(user.id, FISH_STRESS_MESSAGE, NotificationType::FishStress)
                .await;
        }

        Ok(report)
    }

    /// Stop background work
    pub async fn shutdown(&self) {
        self.stop_simulation().await;
        tracing::info!("Application shut down");
    }
}
