// AquaGuard - local aquarium monitoring
// Entry point and command-line front end

use anyhow::Context;
use aquaguard::app::{AppOptions, AppState};
use aquaguard::commands;
use aquaguard::config;
use aquaguard::error::AppError;
use aquaguard::services::SeededRandom;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aquaguard", version, about = "Local aquarium monitoring")]
struct Cli {
    /// Directory holding the database and key-value store
    #[arg(long, global = true, default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Seed for the water-quality and analysis simulations
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Save a new aquarium
    AddAquarium {
        #[arg(long)]
        name: String,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        fish_count: i64,
    },
    /// List aquariums
    Aquariums,
    /// Watch simulated water-quality readings
    Monitor {
        /// Number of readings before exiting
        #[arg(long, default_value_t = 3)]
        ticks: u32,
    },
    /// Run the fish-behavior analysis on a video
    Analyze { video: String },
    /// List fish reports
    Reports,
    /// Delete a fish report
    DeleteReport { id: i64 },
    /// Show notifications
    Notifications,
    /// Mark a notification as read
    MarkRead { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aquaguard=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting AquaGuard");

    let mut options = AppOptions::default();
    if let Some(seed) = cli.seed {
        options.random = Arc::new(SeededRandom::new(seed));
    }

    let state = AppState::initialize(&cli.data_dir, options)
        .await
        .context("Failed to initialize AquaGuard")?;

    let outcome = run(&state, cli.command, cli.json).await;
    state.shutdown().await;

    if let Err(e) = outcome {
        if cli.json {
            println!("{}", serde_json::json!({ "error": e }));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &AppState, command: Command, json: bool) -> aquaguard::error::Result<()> {
    match command {
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            let user = commands::signup(state, &name, &email, &password, &confirm).await?;
            emit(json, &user, format!("✅ Account created. Welcome, {}!", user.full_name))
        }
        Command::Login { email, password } => {
            let user = commands::login(state, &email, &password).await?;
            emit(json, &user, format!("Logged in as {}", user.email))
        }
        Command::Logout => {
            commands::logout(state).await?;
            emit(json, &serde_json::json!({ "logged_out": true }), "Logged out")
        }
        Command::Whoami => {
            let user = commands::current_user(state).await?;
            let text = match &user {
                Some(user) => format!("{} <{}> (id {})", user.full_name, user.email, user.id),
                None => "Not logged in".to_string(),
            };
            emit(json, &user, text)
        }
        Command::AddAquarium {
            name,
            height,
            width,
            length,
            fish_count,
        } => {
            let aquarium =
                commands::add_aquarium(state, &name, height, width, length, fish_count).await?;
            emit(
                json,
                &aquarium,
                format!("✅ Aquarium saved: {} (id {})", aquarium.name, aquarium.id),
            )
        }
        Command::Aquariums => {
            let aquariums = commands::list_aquariums(state).await?;
            let lines: Vec<String> = aquariums
                .iter()
                .map(|a| {
                    format!(
                        "#{} {}: {}x{}x{} cm, {} fish",
                        a.id, a.name, a.length, a.width, a.height, a.fish_count
                    )
                })
                .collect();
            emit(json, &aquariums, lines_or(lines, "No aquariums yet"))
        }
        Command::Monitor { ticks } => {
            commands::water_quality(state).await?;
            if !state.is_simulating().await {
                return Err(AppError::Generic(
                    "Water-quality simulation is not running".to_string(),
                ));
            }
            let mut readings = state.subscribe_water_quality();

            for _ in 0..ticks {
                readings
                    .changed()
                    .await
                    .map_err(|e| AppError::Generic(e.to_string()))?;
                let reading = readings.borrow_and_update().clone();
                emit(
                    json,
                    &reading,
                    format!(
                        "{:.1}°C  pH {:.1}  {}: {}",
                        reading.temperature, reading.ph_level, reading.status, reading.suggestion
                    ),
                )?;
            }
            Ok(())
        }
        Command::Analyze { video } => {
            let report = commands::analyze_video(state, &video).await?;
            emit(
                json,
                &report,
                format!("{}: {}", report.fish_condition, report.suggestion),
            )
        }
        Command::Reports => {
            let reports = commands::list_reports(state).await?;
            let lines: Vec<String> = reports
                .iter()
                .map(|r| {
                    format!(
                        "#{} {} {} | {:.1}°C pH {:.1} {} | {}",
                        r.id,
                        r.created_at.format("%Y-%m-%d %H:%M"),
                        r.fish_condition,
                        r.temperature,
                        r.ph_level,
                        r.water_status,
                        r.suggestion
                    )
                })
                .collect();
            emit(json, &reports, lines_or(lines, "No reports yet"))
        }
        Command::DeleteReport { id } => {
            commands::delete_report(state, id).await?;
            emit(json, &serde_json::json!({ "deleted": id }), format!("Deleted report {}", id))
        }
        Command::Notifications => {
            let inbox = commands::list_notifications(state).await?;
            let mut lines = vec![format!("{} unread", inbox.unread)];
            lines.extend(inbox.notifications.iter().map(|n| {
                let marker = if n.is_read { " " } else { "•" };
                format!("{} #{} [{}] {}", marker, n.id, n.kind, n.message)
            }));
            emit(json, &inbox, lines.join("\n"))
        }
        Command::MarkRead { id } => {
            commands::mark_notification_read(state, id).await?;
            emit(json, &serde_json::json!({ "read": id }), format!("Marked {} as read", id))
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl Display) -> aquaguard::error::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn lines_or(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}
