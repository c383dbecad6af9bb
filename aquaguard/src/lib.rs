//! AquaGuard library
//!
//! Local aquarium monitoring: accounts, aquarium records, simulated water
//! quality, mock fish-behavior analysis and notifications, persisted in an
//! embedded SQLite store.

pub mod app;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod services;
pub mod storage;
