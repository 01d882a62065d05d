pub mod api;
pub mod config;
pub mod error;
pub mod intent;
pub mod orchestrator;
pub mod progress;
pub mod store;
pub mod tasks;
pub mod telemetry;
pub mod theme;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
