//! Latin Square Scheduling: balanced run orders for experiment planning.
//!
//! This crate builds k x k Latin squares and expands them into episode
//! schedules where:
//! - Each of k variants meets every (context1, context2) combination once
//! - Seeded squares are reproducible bit-for-bit
//! - Nothing is executed; only the order is decided

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod scheduler;
pub mod square;

pub use config::PlanConfig;
pub use error::{Result, ScheduleError};
pub use export::ExportFormat;
pub use generator::{generate_latin_square, GeneratorConfig, LatinSquareGenerator};
pub use scheduler::{Episode, LatinSquareScheduler};
pub use square::LatinSquare;
