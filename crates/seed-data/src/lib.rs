//! Fixture data generation for eduinsight.
//!
//! This crate fills an eduinsight database with synthetic students, courses,
//! course feedback, per-question responses and free-text comments, so the
//! dashboards and analytics have something to show.
//!
//! The question set in `feedback_questions` is not created here; it must
//! already exist. Users and courses are inserted with fixed ids and skipped
//! when present, everything else is appended on every run.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let options = DatabaseConfig::from_env().connect_options()?;
//! let mut seeder = Seeder::connect(&options).await?;
//!
//! let result = ScenarioBuilder::new()
//!     .build(&mut seeder, &mut rand::thread_rng())
//!     .await?;
//!
//! seeder.close().await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod models;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
    pub use crate::config::{DatabaseConfig, SeedConfig};
    pub use crate::db::{SeedError, Seeder};
    pub use crate::generators::{CourseGenerator, FeedbackGenerator, UserGenerator};
    pub use crate::models::{FeedbackQuestion, FeedbackRow, TableCounts};
}
