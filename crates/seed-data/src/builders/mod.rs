//! Fluent builder API for seeding runs.
//!
//! The [`ScenarioBuilder`] generates each phase's rows and hands them to a
//! [`Seeder`](crate::db::Seeder) in dependency order.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
