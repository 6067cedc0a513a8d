//! Configuration types for fixture generation.

use std::env;

use sqlx::postgres::PgConnectOptions;
use time::Duration;

use crate::db::SeedError;

/// Database used when neither `DATABASE_URL` nor `PGDATABASE` is set.
pub const DEFAULT_DATABASE: &str = "eduinsight";

/// Volumes and fixed values for a seeding run.
///
/// Everything except `rng_seed` is a constant of the fixture set; the
/// defaults are what the `seed` binary inserts.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Students inserted with ids `1..=student_count`.
    pub student_count: i32,

    /// Courses inserted with ids `1..=course_count`.
    pub course_count: i32,

    /// Feedback rows inserted per run.
    pub feedback_count: usize,

    /// Free-text comment rows inserted per run.
    pub comment_count: usize,

    /// How far back user and course `created_at` values may fall.
    pub account_window: Duration,

    /// How far back feedback, response and comment timestamps may fall.
    pub activity_window: Duration,

    /// Stored in `users.password`; only satisfies the NOT NULL constraint.
    pub placeholder_password: String,

    /// Role given to every seeded user.
    pub student_role: String,

    /// Seed for a reproducible run. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            student_count: 100,
            course_count: 10,
            feedback_count: 300,
            comment_count: 200,
            account_window: Duration::days(180),
            activity_window: Duration::days(90),
            placeholder_password: "hashed_dummy_password".to_string(),
            student_role: "student".to_string(),
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Default volumes, with the RNG seed taken from `SEED_RNG` if set.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        let rng_seed = match non_empty(lookup("SEED_RNG")) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                SeedError::Config(format!("SEED_RNG must be an unsigned integer: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            rng_seed,
            ..Self::default()
        })
    }
}

/// Where to find the database.
///
/// `DATABASE_URL` takes precedence. Without it the libpq variables
/// (`PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`) are honoured
/// through [`PgConnectOptions::new`].
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub database: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: non_empty(lookup("DATABASE_URL")),
            database: non_empty(lookup("PGDATABASE"))
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        }
    }

    /// Builds connection options from the configured source.
    pub fn connect_options(&self) -> Result<PgConnectOptions, SeedError> {
        match &self.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| SeedError::Config(format!("invalid DATABASE_URL: {e}"))),
            None => Ok(PgConnectOptions::new().database(&self.database)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
