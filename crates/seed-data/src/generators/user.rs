//! Student generation.

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::random_timestamp_within;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Written verbatim into every user's password column.
    pub placeholder_password: String,
    /// Role assigned to every generated user.
    pub role: String,
    /// How far back `created_at` may fall.
    pub created_window: Duration,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            placeholder_password: "hashed_dummy_password".to_string(),
            role: "student".to_string(),
            created_window: Duration::days(180),
        }
    }
}

/// Generates realistic student accounts.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user with the given id.
    pub fn generate(&self, id: i32, now: OffsetDateTime, rng: &mut impl Rng) -> GeneratedUser {
        let full_name: String = Name().fake_with_rng(rng);
        let email = self.generate_email(&full_name, rng);

        GeneratedUser {
            id,
            full_name,
            email,
            password: self.config.placeholder_password.clone(),
            role: self.config.role.clone(),
            created_at: random_timestamp_within(now, self.config.created_window, rng),
        }
    }

    /// Generates users with ids `1..=count`.
    pub fn generate_batch(
        &self,
        count: i32,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedUser> {
        (1..=count).map(|id| self.generate(id, now, rng)).collect()
    }

    /// Generates an email from a name.
    fn generate_email(&self, name: &str, rng: &mut impl Rng) -> String {
        let normalized: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ')
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");

        let suffix: u32 = rng.gen_range(1..9999);
        let domains = ["example.com", "example.org", "example.net"];
        let domain = domains[rng.gen_range(0..domains.len())];

        format!("{normalized}{suffix}@{domain}")
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}
