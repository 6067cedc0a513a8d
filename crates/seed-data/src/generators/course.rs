//! Course generation.

use fake::{
    Fake,
    faker::{company::en::CatchPhrase, name::en::Name},
};
use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::random_timestamp_within;

/// Generated course ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedCourse {
    pub id: i32,
    pub name: String,
    pub instructor_name: String,
    pub created_at: OffsetDateTime,
}

/// Generates courses with a catch-phrase title and a named instructor.
pub struct CourseGenerator {
    created_window: Duration,
}

impl CourseGenerator {
    pub fn new() -> Self {
        Self {
            created_window: Duration::days(180),
        }
    }

    /// Sets how far back `created_at` may fall.
    pub fn with_created_window(mut self, window: Duration) -> Self {
        self.created_window = window;
        self
    }

    pub fn generate(&self, id: i32, now: OffsetDateTime, rng: &mut impl Rng) -> GeneratedCourse {
        GeneratedCourse {
            id,
            name: CatchPhrase().fake_with_rng(rng),
            instructor_name: Name().fake_with_rng(rng),
            created_at: random_timestamp_within(now, self.created_window, rng),
        }
    }

    /// Generates courses with ids `1..=count`.
    pub fn generate_batch(
        &self,
        count: i32,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedCourse> {
        (1..=count).map(|id| self.generate(id, now, rng)).collect()
    }
}

impl Default for CourseGenerator {
    fn default() -> Self {
        Self::new()
    }
}
