//! Entity generators for fixture data.
//!
//! This module provides generators for creating realistic test entities:
//! - [`UserGenerator`]: Generate students with sequential ids
//! - [`CourseGenerator`]: Generate courses with an instructor
//! - [`FeedbackGenerator`]: Create feedback, per-question responses, and comments
//!
//! Generators are pure: they take an RNG and a reference time and never touch
//! the database.

pub mod course;
pub mod feedback;
pub mod user;

pub use course::{CourseGenerator, GeneratedCourse};
pub use feedback::{
    FeedbackGenerator, FeedbackRow, GeneratedComment, GeneratedFeedback, GeneratedResponse,
};
pub use user::{GeneratedUser, UserGenerator};

use rand::Rng;
use time::{Duration, OffsetDateTime};

/// Returns a timestamp uniformly distributed in `[now - window, now]`.
pub fn random_timestamp_within(
    now: OffsetDateTime,
    window: Duration,
    rng: &mut impl Rng,
) -> OffsetDateTime {
    let max_secs = window.whole_seconds().max(0);
    now - Duration::seconds(rng.gen_range(0..=max_secs))
}
