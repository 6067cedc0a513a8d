//! Feedback generation (ratings, per-question responses, free-text comments).

use fake::{
    Fake,
    faker::{
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
};
use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::random_timestamp_within;

pub use crate::models::FeedbackRow;

/// Generated overall course rating.
#[derive(Debug, Clone)]
pub struct GeneratedFeedback {
    pub course_id: i32,
    pub student_id: i32,
    pub rating: i32,
    pub comment: String,
    pub submitted_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

/// Generated answer to a single feedback question.
#[derive(Debug, Clone)]
pub struct GeneratedResponse {
    pub student_id: i32,
    pub course_id: i32,
    pub instructor_name: String,
    pub question_id: i32,
    pub rating: i32,
    pub created_at: OffsetDateTime,
}

/// Generated free-text comment about a course and its instructor.
#[derive(Debug, Clone)]
pub struct GeneratedComment {
    pub student_id: i32,
    pub course_id: i32,
    pub instructor_name: String,
    pub course_comment: String,
    pub instructor_comment: String,
    pub created_at: OffsetDateTime,
}

/// Configuration for feedback generation.
#[derive(Debug, Clone)]
pub struct FeedbackGenConfig {
    /// Students are drawn from `1..=student_count`.
    pub student_count: i32,
    /// Courses are drawn from `1..=course_count`.
    pub course_count: i32,
    /// How far back any generated timestamp may fall.
    pub window: Duration,
    /// Sentences per comment paragraph.
    pub paragraph_sentences: usize,
}

impl Default for FeedbackGenConfig {
    fn default() -> Self {
        Self {
            student_count: 100,
            course_count: 10,
            window: Duration::days(90),
            paragraph_sentences: 2,
        }
    }
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Generates feedback, responses and comments that reference existing
/// students and courses.
pub struct FeedbackGenerator {
    config: FeedbackGenConfig,
}

impl FeedbackGenerator {
    /// Creates a new feedback generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: FeedbackGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: FeedbackGenConfig) -> Self {
        Self { config }
    }

    /// Generates one overall rating from a random student for a random course.
    pub fn generate_feedback(&self, now: OffsetDateTime, rng: &mut impl Rng) -> GeneratedFeedback {
        let (student_id, course_id) = self.pick_enrollment(rng);
        let rating = random_rating(rng);
        let comment: String = Sentence(4..10).fake_with_rng(rng);
        let submitted_at = random_timestamp_within(now, self.config.window, rng);

        GeneratedFeedback {
            course_id,
            student_id,
            rating,
            comment,
            submitted_at,
            created_at: submitted_at,
        }
    }

    pub fn generate_feedback_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedFeedback> {
        (0..count).map(|_| self.generate_feedback(now, rng)).collect()
    }

    /// Generates one response per question for a stored feedback row.
    ///
    /// All responses of one feedback row name the same instructor; rating and
    /// timestamp are drawn per question.
    pub fn generate_responses(
        &self,
        feedback: &FeedbackRow,
        question_ids: &[i32],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedResponse> {
        let instructor_name: String = Name().fake_with_rng(rng);

        question_ids
            .iter()
            .map(|&question_id| GeneratedResponse {
                student_id: feedback.student_id,
                course_id: feedback.course_id,
                instructor_name: instructor_name.clone(),
                question_id,
                rating: random_rating(rng),
                created_at: random_timestamp_within(now, self.config.window, rng),
            })
            .collect()
    }

    /// Generates a free-text comment, independent of any feedback row.
    pub fn generate_comment(&self, now: OffsetDateTime, rng: &mut impl Rng) -> GeneratedComment {
        let (student_id, course_id) = self.pick_enrollment(rng);
        let sentences = self.config.paragraph_sentences;

        GeneratedComment {
            student_id,
            course_id,
            instructor_name: Name().fake_with_rng(rng),
            course_comment: Paragraph(sentences..sentences + 1).fake_with_rng(rng),
            instructor_comment: Paragraph(sentences..sentences + 1).fake_with_rng(rng),
            created_at: random_timestamp_within(now, self.config.window, rng),
        }
    }

    pub fn generate_comment_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedComment> {
        (0..count).map(|_| self.generate_comment(now, rng)).collect()
    }

    fn pick_enrollment(&self, rng: &mut impl Rng) -> (i32, i32) {
        (
            rng.gen_range(1..=self.config.student_count),
            rng.gen_range(1..=self.config.course_count),
        )
    }
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn random_rating(rng: &mut impl Rng) -> i32 {
    rng.gen_range(MIN_RATING..=MAX_RATING)
}
