//! Fluent builder for a full seeding run.

use std::collections::BTreeMap;
use std::time::{Duration as StdDuration, Instant};

use rand::Rng;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::SeedConfig;
use crate::db::{SeedError, Seeder};
use crate::generators::{
    course::{CourseGenerator, GeneratedCourse},
    feedback::{FeedbackGenConfig, FeedbackGenerator, GeneratedComment, GeneratedFeedback},
    user::{GeneratedUser, UserGenConfig, UserGenerator},
};
use crate::models::FeedbackQuestion;

/// Result of a seeding run.
#[derive(Debug)]
pub struct ScenarioResult {
    pub users: Vec<GeneratedUser>,
    pub courses: Vec<GeneratedCourse>,
    pub feedback: Vec<GeneratedFeedback>,
    pub comments: Vec<GeneratedComment>,
    /// Users actually inserted; ids already present are skipped.
    pub users_inserted: u64,
    /// Courses actually inserted; ids already present are skipped.
    pub courses_inserted: u64,
    /// Questions read back for the responses phase.
    pub question_count: usize,
    /// Feedback rows read back for the responses phase (all runs, not just this one).
    pub feedback_rows_read: usize,
    /// Response rows inserted: `feedback_rows_read * question_count`.
    pub response_count: usize,
    /// Metrics from the run (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

/// Timing metrics from a seeding run.
#[derive(Debug, Clone, Default)]
pub struct ScenarioMetrics {
    /// Time spent generating rows (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent in the database, reads included (milliseconds).
    pub seeding_time_ms: u64,
}

/// Builder for a complete seeding run.
///
/// Phases run strictly in order: users, courses, feedback, responses,
/// comments. Each phase's rows are generated right before it is seeded,
/// because the responses phase depends on what earlier phases committed.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_metrics(true)
///     .build(&mut seeder, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    config: SeedConfig,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a builder with the standard fixture volumes.
    pub fn new() -> Self {
        Self::from_config(SeedConfig::default())
    }

    pub fn from_config(config: SeedConfig) -> Self {
        Self {
            config,
            track_metrics: false,
        }
    }

    /// Sets the number of students.
    pub fn with_students(mut self, count: i32) -> Self {
        self.config.student_count = count;
        self
    }

    /// Sets the number of courses.
    pub fn with_courses(mut self, count: i32) -> Self {
        self.config.course_count = count;
        self
    }

    /// Sets the number of feedback rows inserted per run.
    pub fn with_feedback(mut self, count: usize) -> Self {
        self.config.feedback_count = count;
        self
    }

    /// Sets the number of comment rows inserted per run.
    pub fn with_comments(mut self, count: usize) -> Self {
        self.config.comment_count = count;
        self
    }

    /// Enables timing metrics in the result.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Runs every phase against the database.
    pub async fn build(
        self,
        seeder: &mut Seeder,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let now = OffsetDateTime::now_utc();
        let mut timer = PhaseTimer::default();

        let user_gen = UserGenerator::with_config(UserGenConfig {
            placeholder_password: self.config.placeholder_password.clone(),
            role: self.config.student_role.clone(),
            created_window: self.config.account_window,
        });
        let course_gen = CourseGenerator::new().with_created_window(self.config.account_window);
        let feedback_gen = FeedbackGenerator::with_config(FeedbackGenConfig {
            student_count: self.config.student_count,
            course_count: self.config.course_count,
            window: self.config.activity_window,
            ..Default::default()
        });

        // Users
        let users = timer.generate(|| user_gen.generate_batch(self.config.student_count, now, rng));
        let started = Instant::now();
        let users_inserted = seeder.seed_users(&users).await?;
        timer.seeded(started);

        // Courses
        let courses =
            timer.generate(|| course_gen.generate_batch(self.config.course_count, now, rng));
        let started = Instant::now();
        let courses_inserted = seeder.seed_courses(&courses).await?;
        timer.seeded(started);
        info!("Inserted users and courses.");

        // Feedback
        let feedback = timer.generate(|| {
            feedback_gen.generate_feedback_batch(self.config.feedback_count, now, rng)
        });
        let started = Instant::now();
        seeder.seed_feedback(&feedback).await?;
        timer.seeded(started);
        info!("Inserted feedback records.");

        // Responses: cross product of every stored feedback row and every question
        let started = Instant::now();
        let questions = seeder.load_questions().await?;
        let stored_feedback = seeder.load_feedback().await?;
        timer.seeded(started);
        log_question_sections(&questions);

        let question_ids: Vec<i32> = questions.iter().map(|q| q.question_id).collect();
        let responses = timer.generate(|| {
            let mut responses = Vec::with_capacity(stored_feedback.len() * question_ids.len());
            for row in &stored_feedback {
                responses.extend(feedback_gen.generate_responses(row, &question_ids, now, rng));
            }
            responses
        });
        let started = Instant::now();
        seeder.seed_responses(&responses).await?;
        timer.seeded(started);
        info!("Inserted response records.");

        // Comments
        let comments = timer.generate(|| {
            feedback_gen.generate_comment_batch(self.config.comment_count, now, rng)
        });
        let started = Instant::now();
        seeder.seed_comments(&comments).await?;
        timer.seeded(started);
        info!("Inserted comments.");

        Ok(ScenarioResult {
            users,
            courses,
            feedback,
            comments,
            users_inserted,
            courses_inserted,
            question_count: questions.len(),
            feedback_rows_read: stored_feedback.len(),
            response_count: responses.len(),
            metrics: self.track_metrics.then(|| timer.metrics()),
        })
    }
}

/// Accumulates time spent generating versus talking to the database.
#[derive(Default)]
struct PhaseTimer {
    generation: StdDuration,
    seeding: StdDuration,
}

impl PhaseTimer {
    fn generate<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = f();
        self.generation += started.elapsed();
        out
    }

    fn seeded(&mut self, started: Instant) {
        self.seeding += started.elapsed();
    }

    fn metrics(&self) -> ScenarioMetrics {
        ScenarioMetrics {
            generation_time_ms: self.generation.as_millis() as u64,
            seeding_time_ms: self.seeding.as_millis() as u64,
        }
    }
}

fn log_question_sections(questions: &[FeedbackQuestion]) {
    if questions.is_empty() {
        warn!("No rows in feedback_questions; no responses will be generated");
        return;
    }

    let mut per_section: BTreeMap<&str, usize> = BTreeMap::new();
    for q in questions {
        *per_section
            .entry(q.section.as_deref().unwrap_or("unsectioned"))
            .or_default() += 1;
    }

    for (section, count) in per_section {
        debug!("{} questions in section {}", count, section);
    }
}
