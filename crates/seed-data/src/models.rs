//! Rows read back from the database.

use sqlx::FromRow;

/// The slice of a `feedback` row needed to generate its question responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct FeedbackRow {
    pub feedback_id: i32,
    pub course_id: i32,
    pub student_id: i32,
}

/// A pre-existing entry of `feedback_questions`.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackQuestion {
    pub question_id: i32,
    pub section: Option<String>,
}

/// Row counts of every table the seeder touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub users: i64,
    pub courses: i64,
    pub feedback: i64,
    pub feedback_questions: i64,
    pub feedback_responses: i64,
    pub feedback_comments: i64,
}
