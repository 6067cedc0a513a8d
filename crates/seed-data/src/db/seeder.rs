//! Database seeding utilities.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, Transaction};
use thiserror::Error;
use tracing::info;

use crate::generators::{
    GeneratedComment, GeneratedCourse, GeneratedFeedback, GeneratedResponse, GeneratedUser,
};
use crate::models::{FeedbackQuestion, FeedbackRow, TableCounts};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Database seeder for inserting generated fixture data.
///
/// Owns the single connection used for the whole run. Every `seed_*` method
/// is one phase: it runs in its own transaction and commits before
/// returning, so an error leaves earlier phases committed and rolls back the
/// failing one. The connection is released on drop if [`Seeder::close`] is
/// never reached.
pub struct Seeder {
    conn: PgConnection,
}

impl Seeder {
    /// Creates a seeder over an already open connection.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Opens a connection with the given options.
    pub async fn connect(options: &PgConnectOptions) -> Result<Self, SeedError> {
        let conn = PgConnection::connect_with(options).await?;
        Ok(Self::new(conn))
    }

    async fn begin(&mut self) -> Result<Transaction<'_, Postgres>, SeedError> {
        Ok(self.conn.begin().await?)
    }

    /// Seeds students, skipping ids that already exist.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn seed_users(&mut self, users: &[GeneratedUser]) -> Result<u64, SeedError> {
        info!("Seeding {} users...", users.len());

        let mut tx = self.begin().await?;
        let mut inserted = 0;

        for user in users {
            inserted += sqlx::query(
                r#"
                INSERT INTO users (user_id, full_name, email, password, role, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (user_id) DO NOTHING
                "#,
            )
            .bind(user.id)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.role)
            .bind(user.created_at)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        info!(
            "Seeded {} users ({} already present)",
            inserted,
            users.len() as u64 - inserted
        );
        Ok(inserted)
    }

    /// Seeds courses, skipping ids that already exist.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn seed_courses(&mut self, courses: &[GeneratedCourse]) -> Result<u64, SeedError> {
        info!("Seeding {} courses...", courses.len());

        let mut tx = self.begin().await?;
        let mut inserted = 0;

        for course in courses {
            inserted += sqlx::query(
                r#"
                INSERT INTO courses (course_id, course_name, instructor_name, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (course_id) DO NOTHING
                "#,
            )
            .bind(course.id)
            .bind(&course.name)
            .bind(&course.instructor_name)
            .bind(course.created_at)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        info!(
            "Seeded {} courses ({} already present)",
            inserted,
            courses.len() as u64 - inserted
        );
        Ok(inserted)
    }

    /// Seeds overall course feedback.
    pub async fn seed_feedback(&mut self, feedback: &[GeneratedFeedback]) -> Result<(), SeedError> {
        info!("Seeding {} feedback records...", feedback.len());

        let mut tx = self.begin().await?;

        for f in feedback {
            sqlx::query(
                r#"
                INSERT INTO feedback (course_id, student_id, rating, comment, submitted_at, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(f.course_id)
            .bind(f.student_id)
            .bind(f.rating)
            .bind(&f.comment)
            .bind(f.submitted_at)
            .bind(f.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Seeded {} feedback records", feedback.len());
        Ok(())
    }

    /// Seeds per-question responses.
    pub async fn seed_responses(
        &mut self,
        responses: &[GeneratedResponse],
    ) -> Result<(), SeedError> {
        info!("Seeding {} responses...", responses.len());

        let mut tx = self.begin().await?;

        for response in responses {
            sqlx::query(
                r#"
                INSERT INTO feedback_responses (student_id, course_id, instructor_name, question_id, rating, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(response.student_id)
            .bind(response.course_id)
            .bind(&response.instructor_name)
            .bind(response.question_id)
            .bind(response.rating)
            .bind(response.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Seeded {} responses", responses.len());
        Ok(())
    }

    /// Seeds free-text course and instructor comments.
    pub async fn seed_comments(&mut self, comments: &[GeneratedComment]) -> Result<(), SeedError> {
        info!("Seeding {} comments...", comments.len());

        let mut tx = self.begin().await?;

        for comment in comments {
            sqlx::query(
                r#"
                INSERT INTO feedback_comments (student_id, course_id, instructor_name, course_comment, instructor_comment, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(comment.student_id)
            .bind(comment.course_id)
            .bind(&comment.instructor_name)
            .bind(&comment.course_comment)
            .bind(&comment.instructor_comment)
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Seeded {} comments", comments.len());
        Ok(())
    }

    /// Loads the externally maintained question set.
    pub async fn load_questions(&mut self) -> Result<Vec<FeedbackQuestion>, SeedError> {
        let questions = sqlx::query_as(
            r#"
            SELECT question_id, section
            FROM feedback_questions
            ORDER BY question_id
            "#,
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(questions)
    }

    /// Loads every feedback row, including those from earlier runs.
    pub async fn load_feedback(&mut self) -> Result<Vec<FeedbackRow>, SeedError> {
        let rows = sqlx::query_as(
            r#"
            SELECT feedback_id, course_id, student_id
            FROM feedback
            ORDER BY feedback_id
            "#,
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(rows)
    }

    /// Counts the rows of every table the seeder touches.
    pub async fn table_counts(&mut self) -> Result<TableCounts, SeedError> {
        Ok(TableCounts {
            users: self.count("users").await?,
            courses: self.count("courses").await?,
            feedback: self.count("feedback").await?,
            feedback_questions: self.count("feedback_questions").await?,
            feedback_responses: self.count("feedback_responses").await?,
            feedback_comments: self.count("feedback_comments").await?,
        })
    }

    async fn count(&mut self, table: &'static str) -> Result<i64, SeedError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }

    /// Closes the connection gracefully.
    pub async fn close(self) -> Result<(), SeedError> {
        self.conn.close().await?;
        Ok(())
    }

    /// Returns the connection for advanced usage.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
