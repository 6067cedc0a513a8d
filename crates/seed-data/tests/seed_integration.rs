//! Integration tests for a full seeding run.
//!
//! These tests verify the row counts and id ranges the seeder leaves behind:
//! - One run on an empty database
//! - Re-runs skipping existing users and courses but appending the rest
//! - A failing phase leaving earlier phases committed
//!
//! To run these tests, you need a PostgreSQL database and the DATABASE_URL
//! environment variable set.
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p seed-data`
//!
//! Note: each test creates its own schema, loads `fixtures/schema.sql` into it
//! and drops it afterwards, so they can safely run against a development
//! database.

use rand::{SeedableRng, rngs::StdRng};
use seed_data::builders::ScenarioBuilder;
use seed_data::db::{SeedError, Seeder};
use sqlx::{Connection, PgConnection};
use std::env;

const SCHEMA_SQL: &str = include_str!("fixtures/schema.sql");

/// A seeder whose connection is confined to a private schema.
struct TestDb {
    seeder: Seeder,
    schema: String,
}

/// Get a seeder on a fresh schema, skipping tests if DATABASE_URL is not set.
async fn get_test_db(question_count: usize) -> Option<TestDb> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let mut conn = match PgConnection::connect(&database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    let schema = format!("seed_test_{}", rand::random::<u32>());
    sqlx::raw_sql(&format!(
        "CREATE SCHEMA {schema}; SET search_path TO {schema};"
    ))
    .execute(&mut conn)
    .await
    .expect("Failed to create test schema");

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&mut conn)
        .await
        .expect("Failed to load test schema");

    for i in 0..question_count {
        let section = if i % 2 == 0 { "course" } else { "instructor" };
        sqlx::query(
            "INSERT INTO feedback_questions (section, question_text) VALUES ($1, $2)",
        )
        .bind(section)
        .bind(format!("Question {}", i + 1))
        .execute(&mut conn)
        .await
        .expect("Failed to create question");
    }

    Some(TestDb {
        seeder: Seeder::new(conn),
        schema,
    })
}

impl TestDb {
    async fn scalar(&mut self, sql: &str) -> i64 {
        sqlx::query_scalar(sql)
            .fetch_one(self.seeder.connection())
            .await
            .expect("Failed to run query")
    }

    /// Drops the private schema and closes the connection.
    async fn cleanup(mut self) {
        let _ = sqlx::raw_sql(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(self.seeder.connection())
            .await;
        let _ = self.seeder.close().await;
    }
}

fn small_scenario() -> ScenarioBuilder {
    ScenarioBuilder::new()
        .with_students(20)
        .with_courses(3)
        .with_feedback(10)
        .with_comments(5)
}

#[tokio::test]
async fn test_full_run_on_empty_database() {
    let Some(mut db) = get_test_db(5).await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let result = ScenarioBuilder::new()
        .build(&mut db.seeder, &mut rng)
        .await
        .expect("Seeding failed");

    assert_eq!(result.users_inserted, 100);
    assert_eq!(result.courses_inserted, 10);
    assert_eq!(result.question_count, 5);
    assert_eq!(result.feedback_rows_read, 300);
    assert_eq!(result.response_count, 1500);
    assert!(result.metrics.is_none());

    let counts = db.seeder.table_counts().await.expect("Failed to count");
    assert_eq!(counts.users, 100);
    assert_eq!(counts.courses, 10);
    assert_eq!(counts.feedback, 300);
    assert_eq!(counts.feedback_questions, 5);
    assert_eq!(counts.feedback_responses, 1500);
    assert_eq!(counts.feedback_comments, 200);

    assert_eq!(db.scalar("SELECT MIN(user_id)::int8 FROM users").await, 1);
    assert_eq!(db.scalar("SELECT MAX(user_id)::int8 FROM users").await, 100);
    assert_eq!(
        db.scalar("SELECT COUNT(*) FROM users WHERE role <> 'student'")
            .await,
        0
    );
    assert_eq!(db.scalar("SELECT MIN(course_id)::int8 FROM courses").await, 1);
    assert_eq!(db.scalar("SELECT MAX(course_id)::int8 FROM courses").await, 10);
    assert_eq!(
        db.scalar(
            "SELECT COUNT(*) FROM feedback
             WHERE course_id NOT BETWEEN 1 AND 10
                OR student_id NOT BETWEEN 1 AND 100
                OR rating NOT BETWEEN 1 AND 5
                OR created_at <> submitted_at"
        )
        .await,
        0
    );
    assert_eq!(
        db.scalar(
            "SELECT COUNT(*) FROM feedback_responses
             WHERE course_id NOT BETWEEN 1 AND 10
                OR student_id NOT BETWEEN 1 AND 100
                OR rating NOT BETWEEN 1 AND 5"
        )
        .await,
        0
    );

    db.cleanup().await;
}

#[tokio::test]
async fn test_rerun_skips_users_and_courses_but_appends_the_rest() {
    let Some(mut db) = get_test_db(2).await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(7);

    let first = small_scenario()
        .build(&mut db.seeder, &mut rng)
        .await
        .expect("First run failed");
    assert_eq!(first.users_inserted, 20);
    assert_eq!(first.courses_inserted, 3);
    assert_eq!(first.response_count, 20);

    let second = small_scenario()
        .build(&mut db.seeder, &mut rng)
        .await
        .expect("Second run failed");
    assert_eq!(second.users_inserted, 0);
    assert_eq!(second.courses_inserted, 0);
    // Responses are generated for every stored feedback row, old ones included
    assert_eq!(second.feedback_rows_read, 20);
    assert_eq!(second.response_count, 40);

    let counts = db.seeder.table_counts().await.expect("Failed to count");
    assert_eq!(counts.users, 20);
    assert_eq!(counts.courses, 3);
    assert_eq!(counts.feedback, 20);
    assert_eq!(counts.feedback_responses, 60);
    assert_eq!(counts.feedback_comments, 10);

    db.cleanup().await;
}

#[tokio::test]
async fn test_no_questions_means_no_responses() {
    let Some(mut db) = get_test_db(0).await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(11);

    let result = small_scenario()
        .with_metrics(true)
        .build(&mut db.seeder, &mut rng)
        .await
        .expect("Seeding failed");

    assert_eq!(result.question_count, 0);
    assert_eq!(result.response_count, 0);
    assert!(result.metrics.is_some());

    let counts = db.seeder.table_counts().await.expect("Failed to count");
    assert_eq!(counts.feedback, 10);
    assert_eq!(counts.feedback_responses, 0);
    assert_eq!(counts.feedback_comments, 5);

    db.cleanup().await;
}

#[tokio::test]
async fn test_failure_keeps_committed_phases() {
    let Some(mut db) = get_test_db(3).await else {
        return;
    };
    sqlx::raw_sql("DROP TABLE feedback_questions CASCADE")
        .execute(db.seeder.connection())
        .await
        .expect("Failed to drop questions");
    let mut rng = StdRng::seed_from_u64(13);

    let err = small_scenario()
        .build(&mut db.seeder, &mut rng)
        .await
        .expect_err("Seeding should fail without feedback_questions");
    assert!(matches!(err, SeedError::Database(_)));

    assert_eq!(db.scalar("SELECT COUNT(*) FROM users").await, 20);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM courses").await, 3);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback").await, 10);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback_responses").await, 0);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback_comments").await, 0);

    db.cleanup().await;
}

#[tokio::test]
async fn test_failed_phase_is_rolled_back() {
    let Some(mut db) = get_test_db(1).await else {
        return;
    };
    // Only student 1 may comment, so the comments phase fails part way through
    sqlx::raw_sql("ALTER TABLE feedback_comments ADD CONSTRAINT only_first CHECK (student_id = 1)")
        .execute(db.seeder.connection())
        .await
        .expect("Failed to add constraint");
    let mut rng = StdRng::seed_from_u64(17);

    let err = ScenarioBuilder::new()
        .with_students(2)
        .with_courses(2)
        .with_feedback(4)
        .with_comments(50)
        .build(&mut db.seeder, &mut rng)
        .await
        .expect_err("Comments from student 2 should be rejected");
    assert!(matches!(err, SeedError::Database(_)));

    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback").await, 4);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback_responses").await, 4);
    assert_eq!(db.scalar("SELECT COUNT(*) FROM feedback_comments").await, 0);

    db.cleanup().await;
}
