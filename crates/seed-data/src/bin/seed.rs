//! Default seed script - fills the feedback tables with fixture data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Connection settings come from `DATABASE_URL`, or the libpq `PG*`
//! variables when it is unset. Set `SEED_RNG` for a reproducible run.

use rand::{SeedableRng, rngs::StdRng};
use seed_data::builders::ScenarioBuilder;
use seed_data::config::{DatabaseConfig, SeedConfig};
use seed_data::db::Seeder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed_config = SeedConfig::from_env()?;
    let options = DatabaseConfig::from_env().connect_options()?;

    tracing::info!(
        "Connecting to database {} at {}:{}",
        options.get_database().unwrap_or("<default>"),
        options.get_host(),
        options.get_port()
    );

    let mut seeder = Seeder::connect(&options).await?;

    tracing::info!("Connected to database");

    let mut rng = match seed_config.rng_seed {
        Some(seed) => {
            tracing::info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let result = ScenarioBuilder::from_config(seed_config)
        .with_metrics(true)
        .build(&mut seeder, &mut rng)
        .await?;

    let counts = seeder.table_counts().await?;
    seeder.close().await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!(
        "  Users: {} generated, {} inserted",
        result.users.len(),
        result.users_inserted
    );
    tracing::info!(
        "  Courses: {} generated, {} inserted",
        result.courses.len(),
        result.courses_inserted
    );
    tracing::info!("  Feedback: {}", result.feedback.len());
    tracing::info!(
        "  Responses: {} ({} feedback rows x {} questions)",
        result.response_count,
        result.feedback_rows_read,
        result.question_count
    );
    tracing::info!("  Comments: {}", result.comments.len());

    if let Some(metrics) = &result.metrics {
        tracing::info!(
            "  Took {} ms generating, {} ms in the database",
            metrics.generation_time_ms,
            metrics.seeding_time_ms
        );
    }

    tracing::info!("Table totals:");
    tracing::info!("  users: {}", counts.users);
    tracing::info!("  courses: {}", counts.courses);
    tracing::info!("  feedback: {}", counts.feedback);
    tracing::info!("  feedback_questions: {}", counts.feedback_questions);
    tracing::info!("  feedback_responses: {}", counts.feedback_responses);
    tracing::info!("  feedback_comments: {}", counts.feedback_comments);

    Ok(())
}
