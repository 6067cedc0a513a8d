//! Database integration for seeding fixture data.
//!
//! The [`Seeder`] owns the run's single connection and provides one method
//! per seeding phase, each committed as its own transaction.

mod seeder;

pub use seeder::{SeedError, Seeder};
