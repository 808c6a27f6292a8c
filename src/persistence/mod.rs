//! Local persistence and database migrations.
//!
//! Kudos can store feedback in a local `SQLite` database instead of the
//! hosted table. The schema is managed with Diesel migrations so the database
//! can be created and upgraded consistently across machines.

mod error;
mod feedback_store;
mod migrator;

pub use error::PersistenceError;
pub use feedback_store::FeedbackStore;
pub use migrator::{INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database};
