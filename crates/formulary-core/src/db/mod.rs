//! Entity store for the formulary.
//!
//! Three independent collections (users, medicines, diseases) held in an
//! in-memory SQLite database. Nothing is written to disk; every
//! [`Database`] starts empty (or from fixtures) and is dropped with its owner.
//!
//! Updates and deletes against an unknown id are no-ops that report `false`
//! rather than an error.

mod schema;
mod users;
mod medicines;
mod diseases;
pub mod fixtures;

pub use schema::*;

use log::debug;
use rusqlite::Connection;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create an empty in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database populated with the fixture records.
    pub fn seeded() -> DbResult<Self> {
        let db = Self::open_in_memory()?;
        db.seed(&fixtures::Fixtures::load()?)?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert fixture records verbatim, keeping their ids and timestamps.
    pub fn seed(&self, fixtures: &fixtures::Fixtures) -> DbResult<()> {
        for user in &fixtures.users {
            self.insert_user_row(user)?;
        }
        for medicine in &fixtures.medicines {
            self.insert_medicine_row(medicine)?;
        }
        for disease in &fixtures.diseases {
            self.insert_disease_row(disease)?;
        }
        debug!(
            "seeded {} users, {} medicines, {} diseases",
            fixtures.users.len(),
            fixtures.medicines.len(),
            fixtures.diseases.len()
        );
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Fresh identifier for a new record.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time as an RFC 3339 timestamp.
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
