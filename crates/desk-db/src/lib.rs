//! # desk-db
//!
//! Document storage and referential integrity for desk.
//!
//! The store is embedded libSQL used as a schemaless document store: two
//! collections (`categories`, `tickets`) of JSON documents with store-generated
//! ids and no foreign keys. On top of it sit four components:
//!
//! - [`repos::catalog::CategoryCatalog`] owns the taxonomy and replaces it wholesale.
//! - [`repos::ticket::TicketRepository`] owns the ticket lifecycle.
//! - [`integrity::IntegrityScanner`] deletes tickets whose category is gone.
//! - [`query::QueryFacade`] joins tickets with category names in application code.
//!
//! [`service::DeskService`] wires them together around one database handle.

pub mod error;
pub mod helpers;
pub mod integrity;
mod migrations;
pub mod query;
pub mod repos;
pub mod service;
pub mod store;
pub mod trail;

#[cfg(test)]
mod test_support;

use std::future::Future;
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all desk document operations.
///
/// Wraps a libSQL database and connection. Every store call made through
/// [`store::Collection`] is bounded by the optional per-call timeout.
pub struct DeskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    timeout: Option<Duration>,
}

impl DeskDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open. Foreign keys are left off.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let desk_db = Self {
            db,
            conn,
            timeout: None,
        };
        desk_db.run_migrations().await?;
        tracing::debug!(path, "opened document store");
        Ok(desk_db)
    }

    /// Bound every subsequent store call by `timeout`. `None` = unbounded.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tkt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        self.bounded(async {
            let mut rows = self
                .conn
                .query(
                    &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                    (),
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            Ok::<_, DatabaseError>(row.get::<String>(0)?)
        })
        .await
    }

    /// Run a store call under the configured timeout.
    pub(crate) async fn bounded<T, F>(&self, call: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| DatabaseError::Timeout(limit))?,
            None => call.await,
        }
    }
}
