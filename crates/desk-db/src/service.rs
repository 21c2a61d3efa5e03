//! Service layer wiring the components around one store handle.
//!
//! `DeskService` owns the database, the trail writer, the catalog, and the
//! ticket repository. The scanner and the facade borrow the latter two, so
//! there is no global taxonomy state: whoever holds the service holds the
//! catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use desk_config::DeskConfig;
use desk_core::entities::Category;
use desk_core::ids::PREFIX_RUN;
use desk_core::responses::UNKNOWN_CATEGORY;
use desk_core::taxonomy::Taxonomy;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::integrity::{IntegrityScanner, ScanReport};
use crate::query::QueryFacade;
use crate::repos::catalog::CategoryCatalog;
use crate::repos::ticket::TicketRepository;
use crate::trail::writer::TrailWriter;

/// One process's view of the ticket system.
pub struct DeskService {
    db: Arc<DeskDb>,
    trail: Arc<TrailWriter>,
    catalog: CategoryCatalog,
    tickets: TicketRepository,
    unknown_label: String,
}

impl DeskService {
    /// Create a service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `trail_dir` - Directory for JSONL trail files. `None` disables the trail.
    /// * `timeout` - Bound for every store call. `None` = unbounded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the trail
    /// directory cannot be created.
    pub async fn new_local(
        db_path: &str,
        trail_dir: Option<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, DatabaseError> {
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
            }
        }

        let db = DeskDb::open_local(db_path).await?.with_timeout(timeout);
        let trail = match trail_dir {
            Some(dir) => {
                let run_id = db.generate_id(PREFIX_RUN).await?;
                TrailWriter::new(dir, run_id)?
            }
            None => TrailWriter::disabled(),
        };
        Ok(Self::from_db(db, trail))
    }

    /// Open the service described by `config`.
    ///
    /// # Errors
    ///
    /// Same as [`DeskService::new_local`].
    pub async fn open(config: &DeskConfig) -> Result<Self, DatabaseError> {
        let trail_dir = config
            .trail
            .enabled
            .then(|| PathBuf::from(&config.trail.dir));
        let service = Self::new_local(&config.store.path, trail_dir, config.store.timeout()).await?;
        Ok(service.with_unknown_label(config.general.unknown_category_label.clone()))
    }

    /// Create from an existing `DeskDb` (for testing).
    #[must_use]
    pub fn from_db(db: DeskDb, trail: TrailWriter) -> Self {
        let db = Arc::new(db);
        let trail = Arc::new(trail);
        Self {
            catalog: CategoryCatalog::new(Arc::clone(&db), Arc::clone(&trail)),
            tickets: TicketRepository::new(Arc::clone(&db), Arc::clone(&trail)),
            db,
            trail,
            unknown_label: UNKNOWN_CATEGORY.to_string(),
        }
    }

    /// Label used for tickets whose category no longer resolves.
    #[must_use]
    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    #[must_use]
    pub fn db(&self) -> &DeskDb {
        &self.db
    }

    #[must_use]
    pub fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    #[must_use]
    pub const fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn tickets(&self) -> &TicketRepository {
        &self.tickets
    }

    #[must_use]
    pub fn scanner(&self) -> IntegrityScanner<'_> {
        IntegrityScanner::new(&self.catalog, &self.tickets, &self.trail)
    }

    #[must_use]
    pub fn queries(&self) -> QueryFacade<'_> {
        QueryFacade::new(&self.catalog, &self.tickets, &self.unknown_label)
    }

    /// Replace the taxonomy, then repair the tickets it orphaned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replacement or the initial scan listing
    /// fails.
    pub async fn reload_taxonomy(
        &self,
        taxonomy: &Taxonomy,
    ) -> Result<(Vec<Category>, ScanReport), DatabaseError> {
        let categories = self.catalog.replace_all(taxonomy).await?;
        let report = self.scanner().scan().await?;
        Ok((categories, report))
    }
}
