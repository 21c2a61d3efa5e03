//! Ticket repository: lifecycle and status changes.

use std::sync::Arc;

use chrono::Utc;
use desk_core::entities::{CategoryRef, Ticket};
use desk_core::enums::{EntityType, TicketStatus, TrailOp};
use desk_core::ids::{PREFIX_TICKET, check_id};
use serde::Deserialize;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::store::{CollectionName, Filter, StoredRow};
use crate::trail::writer::TrailWriter;

/// The part of a ticket document the integrity scanner reads.
///
/// Decodes from any document with a string `category_id`, whatever else it
/// holds.
#[derive(Debug, Deserialize)]
pub(crate) struct TicketLink {
    #[serde(rename = "category_id")]
    pub category_ref: CategoryRef,
}

/// Owns the `tickets` collection.
pub struct TicketRepository {
    db: Arc<DeskDb>,
    trail: Arc<TrailWriter>,
}

impl TicketRepository {
    #[must_use]
    pub const fn new(db: Arc<DeskDb>, trail: Arc<TrailWriter>) -> Self {
        Self { db, trail }
    }

    /// Create an `Open` ticket.
    ///
    /// Neither the category id nor the issue type is checked: the reference
    /// may already dangle when it is written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails. A failed trail append
    /// after the insert is logged, not returned.
    pub async fn create(
        &self,
        category_id: &str,
        issue_type: &str,
        description: &str,
    ) -> Result<Ticket, DatabaseError> {
        let now = Utc::now();
        let ticket = self
            .db
            .collection(CollectionName::Tickets)
            .insert_one(|id| Ticket {
                id,
                category_ref: CategoryRef::new(category_id),
                issue_type: issue_type.to_string(),
                description: description.to_string(),
                status: TicketStatus::Open,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.trail.record_or_warn(
            TrailOp::Create,
            EntityType::Ticket,
            &ticket.id,
            serde_json::to_value(&ticket).unwrap_or_default(),
        );

        Ok(ticket)
    }

    /// Overwrite a ticket's status. Any status may follow any status.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for a malformed id, `NotFound` if no ticket has it
    /// (including one deleted concurrently), or a store failure.
    pub async fn update_status(
        &self,
        ticket_id: &str,
        status: TicketStatus,
    ) -> Result<Ticket, DatabaseError> {
        let id = check_id(PREFIX_TICKET, EntityType::Ticket.as_str(), ticket_id)?;
        let now = Utc::now();
        let tickets = self.db.collection(CollectionName::Tickets);

        let matched = tickets
            .set_fields(
                id,
                &[
                    ("status", serde_json::json!(status)),
                    ("updated_at", serde_json::json!(now)),
                ],
            )
            .await?;
        if !matched {
            return Err(DatabaseError::not_found(EntityType::Ticket, id));
        }

        let ticket: Ticket = tickets
            .find_one(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Ticket, id))?;

        self.trail.record_or_warn(
            TrailOp::Update,
            EntityType::Ticket,
            id,
            serde_json::json!({ "status": status, "updated_at": now }),
        );

        Ok(ticket)
    }

    /// # Errors
    ///
    /// `InvalidReference` for a malformed id, or a store failure.
    pub async fn find_by_id(&self, ticket_id: &str) -> Result<Option<Ticket>, DatabaseError> {
        let id = check_id(PREFIX_TICKET, EntityType::Ticket.as_str(), ticket_id)?;
        self.db.collection(CollectionName::Tickets).find_one(id).await
    }

    /// Every ticket in creation order.
    ///
    /// Listings skip documents that do not decode as tickets and log them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn find_all(&self) -> Result<Vec<Ticket>, DatabaseError> {
        self.find_matching(&Filter::all()).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn find_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>, DatabaseError> {
        self.find_matching(&Filter::all().eq("status", status.as_str()))
            .await
    }

    /// Tickets whose reference points at `category_id`, dangling or not.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn find_by_category(&self, category_id: &str) -> Result<Vec<Ticket>, DatabaseError> {
        self.find_matching(&Filter::all().eq("category_id", category_id))
            .await
    }

    /// Every ticket row reduced to its category reference, in creation order.
    pub(crate) async fn links(&self) -> Result<Vec<StoredRow<TicketLink>>, DatabaseError> {
        self.db
            .collection(CollectionName::Tickets)
            .find_rows(&Filter::all())
            .await
    }

    async fn find_matching(&self, filter: &Filter) -> Result<Vec<Ticket>, DatabaseError> {
        let rows = self
            .db
            .collection(CollectionName::Tickets)
            .find_rows::<Ticket>(filter)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row.document {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    tracing::warn!(ticket = %row.id, error = %e, "skipping unreadable ticket");
                    None
                }
            })
            .collect())
    }

    /// Delete a ticket. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for a malformed id, or a store failure.
    pub async fn delete(&self, ticket_id: &str) -> Result<bool, DatabaseError> {
        let id = check_id(PREFIX_TICKET, EntityType::Ticket.as_str(), ticket_id)?;
        let removed = self.remove(id).await?;
        if removed {
            self.trail
                .record_or_warn(TrailOp::Delete, EntityType::Ticket, id, serde_json::Value::Null);
        }
        Ok(removed)
    }

    /// Delete without a trail record. The integrity scanner records its own
    /// `orphan_deleted` event instead.
    pub(crate) async fn remove(&self, id: &str) -> Result<bool, DatabaseError> {
        self.db.collection(CollectionName::Tickets).delete_one(id).await
    }
}
