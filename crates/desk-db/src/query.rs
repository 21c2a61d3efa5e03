//! Joined views over tickets and categories.
//!
//! The store has no joins, so the facade resolves each ticket's category in
//! application code. A reference that does not resolve is labeled with the
//! unknown-category sentinel instead of failing the read.

use std::collections::HashMap;

use desk_core::entities::{Category, Ticket};
use desk_core::enums::{EntityType, TicketStatus};
use desk_core::errors::CoreError;
use desk_core::responses::LabeledTicket;

use crate::error::DatabaseError;
use crate::repos::catalog::CategoryCatalog;
use crate::repos::ticket::TicketRepository;

/// Read-only composition of the catalog and the ticket repository.
pub struct QueryFacade<'a> {
    catalog: &'a CategoryCatalog,
    tickets: &'a TicketRepository,
    unknown_label: &'a str,
}

impl<'a> QueryFacade<'a> {
    #[must_use]
    pub const fn new(
        catalog: &'a CategoryCatalog,
        tickets: &'a TicketRepository,
        unknown_label: &'a str,
    ) -> Self {
        Self {
            catalog,
            tickets,
            unknown_label,
        }
    }

    /// Every ticket with its category name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on store failure. Dangling or malformed
    /// references never fail.
    pub async fn list_tickets_with_category(&self) -> Result<Vec<LabeledTicket>, DatabaseError> {
        let tickets = self.tickets.find_all().await?;
        self.label(tickets).await
    }

    /// Tickets filed under the category called `name`.
    ///
    /// An unknown name and a known category with no tickets both give an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on store failure.
    pub async fn list_tickets_by_category_name(&self, name: &str) -> Result<Vec<Ticket>, DatabaseError> {
        match self.catalog.find_by_name(name).await? {
            Some(category) => self.tickets.find_by_category(&category.id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Tickets in `status`, each with its category name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on store failure.
    pub async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<LabeledTicket>, DatabaseError> {
        let tickets = self.tickets.find_by_status(status).await?;
        self.label(tickets).await
    }

    /// One ticket with its category name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on store failure.
    pub async fn label_ticket(&self, ticket: Ticket) -> Result<LabeledTicket, DatabaseError> {
        let mut labeled = self.label(vec![ticket]).await?;
        labeled
            .pop()
            .ok_or_else(|| DatabaseError::Other(anyhow::anyhow!("labeling returned no ticket")))
    }

    /// Categories in the order a numbered chooser should offer them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on store failure.
    pub async fn categories_for_selection(&self) -> Result<Vec<Category>, DatabaseError> {
        self.catalog.list_all().await
    }

    /// Strict check of a category/issue-type pair before creating a ticket.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for a malformed id, `NotFound` if the category is
    /// gone, `Validation` if `issue_type` is not one of its issue types.
    pub async fn check_selection(
        &self,
        category_id: &str,
        issue_type: &str,
    ) -> Result<Category, DatabaseError> {
        let category = self
            .catalog
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Category, category_id))?;
        if !category.allows(issue_type) {
            return Err(CoreError::Validation(format!(
                "'{issue_type}' is not an issue type of category '{}'",
                category.name
            ))
            .into());
        }
        Ok(category)
    }

    async fn label(&self, tickets: Vec<Ticket>) -> Result<Vec<LabeledTicket>, DatabaseError> {
        let mut names: HashMap<String, String> = HashMap::new();
        let mut labeled = Vec::with_capacity(tickets.len());

        for ticket in tickets {
            let key = ticket.category_ref.id().to_string();
            let category = if let Some(name) = names.get(&key) {
                name.clone()
            } else {
                let name = match self.catalog.resolve(&ticket.category_ref).await {
                    Ok(Some(category)) => category.name,
                    Ok(None) => self.unknown_label.to_string(),
                    Err(e) if e.is_invalid_reference() || e.is_not_found() => {
                        self.unknown_label.to_string()
                    }
                    Err(e) => return Err(e),
                };
                names.insert(key, name.clone());
                name
            };
            labeled.push(LabeledTicket { ticket, category });
        }

        Ok(labeled)
    }
}
