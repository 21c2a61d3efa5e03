//! Orphan detection and repair.
//!
//! A taxonomy reload gives every category a new id, so every ticket written
//! before it holds a dangling reference. The scanner walks all tickets once,
//! resolves each reference through the catalog, and deletes the tickets that
//! no longer resolve. Running it twice in a row deletes nothing the second
//! time.

use desk_core::enums::{EntityType, TrailOp};
use serde::Serialize;

use crate::error::DatabaseError;
use crate::repos::catalog::CategoryCatalog;
use crate::repos::ticket::TicketRepository;
use crate::trail::writer::TrailWriter;

/// A ticket deleted because its category reference dangled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedReference {
    pub ticket_id: String,
    pub category_id: String,
}

/// A ticket the scan had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub ticket_id: String,
    pub error: String,
}

/// Outcome of one full pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub scanned: usize,
    pub orphans: Vec<OrphanedReference>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.orphans.len()
    }

    /// No orphans and no failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.failures.is_empty()
    }
}

/// Full-pass integrity scanner over an injected catalog and repository.
pub struct IntegrityScanner<'a> {
    catalog: &'a CategoryCatalog,
    tickets: &'a TicketRepository,
    trail: &'a TrailWriter,
}

impl<'a> IntegrityScanner<'a> {
    #[must_use]
    pub const fn new(
        catalog: &'a CategoryCatalog,
        tickets: &'a TicketRepository,
        trail: &'a TrailWriter,
    ) -> Self {
        Self {
            catalog,
            tickets,
            trail,
        }
    }

    /// Delete every ticket whose category no longer resolves.
    ///
    /// Only each ticket's `category_id` is read, so a document that is
    /// otherwise unreadable is still checked. A ticket with no readable
    /// reference, or whose lookup or delete fails, is logged, recorded in
    /// [`ScanReport::failures`], and skipped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the initial ticket listing fails.
    pub async fn scan(&self) -> Result<ScanReport, DatabaseError> {
        let rows = self.tickets.links().await?;
        let mut report = ScanReport {
            scanned: rows.len(),
            ..ScanReport::default()
        };

        for row in rows {
            let ticket_id = row.id;
            let category_ref = match row.document {
                Ok(link) => link.category_ref,
                Err(e) => {
                    tracing::warn!(ticket = %ticket_id, error = %e, "unreadable category reference, skipping");
                    report.failures.push(ScanFailure {
                        ticket_id,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self.catalog.resolve(&category_ref).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                // A malformed reference can never resolve.
                Err(e) if e.is_invalid_reference() => {}
                Err(e) => {
                    tracing::warn!(ticket = %ticket_id, error = %e, "category lookup failed, skipping");
                    report.failures.push(ScanFailure {
                        ticket_id,
                        error: e.to_string(),
                    });
                    continue;
                }
            }

            match self.tickets.remove(&ticket_id).await {
                Ok(true) => {
                    tracing::warn!(
                        ticket = %ticket_id,
                        category = %category_ref,
                        "deleted orphaned ticket"
                    );
                    self.trail.record_or_warn(
                        TrailOp::OrphanDeleted,
                        EntityType::Ticket,
                        &ticket_id,
                        serde_json::json!({ "category_id": category_ref }),
                    );
                    report.orphans.push(OrphanedReference {
                        ticket_id,
                        category_id: category_ref.id().to_string(),
                    });
                }
                Ok(false) => {
                    tracing::debug!(ticket = %ticket_id, "orphan already gone");
                }
                Err(e) => {
                    tracing::warn!(ticket = %ticket_id, error = %e, "failed to delete orphan, skipping");
                    report.failures.push(ScanFailure {
                        ticket_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted(),
            failures = report.failures.len(),
            "integrity scan finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use desk_core::taxonomy::Taxonomy;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::service::DeskService;
    use crate::test_support::test_service;

    async fn insert_raw(svc: &DeskService, id: &str, doc: &str) {
        svc.db()
            .conn()
            .execute("INSERT INTO tickets (id, doc) VALUES (?1, ?2)", [id, doc])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unreadable_ticket_is_skipped_and_later_orphans_still_go() {
        let svc = test_service().await;
        let network = svc
            .catalog()
            .replace_all(&Taxonomy::from_pairs([("Network", ["Outage"])]))
            .await
            .unwrap()
            .remove(0);
        let kept = svc.tickets().create(&network.id, "Outage", "down").await.unwrap();
        insert_raw(&svc, "tkt-0000bad1", r#"{"status": "open", "category_id": 7}"#).await;
        let orphan = svc.tickets().create("cat-00000000", "Outage", "gone").await.unwrap();

        let report = svc.scanner().scan().await.unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(
            report.orphans,
            vec![OrphanedReference {
                ticket_id: orphan.id.clone(),
                category_id: "cat-00000000".into(),
            }]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].ticket_id, "tkt-0000bad1");
        assert!(!report.is_clean());

        assert_eq!(svc.tickets().find_all().await.unwrap(), vec![kept]);
        assert!(svc.tickets().find_by_id(&orphan.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn old_format_ticket_is_judged_by_its_reference_alone() {
        let svc = test_service().await;
        let network = svc
            .catalog()
            .replace_all(&Taxonomy::from_pairs([("Network", ["Outage"])]))
            .await
            .unwrap()
            .remove(0);
        let live = format!(r#"{{"status": "Open", "category_id": "{}"}}"#, network.id);
        insert_raw(&svc, "tkt-0000a11e", &live).await;
        insert_raw(&svc, "tkt-0000dead", r#"{"status": "Open", "category_id": "cat-00000000"}"#).await;

        let report = svc.scanner().scan().await.unwrap();

        assert!(report.failures.is_empty());
        let deleted: Vec<_> = report.orphans.iter().map(|o| o.ticket_id.as_str()).collect();
        assert_eq!(deleted, ["tkt-0000dead"]);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT id FROM tickets", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "tkt-0000a11e");
        assert!(rows.next().await.unwrap().is_none());
    }

    #[test]
    fn empty_report_is_clean() {
        let report = ScanReport::default();
        assert!(report.is_clean());
        assert_eq!(report.deleted(), 0);
    }

    #[test]
    fn report_with_failure_is_not_clean() {
        let report = ScanReport {
            scanned: 1,
            orphans: Vec::new(),
            failures: vec![ScanFailure {
                ticket_id: "tkt-00000001".into(),
                error: "boom".into(),
            }],
        };
        assert!(!report.is_clean());
        assert_eq!(report.deleted(), 0);
    }
}
