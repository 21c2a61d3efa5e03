//! Category catalog: the taxonomy as stored documents.

use std::sync::Arc;

use desk_core::entities::{Category, CategoryRef};
use desk_core::enums::{EntityType, TrailOp};
use desk_core::ids::{PREFIX_CATEGORY, check_id};
use desk_core::taxonomy::Taxonomy;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::store::{CollectionName, Filter};
use crate::trail::writer::TrailWriter;

/// Owns the `categories` collection.
///
/// The only write is [`CategoryCatalog::replace_all`]. It drops every
/// category and inserts fresh ones, so every `CategoryRef` issued before the
/// call dangles afterwards until the integrity scanner runs.
pub struct CategoryCatalog {
    db: Arc<DeskDb>,
    trail: Arc<TrailWriter>,
}

impl CategoryCatalog {
    #[must_use]
    pub const fn new(db: Arc<DeskDb>, trail: Arc<TrailWriter>) -> Self {
        Self { db, trail }
    }

    /// Replace the whole taxonomy.
    ///
    /// Not atomic: a concurrent reader can observe an empty or partially
    /// filled catalog. Category order and issue-type order follow `taxonomy`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete or any insert fails. Categories
    /// inserted before the failure stay in place. A failed trail append is
    /// logged, not returned.
    pub async fn replace_all(&self, taxonomy: &Taxonomy) -> Result<Vec<Category>, DatabaseError> {
        let categories = self.db.collection(CollectionName::Categories);
        let removed = categories.delete_many(&Filter::all()).await?;

        let mut inserted = Vec::with_capacity(taxonomy.len());
        for entry in taxonomy {
            let category = categories
                .insert_one(|id| Category {
                    id,
                    name: entry.name.clone(),
                    issue_types: entry.issue_types.clone(),
                })
                .await?;
            inserted.push(category);
        }

        tracing::info!(
            removed,
            inserted = inserted.len(),
            "replaced category taxonomy"
        );

        let names: Vec<&str> = inserted.iter().map(|c| c.name.as_str()).collect();
        self.trail.record_or_warn(
            TrailOp::Replace,
            EntityType::Category,
            "*",
            serde_json::json!({ "removed": removed, "categories": names }),
        );

        Ok(inserted)
    }

    /// First category named `name`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DatabaseError> {
        let mut found: Vec<Category> = self
            .db
            .collection(CollectionName::Categories)
            .find(&Filter::all().eq("name", name))
            .await?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.swap_remove(0)))
        }
    }

    /// Point lookup by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidReference` (wrapped) if `id` is not a
    /// category id at all, or `DatabaseError` if the store call fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Category>, DatabaseError> {
        let id = check_id(PREFIX_CATEGORY, EntityType::Category.as_str(), id)?;
        self.db
            .collection(CollectionName::Categories)
            .find_one(id)
            .await
    }

    /// Resolve a ticket's weak reference. `None` means the reference dangles.
    ///
    /// # Errors
    ///
    /// Same as [`CategoryCatalog::find_by_id`].
    pub async fn resolve(&self, category_ref: &CategoryRef) -> Result<Option<Category>, DatabaseError> {
        self.find_by_id(category_ref.id()).await
    }

    /// Every category in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store call fails.
    pub async fn list_all(&self) -> Result<Vec<Category>, DatabaseError> {
        self.db
            .collection(CollectionName::Categories)
            .find(&Filter::all())
            .await
    }
}
