//! Document collections over libSQL.
//!
//! The only contract the rest of desk relies on: insert-one (returns the
//! generated id), find-one-by-id, find-all-matching, set-fields-by-id,
//! delete-one-by-id, and delete-all-matching. No joins, no foreign keys, no
//! multi-document transactions.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::helpers::{decode_document, encode_document};

/// The named collections of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Categories,
    Tickets,
}

impl CollectionName {
    /// Backing table name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tickets => "tickets",
        }
    }

    /// Prefix for ids generated on insert.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Categories => desk_core::ids::PREFIX_CATEGORY,
            Self::Tickets => desk_core::ids::PREFIX_TICKET,
        }
    }
}

/// Equality filter on top-level document fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(&'static str, String)>,
}

impl Filter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value`.
    #[must_use]
    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    /// Render as a SQL `WHERE` clause with placeholders starting at `?1`.
    fn to_sql(&self) -> (String, Vec<libsql::Value>) {
        if self.conditions.is_empty() {
            return (String::new(), Vec::new());
        }
        let mut clauses = Vec::with_capacity(self.conditions.len());
        let mut params = Vec::with_capacity(self.conditions.len());
        for (field, value) in &self.conditions {
            params.push(libsql::Value::Text(value.clone()));
            clauses.push(format!(
                "json_extract(doc, '$.{field}') = ?{}",
                params.len()
            ));
        }
        (format!("WHERE {}", clauses.join(" AND ")), params)
    }
}

/// One stored row, decoded on its own.
///
/// `id` comes from the row itself, so it is known even when the document
/// does not decode.
#[derive(Debug)]
pub struct StoredRow<T> {
    pub id: String,
    pub document: Result<T, DatabaseError>,
}

/// A handle on one named collection.
pub struct Collection<'a> {
    db: &'a DeskDb,
    name: CollectionName,
}

impl DeskDb {
    #[must_use]
    pub const fn collection(&self, name: CollectionName) -> Collection<'_> {
        Collection { db: self, name }
    }
}

impl Collection<'_> {
    #[must_use]
    pub const fn name(&self) -> CollectionName {
        self.name
    }

    /// Insert one document. The store generates the id and hands it to
    /// `build`, which produces the document to store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if id generation, encoding, or the insert fails.
    pub async fn insert_one<T, B>(&self, build: B) -> Result<T, DatabaseError>
    where
        T: Serialize,
        B: FnOnce(String) -> T,
    {
        let table = self.name.as_str();
        let id = self.db.generate_id(self.name.id_prefix()).await?;
        let document = build(id.clone());
        let doc = encode_document(table, &document)?;

        self.db
            .bounded(async {
                self.db
                    .conn()
                    .execute(
                        &format!("INSERT INTO {table} (id, doc) VALUES (?1, ?2)"),
                        libsql::params![id.as_str(), doc.as_str()],
                    )
                    .await?;
                Ok::<_, DatabaseError>(())
            })
            .await?;

        tracing::debug!(collection = table, %id, "inserted document");
        Ok(document)
    }

    /// Fetch one document by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the document cannot be
    /// decoded.
    pub async fn find_one<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, DatabaseError> {
        let table = self.name.as_str();
        self.db
            .bounded(async {
                let mut rows = self
                    .db
                    .conn()
                    .query(&format!("SELECT doc FROM {table} WHERE id = ?1"), [id])
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(decode_document(table, &row.get::<String>(0)?)?)),
                    None => Ok::<_, DatabaseError>(None),
                }
            })
            .await
    }

    /// Fetch every document matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a document cannot be
    /// decoded.
    pub async fn find<T: DeserializeOwned>(&self, filter: &Filter) -> Result<Vec<T>, DatabaseError> {
        let table = self.name.as_str();
        let (where_clause, params) = filter.to_sql();
        let sql = format!("SELECT doc FROM {table} {where_clause} ORDER BY seq");

        self.db
            .bounded(async {
                let mut rows = self
                    .db
                    .conn()
                    .query(&sql, libsql::params_from_iter(params))
                    .await?;
                let mut documents = Vec::new();
                while let Some(row) = rows.next().await? {
                    documents.push(decode_document(table, &row.get::<String>(0)?)?);
                }
                Ok::<_, DatabaseError>(documents)
            })
            .await
    }

    /// Like [`Collection::find`], but a document that does not decode fails
    /// only its own row.
    ///
    /// Other processes share the store, so a row may hold a document this
    /// build cannot read.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_rows<T: DeserializeOwned>(
        &self,
        filter: &Filter,
    ) -> Result<Vec<StoredRow<T>>, DatabaseError> {
        let table = self.name.as_str();
        let (where_clause, params) = filter.to_sql();
        let sql = format!("SELECT id, doc FROM {table} {where_clause} ORDER BY seq");

        self.db
            .bounded(async {
                let mut rows = self
                    .db
                    .conn()
                    .query(&sql, libsql::params_from_iter(params))
                    .await?;
                let mut stored = Vec::new();
                while let Some(row) = rows.next().await? {
                    stored.push(StoredRow {
                        id: row.get::<String>(0)?,
                        document: decode_document(table, &row.get::<String>(1)?),
                    });
                }
                Ok::<_, DatabaseError>(stored)
            })
            .await
    }

    /// Overwrite top-level fields of one document (`$set`).
    ///
    /// Returns whether a document with `id` existed. The read and write are a
    /// single statement, so a concurrently deleted document is reported as
    /// missing rather than recreated.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a value cannot be encoded or the update fails.
    pub async fn set_fields(
        &self,
        id: &str,
        fields: &[(&'static str, serde_json::Value)],
    ) -> Result<bool, DatabaseError> {
        if fields.is_empty() {
            return Ok(self.find_one::<serde_json::Value>(id).await?.is_some());
        }

        let table = self.name.as_str();
        let mut paths = Vec::with_capacity(fields.len());
        let mut params: Vec<libsql::Value> = Vec::with_capacity(fields.len() + 1);
        for (field, value) in fields {
            params.push(libsql::Value::Text(encode_document(table, value)?));
            paths.push(format!("'$.{field}', json(?{})", params.len()));
        }
        params.push(libsql::Value::Text(id.to_string()));
        let sql = format!(
            "UPDATE {table} SET doc = json_set(doc, {}) WHERE id = ?{}",
            paths.join(", "),
            params.len()
        );

        let changed = self
            .db
            .bounded(async {
                Ok::<_, DatabaseError>(
                    self.db
                        .conn()
                        .execute(&sql, libsql::params_from_iter(params))
                        .await?,
                )
            })
            .await?;
        tracing::debug!(collection = table, %id, changed, "set document fields");
        Ok(changed > 0)
    }

    /// Delete one document by id. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_one(&self, id: &str) -> Result<bool, DatabaseError> {
        let table = self.name.as_str();
        let changed = self
            .db
            .bounded(async {
                Ok::<_, DatabaseError>(
                    self.db
                        .conn()
                        .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
                        .await?,
                )
            })
            .await?;
        Ok(changed > 0)
    }

    /// Delete every document matching `filter`. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_many(&self, filter: &Filter) -> Result<u64, DatabaseError> {
        let table = self.name.as_str();
        let (where_clause, params) = filter.to_sql();
        let sql = format!("DELETE FROM {table} {where_clause}");
        let removed = self
            .db
            .bounded(async {
                Ok::<_, DatabaseError>(
                    self.db
                        .conn()
                        .execute(&sql, libsql::params_from_iter(params))
                        .await?,
                )
            })
            .await?;
        tracing::debug!(collection = table, removed, "deleted matching documents");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Note {
        id: String,
        tag: String,
        body: String,
    }

    async fn test_db() -> DeskDb {
        DeskDb::open_local(":memory:").await.unwrap()
    }

    async fn insert_note(col: &Collection<'_>, tag: &str, body: &str) -> Note {
        col.insert_one(|id| Note {
            id,
            tag: tag.into(),
            body: body.into(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn insert_generates_prefixed_id() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        let note = insert_note(&col, "a", "first").await;
        assert!(note.id.starts_with("tkt-"));

        let fetched: Note = col.find_one(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn find_one_missing_is_none() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        let found: Option<Note> = col.find_one("tkt-00000000").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_preserves_insertion_order() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Categories);
        for body in ["one", "two", "three"] {
            insert_note(&col, "x", body).await;
        }
        let notes: Vec<Note> = col.find(&Filter::all()).await.unwrap();
        let bodies: Vec<_> = notes.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn find_filters_on_field() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        insert_note(&col, "keep", "one").await;
        insert_note(&col, "drop", "two").await;
        insert_note(&col, "keep", "three").await;

        let kept: Vec<Note> = col.find(&Filter::all().eq("tag", "keep")).await.unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|n| n.tag == "keep"));

        let both: Vec<Note> = col
            .find(&Filter::all().eq("tag", "keep").eq("body", "three"))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
    }

    #[tokio::test]
    async fn set_fields_overwrites_and_reports_missing() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        let note = insert_note(&col, "a", "before").await;

        let changed = col
            .set_fields(&note.id, &[("body", serde_json::json!("after"))])
            .await
            .unwrap();
        assert!(changed);
        let fetched: Note = col.find_one(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched.body, "after");
        assert_eq!(fetched.tag, "a");

        let missing = col
            .set_fields("tkt-00000000", &[("body", serde_json::json!("x"))])
            .await
            .unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn delete_one_and_many() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        let first = insert_note(&col, "a", "one").await;
        insert_note(&col, "b", "two").await;
        insert_note(&col, "b", "three").await;

        assert!(col.delete_one(&first.id).await.unwrap());
        assert!(!col.delete_one(&first.id).await.unwrap());

        assert_eq!(col.delete_many(&Filter::all().eq("tag", "b")).await.unwrap(), 2);
        let rest: Vec<Note> = col.find(&Filter::all()).await.unwrap();
        assert!(rest.is_empty());
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let db = test_db().await;
        insert_note(&db.collection(CollectionName::Categories), "a", "cat").await;
        let tickets: Vec<Note> = db
            .collection(CollectionName::Tickets)
            .find(&Filter::all())
            .await
            .unwrap();
        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn find_rows_isolates_undecodable_documents() {
        let db = test_db().await;
        let col = db.collection(CollectionName::Tickets);
        let first = insert_note(&col, "a", "one").await;
        db.conn()
            .execute(
                "INSERT INTO tickets (id, doc) VALUES ('tkt-0000beef', '{\"tag\": 7}')",
                (),
            )
            .await
            .unwrap();
        let last = insert_note(&col, "a", "three").await;

        let err = col.find::<Note>(&Filter::all()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Document { .. }));

        let rows: Vec<StoredRow<Note>> = col.find_rows(&Filter::all()).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, [first.id.as_str(), "tkt-0000beef", last.id.as_str()]);
        assert!(rows[0].document.is_ok());
        assert!(matches!(
            rows[1].document,
            Err(DatabaseError::Document { .. })
        ));
        assert_eq!(rows[2].document.as_ref().unwrap(), &last);
    }

    #[test]
    fn filter_sql_numbers_placeholders() {
        let (sql, params) = Filter::all().eq("a", "1").eq("b", "2").to_sql();
        assert_eq!(
            sql,
            "WHERE json_extract(doc, '$.a') = ?1 AND json_extract(doc, '$.b') = ?2"
        );
        assert_eq!(params.len(), 2);
    }
}
