use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use models::concert::{Concert, ConcertChanges, ConcertDocument, NewConcert};

use crate::errors::ServiceError;
use crate::query;

/// Inclusive date bounds for a list query. Both bounds give a range, a
/// lone `start` an exact-date match, a lone `end` nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Store-facing query for the list operations.
#[derive(Clone, Debug, Default)]
pub struct ConcertQuery {
    pub venue: Option<String>,
    pub range: DateRange,
    pub sort_by_date: bool,
}

#[async_trait]
pub trait ConcertRepository: Send + Sync {
    /// Non-deleted records matching the query.
    async fn list(&self, query: ConcertQuery) -> Result<Vec<Concert>, ServiceError>;

    /// Inserts a new record with `deleted = false` and a fresh id.
    async fn insert(&self, concert: NewConcert) -> Result<Concert, ServiceError>;

    /// Applies changes to the non-deleted record with this id.
    /// Ok(true) when a record matched.
    async fn update(&self, id: ObjectId, changes: ConcertChanges) -> Result<bool, ServiceError>;

    /// Whether a non-deleted record with this id exists.
    async fn exists(&self, id: ObjectId) -> Result<bool, ServiceError>;

    /// Marks the non-deleted record with this id as deleted.
    /// Ok(true) when a record matched.
    async fn soft_delete(&self, id: ObjectId) -> Result<bool, ServiceError>;
}

/// MongoDB-backed repository. Matched-filter updates are atomic per
/// document, so the soft-delete check needs no application-level locking.
pub struct MongoConcertRepository {
    collection: Collection<ConcertDocument>,
}

impl MongoConcertRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self { collection: db.collection(collection) }
    }
}

#[async_trait]
impl ConcertRepository for MongoConcertRepository {
    async fn list(&self, query: ConcertQuery) -> Result<Vec<Concert>, ServiceError> {
        let filter = query::list_filter(query.venue.as_deref(), query.range.start, query.range.end);
        let options = query
            .sort_by_date
            .then(|| FindOptions::builder().sort(query::date_sort()).build());
        let cursor = self.collection.find(filter, options).await.map_err(db_err)?;
        let docs: Vec<ConcertDocument> = cursor.try_collect().await.map_err(db_err)?;
        Ok(docs.into_iter().map(Concert::from).collect())
    }

    async fn insert(&self, concert: NewConcert) -> Result<Concert, ServiceError> {
        // The driver would generate the id on insert anyway; doing it here
        // lets us return the created record without a second read.
        let doc = ConcertDocument {
            id: ObjectId::new(),
            event_name: concert.event_name,
            venue: concert.venue,
            date: concert.date,
            deleted: false,
        };
        self.collection.insert_one(&doc, None).await.map_err(db_err)?;
        Ok(doc.into())
    }

    async fn update(&self, id: ObjectId, changes: ConcertChanges) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .update_one(query::id_filter(id), query::set_update(&changes), None)
            .await
            .map_err(db_err)?;
        Ok(result.matched_count > 0)
    }

    async fn exists(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let found = self
            .collection
            .find_one(query::id_filter(id), None)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }

    async fn soft_delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .update_one(query::id_filter(id), query::soft_delete_update(), None)
            .await
            .map_err(db_err)?;
        Ok(result.matched_count > 0)
    }
}

fn db_err(e: mongodb::error::Error) -> ServiceError {
    ServiceError::Db(e.to_string())
}
