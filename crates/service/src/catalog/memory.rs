use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use models::concert::{Concert, ConcertChanges, ConcertDocument, NewConcert};

use crate::catalog::repository::{ConcertQuery, ConcertRepository};
use crate::errors::ServiceError;

/// In-memory repository with the same soft-delete and filter semantics as
/// the MongoDB backend. Used by tests and local experiments; the unsorted
/// list order is insertion order, the stand-in for "store default".
#[derive(Default)]
pub struct MemoryConcertRepository {
    records: Mutex<Vec<ConcertDocument>>,
}

impl MemoryConcertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConcertRepository for MemoryConcertRepository {
    async fn list(&self, query: ConcertQuery) -> Result<Vec<Concert>, ServiceError> {
        let records = self.records.lock().expect("concert store lock");
        let mut matched: Vec<ConcertDocument> = records
            .iter()
            .filter(|doc| !doc.deleted)
            .filter(|doc| query.venue.as_deref().map_or(true, |v| doc.venue == v))
            .filter(|doc| match (query.range.start, query.range.end) {
                (Some(start), Some(end)) => doc.date >= start && doc.date <= end,
                (Some(start), None) => doc.date == start,
                _ => true,
            })
            .cloned()
            .collect();
        if query.sort_by_date {
            matched.sort_by_key(|doc| doc.date);
        }
        Ok(matched.into_iter().map(Concert::from).collect())
    }

    async fn insert(&self, concert: NewConcert) -> Result<Concert, ServiceError> {
        let doc = ConcertDocument {
            id: ObjectId::new(),
            event_name: concert.event_name,
            venue: concert.venue,
            date: concert.date,
            deleted: false,
        };
        let mut records = self.records.lock().expect("concert store lock");
        records.push(doc.clone());
        Ok(doc.into())
    }

    async fn update(&self, id: ObjectId, changes: ConcertChanges) -> Result<bool, ServiceError> {
        let mut records = self.records.lock().expect("concert store lock");
        match records.iter_mut().find(|doc| doc.id == id && !doc.deleted) {
            Some(doc) => {
                if let Some(event_name) = changes.event_name {
                    doc.event_name = event_name;
                }
                if let Some(venue) = changes.venue {
                    doc.venue = venue;
                }
                if let Some(date) = changes.date {
                    doc.date = date;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let records = self.records.lock().expect("concert store lock");
        Ok(records.iter().any(|doc| doc.id == id && !doc.deleted))
    }

    async fn soft_delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let mut records = self.records.lock().expect("concert store lock");
        match records.iter_mut().find(|doc| doc.id == id && !doc.deleted) {
            Some(doc) => {
                doc.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
