use std::sync::Arc;

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use models::concert::{Concert, ConcertInput, ConcertPatch};

use crate::catalog::repository::{ConcertQuery, ConcertRepository, DateRange};
use crate::errors::ServiceError;

/// Application service for the concert catalog. Owns the store handle via
/// the repository and enforces validation and the soft-delete policy; the
/// HTTP layer only translates errors to status codes.
pub struct ConcertCatalog<R: ConcertRepository> {
    repo: Arc<R>,
}

impl<R: ConcertRepository> ConcertCatalog<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Filtered listing, sorted ascending by date.
    pub async fn list(
        &self,
        venue: Option<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Concert>, ServiceError> {
        self.repo
            .list(ConcertQuery { venue, range: DateRange { start, end }, sort_by_date: true })
            .await
    }

    /// Venue-only listing, store order.
    pub async fn list_by_venue(&self, venue: &str) -> Result<Vec<Concert>, ServiceError> {
        self.repo
            .list(ConcertQuery { venue: Some(venue.to_string()), ..Default::default() })
            .await
    }

    /// Date-only listing, sorted ascending by date.
    pub async fn list_by_date(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Concert>, ServiceError> {
        self.repo
            .list(ConcertQuery { venue: None, range: DateRange { start, end }, sort_by_date: true })
            .await
    }

    pub async fn create(&self, input: ConcertInput) -> Result<Concert, ServiceError> {
        let new_concert = input.validate()?;
        let created = self.repo.insert(new_concert).await?;
        info!(id = %created.id, venue = %created.venue, "concert created");
        Ok(created)
    }

    /// Partial update of the non-deleted record with this id. A patch
    /// carrying no recognized fields writes nothing but still reports
    /// whether a live record matched.
    pub async fn update(&self, id: ObjectId, patch: ConcertPatch) -> Result<(), ServiceError> {
        let changes = patch.validate()?;
        let matched = if changes.is_empty() {
            self.repo.exists(id).await?
        } else {
            self.repo.update(id, changes).await?
        };
        if !matched {
            return Err(ServiceError::not_found_or_deleted());
        }
        info!(id = %id, "concert updated");
        Ok(())
    }

    /// Soft delete: the record stays in storage but becomes invisible to
    /// every subsequent list/update/delete. Terminal; repeating it yields
    /// the same not-found outcome as a never-created id.
    pub async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        if !self.repo.soft_delete(id).await? {
            return Err(ServiceError::not_found_or_deleted());
        }
        info!(id = %id, "concert soft-deleted");
        Ok(())
    }
}
