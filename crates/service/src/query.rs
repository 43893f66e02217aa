//! Filter construction for the concerts collection. Every read, update and
//! delete goes through `non_deleted()` so soft-deleted records stay
//! invisible uniformly instead of the clause being re-derived per call site.

use chrono::NaiveDate;
use models::concert::{ConcertChanges, DATE_FORMAT};
use mongodb::bson::{doc, oid::ObjectId, Document};

/// Matcher shared by every operation: soft-deleted records never match.
pub fn non_deleted() -> Document {
    doc! { "deleted": { "$ne": true } }
}

/// Filter for the list operations. Venue is an exact match; both date
/// bounds give an inclusive range, a lone `start` an exact date, and a
/// lone `end` is ignored.
pub fn list_filter(venue: Option<&str>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Document {
    let mut filter = non_deleted();
    if let Some(venue) = venue {
        filter.insert("venue", venue);
    }
    match (start, end) {
        (Some(start), Some(end)) => {
            filter.insert("date", doc! { "$gte": fmt(start), "$lte": fmt(end) });
        }
        (Some(start), None) => {
            filter.insert("date", fmt(start));
        }
        _ => {}
    }
    filter
}

/// Targets one record by id, still excluding soft-deleted ones, so an
/// update or delete against a soft-deleted record matches nothing.
pub fn id_filter(id: ObjectId) -> Document {
    let mut filter = non_deleted();
    filter.insert("_id", id);
    filter
}

/// Ascending-by-date sort used by the list operations.
pub fn date_sort() -> Document {
    doc! { "date": 1 }
}

/// `$set` document applying only the supplied fields.
pub fn set_update(changes: &ConcertChanges) -> Document {
    let mut set = Document::new();
    if let Some(event_name) = &changes.event_name {
        set.insert("eventName", event_name.as_str());
    }
    if let Some(venue) = &changes.venue {
        set.insert("venue", venue.as_str());
    }
    if let Some(date) = changes.date {
        set.insert("date", fmt(date));
    }
    doc! { "$set": set }
}

pub fn soft_delete_update() -> Document {
    doc! { "$set": { "deleted": true } }
}

fn fmt(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).expect("test date")
    }

    #[test]
    fn base_filter_excludes_soft_deleted() {
        assert_eq!(non_deleted(), doc! { "deleted": { "$ne": true } });
    }

    #[test]
    fn list_filter_composes_venue_and_range() {
        let filter = list_filter(Some("Blue Note"), Some(date("2024-05-01")), Some(date("2024-05-31")));
        assert_eq!(
            filter,
            doc! {
                "deleted": { "$ne": true },
                "venue": "Blue Note",
                "date": { "$gte": "2024-05-01", "$lte": "2024-05-31" },
            }
        );
    }

    #[test]
    fn lone_start_means_exact_date() {
        let filter = list_filter(None, Some(date("2024-05-01")), None);
        assert_eq!(
            filter,
            doc! { "deleted": { "$ne": true }, "date": "2024-05-01" }
        );
    }

    #[test]
    fn lone_end_is_ignored() {
        let filter = list_filter(None, None, Some(date("2024-05-31")));
        assert_eq!(filter, non_deleted());
    }

    #[test]
    fn id_filter_keeps_soft_delete_clause() {
        let id = ObjectId::new();
        assert_eq!(
            id_filter(id),
            doc! { "deleted": { "$ne": true }, "_id": id }
        );
    }

    #[test]
    fn set_update_applies_only_supplied_fields() {
        let changes = ConcertChanges {
            event_name: None,
            venue: Some("Massey Hall".into()),
            date: Some(date("2024-06-15")),
        };
        assert_eq!(
            set_update(&changes),
            doc! { "$set": { "venue": "Massey Hall", "date": "2024-06-15" } }
        );
    }

    #[test]
    fn soft_delete_only_flips_the_flag() {
        assert_eq!(soft_delete_update(), doc! { "$set": { "deleted": true } });
    }
}
