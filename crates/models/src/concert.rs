use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Wire format for the `date` field, also the BSON representation.
/// ISO dates compare lexicographically in chronological order, so range
/// filters and sorting work on the stored strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MISSING_FIELDS: &str =
    "Missing required fields: Event Name, Venue, and Date are required.";
const INVALID_DATE: &str = "Invalid date format. Please use YYYY-MM-DD.";

/// Concert record as persisted in the collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcertDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub event_name: String,
    pub venue: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub deleted: bool,
}

/// Concert record as returned to API clients (hex string id).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Concert {
    pub id: String,
    pub event_name: String,
    pub venue: String,
    pub date: NaiveDate,
    pub deleted: bool,
}

impl From<ConcertDocument> for Concert {
    fn from(doc: ConcertDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            event_name: doc.event_name,
            venue: doc.venue,
            date: doc.date,
            deleted: doc.deleted,
        }
    }
}

/// Creation body. Every field is optional at the serde level so presence
/// can be checked with a single missing-fields message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertInput {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Validated creation payload.
#[derive(Clone, Debug, PartialEq)]
pub struct NewConcert {
    pub event_name: String,
    pub venue: String,
    pub date: NaiveDate,
}

impl ConcertInput {
    /// Checks field presence first, then the date format.
    pub fn validate(self) -> Result<NewConcert, ModelError> {
        match (
            non_empty(self.event_name),
            non_empty(self.venue),
            non_empty(self.date),
        ) {
            (Some(event_name), Some(venue), Some(date)) => Ok(NewConcert {
                event_name,
                venue,
                date: parse_date(&date)?,
            }),
            _ => Err(ModelError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

/// Partial update body; empty strings are treated as absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertPatch {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Validated field changes for a partial update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConcertChanges {
    pub event_name: Option<String>,
    pub venue: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ConcertChanges {
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none() && self.venue.is_none() && self.date.is_none()
    }
}

impl ConcertPatch {
    pub fn validate(self) -> Result<ConcertChanges, ModelError> {
        let date = match non_empty(self.date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        Ok(ConcertChanges {
            event_name: non_empty(self.event_name),
            venue: non_empty(self.venue),
            date,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ModelError::Validation(INVALID_DATE.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn input(event_name: &str, venue: &str, date: &str) -> ConcertInput {
        ConcertInput {
            event_name: Some(event_name.to_string()),
            venue: Some(venue.to_string()),
            date: Some(date.to_string()),
        }
    }

    #[test]
    fn create_input_requires_all_fields() {
        let missing = ConcertInput { venue: Some("Blue Note".into()), ..Default::default() };
        let err = missing.validate().expect_err("missing fields");
        assert!(err.to_string().contains("Missing required fields"));

        // Empty strings count as missing, matching the HTTP surface.
        let blank = input("", "Blue Note", "2024-05-01");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn create_input_rejects_bad_date() {
        let err = input("Jazz Night", "Blue Note", "not-a-date")
            .validate()
            .expect_err("bad date");
        assert!(err.to_string().contains("Invalid date format"));

        // Calendar validity matters, not just the shape.
        assert!(input("Jazz Night", "Blue Note", "2024-02-30").validate().is_err());
        assert!(input("Jazz Night", "Blue Note", "2024-05-01").validate().is_ok());
    }

    #[test]
    fn patch_skips_blank_fields_and_parses_date() {
        let patch = ConcertPatch {
            event_name: Some("  ".into()),
            venue: Some("Massey Hall".into()),
            date: Some("2024-06-15".into()),
        };
        let changes = patch.validate().expect("valid patch");
        assert_eq!(changes.event_name, None);
        assert_eq!(changes.venue.as_deref(), Some("Massey Hall"));
        assert_eq!(changes.date, Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));

        let empty = ConcertPatch::default().validate().expect("empty patch");
        assert!(empty.is_empty());

        let bad = ConcertPatch { date: Some("2024-13-01".into()), ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn document_serializes_with_wire_names() {
        let doc = ConcertDocument {
            id: ObjectId::new(),
            event_name: "Jazz Night".into(),
            venue: "Blue Note".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            deleted: false,
        };
        let bson = bson::to_document(&doc).expect("to bson");
        assert!(bson.get_object_id("_id").is_ok());
        assert_eq!(bson.get_str("eventName").unwrap(), "Jazz Night");
        assert_eq!(bson.get_str("venue").unwrap(), "Blue Note");
        // Dates are stored as ISO strings so `$gte`/`$lte` order correctly.
        assert_eq!(bson.get_str("date").unwrap(), "2024-05-01");
        assert_eq!(bson.get_bool("deleted").unwrap(), false);
    }

    #[test]
    fn api_record_uses_hex_id() {
        let id = ObjectId::new();
        let doc = ConcertDocument {
            id,
            event_name: "Jazz Night".into(),
            venue: "Blue Note".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            deleted: false,
        };
        let concert = Concert::from(doc);
        assert_eq!(concert.id, id.to_hex());

        let json = serde_json::to_value(&concert).expect("to json");
        assert_eq!(json["eventName"], "Jazz Night");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["deleted"], false);
    }
}
