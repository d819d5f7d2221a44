//! Composes the optional expense query parameters into one conjunctive filter.
//! Every parameter is independent; whichever are present are ANDed together,
//! and an absent set composes to match-all.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

use super::Record;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid date {0:?}")]
    InvalidDate(String),
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

/// The raw, still-unparsed query parameters.
#[derive(Debug, Default)]
pub struct Params {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub category: Option<String>,
    pub amount_min: Option<String>,
    pub amount_max: Option<String>,
}

impl Params {
    /// Parses every present parameter. A single malformed parameter fails the
    /// whole composition; a bad filter is never silently dropped.
    pub fn compose(self) -> Result<Filter, Error> {
        Ok(Filter {
            created_from: self.date_from.map(|s| parse_date(&s)).transpose()?,
            created_to: self.date_to.map(|s| parse_date(&s)).transpose()?,
            category: self.category,
            amount_min: self.amount_min.map(|s| parse_amount(&s)).transpose()?,
            amount_max: self.amount_max.map(|s| parse_amount(&s)).transpose()?,
        })
    }
}

/// The composed predicate. All bounds are inclusive; an inverted range is a
/// legal filter that matches nothing.
#[derive(Debug, Default, Clone)]
pub struct Filter {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(from) = self.created_from {
            if !record.created.map_or(false, |created| created >= from) {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if !record.created.map_or(false, |created| created <= to) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if record.fields.get("category").and_then(Value::as_str) != Some(category) {
                return false;
            }
        }
        let amount = record.fields.get("amount").and_then(Value::as_f64);
        if let Some(min) = self.amount_min {
            if !amount.map_or(false, |amount| amount >= min) {
                return false;
            }
        }
        if let Some(max) = self.amount_max {
            if !amount.map_or(false, |amount| amount <= max) {
                return false;
            }
        }
        true
    }
}

/// Accepts RFC 3339, a naive datetime, or a plain date, which reads as
/// midnight UTC.
fn parse_date(s: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()));
    }
    Err(Error::InvalidDate(s.to_owned()))
}

fn parse_amount(s: &str) -> Result<f64, Error> {
    s.parse().map_err(|_| Error::InvalidAmount(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Fields, Id};
    use crate::user;
    use chrono::Duration;
    use serde_json::json;
    use uuid::Uuid;

    fn record(fields: serde_json::Value, created: Option<DateTime<Utc>>) -> Record {
        Record {
            id: Id(Uuid::new_v4()),
            owner_id: user::Id(Uuid::new_v4()),
            fields: fields.as_object().cloned().unwrap_or_else(Fields::new),
            created,
        }
    }

    #[test]
    fn no_parameters_compose_to_match_all() {
        let filter = Params::default().compose().unwrap();
        assert!(filter.matches(&record(json!({}), None)));
        assert!(filter.matches(&record(json!({"amount": 50}), Some(Utc::now()))));
    }

    #[test]
    fn date_parameters_accept_the_common_iso_shapes() {
        for raw in [
            "2024-03-01T12:30:00+00:00",
            "2024-03-01T12:30:00Z",
            "2024-03-01T12:30:00",
            "2024-03-01",
        ] {
            let filter = Params {
                date_from: Some(raw.to_owned()),
                ..Default::default()
            }
            .compose()
            .unwrap();
            assert!(filter.created_from.is_some(), "failed to parse {raw:?}");
        }
    }

    #[test]
    fn plain_date_reads_as_midnight_utc() {
        let filter = Params {
            date_to: Some("2024-03-01".to_owned()),
            ..Default::default()
        }
        .compose()
        .unwrap();
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(filter.created_to, Some(midnight));
    }

    #[test]
    fn malformed_date_fails_the_whole_composition() {
        let result = Params {
            date_from: Some("not-a-date".to_owned()),
            ..Default::default()
        }
        .compose();
        assert_eq!(result.unwrap_err(), Error::InvalidDate("not-a-date".to_owned()));
    }

    #[test]
    fn malformed_amount_fails_the_whole_composition() {
        let result = Params {
            amount_min: Some("ten".to_owned()),
            ..Default::default()
        }
        .compose();
        assert_eq!(result.unwrap_err(), Error::InvalidAmount("ten".to_owned()));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let now = Utc::now();
        let filter = Filter {
            created_from: Some(now),
            created_to: Some(now),
            ..Default::default()
        };
        assert!(filter.matches(&record(json!({}), Some(now))));
        assert!(!filter.matches(&record(json!({}), Some(now - Duration::seconds(1)))));
        assert!(!filter.matches(&record(json!({}), Some(now + Duration::seconds(1)))));
    }

    #[test]
    fn date_filter_rejects_records_without_a_timestamp() {
        let filter = Filter {
            created_from: Some(Utc::now()),
            ..Default::default()
        };
        assert!(!filter.matches(&record(json!({}), None)));
    }

    #[test]
    fn category_match_is_exact() {
        let filter = Filter {
            category: Some("food".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&record(json!({"category": "food"}), None)));
        assert!(!filter.matches(&record(json!({"category": "Food"}), None)));
        assert!(!filter.matches(&record(json!({"category": 3}), None)));
        assert!(!filter.matches(&record(json!({}), None)));
    }

    #[test]
    fn equal_amount_bounds_select_exact_equality() {
        let filter = Filter {
            amount_min: Some(10.0),
            amount_max: Some(10.0),
            ..Default::default()
        };
        assert!(filter.matches(&record(json!({"amount": 10}), None)));
        assert!(!filter.matches(&record(json!({"amount": 10.5}), None)));
        assert!(!filter.matches(&record(json!({"amount": 9.5}), None)));
    }

    #[test]
    fn amount_filter_rejects_records_without_a_numeric_amount() {
        let filter = Filter {
            amount_min: Some(1.0),
            ..Default::default()
        };
        assert!(!filter.matches(&record(json!({}), None)));
        assert!(!filter.matches(&record(json!({"amount": "plenty"}), None)));
    }
}
