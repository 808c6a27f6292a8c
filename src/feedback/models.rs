//! Domain models for feedback entries.
//!
//! `FeedbackEntry` is the persisted record as read back from a backend and
//! `NewFeedback` is the validated payload handed to `insert`. Types prefixed
//! with `Api` are deserialisation targets for the REST backend that convert
//! into the public domain types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest selectable star rating.
pub const MIN_RATING: u8 = 1;
/// Highest selectable star rating.
pub const MAX_RATING: u8 = 5;

/// Opaque identifier assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackId(String);

impl FeedbackId {
    /// Wraps a backend-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// A star rating guaranteed to lie within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

/// Raised when a value falls outside the permitted rating range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating {value} is outside {MIN_RATING}..={MAX_RATING}")]
pub struct RatingOutOfRange {
    /// The rejected value.
    pub value: i64,
}

impl Rating {
    /// Returns the rating as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange {
                value: i64::from(value),
            })
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RatingOutOfRange { value })
            .and_then(Self::try_from)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A persisted feedback record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    /// Backend-assigned identifier.
    pub id: FeedbackId,
    /// Submitter name.
    pub name: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comments, whitespace preserved.
    pub comments: String,
    /// Insert timestamp assigned by the backend.
    pub created_at: DateTime<Utc>,
}

/// Validated payload for a new feedback record.
///
/// Only produced by [`crate::feedback::validation::FeedbackDraft::validate`],
/// so every value carries trimmed, in-range fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFeedback {
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) rating: Rating,
    pub(crate) comments: String,
}

impl NewFeedback {
    /// Trimmed submitter name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed email, or `None` when the field was left empty.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Selected star rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Trimmed comments.
    #[must_use]
    pub fn comments(&self) -> &str {
        self.comments.as_str()
    }
}

/// Sort direction applied to `created_at` when listing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// PostgREST `order` suffix for this direction.
    #[must_use]
    pub const fn as_postgrest(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// REST identifier column: Supabase tables typically use UUIDs, plain
/// PostgREST tables often use serial integers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiFeedbackId {
    Text(String),
    Number(i64),
}

/// REST row as returned by `select=*`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiFeedbackRow {
    pub(crate) id: ApiFeedbackId,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) rating: i64,
    pub(crate) comments: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl TryFrom<ApiFeedbackRow> for FeedbackEntry {
    type Error = RatingOutOfRange;

    fn try_from(row: ApiFeedbackRow) -> Result<Self, Self::Error> {
        let id = match row.id {
            ApiFeedbackId::Text(text) => FeedbackId::new(text),
            ApiFeedbackId::Number(number) => FeedbackId::new(number.to_string()),
        };
        Ok(Self {
            id,
            name: row.name,
            email: row.email.filter(|email| !email.is_empty()),
            rating: Rating::try_from(row.rating)?,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Fixture builders for feedback entries.

    use chrono::{DateTime, TimeZone, Utc};

    use super::{FeedbackEntry, FeedbackId, Rating};

    /// Builds an entry created `minutes` after 2026-10-18 09:00 UTC.
    ///
    /// # Panics
    ///
    /// Panics if `rating` is outside `1..=5`.
    #[must_use]
    pub fn entry_at_minute(id: u64, name: &str, rating: u8, minutes: i64) -> FeedbackEntry {
        FeedbackEntry {
            id: FeedbackId::new(id.to_string()),
            name: name.to_owned(),
            email: None,
            rating: Rating::try_from(rating)
                .unwrap_or_else(|error| panic!("fixture rating invalid: {error}")),
            comments: format!("Comment from {name}"),
            created_at: base_time() + chrono::Duration::minutes(minutes),
        }
    }

    /// Reference timestamp used by fixtures.
    ///
    /// # Panics
    ///
    /// Never panics; the literal timestamp is valid.
    #[must_use]
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("fixture timestamp is valid"))
    }
}
