//! Client-side validation of feedback drafts.
//!
//! Validation runs synchronously before any backend call and collects every
//! violation at once, keyed by field. A successful validation is the only way
//! to obtain a [`NewFeedback`].

use std::collections::BTreeMap;
use std::fmt;

use super::models::{MIN_RATING, NewFeedback, Rating};

/// Maximum trimmed length of the name field, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum trimmed length of the email field, in characters.
pub const EMAIL_MAX_CHARS: usize = 255;
/// Maximum trimmed length of the comments field, in characters.
pub const COMMENTS_MAX_CHARS: usize = 1000;

/// Editable fields of the submission form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Submitter name.
    Name,
    /// Optional contact email.
    Email,
    /// Star rating.
    Rating,
    /// Free-text comments.
    Comments,
}

impl FormField {
    /// All fields in focus order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Rating, Self::Comments];

    /// Human-readable label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email (optional)",
            Self::Rating => "Rating",
            Self::Comments => "Comments",
        }
    }

    /// Returns the field after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Rating,
            Self::Rating => Self::Comments,
            Self::Comments => Self::Name,
        }
    }

    /// Returns the field before this one, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Name => Self::Comments,
            Self::Email => Self::Name,
            Self::Rating => Self::Email,
            Self::Comments => Self::Rating,
        }
    }

    /// Maximum number of characters accepted while typing, if the field is
    /// free text.
    #[must_use]
    pub const fn input_limit(self) -> Option<usize> {
        match self {
            Self::Name => Some(NAME_MAX_CHARS),
            Self::Email => Some(EMAIL_MAX_CHARS),
            Self::Rating => None,
            Self::Comments => Some(COMMENTS_MAX_CHARS),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Rating => "rating",
            Self::Comments => "comments",
        };
        formatter.write_str(name)
    }
}

/// Field-scoped validation messages; at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// Returns true when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Iterates over field/message pairs in focus order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Records `message` for `field`, replacing any earlier message.
    fn set(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

/// Raw, unvalidated form contents.
///
/// `rating` uses `0` for "not yet selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    /// Name as typed.
    pub name: String,
    /// Email as typed; blank means absent.
    pub email: String,
    /// Selected rating, `0` when unset.
    pub rating: u8,
    /// Comments as typed.
    pub comments: String,
}

impl FeedbackDraft {
    /// Validates every field and returns either the insert payload or all
    /// collected field errors.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] with one entry per invalid field.
    pub fn validate(&self) -> Result<NewFeedback, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if let Some(message) = check_required_text(
            name,
            NAME_MAX_CHARS,
            "Name is required",
            "Name must be at most 100 characters",
        ) {
            errors.set(FormField::Name, message);
        }

        let email = self.email.trim();
        if let Some(message) = check_email(email) {
            errors.set(FormField::Email, message);
        }

        let rating = Rating::try_from(self.rating);
        if rating.is_err() {
            let message = if self.rating < MIN_RATING {
                "Please select a rating"
            } else {
                "Rating must be between 1 and 5"
            };
            errors.set(FormField::Rating, message);
        }

        let comments = self.comments.trim();
        if let Some(message) = check_required_text(
            comments,
            COMMENTS_MAX_CHARS,
            "Comments are required",
            "Comments must be at most 1000 characters",
        ) {
            errors.set(FormField::Comments, message);
        }

        match rating {
            Ok(valid_rating) if errors.is_empty() => Ok(NewFeedback {
                name: name.to_owned(),
                email: (!email.is_empty()).then(|| email.to_owned()),
                rating: valid_rating,
                comments: comments.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

fn check_required_text(
    trimmed: &str,
    max_chars: usize,
    required: &'static str,
    too_long: &'static str,
) -> Option<&'static str> {
    let length = trimmed.chars().count();
    if length == 0 {
        Some(required)
    } else if length > max_chars {
        Some(too_long)
    } else {
        None
    }
}

fn check_email(trimmed: &str) -> Option<&'static str> {
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > EMAIL_MAX_CHARS {
        return Some("Email must be at most 255 characters");
    }
    if !is_valid_email(trimmed) {
        return Some("Invalid email address");
    }
    None
}

/// Checks `candidate` against the common `local@domain.tld` email syntax.
///
/// The local part accepts letters, digits and `_ ' + - .`; it must not start
/// with a dot and must end with a letter, digit, `_`, `+` or `-`. Consecutive
/// dots are rejected anywhere. The domain is one or more labels of letters,
/// digits and hyphens (not starting with a hyphen) followed by an alphabetic
/// top-level label of at least two characters.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.contains("..") {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let allowed =
        |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '\'' | '+' | '-' | '.');
    let valid_last = |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '+' | '-');

    !local.starts_with('.')
        && local.chars().all(allowed)
        && local.chars().next_back().is_some_and(valid_last)
}

fn is_valid_domain(domain: &str) -> bool {
    let mut labels: Vec<&str> = domain.split('.').collect();
    let Some(top_level) = labels.pop() else {
        return false;
    };
    if labels.is_empty() {
        return false;
    }

    let top_level_ok = top_level.len() >= 2 && top_level.chars().all(|ch| ch.is_ascii_alphabetic());
    let labels_ok = labels.iter().all(|label| {
        label.chars().next().is_some_and(|ch| ch.is_ascii_alphanumeric())
            && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });

    top_level_ok && labels_ok
}
