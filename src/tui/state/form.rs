//! Submission form state.
//!
//! The form moves between two phases, `Editing` and `Submitted`, and carries
//! a request flag that is `Submitting` while an insert is in flight. Field
//! contents can only change while the form is `Editing` and idle.

use thiserror::Error;

use crate::feedback::{FeedbackDraft, FieldErrors, FormField, MAX_RATING, MIN_RATING, NewFeedback};

/// Phase of the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Fields are editable.
    #[default]
    Editing,
    /// The last insert succeeded; the confirmation screen is shown.
    Submitted,
}

/// Whether an insert is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// No request outstanding.
    #[default]
    Idle,
    /// An insert has been issued and has not reported back.
    Submitting,
}

/// Reasons a submit attempt was refused before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    /// One or more fields failed validation.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),
    /// An insert is already in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    /// The form is showing its confirmation screen.
    #[error("the form is not being edited")]
    NotEditing,
}

/// Local state of one mounted submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFormState {
    draft: FeedbackDraft,
    focus: FormField,
    errors: FieldErrors,
    phase: FormPhase,
    request: RequestStatus,
}

impl Default for SubmissionFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFormState {
    /// Creates a blank form focused on the name field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: FeedbackDraft::default(),
            focus: FormField::Name,
            errors: FieldErrors::default(),
            phase: FormPhase::Editing,
            request: RequestStatus::Idle,
        }
    }

    /// Current raw field contents.
    #[must_use]
    pub const fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    /// Field that receives keyboard input.
    #[must_use]
    pub const fn focus(&self) -> FormField {
        self.focus
    }

    /// Validation messages from the last submit attempt.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Current request flag.
    #[must_use]
    pub const fn request(&self) -> RequestStatus {
        self.request
    }

    /// Returns true while an insert is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.request == RequestStatus::Submitting
    }

    /// Returns true when field contents may change.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.phase == FormPhase::Editing && self.request == RequestStatus::Idle
    }

    /// Moves focus to the next field, wrapping around.
    pub const fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous field, wrapping around.
    pub const fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Appends `character` to the focused text field.
    ///
    /// Returns `false` when the form is not editable, the rating field has
    /// focus, or the field has reached its input limit.
    pub fn insert_char(&mut self, character: char) -> bool {
        if !self.is_editable() {
            return false;
        }
        let Some(limit) = self.focus.input_limit() else {
            return false;
        };
        let Some(text) = self.focused_text_mut() else {
            return false;
        };
        if text.chars().count() >= limit {
            return false;
        }
        text.push(character);
        true
    }

    /// Inserts a line break into the comments field.
    ///
    /// Other fields are single-line, so this is a no-op unless comments has
    /// focus.
    pub fn insert_newline(&mut self) -> bool {
        if self.focus != FormField::Comments {
            return false;
        }
        self.insert_char('\n')
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.focused_text_mut().and_then(String::pop).is_some()
    }

    /// Selects `rating` when it lies within `1..=5`.
    ///
    /// There is no way back to "unset" once a rating has been chosen.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        if !self.is_editable() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return false;
        }
        self.draft.rating = rating;
        true
    }

    /// Raises the rating by one star, starting from one when unset.
    pub fn increment_rating(&mut self) -> bool {
        let next = self.draft.rating.saturating_add(1).clamp(MIN_RATING, MAX_RATING);
        self.set_rating(next)
    }

    /// Lowers the rating by one star, never below one.
    pub fn decrement_rating(&mut self) -> bool {
        let next = self.draft.rating.saturating_sub(1).max(MIN_RATING);
        self.set_rating(next)
    }

    /// Validates the draft and, on success, marks the form as submitting.
    ///
    /// Field errors from the previous attempt are cleared first, so the
    /// returned errors always describe the current contents.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejection::AlreadySubmitting`] while an insert is in
    /// flight, [`SubmitRejection::NotEditing`] on the confirmation screen,
    /// and [`SubmitRejection::Invalid`] when validation fails.
    pub fn begin_submit(&mut self) -> Result<NewFeedback, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::AlreadySubmitting);
        }
        if self.phase != FormPhase::Editing {
            return Err(SubmitRejection::NotEditing);
        }

        self.errors = FieldErrors::default();
        match self.draft.validate() {
            Ok(payload) => {
                self.request = RequestStatus::Submitting;
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitRejection::Invalid(errors))
            }
        }
    }

    /// Records a successful insert.
    pub const fn complete_submit(&mut self) {
        self.request = RequestStatus::Idle;
        self.phase = FormPhase::Submitted;
    }

    /// Records a failed insert, keeping every field intact.
    pub const fn fail_submit(&mut self) {
        self.request = RequestStatus::Idle;
    }

    /// Discards all contents and returns to a blank editing form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    const fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Comments => Some(&mut self.draft.comments),
            FormField::Rating => None,
        }
    }
}
