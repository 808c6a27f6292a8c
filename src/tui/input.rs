//! Input handling for the TUI application.
//!
//! Key events are translated into application messages according to the
//! screen that currently has focus. Text fields swallow printable keys, so
//! single-letter shortcuts only exist outside the editing form.

use crossterm::event::{KeyCode, KeyModifiers};

use super::messages::AppMsg;
use crate::feedback::FormField;

/// Screen that currently interprets key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// The form is editable and `FormField` has focus.
    FormEditing(FormField),
    /// An insert is in flight; fields are locked.
    FormSubmitting,
    /// The confirmation screen is shown.
    FormSubmitted,
    /// The review list is loading or shows entries.
    ReviewList,
    /// The review list loaded no entries.
    ReviewListEmpty,
}

/// Maps a key event to an application message for the given context.
///
/// Ctrl-C and F1 work everywhere. Returns `None` for keys the context does
/// not use.
#[must_use]
pub fn map_key_to_message_with_context(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<AppMsg> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.key {
        KeyCode::Char('c') if control => return Some(AppMsg::Quit),
        KeyCode::F(1) => return Some(AppMsg::ToggleHelp),
        _ => {}
    }

    match context {
        InputContext::FormEditing(focus) => map_form_editing_key(key.key, control, focus),
        InputContext::FormSubmitting => map_form_locked_key(key.key, control),
        InputContext::FormSubmitted => map_submitted_key(key.key),
        InputContext::ReviewList => map_review_list_key(key.key),
        InputContext::ReviewListEmpty => {
            map_empty_list_key(key.key).or_else(|| map_review_list_key(key.key))
        }
    }
}

fn map_form_editing_key(code: KeyCode, control: bool, focus: FormField) -> Option<AppMsg> {
    if control {
        return map_form_shortcut(code);
    }

    match code {
        KeyCode::Tab | KeyCode::Down => Some(AppMsg::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(AppMsg::FocusPrevious),
        KeyCode::Esc => Some(AppMsg::DismissNotification),
        KeyCode::Backspace => Some(AppMsg::Backspace),
        KeyCode::Enter if focus == FormField::Comments => Some(AppMsg::InsertNewline),
        KeyCode::Enter => Some(AppMsg::Submit),
        _ if focus == FormField::Rating => map_rating_key(code),
        KeyCode::Char(character) => Some(AppMsg::InsertChar(character)),
        _ => None,
    }
}

/// Keys honoured while an insert is in flight: shortcuts and dismissal.
fn map_form_locked_key(code: KeyCode, control: bool) -> Option<AppMsg> {
    if control {
        return map_form_shortcut(code);
    }
    match code {
        KeyCode::Esc => Some(AppMsg::DismissNotification),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_form_shortcut(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('s') => Some(AppMsg::Submit),
        KeyCode::Char('l') => Some(AppMsg::ShowReviews),
        _ => None,
    }
}

fn map_rating_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char(digit @ '1'..='5') => digit
            .to_digit(10)
            .and_then(|value| u8::try_from(value).ok())
            .map(AppMsg::SetRating),
        KeyCode::Left => Some(AppMsg::RatingDown),
        KeyCode::Right => Some(AppMsg::RatingUp),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_submitted_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Enter | KeyCode::Char('n') => Some(AppMsg::NewResponse),
        KeyCode::Char('v') => Some(AppMsg::ShowReviews),
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Esc => Some(AppMsg::DismissNotification),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_review_list_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::ScrollUp),
        KeyCode::PageDown => Some(AppMsg::PageDown),
        KeyCode::PageUp => Some(AppMsg::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('r') => Some(AppMsg::ShowReviews),
        KeyCode::Char('b') | KeyCode::Esc => Some(AppMsg::ShowSubmission),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_empty_list_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('n') | KeyCode::Enter => Some(AppMsg::ShowSubmission),
        _ => None,
    }
}
