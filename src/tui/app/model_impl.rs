//! `Model` trait implementation for the feedback TUI application.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `FeedbackApp`, handling initialisation, update dispatch, and view
//! rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use crossterm::event::KeyCode;
use unicode_width::UnicodeWidthChar;

use super::{FeedbackApp, Route};
use crate::tui::input::{InputContext, map_key_to_message_with_context};
use crate::tui::messages::AppMsg;
use crate::tui::state::{FormPhase, ListingPhase};

impl Model for FeedbackApp {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::new().with_telemetry(crate::tui::storage::get_telemetry_sink());
        if let Some(gateway) = crate::tui::storage::get_gateway() {
            model = model.with_gateway(gateway);
        } else {
            tracing::warn!("no feedback gateway registered; storage commands will fail");
        }

        (model, None)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        // Handle key events from bubbletea-rs with context-aware mapping
        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            // Esc closes a visible notification before any navigation.
            if key_msg.key == KeyCode::Esc && self.notifications.current().is_some() {
                return self.handle_message(&AppMsg::DismissNotification);
            }
            let context = self.input_context();
            if let Some(mapped) = map_key_to_message_with_context(key_msg, context) {
                return self.handle_message(&mapped);
            }
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_body());
        output.push_str(&self.render_notification());
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl FeedbackApp {
    /// Returns the current input context for context-aware key mapping.
    pub(super) fn input_context(&self) -> InputContext {
        match self.route {
            Route::Submission if self.form.is_submitting() => InputContext::FormSubmitting,
            Route::Submission => match self.form.phase() {
                FormPhase::Editing => InputContext::FormEditing(self.form.focus()),
                FormPhase::Submitted => InputContext::FormSubmitted,
            },
            Route::Reviews => match self.reviews.phase() {
                ListingPhase::Loaded(entries) if entries.is_empty() => {
                    InputContext::ReviewListEmpty
                }
                ListingPhase::Loading | ListingPhase::Loaded(_) => InputContext::ReviewList,
            },
        }
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than the terminal width to avoid
    /// autowrap, and padded with spaces so shorter rows clear stale cells
    /// left by the previous frame.
    fn normalise_viewport(&self, output: &str) -> String {
        let safe_width = self.content_width();
        let height = self.height.max(1) as usize;

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if char_width == 0 {
            output.push(ch);
            continue;
        }

        if visible_width.saturating_add(char_width) > width {
            break;
        }

        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    if visible_width < width {
        output.push_str(&" ".repeat(width - visible_width));
    }

    output
}
