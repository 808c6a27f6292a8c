//! Review list component.
//!
//! Renders the loading indicator, the empty state, or every loaded entry.
//! Entries are flattened into lines first so the view can scroll by line
//! while comments keep their original line breaks.

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use super::rating::{RatingControl, RatingSize};
use super::text_wrap::wrap_indented;
use crate::feedback::FeedbackEntry;
use crate::tui::state::ListingPhase;

/// Shown while the read is in flight.
pub const LOADING_TEXT: &str = "Loading feedback...";
/// Headline of the empty state.
pub const EMPTY_TITLE: &str = "No feedback yet";
/// Subtitle of the empty state.
pub const EMPTY_SUBTITLE: &str = "Be the first to share your thoughts!";

const COMMENT_INDENT: &str = "  ";

/// Context for rendering the review list.
#[derive(Debug, Clone)]
pub struct FeedbackListViewContext<'a, Tz: TimeZone> {
    /// Load phase and entries.
    pub phase: &'a ListingPhase,
    /// Number of lines scrolled from the top.
    pub scroll_offset: usize,
    /// Lines available for the list body.
    pub visible_height: usize,
    /// Columns available; zero disables wrapping.
    pub max_width: usize,
    /// Zone used to display `created_at`.
    pub zone: &'a Tz,
}

/// Stateless renderer for the review list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackListComponent;

impl FeedbackListComponent {
    /// Renders the visible window of the list.
    #[must_use]
    pub fn view<Tz>(ctx: &FeedbackListViewContext<'_, Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let lines = body_lines(ctx.phase, ctx.max_width, ctx.zone);
        let mut output = String::new();
        for line in lines
            .iter()
            .skip(ctx.scroll_offset)
            .take(ctx.visible_height.max(1))
        {
            output.push_str(line);
            output.push('\n');
        }
        output
    }

    /// Total number of body lines, used to bound scrolling.
    #[must_use]
    pub fn content_height<Tz>(phase: &ListingPhase, max_width: usize, zone: &Tz) -> usize
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        body_lines(phase, max_width, zone).len()
    }
}

fn body_lines<Tz>(phase: &ListingPhase, max_width: usize, zone: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match phase {
        ListingPhase::Loading => vec![format!("⠿ {LOADING_TEXT}")],
        ListingPhase::Loaded(entries) if entries.is_empty() => empty_state_lines(),
        ListingPhase::Loaded(entries) => {
            let mut lines = vec![format_count(entries.len()), String::new()];
            for entry in entries {
                lines.extend(format_entry(entry, zone, max_width));
                lines.push(String::new());
            }
            lines
        }
    }
}

fn empty_state_lines() -> Vec<String> {
    vec![
        EMPTY_TITLE.to_owned(),
        EMPTY_SUBTITLE.to_owned(),
        String::new(),
        "[n] Submit Feedback".to_owned(),
    ]
}

/// Formats the count line, e.g. `1 response collected`.
#[must_use]
pub fn format_count(count: usize) -> String {
    let noun = if count == 1 { "response" } else { "responses" };
    format!("{count} {noun} collected")
}

/// Formats one entry as display lines.
///
/// The header carries the name and, when present, the email. The comment
/// keeps its whitespace and line breaks and is wrapped to `max_width`.
#[must_use]
pub fn format_entry<Tz>(entry: &FeedbackEntry, zone: &Tz, max_width: usize) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    match entry.email.as_deref() {
        Some(email) => lines.push(format!("{} <{email}>", entry.name)),
        None => lines.push(entry.name.clone()),
    }

    let stars = RatingControl::read_only(entry.rating.get()).with_size(RatingSize::Small);
    lines.push(format!(
        "{}  {}  {}/5",
        format_timestamp(&entry.created_at, zone),
        stars.render(),
        entry.rating
    ));
    lines.extend(wrap_indented(&entry.comments, COMMENT_INDENT, max_width));
    lines
}

/// Formats a timestamp as `October 18th, 2026 at 3:04 PM` in `zone`.
#[must_use]
pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(zone);
    let day = local.day();
    format!(
        "{} {day}{}, {} at {}",
        local.format("%B"),
        ordinal_suffix(day),
        local.format("%Y"),
        local.format("%-I:%M %p")
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}
