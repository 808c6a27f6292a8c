//! Review list state: load phase and scroll position.

use crate::feedback::FeedbackEntry;

/// Load phase of the review list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingPhase {
    /// The read has been issued and has not reported back.
    #[default]
    Loading,
    /// The read finished; failures leave the list empty.
    Loaded(Vec<FeedbackEntry>),
}

/// State of one mounted review list.
///
/// Scrolling is line based because entries wrap to the terminal width; the
/// caller supplies the rendered content height when moving.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewListState {
    phase: ListingPhase,
    /// Number of lines scrolled from the top.
    pub scroll_offset: usize,
}

impl ReviewListState {
    /// Creates a list that is waiting for its first read.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load phase.
    #[must_use]
    pub const fn phase(&self) -> &ListingPhase {
        &self.phase
    }

    /// Returns true until the read reports back.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, ListingPhase::Loading)
    }

    /// Loaded entries, or an empty slice while loading.
    #[must_use]
    pub fn entries(&self) -> &[FeedbackEntry] {
        match &self.phase {
            ListingPhase::Loading => &[],
            ListingPhase::Loaded(entries) => entries,
        }
    }

    /// Returns to the loading phase at the top of the list.
    pub fn begin_loading(&mut self) {
        self.phase = ListingPhase::Loading;
        self.scroll_offset = 0;
    }

    /// Stores the entries returned by a successful read.
    pub fn finish(&mut self, entries: Vec<FeedbackEntry>) {
        self.phase = ListingPhase::Loaded(entries);
        self.scroll_offset = 0;
    }

    /// Records a failed read as an empty list.
    pub fn fail(&mut self) {
        self.finish(Vec::new());
    }

    /// Scrolls up by `step` lines.
    pub const fn scroll_up(&mut self, step: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(step);
    }

    /// Scrolls down by `step` lines without passing the last page.
    pub fn scroll_down(&mut self, step: usize, content_height: usize, visible_height: usize) {
        let max_offset = max_scroll_offset(content_height, visible_height);
        self.scroll_offset = self.scroll_offset.saturating_add(step).min(max_offset);
    }

    /// Jumps to the first line.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jumps so the last line sits at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self, content_height: usize, visible_height: usize) {
        self.scroll_offset = max_scroll_offset(content_height, visible_height);
    }

    /// Pulls the offset back after a resize shrank the content.
    pub fn clamp_scroll(&mut self, content_height: usize, visible_height: usize) {
        self.scroll_offset = self
            .scroll_offset
            .min(max_scroll_offset(content_height, visible_height));
    }
}

const fn max_scroll_offset(content_height: usize, visible_height: usize) -> usize {
    content_height.saturating_sub(visible_height)
}
