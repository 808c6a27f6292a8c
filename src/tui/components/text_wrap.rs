//! Width-aware word wrapping for free-text comments.
//!
//! Comments are shown exactly as submitted, so wrapping must not collapse
//! whitespace. [`wrap_lines`] keeps:
//! - leading indentation, repeated on continuation lines
//! - runs of spaces between words
//! - empty lines
//!
//! Widths are measured in terminal columns, not characters, so wide glyphs
//! (CJK, emoji) never overflow the viewport.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps `text` into lines no wider than `max_width` columns.
///
/// A `max_width` of zero disables wrapping and only splits on line breaks.
#[must_use]
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return text.lines().map(ToOwned::to_owned).collect();
    }

    text.lines()
        .flat_map(|line| wrap_line_preserving_indent(line, max_width))
        .collect()
}

/// Prefixes every wrapped line of `text` with `indent`.
///
/// The indent's width is subtracted from `max_width` before wrapping.
#[must_use]
pub fn wrap_indented(text: &str, indent: &str, max_width: usize) -> Vec<String> {
    let available = if max_width == 0 {
        0
    } else {
        max_width.saturating_sub(indent.width()).max(1)
    };
    wrap_lines(text, available)
        .into_iter()
        .map(|line| format!("{indent}{line}"))
        .collect()
}

fn wrap_line_preserving_indent(line: &str, max_width: usize) -> Vec<String> {
    if line.width() <= max_width {
        return vec![line.to_owned()];
    }

    let (indent, content) = split_at_content_start(line);
    let indent_width = indent.width();
    if indent_width >= max_width {
        return hard_wrap(line, max_width);
    }

    let mut context = WrapContext::new(indent, max_width.saturating_sub(indent_width));
    for segment in split_preserving_spaces(content) {
        match segment {
            Segment::Word(word) => context.process_word(word),
            Segment::Space(space) => context.process_space(space),
        }
    }
    context.finish()
}

fn split_at_content_start(line: &str) -> (&str, &str) {
    let content = line.trim_start();
    let indent_len = line.len().saturating_sub(content.len());
    line.split_at(indent_len)
}

/// Accumulates wrapped lines that all start with the same indent.
struct WrapContext<'a> {
    indent: &'a str,
    available_width: usize,
    lines: Vec<String>,
    current_line: String,
    content_width: usize,
}

impl<'a> WrapContext<'a> {
    fn new(indent: &'a str, available_width: usize) -> Self {
        Self {
            indent,
            available_width,
            lines: Vec::new(),
            current_line: indent.to_owned(),
            content_width: 0,
        }
    }

    const fn is_line_empty(&self) -> bool {
        self.content_width == 0
    }

    fn start_new_line(&mut self) {
        let mut finished = std::mem::replace(&mut self.current_line, self.indent.to_owned());
        let kept = finished.trim_end().len();
        finished.truncate(kept);
        self.lines.push(finished);
        self.content_width = 0;
    }

    fn push(&mut self, text: &str) {
        self.current_line.push_str(text);
        self.content_width = self.content_width.saturating_add(text.width());
    }

    fn process_word(&mut self, word: &str) {
        let word_width = word.width();
        if !self.is_line_empty()
            && self.content_width.saturating_add(word_width) > self.available_width
        {
            self.start_new_line();
        }

        if word_width <= self.available_width {
            self.push(word);
            return;
        }

        let pieces = hard_wrap(word, self.available_width);
        let last = pieces.len().saturating_sub(1);
        for (index, piece) in pieces.iter().enumerate() {
            self.push(piece);
            if index < last {
                self.start_new_line();
            }
        }
    }

    fn process_space(&mut self, space: &str) {
        // Spaces at a wrap point are dropped so continuation lines align.
        if self.is_line_empty() {
            return;
        }

        if self.content_width.saturating_add(space.width()) <= self.available_width {
            self.push(space);
        } else {
            self.start_new_line();
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.lines.push(self.current_line);
        self.lines
    }
}

/// Breaks `text` at exactly `max_width` columns regardless of word
/// boundaries. A glyph wider than `max_width` gets a line to itself.
fn hard_wrap(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0_usize;

    for character in text.chars() {
        let char_width = character.width().unwrap_or(0);
        if current_width > 0 && current_width.saturating_add(char_width) > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(character);
        current_width = current_width.saturating_add(char_width);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

enum Segment<'a> {
    Word(&'a str),
    Space(&'a str),
}

/// Splits content into alternating word and whitespace runs, borrowing from
/// the input.
fn split_preserving_spaces(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut run_start = 0_usize;
    let mut run_is_space: Option<bool> = None;

    for (offset, character) in content.char_indices() {
        let is_space = character.is_whitespace();
        match run_is_space {
            Some(previous) if previous != is_space => {
                if let Some(run) = content.get(run_start..offset) {
                    segments.push(make_segment(run, previous));
                }
                run_start = offset;
                run_is_space = Some(is_space);
            }
            Some(_) => {}
            None => run_is_space = Some(is_space),
        }
    }

    if let Some(is_space) = run_is_space
        && let Some(run) = content.get(run_start..)
        && !run.is_empty()
    {
        segments.push(make_segment(run, is_space));
    }
    segments
}

const fn make_segment(run: &str, is_space: bool) -> Segment<'_> {
    if is_space {
        Segment::Space(run)
    } else {
        Segment::Word(run)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use unicode_width::UnicodeWidthStr;

    use super::{wrap_indented, wrap_lines};

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(wrap_lines("Short text", 80), vec!["Short text"]);
    }

    #[test]
    fn long_paragraph_fits_width() {
        let text = "This is a longer paragraph that should be wrapped across multiple lines \
                    when the width is limited.";

        let lines = wrap_lines(text, 40);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width() <= 40, "line '{line}' exceeds 40 columns");
        }
    }

    #[test]
    fn empty_lines_between_paragraphs_survive() {
        assert_eq!(
            wrap_lines("First paragraph.\n\nSecond paragraph.", 80),
            vec!["First paragraph.", "", "Second paragraph."]
        );
    }

    #[test]
    fn repeated_spaces_survive() {
        assert_eq!(
            wrap_lines("column1  column2  column3", 80),
            vec!["column1  column2  column3"]
        );
    }

    #[test]
    fn continuation_lines_keep_indent() {
        let text = "    This is an indented line that is quite long and should wrap.";

        for line in wrap_lines(text, 30) {
            assert!(line.starts_with("    "), "lost indent: '{line}'");
            assert!(line.width() <= 30, "too wide: '{line}'");
        }
    }

    #[test]
    fn overlong_word_is_hard_wrapped() {
        let word = "a".repeat(25);

        assert_eq!(
            wrap_lines(&word, 10),
            vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]
        );
    }

    #[rstest]
    #[case::cjk("漢字漢字漢字漢字漢字", 6)]
    #[case::emoji("🙂🙂🙂🙂🙂🙂", 5)]
    fn wide_glyphs_are_measured_in_columns(#[case] text: &str, #[case] width: usize) {
        for line in wrap_lines(text, width) {
            assert!(line.width() <= width, "'{line}' exceeds {width} columns");
        }
    }

    #[test]
    fn zero_width_only_splits_on_newlines() {
        assert_eq!(wrap_lines("a b\nc", 0), vec!["a b", "c"]);
    }

    #[test]
    fn indented_wrap_prefixes_every_line() {
        let lines = wrap_indented("alpha beta gamma", "  ", 8);

        assert_eq!(lines, vec!["  alpha", "  beta", "  gamma"]);
    }
}
