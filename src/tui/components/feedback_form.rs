//! Submission form and confirmation screen.

use std::ops::Range;

use super::rating::{RatingControl, RatingSize};
use super::text_wrap::{wrap_indented, wrap_lines};
use crate::feedback::FormField;
use crate::feedback::validation::COMMENTS_MAX_CHARS;
use crate::tui::state::{FormPhase, SubmissionFormState};

/// Form headline.
pub const FORM_TITLE: &str = "Share Your Feedback";
const FORM_SUBTITLE: &str =
    "We value your opinion! Please take a moment to tell us about your experience.";
const FORM_FOOTER: &str = "Your feedback helps us improve. Thank you for your time!";
/// Confirmation headline.
pub const CONFIRMATION_TITLE: &str = "Thank You!";
const CONFIRMATION_BODY: &str = "Your feedback has been successfully submitted. We appreciate \
                                 you taking the time to share your thoughts.";

const FIELD_INDENT: &str = "  ";
const CURSOR: char = '_';

/// Context for rendering the submission form.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackFormViewContext<'a> {
    /// Form state to project.
    pub form: &'a SubmissionFormState,
    /// Columns available; zero disables wrapping.
    pub max_width: usize,
    /// Rows available; zero renders every line.
    pub visible_height: usize,
}

/// Stateless renderer for the submission route.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackFormComponent;

impl FeedbackFormComponent {
    /// Renders the editing form or, after a successful insert, the
    /// confirmation screen.
    #[must_use]
    pub fn view(ctx: &FeedbackFormViewContext<'_>) -> String {
        let (lines, focus) = match ctx.form.phase() {
            FormPhase::Editing => editing_lines(ctx.form, ctx.max_width),
            FormPhase::Submitted => (confirmation_lines(ctx.max_width), 0..0),
        };
        let offset = scroll_offset_for(&focus, lines.len(), ctx.visible_height);
        let take = if ctx.visible_height == 0 {
            lines.len()
        } else {
            ctx.visible_height
        };

        let mut output = String::new();
        for line in lines.iter().skip(offset).take(take) {
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}

/// First line to draw so the focused field starts on screen.
///
/// The form stays anchored at its title while the focused field fits.
fn scroll_offset_for(focus: &Range<usize>, total: usize, visible_height: usize) -> usize {
    if visible_height == 0 || total <= visible_height || focus.end <= visible_height {
        return 0;
    }
    focus.start.min(total.saturating_sub(visible_height))
}

/// Builds the editing form and the line range of the focused field.
fn editing_lines(form: &SubmissionFormState, max_width: usize) -> (Vec<String>, Range<usize>) {
    let mut lines = vec![FORM_TITLE.to_owned()];
    lines.extend(wrap_lines(FORM_SUBTITLE, max_width));
    lines.push(String::new());

    let mut focus = 0..0;
    for field in FormField::ALL {
        let start = lines.len();
        lines.push(field_label(form, field));
        lines.extend(field_body(form, field, max_width));
        if let Some(message) = form.errors().get(field) {
            lines.push(format!("{FIELD_INDENT}! {message}"));
        }
        if form.focus() == field {
            focus = start..lines.len();
        }
        lines.push(String::new());
    }

    lines.push(buttons(form));
    lines.push(String::new());
    lines.push(FORM_FOOTER.to_owned());
    (lines, focus)
}

fn field_label(form: &SubmissionFormState, field: FormField) -> String {
    let marker = if form.focus() == field { ">" } else { " " };
    let required = if field == FormField::Email { "" } else { " *" };
    format!("{marker} {}{required}", field.label())
}

fn field_body(form: &SubmissionFormState, field: FormField, max_width: usize) -> Vec<String> {
    let draft = form.draft();
    let focused = form.focus() == field;
    match field {
        FormField::Name => vec![text_input(&draft.name, "Your name", focused)],
        FormField::Email => vec![text_input(&draft.email, "your.email@example.com", focused)],
        FormField::Rating => vec![rating_input(draft.rating)],
        FormField::Comments => comments_input(&draft.comments, focused, max_width),
    }
}

fn text_input(value: &str, placeholder: &str, focused: bool) -> String {
    match (value.is_empty(), focused) {
        (true, false) => format!("{FIELD_INDENT}({placeholder})"),
        (_, true) => format!("{FIELD_INDENT}{value}{CURSOR}"),
        (false, false) => format!("{FIELD_INDENT}{value}"),
    }
}

fn rating_input(rating: u8) -> String {
    let stars = RatingControl::interactive(rating)
        .with_size(RatingSize::Large)
        .render();
    if rating > 0 {
        format!("{FIELD_INDENT}{stars}  {rating} / 5")
    } else {
        format!("{FIELD_INDENT}{stars}")
    }
}

fn comments_input(comments: &str, focused: bool, max_width: usize) -> Vec<String> {
    let mut lines = if comments.is_empty() && !focused {
        vec![format!("{FIELD_INDENT}(Share your thoughts and feedback...)")]
    } else {
        let mut wrapped = wrap_indented(comments, FIELD_INDENT, max_width);
        // A trailing newline starts a fresh, still empty, line.
        if comments.is_empty() || comments.ends_with('\n') {
            wrapped.push(FIELD_INDENT.to_owned());
        }
        wrapped
    };
    if focused && let Some(last) = lines.last_mut() {
        last.push(CURSOR);
    }
    lines.push(format!(
        "{FIELD_INDENT}{} / {COMMENTS_MAX_CHARS}",
        comments.chars().count()
    ));
    lines
}

fn buttons(form: &SubmissionFormState) -> String {
    let submit = if form.is_submitting() {
        "Submitting..."
    } else {
        "Submit Feedback"
    };
    format!("[ {submit} ]  [ View Feedback ]")
}

fn confirmation_lines(max_width: usize) -> Vec<String> {
    let mut lines = vec![CONFIRMATION_TITLE.to_owned()];
    lines.extend(wrap_lines(CONFIRMATION_BODY, max_width));
    lines.push(String::new());
    lines.push("[Enter] Submit Another Response  [v] View All Feedback".to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{CONFIRMATION_TITLE, FORM_TITLE, FeedbackFormComponent, FeedbackFormViewContext};
    use crate::tui::state::SubmissionFormState;

    fn render(form: &SubmissionFormState) -> String {
        FeedbackFormComponent::view(&FeedbackFormViewContext {
            form,
            max_width: 80,
            visible_height: 0,
        })
    }

    fn type_text(form: &mut SubmissionFormState, text: &str) {
        for character in text.chars() {
            if character == '\n' {
                form.insert_newline();
            } else {
                form.insert_char(character);
            }
        }
    }

    #[fixture]
    fn blank_form() -> SubmissionFormState {
        SubmissionFormState::new()
    }

    #[rstest]
    fn blank_form_shows_labels_and_placeholders(blank_form: SubmissionFormState) {
        let output = render(&blank_form);

        assert!(output.starts_with(FORM_TITLE));
        assert!(output.contains("> Name *"));
        assert!(output.contains("  Email (optional)\n"));
        assert!(output.contains("(your.email@example.com)"));
        assert!(output.contains("(Share your thoughts and feedback...)"));
        assert!(output.contains("0 / 1000"));
        assert!(output.contains("[ Submit Feedback ]"));
    }

    #[rstest]
    fn rating_label_appears_once_selected(mut blank_form: SubmissionFormState) {
        assert!(!render(&blank_form).contains(" / 5"));

        blank_form.set_rating(3);

        assert!(render(&blank_form).contains("[★] [★] [★] [☆] [☆]  3 / 5"));
    }

    #[rstest]
    fn field_errors_render_beneath_inputs(mut blank_form: SubmissionFormState) {
        assert!(blank_form.begin_submit().is_err());

        let output = render(&blank_form);

        assert!(output.contains("  ! Name is required"));
        assert!(output.contains("  ! Please select a rating"));
        assert!(output.contains("  ! Comments are required"));
    }

    #[rstest]
    fn comments_keep_line_breaks_and_count_characters(mut blank_form: SubmissionFormState) {
        blank_form.focus_previous();
        type_text(&mut blank_form, "Great\n\nthanks");

        let output = render(&blank_form);

        assert!(output.contains("  Great\n  \n  thanks_\n"), "{output}");
        assert!(output.contains("13 / 1000"));
    }

    #[rstest]
    fn submitting_relabels_the_button(mut blank_form: SubmissionFormState) {
        type_text(&mut blank_form, "Al");
        blank_form.set_rating(5);
        blank_form.focus_previous();
        type_text(&mut blank_form, "Great");
        blank_form.begin_submit().expect("form should validate");

        assert!(render(&blank_form).contains("[ Submitting... ]"));
    }

    #[rstest]
    fn short_viewport_follows_focus(mut blank_form: SubmissionFormState) {
        blank_form.focus_previous();
        type_text(&mut blank_form, "line one\nline two");

        let output = FeedbackFormComponent::view(&FeedbackFormViewContext {
            form: &blank_form,
            max_width: 80,
            visible_height: 5,
        });

        assert_eq!(output.lines().count(), 5);
        assert!(output.starts_with("> Comments *\n"), "{output}");
        assert!(output.contains("line two_"));
    }

    #[rstest]
    fn tall_viewport_starts_at_title(blank_form: SubmissionFormState) {
        let output = FeedbackFormComponent::view(&FeedbackFormViewContext {
            form: &blank_form,
            max_width: 80,
            visible_height: 60,
        });

        assert!(output.starts_with(FORM_TITLE));
    }

    #[rstest]
    fn submitted_form_shows_confirmation(mut blank_form: SubmissionFormState) {
        type_text(&mut blank_form, "Al");
        blank_form.set_rating(5);
        blank_form.focus_previous();
        type_text(&mut blank_form, "Great");
        blank_form.begin_submit().expect("form should validate");
        blank_form.complete_submit();

        let output = render(&blank_form);

        assert!(output.starts_with(CONFIRMATION_TITLE));
        assert!(output.contains("Submit Another Response"));
        assert!(!output.contains(FORM_TITLE));
    }
}
