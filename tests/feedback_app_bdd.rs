//! Behavioural tests for submitting feedback and browsing the review list.

use std::sync::Arc;

use bubbletea_rs::{Cmd, Model};
use kudos::feedback::InMemoryFeedbackGateway;
use kudos::feedback::models::test_support::entry_at_minute;
use kudos::tui::FeedbackApp;
use kudos::tui::messages::AppMsg;
use kudos::{FeedbackGateway, FormField};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(ScenarioState, Default)]
struct FeedbackAppState {
    store: Slot<Arc<InMemoryFeedbackGateway>>,
    app: Slot<FeedbackApp>,
    pending_cmd: Slot<Option<Cmd>>,
}

#[fixture]
fn feedback_app_state() -> FeedbackAppState {
    FeedbackAppState::default()
}

type StepResult = Result<(), Box<dyn std::error::Error>>;

fn install_store(state: &FeedbackAppState, store: InMemoryFeedbackGateway) {
    let shared = Arc::new(store);
    let gateway: Arc<dyn FeedbackGateway> = Arc::clone(&shared) as Arc<dyn FeedbackGateway>;
    let mut app = FeedbackApp::new().with_gateway(gateway);
    let _ = app.handle_message(&AppMsg::WindowResized {
        width: 100,
        height: 30,
    });
    state.store.set(shared);
    state.app.set(app);
    state.pending_cmd.set(None);
}

fn dispatch(state: &FeedbackAppState, msg: &AppMsg) -> StepResult {
    let cmd = state
        .app
        .with_mut(|app| app.handle_message(msg))
        .ok_or("app not initialised")?;
    state.pending_cmd.set(cmd);
    Ok(())
}

fn type_text(state: &FeedbackAppState, text: &str) -> StepResult {
    for character in text.chars() {
        dispatch(state, &AppMsg::InsertChar(character))?;
    }
    Ok(())
}

fn parse_field(field: &str) -> Result<FormField, Box<dyn std::error::Error>> {
    match field.trim_matches('"') {
        "name" => Ok(FormField::Name),
        "email" => Ok(FormField::Email),
        "rating" => Ok(FormField::Rating),
        "comments" => Ok(FormField::Comments),
        other => Err(format!("unknown form field {other}").into()),
    }
}

fn rendered_view(state: &FeedbackAppState) -> Result<String, Box<dyn std::error::Error>> {
    Ok(state
        .app
        .with_ref(FeedbackApp::view)
        .ok_or("app not initialised")?)
}

// --- Given steps ---

#[given("a feedback form backed by an empty store")]
fn given_empty_store(feedback_app_state: &FeedbackAppState) {
    install_store(feedback_app_state, InMemoryFeedbackGateway::new());
}

#[given("a feedback form backed by a store that rejects inserts")]
fn given_failing_inserts(feedback_app_state: &FeedbackAppState) {
    let store = InMemoryFeedbackGateway::new();
    store.fail_inserts(true);
    install_store(feedback_app_state, store);
}

#[given("a feedback store that rejects reads")]
fn given_failing_reads(feedback_app_state: &FeedbackAppState) {
    let store = InMemoryFeedbackGateway::new();
    store.fail_selects(true);
    install_store(feedback_app_state, store);
}

#[given("a store holding feedback from {first} then {second}")]
fn given_two_entries(feedback_app_state: &FeedbackAppState, first: String, second: String) {
    let store = InMemoryFeedbackGateway::with_entries(vec![
        entry_at_minute(1, first.trim_matches('"'), 4, 0),
        entry_at_minute(2, second.trim_matches('"'), 5, 30),
    ]);
    install_store(feedback_app_state, store);
}

// --- When steps ---

#[when("the user enters name {name}, email {email}, rating {rating} and comments {comments}")]
fn when_user_fills_form(
    feedback_app_state: &FeedbackAppState,
    name: String,
    email: String,
    rating: u8,
    comments: String,
) -> StepResult {
    type_text(feedback_app_state, name.trim_matches('"'))?;
    dispatch(feedback_app_state, &AppMsg::FocusNext)?;
    type_text(feedback_app_state, email.trim_matches('"'))?;
    dispatch(feedback_app_state, &AppMsg::FocusNext)?;
    dispatch(feedback_app_state, &AppMsg::SetRating(rating))?;
    dispatch(feedback_app_state, &AppMsg::FocusNext)?;
    type_text(feedback_app_state, comments.trim_matches('"'))
}

#[when("the form is submitted")]
fn when_form_submitted(feedback_app_state: &FeedbackAppState) -> StepResult {
    dispatch(feedback_app_state, &AppMsg::Submit)
}

#[when("the review list is opened")]
fn when_review_list_opened(feedback_app_state: &FeedbackAppState) -> StepResult {
    dispatch(feedback_app_state, &AppMsg::ShowReviews)
}

#[when("the pending command completes")]
fn when_pending_command_completes(feedback_app_state: &FeedbackAppState) -> StepResult {
    let cmd = feedback_app_state
        .pending_cmd
        .with_mut(Option::take)
        .flatten()
        .ok_or("no pending command")?;

    let runtime = tokio::runtime::Runtime::new()?;
    let msg = runtime.block_on(cmd).ok_or("command produced no message")?;
    let app_msg = msg
        .downcast::<AppMsg>()
        .map_err(|_| "command produced an unexpected message type")?;

    // The follow-up is the notification expiry timer; it is not awaited.
    let _expiry = feedback_app_state
        .app
        .with_mut(|app| app.handle_message(&app_msg))
        .ok_or("app not initialised")?;
    Ok(())
}

// --- Then steps ---

#[then("the field error for {field} reads {message}")]
fn then_field_error(
    feedback_app_state: &FeedbackAppState,
    field: String,
    message: String,
) -> StepResult {
    let form_field = parse_field(&field)?;
    let actual = feedback_app_state
        .app
        .with_ref(|app| app.form().errors().get(form_field).map(ToOwned::to_owned))
        .ok_or("app not initialised")?;

    assert_eq!(actual.as_deref(), Some(message.trim_matches('"')));
    assert!(rendered_view(feedback_app_state)?.contains(message.trim_matches('"')));
    Ok(())
}

#[then("the store received {count} inserts")]
fn then_insert_count(feedback_app_state: &FeedbackAppState, count: usize) -> StepResult {
    let calls = feedback_app_state
        .store
        .with_ref(|store| store.insert_calls())
        .ok_or("store not initialised")?;
    assert_eq!(calls, count);
    Ok(())
}

#[then("the store holds an entry from {name} without email")]
fn then_store_holds_entry(feedback_app_state: &FeedbackAppState, name: String) -> StepResult {
    let entries = feedback_app_state
        .store
        .with_ref(|store| store.entries())
        .ok_or("store not initialised")?;
    let expected_name = name.trim_matches('"');

    assert!(
        entries
            .iter()
            .any(|entry| entry.name == expected_name && entry.email.is_none()),
        "no entry from {expected_name} without email in {entries:?}"
    );
    Ok(())
}

#[then("the view contains {text}")]
fn then_view_contains(feedback_app_state: &FeedbackAppState, text: String) -> StepResult {
    let expected = text.trim_matches('"');
    let view = rendered_view(feedback_app_state)?;
    assert!(view.contains(expected), "expected {expected:?} in view:\n{view}");
    Ok(())
}

#[then("the entry from {first} is listed before the entry from {second}")]
fn then_listed_before(
    feedback_app_state: &FeedbackAppState,
    first: String,
    second: String,
) -> StepResult {
    let view = rendered_view(feedback_app_state)?;
    let first_at = view
        .find(first.trim_matches('"'))
        .ok_or("first entry missing from view")?;
    let second_at = view
        .find(second.trim_matches('"'))
        .ok_or("second entry missing from view")?;
    assert!(first_at < second_at, "unexpected order in view:\n{view}");
    Ok(())
}

#[scenario(path = "tests/features/feedback_submission.feature", index = 0)]
fn empty_form_is_rejected_locally(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_submission.feature", index = 1)]
fn invalid_email_blocks_the_insert(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_submission.feature", index = 2)]
fn valid_feedback_is_stored(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_submission.feature", index = 3)]
fn backend_failure_keeps_the_draft(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_listing.feature", index = 0)]
fn entries_are_listed_newest_first(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_listing.feature", index = 1)]
fn empty_store_shows_the_empty_state(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}

#[scenario(path = "tests/features/feedback_listing.feature", index = 2)]
fn failed_read_shows_an_error(feedback_app_state: FeedbackAppState) {
    let _ = feedback_app_state;
}
