//! Behavioural tests for local database migrations and schema telemetry.

mod support;

use std::path::Path;

use kudos::persistence::{INITIAL_SCHEMA_VERSION, PersistenceError, migrate_database};
use kudos::telemetry::TelemetryEvent;
use kudos::telemetry::test_support::RecordingSink;
use kudos::{FeedbackDraft, FeedbackGateway, SortDirection, SqliteFeedbackGateway};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;

use support::create_temp_dir;

#[derive(ScenarioState, Default)]
struct MigrationState {
    database_url: Slot<String>,
    temp_dir: Slot<TempDir>,
    schema_version: Slot<String>,
    error: Slot<PersistenceError>,
    telemetry: Slot<std::sync::Arc<RecordingSink>>,
}

#[fixture]
fn migration_state() -> MigrationState {
    MigrationState::default()
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn database_url(migration_state: &MigrationState) -> String {
    migration_state
        .database_url
        .with_ref(Clone::clone)
        .expect("database URL not initialised")
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn recorded_schema_versions(migration_state: &MigrationState) -> Vec<String> {
    migration_state
        .telemetry
        .with_ref(|sink| sink.take())
        .expect("telemetry sink not initialised")
        .into_iter()
        .filter_map(|event| match event {
            TelemetryEvent::SchemaVersionRecorded { schema_version } => Some(schema_version),
            TelemetryEvent::FeedbackSubmitted { .. }
            | TelemetryEvent::FeedbackListLoaded { .. } => None,
        })
        .collect()
}

// --- Given steps ---

#[given("an in-memory database")]
fn in_memory_database(migration_state: &MigrationState) {
    migration_state.database_url.set(":memory:".to_owned());
}

#[given("a blank database URL")]
fn blank_database_url(migration_state: &MigrationState) {
    migration_state.database_url.set("   ".to_owned());
}

#[given("a directory database path")]
fn directory_database_path(migration_state: &MigrationState) {
    let temp_dir = create_temp_dir();
    let url = path_to_string(temp_dir.path());
    migration_state.temp_dir.set(temp_dir);
    migration_state.database_url.set(url);
}

#[given("a temporary database file")]
fn temporary_database_file(migration_state: &MigrationState) {
    let temp_dir = create_temp_dir();
    let url = path_to_string(&temp_dir.path().join("kudos.sqlite"));
    migration_state.temp_dir.set(temp_dir);
    migration_state.database_url.set(url);
}

#[given("a telemetry sink")]
fn telemetry_sink(migration_state: &MigrationState) {
    migration_state.telemetry.set(std::sync::Arc::default());
}

// --- When steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[when("database migrations are run")]
fn run_migrations(migration_state: &MigrationState) {
    let telemetry = migration_state
        .telemetry
        .get()
        .expect("telemetry sink not initialised");

    match migrate_database(&database_url(migration_state), telemetry.as_ref()) {
        Ok(version) => migration_state
            .schema_version
            .set(version.as_str().to_owned()),
        Err(error) => migration_state.error.set(error),
    }
}

#[when("database migrations are run again")]
fn run_migrations_again(migration_state: &MigrationState) {
    run_migrations(migration_state);
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[when("feedback from {name} is stored locally")]
fn store_feedback_locally(migration_state: &MigrationState, name: String) {
    let feedback = FeedbackDraft {
        name: name.trim_matches('"').to_owned(),
        email: String::new(),
        rating: 5,
        comments: "Stored on disk".to_owned(),
    }
    .validate()
    .expect("draft should validate");

    let gateway = SqliteFeedbackGateway::new(&database_url(migration_state))
        .expect("gateway should open the migrated database");
    tokio::runtime::Runtime::new()
        .expect("runtime should start")
        .block_on(gateway.insert(&feedback))
        .expect("insert should succeed");
}

// --- Then steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the schema version is {expected}")]
fn schema_version_is(migration_state: &MigrationState, expected: String) {
    let actual = migration_state
        .schema_version
        .with_ref(Clone::clone)
        .expect("schema version missing");

    assert_eq!(actual, expected.trim_matches('"'), "schema version mismatch");
}

#[then("telemetry records the schema version")]
fn telemetry_records_schema_version(migration_state: &MigrationState) {
    assert_eq!(
        recorded_schema_versions(migration_state),
        vec![INITIAL_SCHEMA_VERSION.to_owned()]
    );
}

#[then("telemetry records the schema version twice")]
fn telemetry_records_schema_version_twice(migration_state: &MigrationState) {
    assert_eq!(
        recorded_schema_versions(migration_state),
        vec![
            INITIAL_SCHEMA_VERSION.to_owned(),
            INITIAL_SCHEMA_VERSION.to_owned()
        ],
        "expected idempotent migration to record the same schema version twice"
    );
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("a persistence error {expected} is reported")]
fn persistence_error_is(migration_state: &MigrationState, expected: String) {
    let error = migration_state
        .error
        .with_ref(Clone::clone)
        .expect("expected persistence error");

    assert_eq!(error.to_string(), expected.trim_matches('"'));
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("a persistence error starts with {expected_prefix}")]
fn persistence_error_starts_with(migration_state: &MigrationState, expected_prefix: String) {
    let expected_clean = expected_prefix.trim_matches('"');
    let error = migration_state
        .error
        .with_ref(Clone::clone)
        .expect("expected persistence error");

    assert!(
        error.to_string().starts_with(expected_clean),
        "expected error to start with {expected_clean:?}, got {error}"
    );
}

#[then("no telemetry is recorded")]
fn no_telemetry_is_recorded(migration_state: &MigrationState) {
    let versions = recorded_schema_versions(migration_state);
    assert!(versions.is_empty(), "expected no telemetry, got {versions:?}");
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the local database lists {name}")]
fn local_database_lists(migration_state: &MigrationState, name: String) {
    let gateway = SqliteFeedbackGateway::new(&database_url(migration_state))
        .expect("gateway should reopen the database");
    let entries = tokio::runtime::Runtime::new()
        .expect("runtime should start")
        .block_on(gateway.select_all(SortDirection::Descending))
        .expect("select should succeed");

    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, [name.trim_matches('"')]);
}

#[scenario(path = "tests/features/database_migration.feature", index = 0)]
fn migrations_record_schema_version(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 1)]
fn migrations_fail_on_blank_database_url(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 2)]
fn migrations_fail_on_directory_path(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 3)]
fn migrations_are_idempotent(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 4)]
fn feedback_survives_a_reconnect(migration_state: MigrationState) {
    let _ = migration_state;
}
