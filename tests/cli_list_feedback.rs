//! CLI integration tests for the `--list` flag.
//!
//! The binary runs as a subprocess against either a Wiremock server playing
//! the hosted table or a freshly migrated `SQLite` file.

mod support;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{create_temp_dir, run_kudos};

async fn run_list_against(server: &MockServer) -> std::process::Output {
    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        run_kudos(
            &["--list", "--backend-url", &uri],
            &[("KUDOS_API_KEY", "anon-key")],
        )
    })
    .await
    .unwrap_or_else(|error| panic!("listing task panicked: {error}"))
}

#[tokio::test(flavor = "multi_thread")]
async fn list_prints_hosted_entries_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/feedback"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "name": "Grace",
                "email": "grace@example.com",
                "rating": 5,
                "comments": "Wonderful",
                "created_at": "2026-10-18T09:30:00Z"
            },
            {
                "id": 1,
                "name": "Ada",
                "email": null,
                "rating": 4,
                "comments": "Solid",
                "created_at": "2026-10-18T09:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_list_against(&server).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.starts_with("2 responses collected\n"), "stdout: {stdout}");
    let grace = stdout.find("Grace <grace@example.com>");
    let ada = stdout.find("Ada");
    assert!(grace.is_some() && grace < ada, "stdout: {stdout}");
    assert!(stdout.contains("  Wonderful"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_reports_a_rejected_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/feedback"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let output = run_list_against(&server).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr.contains("backend rejected the API key"),
        "stderr: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn list_shows_the_empty_state_for_a_new_database() {
    let temp_dir = create_temp_dir();
    let db_url = temp_dir
        .path()
        .join("kudos.sqlite")
        .to_string_lossy()
        .to_string();

    let migrated = run_kudos(&["--migrate-db", "--database-url", &db_url], &[]);
    assert!(migrated.status.success(), "migration should succeed");

    let output = run_kudos(&["--list", "--database-url", &db_url], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "No feedback yet\nBe the first to share your thoughts!\n"
    );
}

#[rstest]
#[case::no_backend(&["--list"], "no backend configured")]
#[case::missing_key(&["--list", "--backend-url", "https://abc.supabase.co"], "API key is required")]
#[case::bad_url(&["--list", "--backend-url", "not a url", "--api-key", "k"], "backend URL is invalid")]
fn list_rejects_incomplete_configuration(#[case] args: &[&str], #[case] expected: &str) {
    let output = run_kudos(args, &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(expected), "stderr: {stderr}");
}
