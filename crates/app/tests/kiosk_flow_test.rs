//! End-to-end tests of the kiosk against a mocked configuration API.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::io::BufReader;

use kiosk::build_app;
use kiosk_infrastructure::KioskConfig;
use kiosk_ui::{Mode, UiUpdate, strings};

const SCREEN_DESIGN: &str = r#"{
    "branchNameEnglish": "Main Branch",
    "branchNameArabic": "الفرع الرئيسي",
    "buttons": [
        {"nameEnglish": "Opening Hours", "nameArabic": "ساعات العمل", "buttonType": "ShowMessage",
         "messageEnglish": "We are open 8 to 3", "messageArabic": "نعمل من ٨ إلى ٣"},
        {"nameEnglish": "Cash", "nameArabic": "نقد", "buttonType": "IssueTicket",
         "serviceNameEnglish": "Cash Deposit", "serviceNameArabic": "إيداع نقدي"}
    ]
}"#;

fn write_config(dir: &Path, base_url: &str, extra: &str) -> KioskConfig {
    let path = dir.join("kiosk.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[api]
base_url = "{base_url}"
timeout_secs = 5

[bank]
name_english = "Arab Bank"
name_arabic = "البنك العربي"
branch_id = "66"

[credentials]
username = "kiosk"
password = "s3cret"

{extra}
"#
        ),
    )
    .unwrap();
    KioskConfig::from_path(&path).unwrap()
}

async fn token_mock(server: &mut ServerGuard, access: &str) -> Mock {
    server
        .mock("POST", "/api/auth/token")
        .match_body(Matcher::Json(credentials_body()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"access_token":"{access}","refresh_token":"R","expires_in":5}}"#
        ))
        .expect(1)
        .create_async()
        .await
}

fn credentials_body() -> serde_json::Value {
    serde_json::json!({"userName": "kiosk", "password": "s3cret", "bankName": "Arab Bank"})
}

async fn screen_mock(server: &mut ServerGuard, bearer: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/api/screen-design")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("branchId".into(), "66".into()),
            Matcher::UrlEncoded("onlyAllocated".into(), "true".into()),
        ]))
        .match_header("authorization", format!("Bearer {bearer}").as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn fatal_text(updates: &[UiUpdate]) -> &str {
    match updates {
        [UiUpdate::Fatal(view)] => &view.text,
        other => panic!("expected a fatal screen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_kiosk_session_end_to_end() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let token = token_mock(&mut server, "A1").await;
    let screen = screen_mock(&mut server, "A1", 200, SCREEN_DESIGN).await;

    let config = write_config(dir.path(), &server.url(), "");
    let app = build_app(&config).unwrap();

    let input = BufReader::new(&b"2\nar\nb\n1\nq\n"[..]);
    let mut out = Vec::new();
    app.run(input, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    token.assert_async().await;
    screen.assert_async().await;
    assert!(out.contains("Main Branch"));
    assert!(out.contains(" 2. Cash"));
    assert!(out.contains("A ticket has been issued for Cash Deposit"));
    assert!(out.contains("تم إصدار تذكرة لإيداع نقدي"));
    assert!(out.contains("الفرع الرئيسي"));
    assert!(out.contains("نعمل من ٨ إلى ٣"));
}

#[tokio::test]
async fn test_unauthorized_screen_request_refreshes_and_retries_once() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let token = token_mock(&mut server, "A1").await;
    let rejected = screen_mock(&mut server, "A1", 401, "token revoked").await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .match_body(Matcher::Json(serde_json::json!({"refreshToken": "R"})))
        .with_status(200)
        .with_body(r#"{"access_token":"A2","expires_in":5}"#)
        .expect(1)
        .create_async()
        .await;
    let accepted = screen_mock(&mut server, "A2", 200, SCREEN_DESIGN).await;

    let mut app = build_app(&write_config(dir.path(), &server.url(), "")).unwrap();
    let updates = app.start().await;

    token.assert_async().await;
    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
    match &updates[..] {
        [UiUpdate::Screen(view)] => assert_eq!(view.buttons.len(), 2),
        other => panic!("unexpected updates {other:?}"),
    }
}

#[tokio::test]
async fn test_second_unauthorized_answer_is_fatal() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    token_mock(&mut server, "A1").await;
    screen_mock(&mut server, "A1", 401, "no").await;
    server
        .mock("POST", "/api/auth/refresh")
        .with_status(200)
        .with_body(r#"{"access_token":"A2","expires_in":5}"#)
        .create_async()
        .await;
    let retried = screen_mock(&mut server, "A2", 401, "still no").await;

    let mut app = build_app(&write_config(dir.path(), &server.url(), "")).unwrap();
    let updates = app.start().await;

    retried.assert_async().await;
    assert_eq!(fatal_text(&updates), strings::SCREEN_LOAD_FAILED.english);
    assert!(app.state().has_failed());
}

#[tokio::test]
async fn test_rejected_credentials_fail_startup() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    server
        .mock("POST", "/api/auth/token")
        .with_status(401)
        .with_body("invalid credentials")
        .create_async()
        .await;

    let mut app = build_app(&write_config(dir.path(), &server.url(), "")).unwrap();
    let updates = app.start().await;

    assert_eq!(fatal_text(&updates), strings::STARTUP_FAILED.english);
}

#[tokio::test]
async fn test_unreachable_server_shows_connection_message() {
    let dir = TempDir::new().unwrap();
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let config = write_config(
        dir.path(),
        &format!("http://127.0.0.1:{port}"),
        "[display]\nlanguage = \"ar\"",
    );
    let mut app = build_app(&config).unwrap();
    let updates = app.start().await;

    assert_eq!(fatal_text(&updates), strings::CONNECTION.arabic);
}

#[tokio::test]
async fn test_cached_token_survives_restart() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let token = token_mock(&mut server, "A1").await;
    screen_mock(&mut server, "A1", 200, SCREEN_DESIGN).await;

    let cache_path = dir.path().join("tokens.json");
    let extra = format!(
        "[auth]\ntoken_cache_path = {:?}",
        cache_path.display().to_string()
    );
    let config = write_config(dir.path(), &server.url(), &extra);

    let mut first = build_app(&config).unwrap();
    first.start().await;
    assert!(cache_path.exists());

    let mut second = build_app(&config).unwrap();
    let updates = second.start().await;

    token.assert_async().await;
    assert!(matches!(&updates[..], [UiUpdate::Screen(_)]));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_screen() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    token_mock(&mut server, "A1").await;
    let ok = screen_mock(&mut server, "A1", 200, SCREEN_DESIGN).await;

    let mut app = build_app(&write_config(dir.path(), &server.url(), "")).unwrap();
    app.start().await;

    ok.remove_async().await;
    screen_mock(&mut server, "A1", 500, "maintenance").await;

    assert!(app.refresh().await.is_empty());
    assert_eq!(app.state().mode(), &Mode::Grid);
    assert_eq!(app.state().screen().map(|s| s.buttons.len()), Some(2));
}

#[tokio::test]
async fn test_out_of_range_token_lifetime_still_starts() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let token = server
        .mock("POST", "/api/auth/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"A1","refresh_token":"R","expires_in":1000000000000}"#)
        .create_async()
        .await;
    let screen = screen_mock(&mut server, "A1", 200, SCREEN_DESIGN).await;

    let mut app = build_app(&write_config(dir.path(), &server.url(), "")).unwrap();
    let updates = app.start().await;

    token.assert_async().await;
    screen.assert_async().await;
    assert!(matches!(&updates[..], [UiUpdate::Screen(_)]));
}
