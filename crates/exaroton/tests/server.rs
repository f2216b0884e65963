//! Integration tests for operations scoped to one server.

mod common;

use common::{MockTransport, client, server_json};
use exaroton::{ExarotonError, Method, Server, ServerStatus};
use serde_json::json;

/// Fetches server `abc123` through a fresh mock. The fetch is request #0.
async fn fetched_server() -> (Server<MockTransport>, MockTransport) {
    let (client, mock) = client();
    mock.respond_data(server_json("abc123", 1));
    let server = client.get_server("abc123").await.unwrap();
    (server, mock)
}

const BASE: &str = "https://api.exaroton.com/v1/servers/abc123";

#[tokio::test]
async fn test_set_ram_in_range_sends_one_request() {
    for gb in [2, 8, 16] {
        let (server, mock) = fetched_server().await;
        mock.respond_data(json!({ "ram": gb }));

        let ram = server.set_ram(gb).await.unwrap();
        assert_eq!(ram.gb(), gb);
        assert_eq!(mock.request_count(), 2);

        let request = mock.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{BASE}/options/ram"));
        assert_eq!(request.body_json(), json!({ "ram": gb }));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }
}

#[tokio::test]
async fn test_set_ram_out_of_range_sends_nothing() {
    for gb in [0, 1, 17, 32] {
        let (server, mock) = fetched_server().await;

        let err = server.set_ram(gb).await.unwrap_err();
        assert!(matches!(err, ExarotonError::Validation(_)));
        assert_eq!(mock.request_count(), 1, "only the initial fetch");
    }
}

#[tokio::test]
async fn test_get_ram() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!({ "ram": 4 }));

    assert_eq!(server.get_ram().await.unwrap().gb(), 4);
    assert_eq!(mock.last_request().method, Method::Get);
}

#[tokio::test]
async fn test_motd_round_trip() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!({ "motd": "Hello" }));
    mock.respond_data(json!({ "motd": "Goodbye" }));

    assert_eq!(server.fetch_motd().await.unwrap(), "Hello");
    assert_eq!(server.set_motd("Goodbye").await.unwrap(), "Goodbye");

    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{BASE}/options/motd"));
    assert_eq!(request.body_json(), json!({ "motd": "Goodbye" }));
}

#[tokio::test]
async fn test_start_stop_restart() {
    let (server, mock) = fetched_server().await;
    for _ in 0..3 {
        mock.respond(200, r#"{"success":true,"error":null,"data":null}"#);
    }

    server.start().await.unwrap();
    server.stop().await.unwrap();
    server.restart().await.unwrap();

    let requests = mock.requests();
    let urls: Vec<&str> = requests[1..].iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            format!("{BASE}/start"),
            format!("{BASE}/stop"),
            format!("{BASE}/restart"),
        ]
    );
    assert!(requests[1..].iter().all(|r| r.method == Method::Get));
}

#[tokio::test]
async fn test_start_reports_error_field() {
    let (server, mock) = fetched_server().await;
    mock.respond_error("Server is already online");

    let err = server.start().await.unwrap_err();
    assert!(err.to_string().contains("Server is already online"));
}

#[tokio::test]
async fn test_start_with_own_credits_posts_flag_and_checks_error() {
    let (server, mock) = fetched_server().await;
    mock.respond(200, r#"{"success":true,"error":null,"data":null}"#);
    mock.respond_error("Not enough credits");

    server.start_with_own_credits(true).await.unwrap();
    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body_json(), json!({ "useOwnCredits": true }));

    let err = server.start_with_own_credits(true).await.unwrap_err();
    assert!(err.as_api().is_some());
}

#[tokio::test]
async fn test_execute_command() {
    let (server, mock) = fetched_server().await;
    mock.respond(200, r#"{"success":true,"error":null,"data":null}"#);

    server.execute_command("say hi").await.unwrap();
    let request = mock.last_request();
    assert_eq!(request.url, format!("{BASE}/command"));
    assert_eq!(request.body_json(), json!({ "command": "say hi" }));
}

#[tokio::test]
async fn test_logs_and_share_logs() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!({ "content": "[12:00:00] Done" }));
    mock.respond_data(json!({
        "id": "xyz",
        "url": "https://mclo.gs/xyz",
        "raw": "https://api.mclo.gs/1/raw/xyz"
    }));

    let logs = server.get_logs().await.unwrap();
    assert_eq!(logs.content(), Some("[12:00:00] Done"));

    let shared = server.share_logs().await.unwrap();
    assert_eq!(shared.id(), "xyz");
    assert_eq!(shared.raw_url(), "https://api.mclo.gs/1/raw/xyz");
    assert_eq!(mock.last_request().url, format!("{BASE}/logs/share"));
}

#[tokio::test]
async fn test_refresh_returns_new_snapshot() {
    let (client, mock) = client();
    mock.respond_data(json!([server_json("abc123", 0)]));
    let listed = client.get_servers().await.unwrap().remove(0);
    assert!(!listed.is_fetched());

    mock.respond_data(server_json("abc123", 2));
    let refreshed = listed.refresh().await.unwrap();

    assert!(refreshed.is_fetched());
    assert_eq!(refreshed.status(), ServerStatus::Starting);
    assert_eq!(listed.status(), ServerStatus::Offline);
    assert!(refreshed.has_status(&[ServerStatus::Starting, ServerStatus::Loading]));
    assert!(!refreshed.has_status(&[ServerStatus::Online]));
}

// ---------------------------------------------------------------------------
// Player lists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_player_lists() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!(["whitelist", "ops", "banned-players"]));

    let lists = server.get_player_lists().await.unwrap();
    assert_eq!(lists, ["whitelist", "ops", "banned-players"]);
    assert_eq!(mock.last_request().url, format!("{BASE}/playerlists"));
}

#[tokio::test]
async fn test_player_list_add_uses_echoed_entries() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!(["alice", "bob"]));
    mock.respond_data(json!(["alice", "bob", "carol"]));

    let list = server.get_player_list("whitelist").await.unwrap();
    assert_eq!(list.entries().unwrap(), ["alice", "bob"]);

    let updated = list.add(["carol"]).await.unwrap();
    assert_eq!(updated.entries().unwrap(), ["alice", "bob", "carol"]);
    assert_eq!(list.entries().unwrap(), ["alice", "bob"], "old list unchanged");

    let request = mock.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, format!("{BASE}/playerlists/whitelist"));
    assert_eq!(request.body_json(), json!({ "entries": ["carol"] }));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_player_list_remove_and_refresh() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!(["alice", "bob"]));
    mock.respond_data(json!(["bob"]));
    mock.respond_data(json!(["bob", "dave"]));

    let list = server.get_player_list("ops").await.unwrap();
    let removed = list.remove(vec!["alice".to_string()]).await.unwrap();
    assert_eq!(removed.entries().unwrap(), ["bob"]);
    assert_eq!(mock.last_request().method, Method::Delete);

    let refreshed = removed.refresh().await.unwrap();
    assert_eq!(refreshed.name(), "ops");
    assert_eq!(refreshed.entries().unwrap(), ["bob", "dave"]);
}

#[tokio::test]
async fn test_player_list_add_without_data_fails() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(json!([]));
    mock.respond_error("Invalid player name");

    let list = server.get_player_list("whitelist").await.unwrap();
    let err = list.add(["not a name!"]).await.unwrap_err();
    assert_eq!(
        err.as_api().and_then(|e| e.message.as_deref()),
        Some("Invalid player name")
    );
}
