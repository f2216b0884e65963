//! Integration tests for `File`: info, raw content, and transfers.

mod common;

use std::path::PathBuf;

use common::{MockTransport, client, file_json, server_json};
use exaroton::{ExarotonError, Method, Server};
use futures_util::TryStreamExt;
use serde_json::json;

const FILES: &str = "https://api.exaroton.com/v1/servers/abc123/files";

async fn fetched_server() -> (Server<MockTransport>, MockTransport) {
    let (client, mock) = client();
    mock.respond_data(server_json("abc123", 1));
    let server = client.get_server("abc123").await.unwrap();
    (server, mock)
}

/// A path under the system temp dir that no other test uses.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("exaroton-test-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn test_get_file_encodes_path_as_one_segment() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("configs/server.properties", false, None));

    let file = server.get_file("/configs/server.properties").await.unwrap();
    assert_eq!(file.path(), "configs/server.properties");
    assert_eq!(file.name(), "server.properties");
    assert!(file.is_text_file());
    assert!(file.children().is_none());
    assert_eq!(
        mock.last_request().url,
        format!("{FILES}/info/configs%2Fserver.properties")
    );
}

#[tokio::test]
async fn test_directory_carries_children() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json(
        "/",
        true,
        Some(vec![
            file_json("/world", true, None),
            file_json("/server.properties", false, None),
        ]),
    ));

    let root = server.get_file("/").await.unwrap();
    assert!(root.is_directory());
    let children = root.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].path(), "world");
    assert_eq!(children[1].path(), "server.properties");
    assert_eq!(children[1].size(), 128);
}

#[tokio::test]
async fn test_refresh_uses_new_payload() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("logs/latest.log", false, None));
    let mut updated = file_json("logs/latest.log", false, None);
    updated["size"] = json!(4096);
    mock.respond_data(updated);

    let file = server.get_file("logs/latest.log").await.unwrap();
    let refreshed = file.refresh().await.unwrap();
    assert_eq!(file.size(), 128);
    assert_eq!(refreshed.size(), 4096);
}

#[tokio::test]
async fn test_get_content_reads_raw_body() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("server.properties", false, None));
    mock.respond(200, "motd=Hello\n");

    let file = server.get_file("server.properties").await.unwrap();
    assert_eq!(file.get_content().await.unwrap(), "motd=Hello\n");

    let request = mock.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, format!("{FILES}/data/server.properties"));
}

#[tokio::test]
async fn test_raw_failure_keeps_only_status() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("missing.txt", false, None));
    mock.respond(
        404,
        r#"{"success":false,"error":"File not found","data":null}"#,
    );

    let file = server.get_file("missing.txt").await.unwrap();
    let err = file.get_content().await.unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.status, Some(404));
    assert_eq!(api.message, None);
}

#[tokio::test]
async fn test_put_content_and_delete() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("ops.txt", false, None));
    mock.respond(200, "");
    mock.respond(200, "");

    let file = server.get_file("ops.txt").await.unwrap();
    file.put_content("Steve\n").await.unwrap();
    let put = mock.last_request();
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.body, b"Steve\n");

    file.delete().await.unwrap();
    let delete = mock.last_request();
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.url, format!("{FILES}/data/ops.txt"));
}

#[tokio::test]
async fn test_create_as_directory_on_new_path() {
    let (server, mock) = fetched_server().await;
    mock.respond(200, "");

    let dir = server.file("/backups/2024");
    assert_eq!(dir.path(), "backups/2024");
    assert_eq!(dir.name(), "2024");
    dir.create_as_directory().await.unwrap();

    assert_eq!(mock.request_count(), 2, "no info request before creating");
    let request = mock.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, format!("{FILES}/data/backups%2F2024"));
    assert_eq!(request.header("Content-Type"), Some("inode/directory"));
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_with_path_strips_leading_slashes() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("world", true, None));
    mock.respond(200, "");
    mock.respond(200, "");

    let world = server.get_file("world").await.unwrap();
    let slashed = world.with_path("//a/b");
    let plain = world.with_path("a/b");
    assert_eq!(slashed.path(), "a/b");
    assert_eq!(slashed.path(), plain.path());
    assert!(!slashed.is_directory());
    assert!(slashed.children().is_none());

    slashed.put_content("x").await.unwrap();
    plain.put_content("x").await.unwrap();
    let requests = mock.requests();
    assert_eq!(requests[2].url, format!("{FILES}/data/a%2Fb"));
    assert_eq!(requests[3].url, requests[2].url);
}

#[tokio::test]
async fn test_upload_stream_sends_reader_contents() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("world.zip", false, None));
    mock.respond(200, "");

    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 256) as u8).collect();
    let file = server.get_file("world.zip").await.unwrap();
    file.upload_stream(std::io::Cursor::new(data.clone()))
        .await
        .unwrap();

    assert_eq!(mock.last_request().body, data);
}

#[tokio::test]
async fn test_upload_from_local_file() {
    let source = temp_path("upload-source.txt");
    tokio::fs::write(&source, b"from disk").await.unwrap();

    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("notes.txt", false, None));
    mock.respond(200, "");

    let file = server.get_file("notes.txt").await.unwrap();
    file.upload(&source).await.unwrap();
    assert_eq!(mock.last_request().body, b"from disk");

    tokio::fs::remove_file(&source).await.unwrap();
}

#[tokio::test]
async fn test_upload_missing_local_file_is_io_error() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("notes.txt", false, None));

    let file = server.get_file("notes.txt").await.unwrap();
    let err = file.upload(temp_path("does-not-exist")).await.unwrap_err();
    assert!(matches!(err, ExarotonError::Io { .. }));
    assert_eq!(mock.request_count(), 2, "no upload request was sent");
}

#[tokio::test]
async fn test_download_writes_local_file() {
    let target = temp_path("download-target.txt");

    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("server.properties", false, None));
    mock.respond(200, "pvp=true\n");

    let file = server.get_file("server.properties").await.unwrap();
    file.download(&target).await.unwrap();
    assert_eq!(tokio::fs::read(&target).await.unwrap(), b"pvp=true\n");

    tokio::fs::remove_file(&target).await.unwrap();
}

#[tokio::test]
async fn test_failed_download_keeps_existing_target() {
    let target = temp_path("download-keep.txt");
    tokio::fs::write(&target, b"previous good content").await.unwrap();

    let (server, mock) = fetched_server().await;
    mock.respond_broken(200, "partial");

    let err = server
        .file("server.properties")
        .download(&target)
        .await
        .unwrap_err();
    assert!(matches!(err, ExarotonError::Transport(_)));
    assert_eq!(
        tokio::fs::read(&target).await.unwrap(),
        b"previous good content"
    );
    let partial = PathBuf::from(format!("{}.part", target.display()));
    assert!(!partial.exists(), "partial download was removed");

    tokio::fs::remove_file(&target).await.unwrap();
}

#[tokio::test]
async fn test_download_into_missing_directory_is_io_error() {
    let target = temp_path("no-such-dir").join("file.txt");

    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("server.properties", false, None));
    mock.respond(200, "pvp=true\n");

    let file = server.get_file("server.properties").await.unwrap();
    let err = file.download(&target).await.unwrap_err();
    assert!(matches!(err, ExarotonError::Io { .. }));
}

#[tokio::test]
async fn test_download_stream_yields_body() {
    let (server, mock) = fetched_server().await;
    mock.respond_data(file_json("latest.log", false, None));
    mock.respond(200, "line one\nline two\n");

    let file = server.get_file("latest.log").await.unwrap();
    let chunks: Vec<Vec<u8>> = file
        .download_stream()
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.concat(), b"line one\nline two\n");
}
