//! Integration tests for the uploads catalog client

use futures_util::StreamExt;
use serde_json::json;
use std::sync::Arc;
use sym_sizes::config::{CreatedWindow, SymbolsConfig};
use sym_sizes::fetcher::{FetcherError, SymbolCatalog, SymbolsHttpClient, UploadsCatalog};
use sym_sizes::FileRecord;

use crate::support::{RecordedRequest, StubResponse, StubServer};

fn file(key: &str, try_symbols: bool) -> serde_json::Value {
    json!({
        "key": key,
        "size": 1000,
        "created_at": "2022-10-21T12:00:00Z",
        "upload": {"try_symbols": try_symbols}
    })
}

fn catalog_for(server: &StubServer) -> UploadsCatalog {
    let config = SymbolsConfig::new(&server.url()).unwrap();
    let client = Arc::new(config.build_http_client().unwrap());
    UploadsCatalog::new(SymbolsHttpClient::new(client, "test-token"), &config).unwrap()
}

fn paged(request: &RecordedRequest) -> StubResponse {
    match request.param("page") {
        Some("1") => StubResponse::json(json!({"files": [
            file("v1/libfoo/AAA/libfoo.sym", false),
            file("try/v1/libfoo/BBB/libfoo.sym", true),
            file("v1/libbar/CCC/libbar.sym", false),
        ]})),
        Some("2") => StubResponse::json(json!({"files": [
            file("v1/LIBFOO/DDD/LIBFOO.sym", false),
        ]})),
        Some("3") => StubResponse::json(json!({"files": [
            file("v1/libfoo/EEE/libfoo.sym", false),
        ]})),
        _ => StubResponse::json(json!({"files": []})),
    }
}

#[tokio::test]
async fn test_search_filters_and_pages_until_empty() {
    let server = StubServer::start(paged).await;
    let catalog = catalog_for(&server);

    let records: Vec<FileRecord> = catalog
        .search("libfoo")
        .map(|r| r.unwrap())
        .collect()
        .await;

    let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["v1/libfoo/AAA/libfoo.sym", "v1/libfoo/EEE/libfoo.sym"]);
    assert_eq!(records[0].size, 1000);
    assert_eq!(records[0].created_at, "2022-10-21T12:00:00Z");

    // Page 2 had no matching record but was not empty, so paging went on
    let pages: Vec<String> = server
        .requests()
        .iter()
        .map(|r| r.param("page").unwrap().to_string())
        .collect();
    assert_eq!(pages, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_search_request_shape() {
    let server = StubServer::start(paged).await;
    let catalog = catalog_for(&server);

    let mut stream = catalog.search("libfoo");
    stream.next().await.unwrap().unwrap();

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.path, "/api/uploads/files/content/");
    assert_eq!(request.param("key"), Some("libfoo"));
    assert_eq!(request.params("created_at"), vec![">=2022-10-21", "<2022-10-23"]);
    assert_eq!(request.header("auth-token"), Some("test-token"));
    assert!(request.header("user-agent").unwrap().starts_with("sym-sizes/"));
}

#[tokio::test]
async fn test_search_uses_configured_window() {
    let server = StubServer::start(paged).await;
    let config = SymbolsConfig::new(&server.url())
        .unwrap()
        .with_created_window(CreatedWindow::parse("2022-08-19", "2022-08-21").unwrap());
    let client = Arc::new(config.build_http_client().unwrap());
    let catalog =
        UploadsCatalog::new(SymbolsHttpClient::new(client, "test-token"), &config).unwrap();

    catalog.search("libfoo").next().await.unwrap().unwrap();

    assert_eq!(
        server.requests()[0].params("created_at"),
        vec![">=2022-08-19", "<2022-08-21"]
    );
}

#[tokio::test]
async fn test_search_is_lazy() {
    let server = StubServer::start(paged).await;
    let catalog = catalog_for(&server);

    let first: Vec<_> = catalog.search("libfoo").take(1).collect().await;

    assert_eq!(first.len(), 1);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_search_error_ends_stream() {
    let server = StubServer::start(|request: &RecordedRequest| match request.param("page") {
        Some("1") => StubResponse::json(json!({"files": [file("v1/libfoo/AAA/libfoo.sym", false)]})),
        _ => StubResponse::status(503),
    })
    .await;
    let catalog = catalog_for(&server);

    let results: Vec<_> = catalog.search("libfoo").collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(FetcherError::HttpStatus { status: 503, .. })
    ));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_search_rejects_unexpected_body() {
    let server =
        StubServer::start(|_: &RecordedRequest| StubResponse::json(json!({"results": []}))).await;
    let catalog = catalog_for(&server);

    let results: Vec<_> = catalog.search("libfoo").collect().await;

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(FetcherError::ParseError(_))));
}
