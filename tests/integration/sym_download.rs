//! Integration tests for the sym file downloader

use std::sync::Arc;
use sym_sizes::config::SymbolsConfig;
use sym_sizes::fetcher::{FileSizes, SymFileDownloader, SymFileFetcher, SymbolsHttpClient};

use crate::support::{gzip, RecordedRequest, StubResponse, StubServer};

const SYM_BODY: &str = "MODULE Linux x86_64 ABC123 libfoo.so\nFILE 0 foo.c\nFUNC 1000 10 0 main\n";

fn downloader_for(server: &StubServer) -> (SymFileDownloader, SymbolsConfig) {
    let config = SymbolsConfig::new(&server.url()).unwrap();
    let client = Arc::new(config.build_http_client().unwrap());
    let downloader = SymFileDownloader::new(SymbolsHttpClient::new(client, "test-token"));
    (downloader, config)
}

#[tokio::test]
async fn test_gzip_body_reports_both_sizes() {
    let compressed = gzip(SYM_BODY.repeat(50).as_bytes());
    let compressed_len = compressed.len() as u64;
    let server = StubServer::start(move |_: &RecordedRequest| {
        StubResponse::bytes(compressed.clone()).with_header("Content-Encoding", "gzip")
    })
    .await;
    let (downloader, config) = downloader_for(&server);

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    let sizes = downloader.fetch_sizes(&url).await.unwrap();

    assert_eq!(
        sizes,
        Some(FileSizes {
            compressed: compressed_len,
            decompressed: (SYM_BODY.len() * 50) as u64,
        })
    );
    assert!(compressed_len < (SYM_BODY.len() * 50) as u64);
}

#[tokio::test]
async fn test_identity_body_sizes_match() {
    let server =
        StubServer::start(|_: &RecordedRequest| StubResponse::bytes(SYM_BODY.as_bytes().to_vec()))
            .await;
    let (downloader, config) = downloader_for(&server);

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    let sizes = downloader.fetch_sizes(&url).await.unwrap().unwrap();

    assert_eq!(sizes.compressed, SYM_BODY.len() as u64);
    assert_eq!(sizes.decompressed, SYM_BODY.len() as u64);
}

#[tokio::test]
async fn test_request_headers_and_path() {
    let server =
        StubServer::start(|_: &RecordedRequest| StubResponse::bytes(SYM_BODY.as_bytes().to_vec()))
            .await;
    let (downloader, config) = downloader_for(&server);

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    downloader.fetch_sizes(&url).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/libfoo/ABC123/libfoo.sym");
    assert_eq!(requests[0].header("auth-token"), Some("test-token"));
    assert_eq!(requests[0].header("accept-encoding"), Some("gzip"));
}

#[tokio::test]
async fn test_non_success_status_is_none() {
    for status in [403u16, 404, 500] {
        let server = StubServer::start(move |_: &RecordedRequest| StubResponse::status(status)).await;
        let (downloader, config) = downloader_for(&server);

        let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
        let sizes = downloader.fetch_sizes(&url).await.unwrap();

        assert_eq!(sizes, None, "status {status} should be a skipped download");
    }
}

#[tokio::test]
async fn test_unreachable_server_is_an_error() {
    let config = SymbolsConfig::new("http://127.0.0.1:1/").unwrap();
    let client = Arc::new(config.build_http_client().unwrap());
    let downloader = SymFileDownloader::new(SymbolsHttpClient::new(client, "test-token"));

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    let result = downloader.fetch_sizes(&url).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("network"));
}

#[tokio::test]
async fn test_missing_content_length_uses_transmitted_bytes() {
    let plain = SYM_BODY.repeat(50);
    let compressed = gzip(plain.as_bytes());
    let compressed_len = compressed.len() as u64;
    let server = StubServer::start(move |_: &RecordedRequest| {
        StubResponse::bytes(compressed.clone())
            .with_header("Content-Encoding", "gzip")
            .without_content_length()
    })
    .await;
    let (downloader, config) = downloader_for(&server);

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    let sizes = downloader.fetch_sizes(&url).await.unwrap();

    assert_eq!(
        sizes,
        Some(FileSizes {
            compressed: compressed_len,
            decompressed: plain.len() as u64,
        })
    );
}

#[tokio::test]
async fn test_missing_content_length_identity_body() {
    let server = StubServer::start(|_: &RecordedRequest| {
        StubResponse::bytes(b"hello".to_vec()).without_content_length()
    })
    .await;
    let (downloader, config) = downloader_for(&server);

    let url = config.download_url("libfoo/ABC123/libfoo.sym").unwrap();
    let sizes = downloader.fetch_sizes(&url).await.unwrap();

    assert_eq!(
        sizes,
        Some(FileSizes {
            compressed: 5,
            decompressed: 5,
        })
    );
}
