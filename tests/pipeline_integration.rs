//! End-to-end pipeline tests (traverse → download), with conversion
//! disabled so no PDF rendering backend is needed.

use lectern_core::{CrawlConfig, HttpClient, pipeline};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, path_str: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pipeline_crawls_weeks_and_downloads_into_subdir() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/course/index.html",
        br#"<a href="week1.html">1</a><a href="week2.html">2</a>"#,
    )
    .await;
    mount(&server, "/course/week1.html", br#"<a href="w1.pdf">w1</a>"#).await;
    mount(&server, "/course/week2.html", br#"<a href="w2.pdf">w2</a>"#).await;
    mount(&server, "/course/w1.pdf", b"week one pdf").await;
    mount(&server, "/course/w2.pdf", b"week two pdf").await;

    let start = Url::parse(&format!("{}/course/index.html", server.uri())).unwrap();
    let config = CrawlConfig::new(start, "week*.html", "", Some("cs101".to_string())).unwrap();

    let root = TempDir::new().unwrap();
    let client = HttpClient::new();
    let report = pipeline::run(&client, &config, root.path(), "", None)
        .await
        .unwrap();

    assert_eq!(report.pages_scanned, 2);
    assert_eq!(report.downloaded(), 2);
    assert_eq!(report.download_skipped(), 0);
    assert!(report.conversions.is_empty(), "conversion was disabled");

    let dir = root.path().join("cs101");
    assert_eq!(report.download_dir, dir);
    assert_eq!(
        std::fs::read(dir.join("1_w1.pdf")).unwrap(),
        b"week one pdf"
    );
    assert_eq!(
        std::fs::read(dir.join("2_w2.pdf")).unwrap(),
        b"week two pdf"
    );
}

#[tokio::test]
async fn test_pipeline_single_page_mode_scans_only_the_start_page() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/course/index.html",
        br#"<a href="notes.pdf">n</a><a href="week1.html">unfollowed</a>"#,
    )
    .await;
    mount(&server, "/course/notes.pdf", b"notes pdf").await;

    let start = Url::parse(&format!("{}/course/index.html", server.uri())).unwrap();
    let config = CrawlConfig::new(start, "", "", None).unwrap();

    let root = TempDir::new().unwrap();
    let client = HttpClient::new();
    let report = pipeline::run(&client, &config, root.path(), "", None)
        .await
        .unwrap();

    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.downloaded(), 1);
    assert!(root.path().join("1_notes.pdf").exists());
}

#[tokio::test]
async fn test_pipeline_rerun_downloads_nothing_new() {
    let server = MockServer::start().await;
    mount(&server, "/index.html", br#"<a href="a.pdf">a</a>"#).await;
    mount(&server, "/a.pdf", b"pdf body").await;

    let start = Url::parse(&format!("{}/index.html", server.uri())).unwrap();
    let config = CrawlConfig::new(start, "", "", None).unwrap();

    let root = TempDir::new().unwrap();
    let client = HttpClient::new();

    let first = pipeline::run(&client, &config, root.path(), "", None)
        .await
        .unwrap();
    assert_eq!(first.downloaded(), 1);

    let second = pipeline::run(&client, &config, root.path(), "", None)
        .await
        .unwrap();
    assert_eq!(second.downloaded(), 0);
    assert_eq!(second.download_skipped(), 1);
}
