//! End-to-end tests: crawl a mock site into an on-disk index, then query it

use haze_search::crawler::{crawl, CrawlOptions};
use haze_search::storage::{index_sink, open_index, IndexStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_site(times: u64) -> MockServer {
    let mock_server = MockServer::start().await;

    let pages = [
        (
            "/",
            r#"<html><head><title>Airship Society</title></head><body>
            <p>News about lighter than air travel.</p>
            <a href="/zeppelins">Zeppelins</a>
            <a href="/balloons">Balloons</a>
            </body></html>"#,
        ),
        (
            "/zeppelins",
            r#"<html><head><title>Zeppelins</title></head><body>
            <p>Rigid airships, also called zeppelins, carry gas cells inside a frame.</p>
            <script>track("zeppelins")</script>
            </body></html>"#,
        ),
        (
            "/balloons",
            r#"<html><head><title>Balloons</title></head><body>
            <p>Hot air balloons rise because heated air is less dense.</p>
            </body></html>"#,
        ),
    ];

    for (route, body) in pages {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(times)
            .mount(&mock_server)
            .await;
    }

    mock_server
}

fn site_options(mock_server: &MockServer) -> CrawlOptions {
    CrawlOptions {
        seed_urls: vec![format!("{}/", mock_server.uri())],
        max_depth: 1,
        rate_limit_ms: 0,
        user_agent: "TestBot/1.0".to_string(),
        ..CrawlOptions::default()
    }
}

#[tokio::test]
async fn test_crawl_then_search() {
    let mock_server = setup_site(1).await;
    let temp_dir = TempDir::new().unwrap();
    let index = open_index(&temp_dir.path().join("search.db")).unwrap();

    let progress = crawl(site_options(&mock_server), index_sink(&index), |_| {})
        .await
        .unwrap();

    assert_eq!(progress.indexed, 3);
    assert_eq!(index.count_documents().unwrap(), 3);

    let results = index.search("zeppelins", 10).unwrap();
    let hit = results
        .iter()
        .find(|r| r.url == format!("{}/zeppelins", mock_server.uri()))
        .expect("zeppelins page not found");
    assert_eq!(hit.title, "Zeppelins");
    assert!(hit.snippet.contains("<b>zeppelins</b>"));
    assert!(results.windows(2).all(|w| w[0].rank <= w[1].rank));

    let results = index.search("balloons heated", 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, format!("{}/balloons", mock_server.uri()));
}

#[tokio::test]
async fn test_script_text_not_searchable() {
    let mock_server = setup_site(1).await;
    let temp_dir = TempDir::new().unwrap();
    let index = open_index(&temp_dir.path().join("search.db")).unwrap();

    crawl(site_options(&mock_server), index_sink(&index), |_| {})
        .await
        .unwrap();

    assert!(index.search("track", 10).unwrap().is_empty());
}

#[tokio::test]
async fn test_recrawl_replaces_documents() {
    let mock_server = setup_site(2).await;
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("search.db");

    {
        let index = open_index(&db_path).unwrap();
        crawl(site_options(&mock_server), index_sink(&index), |_| {})
            .await
            .unwrap();
    }

    let index = open_index(&db_path).unwrap();
    assert_eq!(index.count_documents().unwrap(), 3);

    crawl(site_options(&mock_server), index_sink(&index), |_| {})
        .await
        .unwrap();

    assert_eq!(index.count_documents().unwrap(), 3);
    assert_eq!(index.search("zeppelins rigid", 10).unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_limit_respected() {
    let mock_server = setup_site(1).await;
    let index = haze_search::storage::SqliteIndex::open_in_memory().unwrap();

    crawl(site_options(&mock_server), index_sink(&index), |_| {})
        .await
        .unwrap();

    let results = index.search("air", 1).unwrap();
    assert_eq!(results.len(), 1);
}
