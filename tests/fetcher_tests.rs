mod common;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use linksum::errors::FetchError;
use linksum::web::ContentFetcher;
use std::time::{Duration, Instant};

const ARTICLE_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>  Story Title  </title><style>body { color: red; }</style></head>
  <body>
    <header>Site header</header>
    <article>
      <nav><a href="/">Home</a> <a href="/news">News</a></nav>
      <h1>Big News</h1>
      <p>First paragraph.</p>
      <p>Second <b>bold</b> paragraph.</p>
      <script>trackVisit();</script>
    </article>
    <footer>Copyright</footer>
  </body>
</html>"#;

async fn test_site() -> String {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE_PAGE) }))
        .route(
            "/body-only",
            get(|| async { Html("<html><body><aside>Ad</aside><p>Just body</p></body></html>") }),
        )
        .route(
            "/empty",
            get(|| async { Html("<html><head><title>Nothing</title></head></html>") }),
        )
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html("<body>late</body>")
            }),
        )
        .route("/untitled", get(|| async { Html("<html><body>x</body></html>") }));
    common::spawn_server(app).await
}

fn fetcher() -> ContentFetcher {
    ContentFetcher::new(
        Duration::ZERO,
        Duration::from_millis(500),
        Duration::from_millis(500),
    )
    .expect("build fetcher")
}

#[tokio::test]
async fn test_article_text_excludes_nav_and_scripts() {
    let base = test_site().await;
    let text = fetcher()
        .get_article_content(&format!("{base}/article"))
        .await
        .expect("article fetch succeeds");

    assert_eq!(
        text,
        "Big News\nFirst paragraph.\nSecond\nbold\nparagraph."
    );
    assert!(!text.contains("Home"));
    assert!(!text.contains("trackVisit"));
    assert!(!text.contains("Site header"));
}

#[tokio::test]
async fn test_body_is_used_when_no_article() {
    let base = test_site().await;
    let text = fetcher()
        .get_article_content(&format!("{base}/body-only"))
        .await
        .expect("body fetch succeeds");
    assert_eq!(text, "Just body");
}

#[tokio::test]
async fn test_document_without_article_or_body_text_returns_sentinel_failure() {
    let base = test_site().await;
    let result = fetcher().get_article_content(&format!("{base}/empty")).await;

    assert_eq!(result, Err(FetchError::NoContent));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Content could not be extracted. Returning raw HTML."
    );
}

#[tokio::test]
async fn test_404_is_a_failure_naming_the_url() {
    let base = test_site().await;
    let url = format!("{base}/missing");
    let result = fetcher().get_article_content(&url).await;

    let err = result.expect_err("404 must fail");
    assert!(err.to_string().contains(&url));
    assert_eq!(err, FetchError::Unreachable { url });
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let base = test_site().await;
    let url = format!("{base}/slow");
    let result = fetcher().get_article_content(&url).await;

    assert_eq!(result, Err(FetchError::Unreachable { url }));
}

#[tokio::test]
async fn test_connection_refused_is_a_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let url = format!("http://127.0.0.1:{port}/gone");
    let result = fetcher().get_article_content(&url).await;

    assert_eq!(result, Err(FetchError::Unreachable { url }));
}

#[tokio::test]
async fn test_malformed_url_is_a_failure() {
    let result = fetcher().get_article_content("http://exa mple").await;
    assert!(matches!(result, Err(FetchError::Unreachable { .. })));
}

#[tokio::test]
async fn test_courtesy_delay_is_applied_before_fetch() {
    let base = test_site().await;
    let delayed = ContentFetcher::new(
        Duration::from_millis(200),
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .expect("build fetcher");

    let started = Instant::now();
    let result = delayed.get_article_content(&format!("{base}/body-only")).await;

    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_page_title() {
    let base = test_site().await;
    let f = fetcher();

    assert_eq!(
        f.get_page_title(&format!("{base}/article")).await,
        Ok("Story Title".to_string())
    );
    assert_eq!(
        f.get_page_title(&format!("{base}/untitled")).await,
        Ok("No Title Found".to_string())
    );
    assert_eq!(
        f.get_page_title(&format!("{base}/missing")).await,
        Err(FetchError::Status(404))
    );
}

#[tokio::test]
async fn test_page_title_timeout_is_transport_error() {
    let base = test_site().await;
    let result = fetcher().get_page_title(&format!("{base}/slow")).await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}
