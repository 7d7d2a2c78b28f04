use std::sync::Arc;

use comics_downloader::{DownloadError, HttpFetcher, Loader, Options, PageFetcher, Registry};

#[tokio::test]
async fn test_http_fetcher_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/naruto/700")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>ok</html>")
        .create_async()
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let body = fetcher.fetch(&format!("{}/naruto/700", server.url())).await.unwrap();

    assert_eq!(body, "<html>ok</html>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_fetcher_rejects_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/gone")
        .with_status(503)
        .create_async()
        .await;

    let url = format!("{}/gone", server.url());
    let err = HttpFetcher::new().unwrap().fetch(&url).await.unwrap_err();

    match err {
        DownloadError::HttpStatus { url: failed, status } => {
            assert_eq!(failed, url);
            assert_eq!(status, 503);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_loader_over_http() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let image = |page: usize| format!("{}/img/naruto-700-{}.jpg", base, page);

    let first_page = format!(
        r#"<html><body>
        <select id="pageMenu"><option value="/naruto/700">1</option><option value="/naruto/700/2">2</option></select>
        <img id="img" src="{}">
        </body></html>"#,
        image(1)
    );
    let second_page = format!(r#"<html><body><img id="img" src="{}"></body></html>"#, image(2));

    let first = server.mock("GET", "/naruto/700").with_body(first_page).create_async().await;
    let second = server.mock("GET", "/naruto/700/2").with_body(second_page).create_async().await;

    let loader = Loader::new(Registry::builtin(), Arc::new(HttpFetcher::new().unwrap()));
    let url = format!("{}/naruto/700", base);
    let options = Options::new("www.mangareader.net", url.clone());

    let collection = loader.load_comic_from_source(&options).await.unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].source, "www.mangareader.net");
    assert_eq!(collection[0].url_source, url);
    assert_eq!(collection[0].name, "naruto");
    assert_eq!(collection[0].issue_number, "700");
    assert_eq!(collection[0].links, vec![image(1), image(2)]);

    first.assert_async().await;
    second.assert_async().await;
}
