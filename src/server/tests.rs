use crate::tests::start_app;

#[tokio::test]
async fn server_starts() {
    let app = start_app().await;
    let client = &app.client;

    let response = client
        .get(app.url("/healthz"))
        .send()
        .await
        .expect("getting health");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("parsing health body");
    assert_eq!(body["status"], "ok");

    drop(app.shutdown_tx);
    app.server_task
        .await
        .expect("server did not panic")
        .expect("server shutting down");
}

#[tokio::test]
async fn route_not_found_renders_the_error_page() {
    let app = start_app().await;

    let response = app
        .client
        .get(app.url("/this-route-is-nonexistent"))
        .send()
        .await
        .expect("sending request");
    assert_eq!(response.status(), 404);

    let body = response.text().await.expect("reading body");
    assert!(body.contains("Page Not Found"));
    assert!(body.contains("Quick Links"));
    // An unclassified 404 has no explanation under the title
    assert!(body.contains(r#"<div class="prose"></div>"#));
}

#[tokio::test]
async fn requests_get_an_id() {
    let app = start_app().await;

    let response = app
        .client
        .get(app.url("/healthz"))
        .send()
        .await
        .expect("sending request");

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response carries a request id");
    assert!(!request_id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn serves_the_embedded_stylesheet() {
    let app = start_app().await;

    let response = app
        .client
        .get(app.url("/static/app.css"))
        .send()
        .await
        .expect("requesting stylesheet");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/css"
    );

    let body = response.text().await.expect("reading stylesheet");
    assert!(body.contains(".error-page"));
}

#[tokio::test]
async fn panic_handler_returns_the_500_page() {
    let response = super::handle_panic(Box::new("boom".to_string()));
    assert_eq!(response.status(), 500);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collecting body");
    let body = String::from_utf8(body.to_vec()).expect("body is utf8");
    assert!(body.contains("Whoops! Something Went Wrong"));
    assert!(body.contains("Something went wrong whilst building the page."));
}

#[tokio::test]
async fn missing_static_asset_is_a_404_page() {
    let app = start_app().await;

    let response = app
        .client
        .get(app.url("/static/not-a-real-file.js"))
        .send()
        .await
        .expect("sending request");
    assert_eq!(response.status(), 404);

    let body = response.text().await.expect("reading body");
    assert!(body.contains("Page Not Found"));
}
