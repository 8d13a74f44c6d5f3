//! Integration tests for image listing and static file serving.

mod common;

use common::TestHarness;

#[tokio::test]
async fn list_images_filters_by_extension() {
    let h = TestHarness::with_server().await;
    h.add_input_file("image2.png");
    h.add_input_file("image1.jpg");
    h.add_input_file("labels.csv");
    h.add_input_file("image3.gif");

    let resp = reqwest::get(h.url("/static/images")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let images: Vec<String> = resp.json().await.unwrap();
    assert_eq!(images, vec!["image1.jpg", "image2.png"]);
}

#[tokio::test]
async fn list_images_empty_directory() {
    let h = TestHarness::with_server().await;

    let resp = reqwest::get(h.url("/static/images")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let images: Vec<String> = resp.json().await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn list_images_respects_configured_extensions() {
    let h = TestHarness::with_server_config(|c| {
        c.storage.image_extensions = vec!["gif".into()];
    })
    .await;
    h.add_input_file("image1.png");
    h.add_input_file("image2.gif");

    let images: Vec<String> = reqwest::get(h.url("/static/images"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(images, vec!["image2.gif"]);
}

#[tokio::test]
async fn input_images_are_served_statically() {
    let h = TestHarness::with_server().await;
    h.add_input_file("image1.png");

    let resp = reqwest::get(h.url("/static/input_images/image1.png"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.bytes().await.unwrap();
    assert!(body.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn index_is_served_at_root() {
    let h = TestHarness::with_server().await;

    let resp = reqwest::get(h.url("/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("annotator"));
}

#[tokio::test]
async fn missing_static_file_is_404() {
    let h = TestHarness::with_server().await;

    let resp = reqwest::get(h.url("/static/input_images/nope.png"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_and_request_id() {
    let h = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(h.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-me");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let h = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(h.url("/static/images"))
        .header("origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

#[tokio::test]
async fn openapi_document_lists_endpoints() {
    let h = TestHarness::with_server().await;

    let resp = reqwest::get(h.url("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let doc: serde_json::Value = resp.json().await.unwrap();
    assert!(doc["paths"]["/save_prediction"].is_object());
    assert!(doc["paths"]["/static/images"].is_object());
}
