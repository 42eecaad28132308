//! Name search behavior.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_search_matches_substrings_case_insensitively() {
    let app = TestApp::new().await;
    app.create_folder("u1", "Quarterly Reports", None).await;
    app.create_file("u1", "report-final.pdf", "application/pdf", None)
        .await;
    app.create_file("u1", "photo.png", "image/png", None).await;

    let response = app
        .request("GET", "/api/search?q=REPORT", None, Some("u1"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    // Both files and folders match, name ascending.
    assert_eq!(names, vec!["Quarterly Reports", "report-final.pdf"]);
}

#[tokio::test]
async fn test_search_never_crosses_owners() {
    let app = TestApp::new().await;
    let theirs = app.create_folder("u2", "Shared Reports", None).await;

    // Even a publicly shared folder of another owner stays out of search.
    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({ "item_id": theirs })),
        Some("u2"),
    )
    .await;

    let response = app
        .request("GET", "/api/search?q=reports", None, Some("u1"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_requires_a_query() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/search", None, Some("u1")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/api/search?q=%20", None, Some("u1"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
