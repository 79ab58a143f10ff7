use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn test_health_check() {
    let server = TestContext::new().into_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version_reports_package() {
    let server = TestContext::new().into_server();

    let body: serde_json::Value = server.get("/version").await.json();

    assert_eq!(body["name"], "slotsync-api");
    assert!(body["version"].is_string());
}
