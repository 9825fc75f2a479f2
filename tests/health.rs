use menew_api::routes::health::{health_check, ping};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.service, "menew-api");
    assert!(!data.version.is_empty());
}

#[tokio::test]
async fn ping_answers_plain_text() {
    assert_eq!(ping().await, "Menew backend is alive");
}
