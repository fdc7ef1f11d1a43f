//! tests/api/health_check.rs

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_response_from_url("/health_check").await;

    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn root_returns_a_plain_text_greeting() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_response_from_url("/").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/plain"));
    assert!(!response.text().await.unwrap().is_empty());
}
