//! tests/api/cors.rs

use crate::helpers::{spawn_app, test_configuration, ALLOWED_ORIGIN};
use contact_relay::startup::Application;

#[tokio::test]
async fn preflight_from_allowed_origin_is_accepted() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", app.address),
        )
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    let allowed_methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(allowed_methods.contains("POST"));
    assert!(allowed_methods.contains("GET"));
}

#[tokio::test]
async fn preflight_from_unknown_origin_is_rejected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", app.address),
        )
        .header("Origin", "https://evil.example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_client_error());
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn preflight_for_disallowed_method_is_rejected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", app.address),
        )
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "DELETE")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn malformed_allowed_origin_fails_at_startup() {
    // Arrange
    let mut configuration = test_configuration("http://127.0.0.1:1");
    configuration.application.allowed_origins = vec!["http://exa mple.com".to_string()];

    // Act
    let outcome = Application::build(configuration).await;

    // Assert
    let error = match outcome {
        Ok(_) => panic!("The relay started with a malformed CORS origin."),
        Err(e) => e,
    };
    assert!(format!("{:?}", error).contains("exa mple.com"));
}
