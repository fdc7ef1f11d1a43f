//! tests/api/helpers.rs

use contact_relay::configuration::{get_configuration, MailProvider, Settings};
use contact_relay::routes::{ContactFormData, RelayResponse};
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const SENDER_EMAIL: &str = "portfolio@example.com";
pub const RECIPIENT_EMAIL: &str = "owner@example.com";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// helper for sending a POST /send-email request with a raw JSON body
    pub async fn post_send_email_raw(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send-email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper for sending a POST /send-email request
    pub async fn post_send_email(&self, form: &ContactFormData) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send-email", &self.address))
            .json(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get Response from url
    pub async fn get_response_from_url(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Parse the body of the last request the email API received.
    pub async fn last_email_request(&self) -> serde_json::Value {
        let email_request = self
            .email_server
            .received_requests()
            .await
            .unwrap()
            .pop()
            .expect("No request reached the email API.");
        serde_json::from_slice(&email_request.body).unwrap()
    }
}

/// A submission that passes every validation rule.
pub fn valid_contact_form_data() -> ContactFormData {
    ContactFormData {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        subject: None,
        message: "Hello".to_string(),
    }
}

/// Read the relay response contract from a response.
pub async fn relay_response(response: reqwest::Response) -> RelayResponse {
    response
        .json()
        .await
        .expect("Response body is not a relay response.")
}

/// Randomise configuration to ensure test isolation
pub fn test_configuration(email_api_uri: &str) -> Settings {
    let mut c = get_configuration().expect("Failed to read configuration.");
    // use a random OS port
    c.application.port = 0;
    c.application.host = "127.0.0.1".to_string();
    c.application.allowed_origins = vec![ALLOWED_ORIGIN.to_string()];
    // use the mock server as email API
    c.emailclient.provider = MailProvider::Api;
    c.emailclient.base_url = email_api_uri.to_string();
    c.emailclient.sender_email = SENDER_EMAIL.to_string();
    c.emailclient.recipient_email = RECIPIENT_EMAIL.to_string();
    // keep failing tests short
    c.emailclient.timeout_milliseconds = 2000;
    c
}

/// Spin up an instance of our application
/// and returns its address (i.e. http://localhost:XXXX)
pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Launch a mock server to stand in for Postmark's API
    let email_server = MockServer::start().await;

    let configuration = test_configuration(&email_server.uri());

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        api_client: client,
    }
}
