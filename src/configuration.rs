//! src/configuration.rs

use crate::domain::{ContactEmail, ValidationError};
use crate::email_client::{EmailClient, MailTransport, SmtpMailer, TransportError};
use actix_web::http::header::HeaderValue;
use actix_web::http::Uri;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::sync::Arc;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub emailclient: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Origins allowed to call the relay from a browser.
    /// Empty or `*` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_greeting() -> String {
    "Contact relay is running".to_string()
}

impl ApplicationSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Every configured origin must be an absolute `scheme://host[:port]`
    /// usable as an `Access-Control-Allow-Origin` value.
    pub fn validate_allowed_origins(&self) -> Result<(), String> {
        if self.allows_any_origin() {
            return Ok(());
        }
        for origin in &self.allowed_origins {
            let is_valid = match origin.parse::<Uri>() {
                Ok(uri) => {
                    uri.scheme().is_some()
                        && uri.host().is_some()
                        && HeaderValue::from_str(origin).is_ok()
                }
                Err(_) => false,
            };
            if !is_valid {
                return Err(format!("`{}` is not a valid CORS origin.", origin));
            }
        }
        Ok(())
    }
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    Api,
    Smtp,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailClientSettings {
    pub provider: MailProvider,
    pub base_url: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    pub password: Secret<String>,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.recipient_email.clone())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Build the configured mail transport. Called once per process.
    pub fn transport(&self) -> Result<Arc<dyn MailTransport>, TransportError> {
        let transport: Arc<dyn MailTransport> = match self.provider {
            MailProvider::Api => Arc::new(EmailClient::new(
                self.base_url.clone(),
                self.authorization_token.clone(),
                self.timeout(),
            )?),
            MailProvider::Smtp => Arc::new(SmtpMailer::new(
                &self.smtp.host,
                self.smtp.port,
                &self.smtp.username,
                &self.smtp.password,
                self.timeout(),
            )?),
        };
        Ok(transport)
    }
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_EMAILCLIENT__AUTHORIZATION_TOKEN=...` would set `Settings.emailclient.authorization_token`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("application.allowed_origins")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
