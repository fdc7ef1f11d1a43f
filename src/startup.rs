//! src/startup.rs

use crate::configuration::{ApplicationSettings, Settings};
use crate::domain::ContactEmail;
use crate::email_client::MailTransport;
use crate::error::json_error_handler;
use crate::routes::{health_check, home, send_email};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::{header, Method};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Large enough for a message at its maximum length in multi-byte text.
const JSON_BODY_LIMIT: usize = 256 * 1024;

/// Text served on `GET /`.
pub struct Greeting(pub String);

/// Fixed mailboxes of the relay: who the email is from and who receives it.
#[derive(Debug, Clone)]
pub struct ContactMailboxes {
    pub sender: ContactEmail,
    pub recipient: ContactEmail,
}

/// A new type to hold the newly built server and its port
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Build the server with the mail transport described by the configuration.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let transport = configuration
            .emailclient
            .transport()
            .context("Failed to build the mail transport.")?;
        Self::build_with_transport(configuration, transport).await
    }

    /// Build the server around an already constructed transport. The
    /// transport lives as long as the server and is shared by all workers.
    pub async fn build_with_transport(
        configuration: Settings,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        configuration
            .application
            .validate_allowed_origins()
            .map_err(anyhow::Error::msg)
            .context("Invalid CORS configuration.")?;
        let mailboxes = ContactMailboxes {
            sender: configuration
                .emailclient
                .sender()
                .context("Invalid sender email address.")?,
            recipient: configuration
                .emailclient
                .recipient()
                .context("Invalid recipient email address.")?,
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind to {}.", address))?;
        let port = listener.local_addr()?.port();
        tracing::info!(%address, port, "Contact relay listening");

        let server = run(listener, configuration.application, transport, mailboxes)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that
    /// this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Browser access policy of the relay: configured origins, GET and POST only.
fn cors(settings: &ApplicationSettings) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);
    if settings.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        settings
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

pub fn run(
    listener: TcpListener,
    settings: ApplicationSettings,
    transport: Arc<dyn MailTransport>,
    mailboxes: ContactMailboxes,
) -> Result<Server, anyhow::Error> {
    let transport: web::Data<dyn MailTransport> = web::Data::from(transport);
    let mailboxes = web::Data::new(mailboxes);
    let greeting = web::Data::new(Greeting(settings.greeting.clone()));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&settings))
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_BODY_LIMIT)
                    .error_handler(json_error_handler),
            )
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/send-email", web::post().to(send_email))
            .app_data(transport.clone())
            .app_data(mailboxes.clone())
            .app_data(greeting.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
