//! main.rs

use contact_relay::configuration::get_configuration;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("contact_relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Contact relay failed"
        );
        return Err(e.into());
    }
    tracing::info!("Contact relay has exited");
    Ok(())
}
