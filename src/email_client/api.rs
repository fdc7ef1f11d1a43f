//! src/email_client/api.rs

use crate::email_client::{DeliveryReceipt, MailTransport, OutboundEmail, TransportError};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a Postmark style HTTP email API.
#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, TransportError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Send email via email API",
        skip_all,
        fields(recipient = %email.recipient.email)
    )]
    pub async fn send_email(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, TransportError> {
        let url = format!("{}/email", self.base_url.trim_end_matches('/'));
        let sender = email.sender.to_string();
        let recipient = email.recipient.to_string();
        let reply_to = email.reply_to.as_ref().map(ToString::to_string);
        let request_body = SendEmailRequest {
            from: &sender,
            to: &recipient,
            reply_to: reply_to.as_deref(),
            subject: &email.subject,
            text_body: &email.text_body,
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // keep whatever the provider told us, it ends up in the relay response
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        // an empty or unexpected body still means the email was accepted
        let message_id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id);
        Ok(DeliveryReceipt { message_id })
    }
}

#[async_trait::async_trait]
impl MailTransport for EmailClient {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, TransportError> {
        self.send_email(email).await
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text_body: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    #[serde(rename = "MessageID")]
    message_id: Option<String>,
}
