use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::clients::MailTransport;
use crate::error::AppError;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(relay: &str, from: String) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)
            .map_err(|err| AppError::Internal(format!("invalid smtp relay {relay}: {err}")))?
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|err| AppError::Internal(format!("invalid from address: {err}")))?,
            )
            .to(to
                .parse()
                .map_err(|err| AppError::Internal(format!("invalid recipient {to}: {err}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|err| AppError::Internal(format!("failed to build email: {err}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| AppError::Internal(format!("smtp send failed: {err}")))?;

        Ok(())
    }
}
