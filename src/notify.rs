use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clients::{IdentityClient, MailTransport};
use crate::models::request::RequestStatus;

/// Message shapes pushed over a user's real-time channel. The same payload,
/// rendered to text, doubles as the body of the best-effort email.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    Notification {
        request_id: Option<Uuid>,
        body: String,
    },
    Tracking {
        request_id: Uuid,
        status: RequestStatus,
        location: String,
    },
    Payment {
        request_id: Uuid,
        status: String,
        amount: f64,
    },
}

impl Envelope {
    pub fn render(&self) -> String {
        match self {
            Envelope::Notification { request_id, body } => match request_id {
                Some(id) => format!("{id}: {body}"),
                None => body.clone(),
            },
            Envelope::Tracking {
                request_id,
                status,
                location,
            } => format!(
                "Request {request_id}: status updated to {} at {location}",
                status.as_str()
            ),
            Envelope::Payment {
                request_id,
                status,
                amount,
            } => format!("Request {request_id}: payment {status}. Amount: {amount:.2}"),
        }
    }
}

/// Fan-out to per-user real-time channels, the shared carrier topic, and
/// best-effort email. Fire-and-forget from the state machine's perspective:
/// every failure is logged here and never surfaced to the caller.
pub struct Notifier {
    channels: DashMap<Uuid, broadcast::Sender<Envelope>>,
    carrier_topic: broadcast::Sender<Envelope>,
    identity: Arc<dyn IdentityClient>,
    mail: Arc<dyn MailTransport>,
    buffer: usize,
}

impl Notifier {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        mail: Arc<dyn MailTransport>,
        buffer: usize,
    ) -> Self {
        let (carrier_topic, _unused_rx) = broadcast::channel(buffer);

        Self {
            channels: DashMap::new(),
            carrier_topic,
            identity,
            mail,
            buffer,
        }
    }

    pub fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<Envelope> {
        self.channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.buffer).0)
            .subscribe()
    }

    pub fn subscribe_carrier_topic(&self) -> broadcast::Receiver<Envelope> {
        self.carrier_topic.subscribe()
    }

    /// Real-time push only. Dropped silently when the user has no live
    /// subscription; the channel is not a durable queue.
    pub fn push(&self, user_id: Uuid, envelope: Envelope) {
        match self.channels.get(&user_id) {
            Some(tx) => {
                if tx.send(envelope).is_err() {
                    debug!(%user_id, "push dropped: no live subscribers");
                }
            }
            None => debug!(%user_id, "push dropped: user never subscribed"),
        }
    }

    pub fn broadcast_to_carriers(&self, envelope: Envelope) {
        if self.carrier_topic.send(envelope).is_err() {
            debug!("carrier broadcast dropped: no live subscribers");
        }
    }

    /// Push plus email with the rendered envelope as the body.
    pub async fn notify_user(&self, user_id: Uuid, subject: &str, envelope: Envelope) {
        let body = envelope.render();
        self.push(user_id, envelope);
        self.email_user(user_id, subject, &body).await;
    }

    /// Best-effort email: skipped when the recipient's address cannot be
    /// resolved, logged (never raised) when the transport fails.
    pub async fn email_user(&self, user_id: Uuid, subject: &str, body: &str) {
        let email = match self.identity.get_user(user_id).await {
            Ok(profile) => match profile.email {
                Some(email) if !email.trim().is_empty() => email,
                _ => {
                    debug!(%user_id, "no email on file; skipping");
                    return;
                }
            },
            Err(err) => {
                warn!(%user_id, error = %err, "email skipped: user lookup failed");
                return;
            }
        };

        if let Err(err) = self.mail.send(&email, subject, body).await {
            warn!(%user_id, error = %err, "email send failed");
        }
    }

    pub async fn tracking_update(
        &self,
        sender_id: Uuid,
        carrier_id: Option<Uuid>,
        request_id: Uuid,
        status: RequestStatus,
        location: String,
    ) {
        let envelope = Envelope::Tracking {
            request_id,
            status,
            location,
        };

        self.notify_user(sender_id, "Tracking update", envelope.clone())
            .await;
        if let Some(carrier_id) = carrier_id {
            self.notify_user(carrier_id, "Tracking update", envelope).await;
        }
    }

    pub async fn payment_update(
        &self,
        sender_id: Uuid,
        request_id: Uuid,
        status: &str,
        amount: f64,
    ) {
        self.notify_user(
            sender_id,
            "Payment update",
            Envelope::Payment {
                request_id,
                status: status.to_string(),
                amount,
            },
        )
        .await;
    }
}
