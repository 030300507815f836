use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::clients::{PaymentGateway, PaymentInstruction, PaymentState};
use crate::error::AppError;
use crate::models::request::Request;
use crate::notify::Notifier;
use crate::observability::metrics::Metrics;

pub const COMMISSION_RATE: f64 = 0.05;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Caller-side payment policy: submit the net-of-commission amount, poll the
/// gateway's settlement status, retry the whole exchange up to three times.
/// Exhaustion surfaces as `SettlementFailed`, which `mark_delivered` logs and
/// swallows; the delivered status is never rolled back.
pub struct Settlement {
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<Notifier>,
    metrics: Metrics,
}

impl Settlement {
    pub fn new(gateway: Arc<dyn PaymentGateway>, notifier: Arc<Notifier>, metrics: Metrics) -> Self {
        Self {
            gateway,
            notifier,
            metrics,
        }
    }

    pub async fn settle(&self, request: &Request) -> Result<(), AppError> {
        let Some(fare) = request.fare else {
            warn!(request_id = %request.id, "request has no fare; skipping settlement");
            return Ok(());
        };

        let instruction = PaymentInstruction {
            request_id: request.id,
            payer_id: request.sender_id,
            amount: fare * (1.0 - COMMISSION_RATE),
            method: "UPI".to_string(),
        };

        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(&instruction).await {
                Ok(()) => {
                    self.metrics
                        .settlement_attempts_total
                        .with_label_values(&["success"])
                        .inc();
                    info!(
                        request_id = %request.id,
                        attempt,
                        amount = instruction.amount,
                        "payment settled"
                    );
                    self.notifier
                        .payment_update(
                            request.sender_id,
                            request.id,
                            "processed successfully",
                            instruction.amount,
                        )
                        .await;
                    return Ok(());
                }
                Err(err) => {
                    self.metrics
                        .settlement_attempts_total
                        .with_label_values(&["failure"])
                        .inc();
                    error!(request_id = %request.id, attempt, error = %err, "settlement attempt failed");
                }
            }

            if attempt < MAX_ATTEMPTS {
                sleep(RETRY_DELAY).await;
            }
        }

        Err(AppError::SettlementFailed(format!(
            "gave up after {MAX_ATTEMPTS} attempts"
        )))
    }

    async fn attempt(&self, instruction: &PaymentInstruction) -> Result<(), AppError> {
        self.gateway.submit(instruction).await?;

        let status = self.gateway.status(instruction.request_id).await?;
        match status.state {
            PaymentState::Success => Ok(()),
            PaymentState::Failed | PaymentState::Pending => Err(AppError::SettlementFailed(
                status
                    .message
                    .unwrap_or_else(|| "gateway reported a non-success status".to_string()),
            )),
        }
    }
}
