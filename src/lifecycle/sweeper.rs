use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{error, info};

use crate::lifecycle::Lifecycle;

const REJECT_AFTER_MINUTES: i64 = 15;
const IGNORE_AFTER_HOURS: i64 = 2;

/// Periodic sweep that auto-rejects pending requests no carrier responded
/// to. Requests older than the outer bound are left alone so long-abandoned
/// rows are not rescanned forever.
pub async fn run_sweeper(lifecycle: Arc<Lifecycle>, period: Duration) {
    info!(period_secs = period.as_secs(), "stale-request sweeper started");

    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let swept = sweep_once(&lifecycle).await;
        if swept > 0 {
            info!(swept, "auto-rejected stale requests");
        }
    }
}

/// One pass over the sweep window. Each request is handled independently: a
/// failure is logged and the rest of the batch continues.
pub async fn sweep_once(lifecycle: &Lifecycle) -> usize {
    let now = Utc::now();
    let older_than = now - chrono::Duration::minutes(REJECT_AFTER_MINUTES);
    let newer_than = now - chrono::Duration::hours(IGNORE_AFTER_HOURS);

    let mut swept = 0;
    for request in lifecycle.store.stale_pending(older_than, newer_than) {
        match lifecycle.auto_reject(request.id).await {
            Ok(()) => swept += 1,
            Err(err) => {
                error!(request_id = %request.id, error = %err, "failed to auto-reject stale request");
            }
        }
    }
    swept
}
