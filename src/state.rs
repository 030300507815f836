use std::sync::Arc;

use crate::lifecycle::Lifecycle;
use crate::notify::Notifier;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub lifecycle: Arc<Lifecycle>,
    pub notifier: Arc<Notifier>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(lifecycle: Arc<Lifecycle>, notifier: Arc<Notifier>, metrics: Metrics) -> Self {
        Self {
            lifecycle,
            notifier,
            metrics,
        }
    }
}
