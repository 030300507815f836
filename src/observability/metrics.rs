use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub transitions_total: IntCounterVec,
    pub requests_open: IntGauge,
    pub sweeper_rejections_total: IntCounter,
    pub settlement_attempts_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let transitions_total = IntCounterVec::new(
            Opts::new(
                "lifecycle_transitions_total",
                "Successful lifecycle transitions by operation",
            ),
            &["operation"],
        )
        .expect("valid lifecycle_transitions_total metric");

        let requests_open = IntGauge::new(
            "requests_open",
            "Requests not yet in a terminal state",
        )
        .expect("valid requests_open metric");

        let sweeper_rejections_total = IntCounter::new(
            "sweeper_rejections_total",
            "Stale pending requests auto-rejected by the sweeper",
        )
        .expect("valid sweeper_rejections_total metric");

        let settlement_attempts_total = IntCounterVec::new(
            Opts::new(
                "settlement_attempts_total",
                "Payment settlement attempts by outcome",
            ),
            &["outcome"],
        )
        .expect("valid settlement_attempts_total metric");

        registry
            .register(Box::new(transitions_total.clone()))
            .expect("register lifecycle_transitions_total");
        registry
            .register(Box::new(requests_open.clone()))
            .expect("register requests_open");
        registry
            .register(Box::new(sweeper_rejections_total.clone()))
            .expect("register sweeper_rejections_total");
        registry
            .register(Box::new(settlement_attempts_total.clone()))
            .expect("register settlement_attempts_total");

        Self {
            registry,
            transitions_total,
            requests_open,
            sweeper_rejections_total,
            settlement_attempts_total,
        }
    }

    pub fn transition(&self, operation: &str) {
        self.transitions_total.with_label_values(&[operation]).inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
