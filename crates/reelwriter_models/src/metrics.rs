//! Metrics for provider calls.
//!
//! OpenTelemetry instruments on the global meter. Without an installed
//! exporter they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use reelwriter_error::{ProviderErrorKind, ReelwriterError, ReelwriterErrorKind};
use std::sync::OnceLock;

static METRICS: OnceLock<GenerationMetrics> = OnceLock::new();

/// Counters and latency for completion calls, labelled by provider and model.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total completion requests
    pub requests: Counter<u64>,
    /// Failed completion requests
    pub errors: Counter<u64>,
    /// Completion call duration in seconds
    pub duration: Histogram<f64>,
}

impl GenerationMetrics {
    fn init() -> Self {
        let meter = global::meter("reelwriter_generation");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("generation.requests")
                .with_description("Total completion requests")
                .build(),
            errors: meter
                .u64_counter("generation.errors")
                .with_description("Failed completion requests")
                .build(),
            duration: meter
                .f64_histogram("generation.duration")
                .with_unit("seconds")
                .with_description("Completion call duration")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a finished request, successful or not.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "rate_limit", "auth", "timeout", "network", "server",
/// "invalid_request", "malformed", "unavailable", "unknown".
pub fn classify_error(error: &ReelwriterError) -> &'static str {
    let ReelwriterErrorKind::Provider(provider) = error.kind() else {
        return "unknown";
    };
    match &provider.kind {
        ProviderErrorKind::Status { status: 429, .. } => "rate_limit",
        ProviderErrorKind::Status {
            status: 401 | 403, ..
        } => "auth",
        ProviderErrorKind::Status { status, .. } if *status >= 500 => "server",
        ProviderErrorKind::Status { .. } => "invalid_request",
        ProviderErrorKind::Transport(message) if message.contains("timed out") => "timeout",
        ProviderErrorKind::Transport(_) => "network",
        ProviderErrorKind::MalformedResponse(_) => "malformed",
        ProviderErrorKind::Unavailable(_) => "unavailable",
    }
}
