use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};
use tracing::error;

// Prometheus metrics (default registry)
pub static MESSAGES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "message_api_messages_created_total",
        "Total messages created"
    )
    .expect("register messages_created_total")
});

pub static MESSAGES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "message_api_messages_deleted_total",
        "Total messages deleted"
    )
    .expect("register messages_deleted_total")
});

pub static MESSAGES_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "message_api_messages_stored",
        "Messages currently held in the store"
    )
    .expect("register messages_stored")
});

/// Register every metric so `/metrics` lists them before first use.
pub fn init() {
    Lazy::force(&MESSAGES_CREATED_TOTAL);
    Lazy::force(&MESSAGES_DELETED_TOTAL);
    Lazy::force(&MESSAGES_STORED);
}

pub fn set_stored(n: usize) {
    MESSAGES_STORED.set(i64::try_from(n).unwrap_or(i64::MAX));
}

/// Render the default registry in the Prometheus text format.
pub fn render() -> (StatusCode, String) {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        error!(error = %e, "metrics encode failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }
    match String::from_utf8(buf) {
        Ok(s) => (StatusCode::OK, s),
        Err(e) => {
            error!(error = %e, "metrics not utf-8");
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    }
}
