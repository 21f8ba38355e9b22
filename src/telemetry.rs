//! Tracing initialization for hosts that want the crate's standard setup.
//!
//! Optional: embedding applications that already install a subscriber can
//! skip this entirely — the crate only ever calls `tracing::` macros.

use tracing_subscriber::EnvFilter;

/// Install an env-filtered fmt subscriber.
///
/// Filter defaults to `agora_assistant=info,warn` and is overridable via
/// `RUST_LOG`. Safe to call when a subscriber is already installed — the
/// second install is skipped, not a panic.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agora_assistant=info,warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .try_init();

    if result.is_ok() {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            "agora assistant telemetry initialized"
        );
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
