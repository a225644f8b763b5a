//! Logging integration for the formworks toolkit.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-session
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info",
/// "warn", "error"). In debug mode a pretty, human-readable format is
/// used; in production a structured JSON format is used.
///
/// Installing a second subscriber is silently ignored so tests can call
/// this repeatedly.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form-editing or submission session.
///
/// Attach this span around session processing so that every log entry
/// emitted while designing or submitting carries the form id.
///
/// # Examples
///
/// ```
/// use formworks_core::logging::session_span;
///
/// let span = session_span("2b1c6f0e");
/// let _guard = span.enter();
/// tracing::info!("saving layout");
/// ```
pub fn session_span(form_id: &str) -> tracing::Span {
    tracing::info_span!("session", form = form_id)
}
