//! Logging integration for backoffice-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-view spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
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

/// Creates a tracing span for one mounted view (a list page, a drawer).
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::logging::view_span;
///
/// let span = view_span("expenses");
/// let _guard = span.enter();
/// tracing::debug!("filters changed");
/// ```
pub fn view_span(view: &str) -> tracing::Span {
    tracing::info_span!("view", name = view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_does_not_panic() {
        let mut settings = Settings::default();
        settings.log_level = "not a [valid filter".to_string();
        setup_logging(&settings);
        settings.debug = false;
        setup_logging(&settings);
    }
}
