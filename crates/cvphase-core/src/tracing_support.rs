//! Structured logging for block-tensor operations
//!
//! The algebra emits `tracing` events at its dispatch points: which branch
//! of a product or sum was taken, and the mode lists a contraction or union
//! produced (`trace` level). Install a subscriber to see them.
//!
//! # Example
//!
//! ```
//! use cvphase_core::tracing_support::{init_tracing, TracingConfig, TracingFormat};
//!
//! # fn main() -> anyhow::Result<()> {
//! init_tracing(
//!     TracingConfig::default()
//!         .format(TracingFormat::Compact)
//!         .filter("cvphase_core=trace"),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (e.g., `RUST_LOG=cvphase_core=debug`)
//! - `CVPHASE_LOG_FORMAT`: `json`, `compact` or `pretty` (default: `pretty`)
//!
//! The subscriber itself is only linked with the `subscriber` feature;
//! without it [`init_tracing`] does nothing.

#[cfg(feature = "subscriber")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// JSON format for structured logging
    Json,
    /// Compact format (single line per event)
    Compact,
}

impl TracingFormat {
    /// Parse from string, falling back to `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format
    pub format: TracingFormat,
    /// Filter directive (e.g., "cvphase_core=debug,info")
    pub filter: String,
    /// Enable ANSI colors
    pub with_ansi: bool,
    /// Show target module paths
    pub with_target: bool,
    /// Show file locations and line numbers
    pub with_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("CVPHASE_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Pretty);

        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cvphase_core=info,warn".to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_location: false,
        }
    }
}

impl TracingConfig {
    /// Set the output format
    pub fn format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Install a global subscriber for the given configuration.
///
/// Call once at startup; a second call fails because a global subscriber is
/// already set.
#[cfg(feature = "subscriber")]
pub fn init_tracing(config: TracingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}

/// Stub for when the `subscriber` feature is disabled
#[cfg(not(feature = "subscriber"))]
pub fn init_tracing(_config: TracingConfig) -> anyhow::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(TracingFormat::parse("json"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("JSON"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("compact"), TracingFormat::Compact);
        assert_eq!(TracingFormat::parse("pretty"), TracingFormat::Pretty);
        assert_eq!(TracingFormat::parse("unknown"), TracingFormat::Pretty);
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .format(TracingFormat::Json)
            .filter("cvphase_core=trace");
        assert_eq!(config.format, TracingFormat::Json);
        assert_eq!(config.filter, "cvphase_core=trace");
        assert!(config.with_target);
    }

    // the only test in this binary that touches the global subscriber
    #[test]
    fn test_init_tracing_installs_once() {
        let config = TracingConfig::default()
            .format(TracingFormat::Compact)
            .filter("cvphase_core=debug");
        assert!(init_tracing(config.clone()).is_ok());

        let id = crate::PhaseTensor::<f64>::identity(&[0], crate::Likeness::Zero).unwrap();
        assert!(id.replicate(2, crate::ModeSpec::Inferred).is_ok());

        let second = init_tracing(config);
        if cfg!(feature = "subscriber") {
            assert!(second.is_err());
        } else {
            assert!(second.is_ok());
        }
    }
}
