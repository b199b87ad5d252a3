//! Tracing subscriber setup
//!
//! `RUST_LOG` picks the filter (default `info`), `LOG_FORMAT` picks the
//! output: `pretty` (default), `json` for log collectors, or `compact`.

use std::env;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Json,
  Pretty,
  Compact,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
  pub level: String,
  pub format: LogFormat,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".into(),
      format: LogFormat::Pretty,
    }
  }
}

impl LoggingConfig {
  pub fn from_env() -> Self {
    let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

    let format = match env::var("LOG_FORMAT").as_deref() {
      Ok("json") => LogFormat::Json,
      Ok("compact") => LogFormat::Compact,
      _ => LogFormat::Pretty,
    };

    Self { level, format }
  }

  fn env_filter(&self) -> EnvFilter {
    EnvFilter::new(&self.level)
      .add_directive(
        "hyper=warn"
          .parse()
          .unwrap_or_else(|_| tracing::Level::WARN.into()),
      )
      .add_directive(
        "reqwest=warn"
          .parse()
          .unwrap_or_else(|_| tracing::Level::WARN.into()),
      )
  }

  /// Install the global subscriber. Fails if one is already set.
  pub fn init(&self) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(self.env_filter());

    // Logs go to stderr so stdout stays free for the JSON report
    match self.format {
      LogFormat::Json => registry
        .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
        .try_init(),
      LogFormat::Pretty => registry
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .try_init(),
      LogFormat::Compact => registry
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .try_init(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_from_env_defaults() {
    temp_env::with_vars_unset(["RUST_LOG", "LOG_FORMAT"], || {
      let config = LoggingConfig::from_env();
      assert_eq!(config.level, "info");
      assert_eq!(config.format, LogFormat::Pretty);
    });
  }

  #[test]
  #[serial]
  fn test_from_env_json() {
    temp_env::with_vars(
      [("RUST_LOG", Some("debug")), ("LOG_FORMAT", Some("json"))],
      || {
        let config = LoggingConfig::from_env();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
      },
    );
  }

  #[test]
  #[serial]
  fn test_unknown_format_falls_back_to_pretty() {
    temp_env::with_var("LOG_FORMAT", Some("xml"), || {
      assert_eq!(LoggingConfig::from_env().format, LogFormat::Pretty);
    });
  }
}
