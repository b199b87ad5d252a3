use chrono::NaiveDate;

use crate::config::ConfigError;

/// ---------------------------------------------------------------------------
/// Collaborator Errors
/// ---------------------------------------------------------------------------

/// Fetching the current fitness state failed. Nothing is planned.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Not authenticated with Intervals.icu")]
  NotAuthenticated,

  #[error("Wellness API error {status}: {body}")]
  Api { status: u16, body: String },

  #[error("Failed to parse wellness response: {0}")]
  Parse(String),

  #[error("Wellness data for {0} has no CTL/ATL")]
  MissingLoad(NaiveDate),
}

/// The calendar rejected the workout. The plan was computed but not stored.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Not authenticated with Intervals.icu")]
  NotAuthenticated,

  #[error("Event rejected with status {status}: {body}")]
  Rejected { status: u16, body: String },
}

/// ---------------------------------------------------------------------------
/// Run Errors
/// ---------------------------------------------------------------------------

/// Anything that ends a daily cycle. No workout is written once one of
/// these is raised.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
  #[error("Invalid configuration: {0}")]
  InvalidConfiguration(#[from] ConfigError),

  #[error("Failed to fetch fitness state: {0}")]
  Provider(#[from] ProviderError),

  #[error("Calculation error: {0}")]
  Calculation(String),

  #[error("Failed to write workout for {date}: {source}")]
  Write {
    date: NaiveDate,
    #[source]
    source: WriteError,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_write_error_names_date() {
    let err = PlannerError::Write {
      date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
      source: WriteError::Rejected {
        status: 422,
        body: "bad description".into(),
      },
    };
    assert_eq!(
      err.to_string(),
      "Failed to write workout for 2026-10-19: Event rejected with status 422: bad description"
    );
  }

  #[test]
  fn test_provider_error_converts() {
    let err: PlannerError = ProviderError::NotAuthenticated.into();
    assert!(matches!(err, PlannerError::Provider(ProviderError::NotAuthenticated)));
  }

  #[test]
  fn test_config_error_converts() {
    let err: PlannerError = ConfigError::MissingConfig("INTERVALS_API_KEY".into()).into();
    assert_eq!(
      err.to_string(),
      "Invalid configuration: Missing configuration: INTERVALS_API_KEY"
    );
  }
}
