//! Intervals.icu integration
//!
//! Reads the athlete's CTL/ATL from the wellness endpoint and posts planned
//! workouts to the calendar. Authentication is a personal API key sent as
//! HTTP basic auth with the fixed username `API_KEY`.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ConfigError;
use crate::error::{ProviderError, WriteError};
use crate::models::{CalendarEvent, FitnessState};
use crate::planner::{CalendarWriter, FitnessProvider, WriteResult};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const INTERVALS_API_BASE: &str = "https://intervals.icu";
const API_KEY_USERNAME: &str = "API_KEY";
const REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct IntervalsConfig {
  pub athlete_id: String,
  pub api_key: String,
  pub base_url: String,
}

impl IntervalsConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let base_url = env::var("INTERVALS_BASE_URL").unwrap_or_else(|_| INTERVALS_API_BASE.to_string());
    Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
      field: "INTERVALS_BASE_URL",
      reason: e.to_string(),
    })?;

    Ok(Self {
      athlete_id: required_env("INTERVALS_ATHLETE_ID")?,
      api_key: required_env("INTERVALS_API_KEY")?,
      base_url,
    })
  }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
  env::var(name)
    .ok()
    .filter(|v| !v.trim().is_empty())
    .ok_or_else(|| ConfigError::MissingConfig(name.into()))
}

/// ---------------------------------------------------------------------------
/// API Data Structures
/// ---------------------------------------------------------------------------

/// Wellness record for one day. Only the load fields are used.
#[derive(Debug, Deserialize)]
pub struct WellnessRecord {
  #[serde(default)]
  pub ctl: Option<f64>,
  #[serde(default)]
  pub atl: Option<f64>,
}

/// Subset of the event echoed back after creation
#[derive(Debug, Default, Deserialize)]
pub struct CreatedEvent {
  #[serde(default)]
  pub id: Option<i64>,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IntervalsClient {
  config: IntervalsConfig,
  http: Client,
}

impl IntervalsClient {
  pub fn new(config: IntervalsConfig) -> Result<Self, ConfigError> {
    let http = Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
      .build()
      .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
    Ok(Self { config, http })
  }

  fn athlete_url(&self) -> String {
    format!(
      "{}/api/v1/athlete/{}",
      self.config.base_url.trim_end_matches('/'),
      self.config.athlete_id
    )
  }

  /// Fetch the wellness record for `date`
  pub async fn fetch_wellness(&self, date: NaiveDate) -> Result<WellnessRecord, ProviderError> {
    let url = format!("{}/wellness/{}", self.athlete_url(), date.format("%Y-%m-%d"));
    debug!(%url, "Fetching wellness");

    let response = self
      .http
      .get(&url)
      .basic_auth(API_KEY_USERNAME, Some(&self.config.api_key))
      .send()
      .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
      return Err(ProviderError::NotAuthenticated);
    }

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(ProviderError::Api {
        status: status.as_u16(),
        body,
      });
    }

    let response_text = response.text().await?;
    serde_json::from_str(&response_text).map_err(|e| {
      warn!(
        error = %e,
        raw = %response_text.chars().take(500).collect::<String>(),
        "Failed to parse wellness response"
      );
      ProviderError::Parse(e.to_string())
    })
  }

  /// Current CTL/ATL as of the end of `date`
  pub async fn fetch_fitness_state(&self, date: NaiveDate) -> Result<FitnessState, ProviderError> {
    let record = self.fetch_wellness(date).await?;
    let (ctl, atl) = match (record.ctl, record.atl) {
      (Some(ctl), Some(atl)) => (ctl, atl),
      _ => return Err(ProviderError::MissingLoad(date)),
    };

    if !ctl.is_finite() || !atl.is_finite() || ctl < 0.0 || atl < 0.0 {
      return Err(ProviderError::Parse(format!(
        "implausible load values ctl={} atl={}",
        ctl, atl
      )));
    }

    Ok(FitnessState::new(ctl, atl))
  }

  /// Create a calendar event
  pub async fn create_event(&self, event: &CalendarEvent) -> Result<CreatedEvent, WriteError> {
    let url = format!("{}/events", self.athlete_url());

    let response = self
      .http
      .post(&url)
      .basic_auth(API_KEY_USERNAME, Some(&self.config.api_key))
      .json(event)
      .send()
      .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
      return Err(WriteError::NotAuthenticated);
    }

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(WriteError::Rejected {
        status: status.as_u16(),
        body,
      });
    }

    // The event exists at this point; a body we can't read only loses the id.
    let response_text = response.text().await.unwrap_or_default();
    Ok(serde_json::from_str(&response_text).unwrap_or_else(|e| {
      warn!(error = %e, "Event created but response was not parseable");
      CreatedEvent::default()
    }))
  }
}

impl FitnessProvider for IntervalsClient {
  async fn get_current_state(&self, date: NaiveDate) -> Result<FitnessState, ProviderError> {
    self.fetch_fitness_state(date).await
  }
}

impl CalendarWriter for IntervalsClient {
  async fn write_workout(
    &self,
    date: NaiveDate,
    event: &CalendarEvent,
    dry_run: bool,
  ) -> Result<WriteResult, WriteError> {
    if dry_run {
      info!(%date, name = %event.name, "Dry run, workout not uploaded");
      return Ok(WriteResult::DryRun);
    }

    info!(%date, name = %event.name, "Uploading workout to Intervals.icu");
    let created = self.create_event(event).await?;
    info!(event_id = ?created.id, "Workout created on calendar");
    Ok(WriteResult::Created { event_id: created.id })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
