use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use trainer_autoplan::{LoggingConfig, RunOptions};

#[derive(Parser)]
#[command(
  name = "trainer-autoplan",
  version,
  about = "Plan tomorrow's ride from current CTL/ATL and put it on the Intervals.icu calendar"
)]
struct Args {
  /// Settings file (default: $AUTOPLAN_CONFIG or ./config.json)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Plan from the state at the end of this day (YYYY-MM-DD) instead of today
  #[arg(long)]
  date: Option<NaiveDate>,

  /// Upload the workout regardless of live_mode
  #[arg(long, conflicts_with = "dry_run")]
  live: bool,

  /// Compute and print the workout without uploading it
  #[arg(long)]
  dry_run: bool,
}

impl Args {
  fn live_override(&self) -> Option<bool> {
    match (self.live, self.dry_run) {
      (true, _) => Some(true),
      (_, true) => Some(false),
      _ => None,
    }
  }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  let args = Args::parse();

  if let Err(e) = LoggingConfig::from_env().init() {
    eprintln!("Failed to initialize logging: {}", e);
  }

  let options = RunOptions {
    config_path: args.config.clone(),
    today: args.date,
    live: args.live_override(),
  };

  info!("Daily planner started");
  match trainer_autoplan::run(options).await {
    Ok(report) => {
      match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "Failed to render run report"),
      }
      info!("Daily planner finished");
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!(error = %e, "Halting, no workout written");
      ExitCode::FAILURE
    }
  }
}
