use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use distance_calc::format::{
    average_speed_for_report, distance_for_report, speed_for_report, time_for_report,
    visual_current_speed, visual_distance, visual_time,
};
use distance_calc::status::error_text_id;
use distance_calc::{
    save_view_in_background, Config, DisplayUnits, ExternalStorage, ImageFileSnapshot,
    TracingNotifier, UnitSystem,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "distance-calc",
    about = "Format distance tracker measurements and save screenshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Distance units (metric or imperial), overrides DISTANCECALC_UNITS
    #[arg(long, global = true)]
    units: Option<UnitSystem>,

    /// Hour label, overrides DISTANCECALC_HOUR_LABEL
    #[arg(long, global = true)]
    hour_label: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Live distance and average speed
    Live {
        /// Distance in meters
        #[arg(long)]
        distance: f64,
        /// Elapsed time in seconds
        #[arg(long, allow_hyphen_values = true)]
        elapsed: i64,
    },
    /// Trip report
    Report {
        #[arg(long)]
        distance: f64,
        #[arg(long, allow_hyphen_values = true)]
        elapsed: i64,
        /// Last instantaneous speed in m/s
        #[arg(long)]
        speed: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Elapsed time, optionally inside a "{}" template
    Time {
        #[arg(long, allow_hyphen_values = true)]
        elapsed: i64,
        #[arg(long)]
        template: Option<String>,
    },
    /// Current speed inside a three-placeholder template
    CurrentSpeed {
        /// Speed in m/s
        #[arg(long)]
        speed: f64,
        #[arg(long, default_value = "{} {}/{}")]
        template: String,
    },
    /// Message for a location provider status code
    Status {
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },
    /// Save an image as a screenshot under DISTANCECALC_STORAGE_ROOT
    Capture {
        /// Rendered frame to save
        #[arg(long)]
        frame: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct Report {
    distance: String,
    time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<String>,
    average_speed: String,
}

impl Report {
    fn new(distance: f64, elapsed: i64, speed: Option<f64>, units: &DisplayUnits) -> Self {
        Self {
            distance: distance_for_report(distance, units),
            time: time_for_report(elapsed),
            speed: speed.map(|s| speed_for_report(s, units)),
            average_speed: average_speed_for_report(distance, elapsed, units),
        }
    }

    fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Distance: {}\n", self.distance));
        output.push_str(&format!("Time: {}\n", self.time));
        if let Some(speed) = &self.speed {
            output.push_str(&format!("Speed: {}\n", speed));
        }
        output.push_str(&format!("Average speed: {}", self.average_speed));
        output
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(units) = cli.units {
        config.units = units;
    }
    if let Some(hour_label) = cli.hour_label {
        config.hour_label = hour_label;
    }
    let units = config.display_units();

    match cli.command {
        Command::Live { distance, elapsed } => {
            println!("{}", visual_distance(distance, elapsed, &units));
        }
        Command::Report {
            distance,
            elapsed,
            speed,
            json,
        } => {
            let report = Report::new(distance, elapsed, speed, &units);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                );
            } else {
                println!("{}", report.to_text());
            }
        }
        Command::Time { elapsed, template } => match template {
            Some(template) => println!("{}", visual_time(elapsed, &template)?),
            None => println!("{}", time_for_report(elapsed)),
        },
        Command::CurrentSpeed { speed, template } => {
            println!("{}", visual_current_speed(speed, &units, &template)?);
        }
        Command::Status { code } => {
            // Unknown codes have no message to show
            if let Some(id) = error_text_id(code) {
                println!("{}", id.default_text());
            }
        }
        Command::Capture { frame } => {
            let root = config
                .require_storage_root()
                .context("Screenshot capture needs a storage root")?
                .clone();
            let path = save_view_in_background(
                ImageFileSnapshot::new(frame),
                ExternalStorage::new(root),
                TracingNotifier,
            )
            .await
            .context("Failed to save screenshot")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
