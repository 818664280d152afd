use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{LevelFilter, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use weatherdash::dashboard::render;
use weatherdash::errors::DashboardError;
use weatherdash::forecast::parse_points;
use weatherdash::manager_owm::Owm;

#[derive(Parser)]
#[command(about = "Fetch a 5 day weather forecast and render a chart dashboard.")]
struct Cli {
    /// City name, e.g. Hyderabad
    #[arg(long)]
    city: String,
    /// Optional country code, e.g. IN
    #[arg(long)]
    country: Option<String>,
    /// Output dashboard image filename
    #[arg(long, default_value = "weather_dashboard.png")]
    out: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let api_key = match env::var("OWM_API_KEY") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Please set environment variable OWM_API_KEY to your OpenWeatherMap API key.");
            eprintln!("Example: export OWM_API_KEY=\"your-api-key\"");
            return ExitCode::from(2);
        }
    };

    match run(&cli, api_key) {
        Ok(()) => {
            println!("Saved dashboard image to: {}", cli.out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the pipeline, fetch then parse then render, as one linear pass
/// with no retries
///
/// # Arguments
///
/// * 'cli' - parsed command line arguments
/// * 'api_key' - OpenWeatherMap API key
fn run(cli: &Cli, api_key: String) -> Result<(), DashboardError> {
    let owm = Owm::new(api_key)?;

    let payload = owm.fetch_forecast(&cli.city, cli.country.as_deref())?;
    let points = parse_points(&payload)?;
    info!("parsed {} forecast points", points.len());

    let city_name = payload.city
        .as_ref()
        .filter(|c| !c.name.is_empty())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| cli.city.clone());
    let country = payload.city
        .as_ref()
        .map(|c| c.country.clone())
        .filter(|c| !c.is_empty())
        .or_else(|| cli.country.clone());

    let title = match country {
        Some(cc) => format!("Weather Dashboard: {} ({}) | Next 5 Days (3h intervals)", city_name, cc),
        None => format!("Weather Dashboard: {} | Next 5 Days (3h intervals)", city_name),
    };

    render(&points, &title, &cli.out)?;

    Ok(())
}

/// Sets up console logging for the run
fn init_logging() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}
