use std::collections::BTreeMap;

use clap::{Args, Parser, Subcommand};
use particles::host::ManualHost;
use particles::step::in_bounds;
use particles::surface::{Recorder, Viewport};
use particles::{EffectKind, FxController, FxError};
use serde::Serialize;
use sitefx::config::SiteConfig;
use sitefx::error::{ConfigError, LocateError, WeatherError};
use sitefx::locate::{Coordinates, FixedLocator};
use sitefx::season::{Hemisphere, seasonal_effect};
use sitefx::weather::{OpenWeatherClient, WeatherSource};
use time::{Month, OffsetDateTime};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("weather client: {0}")]
    Weather(#[from] WeatherError),
    #[error("effect: {0}")]
    Fx(#[from] FxError),
    #[error("invalid month: {0}")]
    Month(#[from] time::error::ComponentRange),
    #[error("--latitude and --longitude must be given together")]
    PartialCoordinates,
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fx-cli", about = "Inspect and simulate the site's weather effects")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seasonal effect for a month.
    Season(SeasonArgs),
    /// Run the live resolver with config from `SITEFX_*` variables.
    Resolve(ResolveArgs),
    /// Run an effect headlessly and summarize what it drew.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SeasonArgs {
    /// 1-12; defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    month: Option<u8>,

    /// Picks the hemisphere; defaults to north.
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[arg(long, allow_negative_numbers = true, requires = "longitude")]
    latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "latitude")]
    longitude: Option<f64>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long)]
    kind: EffectKind,

    #[arg(long, default_value_t = 120)]
    ticks: u64,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Season(args) => run_season(&args),
        Command::Resolve(args) => run_resolve(&args).await,
        Command::Simulate(args) => run_simulate(&args),
    }
}

#[derive(Serialize)]
struct SeasonReport {
    month: u8,
    hemisphere: Hemisphere,
    effect: EffectKind,
}

fn run_season(args: &SeasonArgs) -> Result<(), CliError> {
    let month = match args.month {
        Some(m) => Month::try_from(m)?,
        None => OffsetDateTime::now_utc().month(),
    };
    let hemisphere = args.latitude.map_or(Hemisphere::North, Hemisphere::from_latitude);
    let report = SeasonReport { month: u8::from(month), hemisphere, effect: seasonal_effect(month, hemisphere) };
    print_json(&report)
}

async fn run_resolve(args: &ResolveArgs) -> Result<(), CliError> {
    let config = SiteConfig::from_env()?;
    let locator = match (args.latitude, args.longitude) {
        (Some(lat), Some(lon)) => FixedLocator::at(Coordinates::new(lat, lon)),
        (None, None) => FixedLocator::failing(LocateError::Unavailable("no coordinates given".into())),
        _ => return Err(CliError::PartialCoordinates),
    };
    let weather = OpenWeatherClient::from_config(&config.weather)?;
    let source = weather.as_ref().map(|w| w as &dyn WeatherSource);

    let today = OffsetDateTime::now_utc().date();
    let resolution = sitefx::resolve(today, &config, &locator, source).await;
    print_json(&resolution)
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    kind: EffectKind,
    particles: usize,
    ticks: u64,
    draw_calls: BTreeMap<&'static str, usize>,
    in_bounds: bool,
}

fn simulate(args: &SimulateArgs) -> Result<SimulationReport, CliError> {
    let viewport = Viewport::new(args.width, args.height, args.dpr);
    let mut fx = FxController::new(Recorder::new(), ManualHost::new(viewport), args.seed);
    fx.start(args.kind)?;

    let mut draw_calls = BTreeMap::new();
    let mut stayed_in_bounds = true;
    for _ in 0..args.ticks {
        if fx.host_mut().next_frame().is_none() {
            break;
        }
        fx.on_frame()?;
        for call in fx.surface().calls() {
            *draw_calls.entry(call.primitive()).or_insert(0) += 1;
        }
        stayed_in_bounds &= fx.particles().iter().all(|p| in_bounds(p, viewport));
    }
    tracing::debug!(kind = %args.kind, ticks = fx.ticks(), "simulation finished");

    Ok(SimulationReport {
        kind: args.kind,
        particles: fx.particles().len(),
        ticks: fx.ticks(),
        draw_calls,
        in_bounds: stayed_in_bounds,
    })
}

fn run_simulate(args: &SimulateArgs) -> Result<(), CliError> {
    print_json(&simulate(args)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
