use std::{cell::RefCell, process::ExitCode, rc::Rc};

use clap::{Args, Parser, Subcommand};
use route_finder::{
    ClientConfig, ClientError, Disposition, Effect, HttpBackend, RouteSession,
    config::{API_ROOT_VAR, ConfigError, DEFAULT_API_ROOT, DEFAULT_TIMEOUT_SECS, TIMEOUT_VAR, TOKEN_VAR},
    format::{describe_step, distance_chip, duration_chip, traffic_description, weather_description},
    icons::{maneuver_icon, traffic_icon, vehicle_icon, weather_icon},
    refresh_locations, submit_route,
};
use shared::{VehicleType, WeatherCondition};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "route-finder", about = "Browse route alternatives between two locations")]
struct Cli {
    /// Base URL of the routing backend
    #[arg(long, env = API_ROOT_VAR, default_value = DEFAULT_API_ROOT)]
    api_root: String,
    /// Bearer token of an authenticated session
    #[arg(long, env = TOKEN_VAR, hide_env_values = true)]
    token: Option<String>,
    #[arg(long, env = TIMEOUT_VAR, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the selectable locations
    Locations,
    /// Compute alternatives and show the directions of one of them
    Route(RouteArgs),
}

#[derive(Debug, Args)]
struct RouteArgs {
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,
    #[arg(long, default_value = "car")]
    vehicle: VehicleType,
    /// Override the current weather (sunny, cloudy, rainy, snowy, foggy)
    #[arg(long)]
    weather: Option<WeatherCondition>,
    /// Name of the alternative to show instead of the first one
    #[arg(long)]
    option: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Session(String),
    #[error("authentication required: set ROUTE_API_TOKEN or pass --token")]
    AuthRequired,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::new(&cli.api_root, cli.token, cli.timeout_secs)?;
    let backend = HttpBackend::new(&config)?;
    tracing::info!(api_root = backend.api_root(), "using routing backend");

    let session = Rc::new(RefCell::new(RouteSession::new()));
    let handle = Rc::downgrade(&session);

    match cli.command {
        Command::Locations => {
            let disposition = refresh_locations(&handle, &backend).await;
            settle(&session, disposition)?;
            print_locations(&session.borrow());
        }
        Command::Route(args) => {
            {
                let mut session = session.borrow_mut();
                session.set_start(args.start);
                session.set_end(args.end);
                session.set_vehicle_type(args.vehicle);
                session.set_user_weather(args.weather);
            }
            let disposition = submit_route(&handle, &backend).await;
            settle(&session, disposition)?;

            let mut session = session.borrow_mut();
            if let Some(option) = args.option.as_deref()
                && !session.select(option)
            {
                eprintln!("No alternative named '{option}', showing the default one");
            }
            print_route(&session);
        }
    }
    Ok(())
}

/// Turns redirect effects and recorded failures into a CLI error.
fn settle(session: &RefCell<RouteSession>, disposition: Disposition) -> Result<(), CliError> {
    let mut session = session.borrow_mut();
    if session
        .take_effects()
        .contains(&Effect::RedirectToLogin)
    {
        return Err(CliError::AuthRequired);
    }
    match disposition {
        Disposition::Applied => Ok(()),
        _ => Err(CliError::Session(
            session
                .error()
                .map(str::to_string)
                .unwrap_or_else(|| format!("request not applied ({disposition:?})")),
        )),
    }
}

fn print_locations(session: &RouteSession) {
    for location in session.locations() {
        println!(
            "{:<28} {:>10.6} {:>10.6}  {:<13} traffic {:<6} parking {}",
            location.name,
            location.lat,
            location.lng,
            location.kind,
            location.traffic_zone,
            if location.parking { "yes" } else { "no" },
        );
    }
}

fn print_route(session: &RouteSession) {
    let controller = session.controller();
    let Some(result) = controller.result() else {
        println!("No route loaded.");
        return;
    };

    println!(
        "{} -> {} [{}]",
        result.start.name,
        result.end.name,
        vehicle_icon(result.vehicle_type).glyph.name()
    );
    println!(
        "Weather: {} [{}]",
        weather_description(&result.weather),
        weather_icon(result.weather.condition).glyph.name()
    );
    println!(
        "Traffic: {} [{}]",
        traffic_description(result.traffic),
        traffic_icon(result.traffic).glyph.name()
    );
    let viewport = controller.viewport();
    println!(
        "Map: center {:.5}, {:.5} zoom {}",
        viewport.center.lat, viewport.center.lng, viewport.zoom
    );

    println!();
    println!("Route options:");
    if result.options().is_empty() {
        println!("  (none)");
    }
    for (option, overlay) in result.options().iter().zip(controller.overlays()) {
        println!(
            "{} {}  {}  {}  {}",
            if overlay.selected { "*" } else { " " },
            option.option_name,
            distance_chip(option.distance_km),
            duration_chip(option.duration_min),
            overlay.color,
        );
        if !option.description.is_empty() {
            println!("    {}", option.description);
        }
    }

    if controller.steps().is_empty() {
        return;
    }
    println!();
    println!("Directions:");
    for step in controller.steps() {
        let view = describe_step(step);
        println!(
            "  [{}] {}  ({})",
            maneuver_icon(view.maneuver).glyph.name(),
            view.instruction,
            view.detail
        );
    }
}
