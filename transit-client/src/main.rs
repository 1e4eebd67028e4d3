use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use transit_client::api::TransitApiClient;
use transit_client::catalog::RouteCatalog;
use transit_client::config::AppConfig;
use transit_client::domain::RouteId;
use transit_client::feed::FeedClient;
use transit_client::map::RouteOverlay;
use transit_client::schedule::{ScheduleOutcome, filter_by_stop_name, load_schedule};
use transit_client::selection;

/// Bus routes, timetables and live vehicle positions.
#[derive(Debug, Parser)]
#[command(name = "transit-client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every route.
    Routes,

    /// Print today's departures per stop for a route.
    Schedule {
        route_id: String,

        /// Only show stops whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Print a route's map colours and stop details.
    Stops { route_id: String },

    /// Follow live vehicle positions until Ctrl-C.
    Watch {
        /// Route to show; repeat for more. Defaults to every route.
        #[arg(long = "route")]
        routes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transit_client=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match TransitApiClient::new(config.api_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create API client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Routes => list_routes(client).await,
        Command::Schedule { route_id, search } => {
            print_schedule(&client, &RouteId::new(route_id), search.as_deref()).await
        }
        Command::Stops { route_id } => {
            print_stops(client, &RouteId::new(route_id), config.maps_api_key.as_deref()).await
        }
        Command::Watch { routes } => {
            watch(client, &config, routes.into_iter().map(RouteId::new).collect()).await;
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn list_routes(client: TransitApiClient) -> Result<(), transit_client::api::ApiError> {
    let catalog = RouteCatalog::fetch(client).await?;

    for item in catalog.routes().await {
        println!(
            "{:>6}  {}  ({} stops)",
            item.id().as_str(),
            item.route.display_name(),
            item.stops.len()
        );
    }

    Ok(())
}

async fn print_stops(
    client: TransitApiClient,
    route_id: &RouteId,
    maps_api_key: Option<&str>,
) -> Result<(), transit_client::api::ApiError> {
    let catalog = RouteCatalog::fetch(client).await?;
    let Some(item) = catalog.get(route_id).await else {
        println!("No route {route_id}.");
        return Ok(());
    };

    let overlay = RouteOverlay::for_route(&item);
    println!(
        "{}  shape {}  stops {}  ({} shapes)",
        item.route.display_name(),
        overlay.shape_color,
        overlay.stop_color,
        overlay.polylines.len()
    );

    for info in overlay.stop_infos(maps_api_key) {
        println!("{}\n    {}", info.name, info.vicinity);
        if let Some(url) = info.photo_url {
            println!("    {url}");
        }
    }

    Ok(())
}

async fn print_schedule(
    client: &TransitApiClient,
    route_id: &RouteId,
    search: Option<&str>,
) -> Result<(), transit_client::api::ApiError> {
    match load_schedule(client, route_id).await? {
        ScheduleOutcome::NoService { message } => println!("{message}"),
        ScheduleOutcome::Stops(stops) => {
            let shown = filter_by_stop_name(&stops, search.unwrap_or_default());
            if shown.is_empty() {
                println!("No stops match your search.");
            }
            for stop in shown {
                println!("{}\n    {}", stop.stop_name, stop.times_label());
            }
        }
    }

    Ok(())
}

async fn watch(client: TransitApiClient, config: &AppConfig, routes: Vec<RouteId>) {
    let (writer, handle) = selection::channel();

    if routes.is_empty() {
        // Without a catalog the selection stays empty and nothing is shown
        let catalog = RouteCatalog::empty(client);
        if let Err(e) = catalog.refresh().await {
            warn!("failed to load routes: {e}");
        }
        writer.toggle_all(catalog.ids().await);
    } else {
        writer.set(routes);
    }

    let feed = FeedClient::new(config.feed_config());
    let mut updates = feed.subscribe();
    feed.connect();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let visible = feed.visible_positions(&handle);
                println!("--- {} vehicles ---", visible.len());
                for bus in visible {
                    println!(
                        "{:<8} {:<6} {:>9.5} {:>10.5} {:>5.0}°",
                        bus.marker_title(),
                        bus.route_short_name,
                        bus.latitude,
                        bus.longitude,
                        bus.bearing
                    );
                }
            }
        }
    }

    feed.disconnect().await;
}
