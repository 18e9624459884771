mod render;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use freemeals_client::ProvidersClient;
use freemeals_core::ALL_LOCATIONS;
use freemeals_view::{Event, LoadState, Mode, Session, ViewState};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "freemeals")]
#[command(about = "Browse charitable free meal providers")]
struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the towns/cities providers can be filtered by.
    Locations,
    /// List providers.
    List {
        #[arg(long, short, default_value = ALL_LOCATIONS)]
        location: String,
    },
    /// Show the details of one provider from the list.
    Show {
        /// Position in the list printed by `list` for the same location.
        index: usize,
        #[arg(long, short, default_value = ALL_LOCATIONS)]
        location: String,
    },
    /// Print the map view and provider markers.
    Map {
        #[arg(long, short, default_value = ALL_LOCATIONS)]
        location: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = freemeals_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?config, "loaded configuration");

    let client = ProvidersClient::from_config(&config)?;
    let mut session = Session::new(client, ViewState::new(config.header_row_rule));
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Locations => {
            let state = load(&mut session, ALL_LOCATIONS).await?;
            if cli.json {
                render::write_json(&mut out, state.locations().entries())?;
            } else {
                render::locations(&mut out, state)?;
            }
        }
        Commands::List { location } => {
            let state = load(&mut session, &location).await?;
            if cli.json {
                render::write_json(&mut out, &state.list_rows())?;
            } else {
                render::list(&mut out, state)?;
            }
        }
        Commands::Show { index, location } => {
            load(&mut session, &location).await?;
            session.dispatch(Event::ProviderSelected(index));
            let Some(selected) = session.state().selected_detail() else {
                anyhow::bail!(
                    "no provider at index {index} ({} loaded for {location})",
                    session.state().data().len()
                );
            };
            if cli.json {
                render::write_json(&mut out, &selected)?;
            } else {
                render::detail(&mut out, &selected)?;
            }
        }
        Commands::Map { location } => {
            session.dispatch(Event::ModeChanged(Mode::Map));
            let state = load(&mut session, &location).await?;
            let markers = state.markers();
            if cli.json {
                render::write_json(
                    &mut out,
                    &serde_json::json!({ "view": state.map_view(), "markers": markers }),
                )?;
            } else {
                render::map(&mut out, state.map_view(), &markers)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Loads `location` the way the page does on first visit: the unfiltered
/// batch first, which seeds the location index, then the requested town.
async fn load<'a>(
    session: &'a mut Session<ProvidersClient>,
    location: &str,
) -> anyhow::Result<&'a ViewState> {
    session.refresh().await;
    ensure_loaded(session.state())?;

    if location != ALL_LOCATIONS {
        if !session.state().locations().contains(location) {
            anyhow::bail!(
                "unknown location '{location}'; run `freemeals locations` to see the options"
            );
        }
        session.set_filter(location).await;
        ensure_loaded(session.state())?;
    }

    Ok(session.state())
}

fn ensure_loaded(state: &ViewState) -> anyhow::Result<()> {
    if let LoadState::Failed(message) = state.load() {
        anyhow::bail!("could not load providers for {}: {message}", state.filter());
    }
    Ok(())
}

#[cfg(test)]
mod tests;
