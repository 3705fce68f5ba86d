use crate::cli::{Args, View, selected_view};
use crate::display;
use chrono::Utc;
use f1_race_data::config::Config;
use f1_race_data::data_fetcher::models::{CalendarOverview, Region};
use f1_race_data::data_fetcher::processors::{filter_by_region, standings_board};
use f1_race_data::data_fetcher::{LivePoller, RaceDataClient};
use f1_race_data::error::AppError;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-log-file, --clear-log-file).
///
/// A config file that fails to load is replaced with defaults plus the update.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

fn parse_region(label: &str) -> Result<Region, AppError> {
    Region::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = Region::FILTERS.iter().map(Region::label).collect();
        AppError::config_error(format!(
            "Unknown region '{label}'. Expected one of: {}",
            known.join(", ")
        ))
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The whole overview, or only the races in `region` when one is picked.
fn calendar_json(overview: &CalendarOverview, region: Option<Region>) -> Result<Value, AppError> {
    let value = match region {
        Some(region) => serde_json::to_value(filter_by_region(&overview.races, region))?,
        None => serde_json::to_value(overview)?,
    };
    Ok(value)
}

/// Prints either the rendered text or the JSON form of a view.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), AppError> {
    if json {
        print_json(value)
    } else {
        print!("{}", text(value));
        Ok(())
    }
}

/// Fetches and prints the view picked by the command line flags.
pub async fn handle_view_command(args: &Args) -> Result<(), AppError> {
    let config = Config::load().await?;
    let client = RaceDataClient::new(config)?;
    let view = selected_view(args);
    let now = Utc::now();
    info!("Showing {view:?}");

    match view {
        View::Home => {
            let home = client.fetch_home_snapshot(now).await;
            emit(args.json, &home, |home| display::render_home(home, now))
        }
        View::Calendar { region } => {
            let region = region.as_deref().map(parse_region).transpose()?;
            let overview = client.fetch_calendar_overview(now).await;
            if args.json {
                print_json(&calendar_json(&overview, region)?)
            } else {
                let races = match region {
                    Some(region) => filter_by_region(&overview.races, region),
                    None => overview.races.clone(),
                };
                print!("{}", display::render_calendar(&overview, &races, now));
                Ok(())
            }
        }
        View::NextRace => {
            let next = client.fetch_next_race().await;
            emit(args.json, &next, |next| {
                display::render_next_race(next.as_ref(), now)
            })
        }
        View::DriverStandings => {
            let board = standings_board(client.fetch_driver_standings().await);
            emit(args.json, &board, display::render_driver_standings)
        }
        View::ConstructorStandings => {
            let board = standings_board(client.fetch_constructor_standings().await);
            emit(args.json, &board, display::render_constructor_standings)
        }
        View::Results { round: None } => {
            let classified = client.fetch_last_race_results().await;
            emit(args.json, &classified, display::render_classified_race)
        }
        View::Results { round: Some(round) } => {
            let results = client.fetch_race_results(round).await;
            emit(args.json, &results, |results| {
                display::render_results(&format!("RESULTS  Round {round}"), results)
            })
        }
        View::Qualifying { round } => {
            let rows = client.fetch_qualifying_results(round).await;
            emit(args.json, &rows, |rows| display::render_qualifying(round, rows))
        }
        View::Live { watch: false } => {
            let board = client.fetch_live_board(now).await;
            emit(args.json, &board, display::render_live_board)
        }
        View::Live { watch: true } => watch_live_board(client, args.json).await,
    }
}

/// Prints every board the poller delivers until Ctrl-C.
async fn watch_live_board(client: RaceDataClient, json: bool) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::channel(4);
    let poller = LivePoller::spawn(client, tx);

    loop {
        tokio::select! {
            board = rx.recv() => {
                let Some(board) = board else { break };
                emit(json, &board, display::render_live_board)?;
                println!();
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Ctrl-C received, stopping live board");
                break;
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}
