// src/main.rs
mod cli;
mod commands;
mod display;
mod logging;

use clap::Parser;
use cli::{Args, is_config_command};
use commands::{handle_config_update_command, handle_list_config_command, handle_view_command};
use f1_race_data::error::AppError;
use logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must be kept alive until exit to flush buffered log lines
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if is_config_command(&args) {
        if args.list_config {
            return handle_list_config_command().await;
        }
        return handle_config_update_command(&args).await;
    }

    handle_view_command(&args).await
}
