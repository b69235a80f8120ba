//! SpeechRelay entry point

use std::process::ExitCode;

use clap::Parser;

use speech_relay::cli::{
    app::{load_merged_config, resolve_credentials, run_server, ServeOptions, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use speech_relay::infrastructure::{LogFormat, XdgConfigStore};

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };

    // Merge config: defaults < file < env < cli
    let config = load_merged_config(cli.to_config()).await;

    let credentials = match resolve_credentials(&config).await {
        Ok(credentials) => credentials,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    run_server(ServeOptions::from_config(&config, credentials, log_format)).await
}
