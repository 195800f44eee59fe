use std::process::ExitCode;

use clap::Parser;
use folio_profile::{
    cli::{Cli, Command},
    core::{lifecycle::PageState, settings::Settings},
    logging, server,
};

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match Settings::discover(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Settings load error: {}", error);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut settings);

    if let Err(error) = logging::init(&settings) {
        eprintln!("Could not initialise logging: {}", error);
        return ExitCode::FAILURE;
    }
    logging::log_settings(&settings);

    match cli.resolved_command() {
        Command::Serve { .. } => match server::start_server(settings).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                tracing::error!(%error, "Server stopped");
                ExitCode::FAILURE
            }
        },
        Command::Render { id, json } => match server::render_once(&settings, &id, json).await {
            Ok((state, body)) => {
                println!("{}", body);
                match state {
                    PageState::Failed(_) => ExitCode::FAILURE,
                    _ => ExitCode::SUCCESS,
                }
            }
            Err(error) => {
                tracing::error!(%error, "Render failed");
                ExitCode::FAILURE
            }
        },
    }
}
