use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::core::settings::Settings;

/// Server-rendered project profile pages.
#[derive(Parser, Debug)]
#[command(name = "folio-profile", version, about)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, env = "FOLIO_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Log filter, e.g. `info` or `folio_profile=debug`
    #[arg(long, global = true, env = "FOLIO_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "FOLIO_LOG_JSON")]
    pub log_json: bool,

    /// Base URL of the project service
    #[arg(long, global = true, env = "FOLIO_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve profile pages over HTTP
    Serve {
        /// Listen address
        #[arg(long, env = "FOLIO_BIND")]
        bind: Option<SocketAddr>,
    },
    /// Load one project and print its page
    Render {
        /// Project identifier
        id: String,
        /// Print the view model as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { bind: None })
    }

    /// Flags win over whatever the settings file provided.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(level) = &self.log_level {
            settings.log_level.value = level.clone();
        }
        if self.log_json {
            settings.log_json.value = true;
        }
        if let Some(url) = &self.api_base_url {
            settings.api_base_url.value = url.clone();
        }
        if let Some(Command::Serve { bind: Some(bind) }) = &self.command {
            settings.bind_addr.value = *bind;
        }
    }
}
