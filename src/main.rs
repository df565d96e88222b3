use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

mod actions;
mod client;
mod components;
mod config;
mod demo_data;
mod logging;
mod menu;
mod node_utils;
mod screens;
mod selection;
mod statusbar;
mod ui;

use client::{DemoServer, Transport, WebClient};
use config::ClientConfig;
use ui::App;

/// Terminal client for browsing an OMERO server and acting on the selection
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Server base URL; implies online mode
    #[arg(long)]
    server: Option<String>,

    /// Use the built-in demo server
    #[arg(long)]
    offline: bool,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level: log::LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| anyhow!("unknown log level '{}'", args.log_level))?;
    logging::init_logger(level);

    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server_url = server;
        config.offline = false;
    }
    if args.offline {
        config.offline = true;
    }

    let transport = if config.offline {
        log::info!("Running against the offline demo server");
        Transport::Demo(DemoServer::new())
    } else {
        log::info!("Connecting to {}", config.server_url);
        Transport::Http(WebClient::new(&config.server_url)?)
    };

    let mut app = App::new(config, transport);

    logging::switch_to_tui_logging();
    let result = app.run().await;
    logging::switch_to_console_logging();

    if let Err(e) = &result {
        log::error!("Client stopped: {e:#}");
    }
    result
}
