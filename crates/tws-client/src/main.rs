// crates/tws-client/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tws_client::config::Config;
use tws_client::runner::Client;
use tws_client::types::EventRx;
use tws_core::Event;

#[derive(Parser)]
#[clap(name = "tws-client")]
#[clap(about = "Connects to TWS or the gateway and logs every decoded event")]
struct Cli {
    /// TOML config file; without one the TWS_* environment variables apply
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Server host
    #[clap(long)]
    host: Option<String>,

    /// Server API port
    #[clap(short, long)]
    port: Option<u16>,

    /// Client id
    #[clap(short = 'i', long)]
    client_id: Option<i32>,

    /// Wait for API verification before starting the session
    #[clap(long)]
    extra_auth: bool,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env()?,
        };
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(client_id) = self.client_id {
            config.client_id = client_id;
        }
        if self.extra_auth {
            config.extra_auth = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --debug picks the level.
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.resolve_config()?;
    info!(?config, "starting tws-client");

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(log_events(rx));

    let client = Client::connect(&config, tx).await?;
    tokio::select! {
        res = client.run() => {
            if let Err(e) = res {
                error!("Connection failed: {:#}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, disconnecting");
        }
    }

    // The sender went away with the client; the printer drains and stops.
    printer.await?;
    Ok(())
}

async fn log_events(mut rx: EventRx) {
    while let Some(event) = rx.recv().await {
        match &event {
            Event::ClientError(e) => error!(%e, "client error"),
            Event::Error(e) => warn!(
                id = e.id,
                code = e.code,
                message = %String::from_utf8_lossy(&e.message),
                "server error"
            ),
            Event::ConnectionClosed => info!("connection closed"),
            other => info!(kind = other.kind(), "{:?}", other),
        }
    }
}
