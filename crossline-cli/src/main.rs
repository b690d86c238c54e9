mod input;
mod presenter;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use crossline::RoomId;
use crossline::model::IceServerConfig;
use crossline::peer::{Session, SessionCommand, SessionConfig, TransportConfig};
use crossline::store::server::{self, StoreService};
use crossline::store::{RemoteStore, SignalingStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::{HELP, parse_key, spawn_stdin_reader};
use crate::presenter::TerminalPresenter;

#[derive(Parser)]
#[command(name = "crossline", version, about = "Peer-to-peer tic-tac-toe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    online: OnlineArgs,
}

#[derive(clap::Args)]
struct OnlineArgs {
    /// Websocket URL of the signaling store, e.g. ws://127.0.0.1:9030/store
    #[arg(long = "store", env = "CROSSLINE_STORE_URL", global = true)]
    store_url: Option<String>,

    /// STUN server URLs, comma separated. Defaults to a public Google server.
    #[arg(
        long = "ice",
        env = "CROSSLINE_ICE_SERVERS",
        value_delimiter = ',',
        global = true
    )]
    ice_servers: Vec<String>,

    /// Page the share link points at; `?room=<id>` is appended.
    #[arg(long, env = "CROSSLINE_LINK_BASE", global = true)]
    link_base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hot-seat game on this terminal.
    Play,
    /// Open a room and wait for a friend.
    Host {
        /// Room id to use instead of a generated one.
        room: Option<String>,
    },
    /// Join a room by id or by share link.
    Join { room: String },
    /// Run the signaling store server.
    Store {
        #[arg(long, env = "CROSSLINE_BIND", default_value = "127.0.0.1:9030")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { command, online } = Cli::parse();
    setup_logging();

    match command {
        Commands::Store { bind } => run_store(&bind).await,
        Commands::Play => run_game(online, None).await,
        Commands::Host { room } => {
            let room = room.as_deref().map(RoomId::parse).transpose()?;
            run_game(online, Some(SessionCommand::Host { room })).await
        }
        Commands::Join { room } => {
            let room = RoomId::parse(&room).context("Invalid room")?;
            run_game(online, Some(SessionCommand::Join(room))).await
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,webrtc=warn,webrtc_ice=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_store(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    println!(
        "{} ws://{}{}",
        "Signaling store ready at".green().bold(),
        listener.local_addr()?,
        server::STORE_ROUTE
    );

    tokio::select! {
        res = server::serve(listener, StoreService::default()) => res?,
        _ = tokio::signal::ctrl_c() => info!("Stopping signaling store"),
    }
    Ok(())
}

async fn run_game(args: OnlineArgs, start: Option<SessionCommand>) -> Result<()> {
    let store: Option<Arc<dyn SignalingStore>> = match &args.store_url {
        Some(url) => {
            let store = RemoteStore::connect(url)
                .await
                .with_context(|| format!("Failed to reach signaling store at {}", url))?;
            Some(Arc::new(store))
        }
        None => None,
    };
    if store.is_none() && start.is_some() {
        warn!("No --store given; online play is unavailable");
    }

    let mut transport = TransportConfig::default();
    if !args.ice_servers.is_empty() {
        transport.ice_servers = args
            .ice_servers
            .into_iter()
            .map(IceServerConfig::stun)
            .collect();
    }
    let config = SessionConfig {
        transport,
        share_base_url: args.link_base,
    };

    let (session, handle) = Session::new(Box::new(TerminalPresenter::new()), store, config);
    let session_task = tokio::spawn(session.run());

    println!("{}", HELP.dimmed());
    if let Some(cmd) = start {
        handle.send(cmd).await?;
    }

    let mut lines = spawn_stdin_reader();
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_key(&line) {
                    Some(SessionCommand::Shutdown) => break,
                    Some(cmd) => {
                        if handle.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    None => println!("{}", HELP.dimmed()),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // The session releases its room before the task ends.
    let _ = handle.shutdown().await;
    session_task.await.context("Session task failed")?;
    println!("{}", "Bye!".bold());
    Ok(())
}
