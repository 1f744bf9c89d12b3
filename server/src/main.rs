use clap::Parser;
use log::info;
use server::config::ServerConfig;
use server::network::{BoxError, Server};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = ServerConfig::parse();

    info!("Starting fear bingo server...");
    info!(
        "Viewers: up to {}, timeout {}s",
        config.max_viewers, config.viewer_timeout
    );

    let mut server = Server::new(&config).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
