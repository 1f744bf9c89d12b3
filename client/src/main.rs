use clap::Parser;
use client::network;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Player token from an earlier registration, to resume after reconnecting
    #[arg(short = 'p', long)]
    player_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Connecting to: {}", args.server);
    if let Some(player_id) = &args.player_id {
        info!("Resuming as {}", player_id);
    }

    let mut client = network::Client::new(&args.server, args.player_id).await?;

    client.run().await?;

    Ok(())
}
