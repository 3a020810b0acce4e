use clap::Parser;
use client::input::InputManager;
use client::network::{Client, ClientError};
use log::info;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Connecting to: {}", args.server);

    let mut client = Client::connect(&args.server).await?;
    let mut input = InputManager::new(BufReader::new(tokio::io::stdin()));

    match client.run(&mut input).await? {
        Some(outcome) => info!("Game finished: {:?}", outcome),
        None => info!("Game abandoned"),
    }

    Ok(())
}
