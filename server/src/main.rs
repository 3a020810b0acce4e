use clap::Parser;
use log::info;
use server::network::{Server, ServerError};
use server::source::{ConsoleSource, HeuristicSource, MoveSource};
use shared::{Mark, Strategist};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a server for the Tic-Tac-Toe client-server game")]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port on which to listen for new connections
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Play the engine side yourself from this terminal
    #[arg(short, long)]
    manual: bool,

    /// Seed for the engine's random fallback moves
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show debug output
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut source: Box<dyn MoveSource> = if args.manual {
        info!("Manual mode: engine moves are read from this terminal");
        Box::new(ConsoleSource::stdin())
    } else {
        let strategist = match args.seed {
            Some(seed) => Strategist::seeded(Mark::Engine, seed),
            None => Strategist::from_entropy(Mark::Engine),
        };
        Box::new(HeuristicSource::new(strategist))
    };

    let address = format!("{}:{}", args.host, args.port);
    let mut server = Server::new(&address).await?;

    // Handle shutdown gracefully
    tokio::select! {
        result = server.run(source.as_mut()) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
