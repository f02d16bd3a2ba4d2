mod navigation;
mod session;

use clap::Parser;
use session::Session;
use tic_tac_toe_rust::core::{move_list::MoveListOrder, player::PlayerRotation};
use tracing_subscriber::EnvFilter;

/// Terminal tic-tac-toe with move history and shareable location queries.
#[derive(Debug, Parser)]
#[command(name = "ttt_cli", version, about)]
struct Args {
    /// Comma-separated player symbols, in turn order.
    #[arg(long, default_value = "X,O")]
    players: String,

    /// Location query to resume, as printed by the `s` directive.
    #[arg(long)]
    location: Option<String>,

    /// List moves newest first.
    #[arg(long)]
    descending: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let players = PlayerRotation::parse_list(&args.players)?;
    let order = MoveListOrder::from_ascending(!args.descending);

    println!("program begin");
    let mut session = Session::new(players, args.location.as_deref(), order);
    session.start();
    println!("program end");
    Ok(())
}
