//! SaberDuel - Lightsaber Duel Simulator
//!
//! Runs a player-versus-AI lightsaber duel headless and prints the result.

use saberduel::cli;
use saberduel::headless::run_headless_duel;

fn main() {
    let args = cli::parse_args();

    let result = args.duel_config().and_then(run_headless_duel);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
