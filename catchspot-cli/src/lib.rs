//! Command-line host for the Catchspot engine.
//!
//! Each subcommand loads a JSON catch export, prepares the candidate rows the
//! way a request handler would, runs one engine query and prints the result
//! as JSON.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod details;
mod error;
mod favorites;
mod fs;
mod hot_spots;
mod input;
mod leaderboard;

pub use error::CliError;

use details::DetailsArgs;
use favorites::FavoritesArgs;
use hot_spots::HotSpotsArgs;
use leaderboard::LeaderboardArgs;

const ARG_CATCHES: &str = "catches";
const ARG_LIMIT: &str = "limit";
const ARG_USER: &str = "user";
const ARG_RADIUS: &str = "radius";
const ARG_MIN_VISITS: &str = "min-visits";
const ARG_MIN_ANGLERS: &str = "min-anglers";
const ARG_MIN_CATCHES: &str = "min-catches";
const ARG_NEAR: &str = "near";
const ARG_LAT: &str = "lat";
const ARG_LNG: &str = "lng";
const ARG_CATEGORY: &str = "category";

const ENV_FAVORITES_CATCHES: &str = "CATCHSPOT_CMDS_FAVORITES_CATCHES";
const ENV_FAVORITES_USER: &str = "CATCHSPOT_CMDS_FAVORITES_USER";
const ENV_HOT_SPOTS_CATCHES: &str = "CATCHSPOT_CMDS_HOT_SPOTS_CATCHES";
const ENV_LEADERBOARD_CATCHES: &str = "CATCHSPOT_CMDS_LEADERBOARD_CATCHES";
const ENV_LEADERBOARD_LAT: &str = "CATCHSPOT_CMDS_LEADERBOARD_LAT";
const ENV_LEADERBOARD_LNG: &str = "CATCHSPOT_CMDS_LEADERBOARD_LNG";
const ENV_LEADERBOARD_CATEGORY: &str = "CATCHSPOT_CMDS_LEADERBOARD_CATEGORY";
const ENV_DETAILS_CATCHES: &str = "CATCHSPOT_CMDS_DETAILS_CATCHES";
const ENV_DETAILS_LAT: &str = "CATCHSPOT_CMDS_DETAILS_LAT";
const ENV_DETAILS_LNG: &str = "CATCHSPOT_CMDS_DETAILS_LNG";

/// Run the Catchspot CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, input or the query
/// are invalid, or when the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli.command, &mut stdout)
}

fn run_with(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Favorites(args) => favorites::run_favorites(args, writer),
        Command::HotSpots(args) => hot_spots::run_hot_spots(args, writer),
        Command::Leaderboard(args) => leaderboard::run_leaderboard(args, writer),
        Command::Details(args) => details::run_details(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "catchspot",
    about = "Derive fishing spots and leaderboards from a catch export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one angler's favorite spots.
    Favorites(FavoritesArgs),
    /// List community hot spots.
    HotSpots(HotSpotsArgs),
    /// Rank anglers around a location.
    Leaderboard(LeaderboardArgs),
    /// Describe one location.
    Details(DetailsArgs),
}

#[cfg(test)]
mod tests;
