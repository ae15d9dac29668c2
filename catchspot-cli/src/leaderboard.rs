//! `leaderboard` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use catchspot_core::RTreeCatchIndex;
use catchspot_spots::{
    DEFAULT_LEADERBOARD_RADIUS_METERS, Leaderboard, LeaderboardCategory, LeaderboardQuery,
    leaderboard_in,
};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{CatchSource, DEFAULT_LIMIT, write_json};
use crate::{
    ARG_CATCHES, ARG_CATEGORY, ARG_LAT, ARG_LIMIT, ARG_LNG, ARG_RADIUS, CliError,
    ENV_LEADERBOARD_CATCHES, ENV_LEADERBOARD_CATEGORY, ENV_LEADERBOARD_LAT, ENV_LEADERBOARD_LNG,
};

/// CLI arguments for the `leaderboard` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "leaderboard",
    long_about = "Rank anglers by one of biggest_fish, longest_fish or \
                 highest_total_score using the catches within --radius \
                 meters of --lat/--lng.",
    about = "Rank anglers around a location"
)]
#[ortho_config(prefix = "CATCHSPOT")]
pub(crate) struct LeaderboardArgs {
    /// Path to the JSON catch export.
    #[arg(long = ARG_CATCHES, value_name = "path")]
    #[serde(default)]
    pub(crate) catches: Option<Utf8PathBuf>,
    /// Center latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Center longitude in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Search radius in meters (default 300).
    #[arg(long = ARG_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Ranking metric.
    #[arg(long = ARG_CATEGORY, value_name = "name")]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Newest catches considered (default 200).
    #[arg(long = ARG_LIMIT, value_name = "rows")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl LeaderboardArgs {
    pub(crate) fn into_config(self) -> Result<LeaderboardConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LeaderboardConfig::try_from(merged)
    }
}

/// Resolved `leaderboard` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LeaderboardConfig {
    pub(crate) source: CatchSource,
    pub(crate) query: LeaderboardQuery,
}

impl TryFrom<LeaderboardArgs> for LeaderboardConfig {
    type Error = CliError;

    fn try_from(args: LeaderboardArgs) -> Result<Self, Self::Error> {
        let path = args.catches.ok_or(CliError::MissingArgument {
            field: ARG_CATCHES,
            env: ENV_LEADERBOARD_CATCHES,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_LEADERBOARD_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_LEADERBOARD_LNG,
        })?;
        let raw_category = args.category.ok_or(CliError::MissingArgument {
            field: ARG_CATEGORY,
            env: ENV_LEADERBOARD_CATEGORY,
        })?;
        let category: LeaderboardCategory = raw_category.parse()?;
        let query = LeaderboardQuery::new(Coord { x: lng, y: lat }, category)
            .with_radius(args.radius.unwrap_or(DEFAULT_LEADERBOARD_RADIUS_METERS));
        Ok(Self {
            source: CatchSource {
                path,
                limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            },
            query,
        })
    }
}

pub(crate) fn run_leaderboard(
    args: LeaderboardArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let board = execute_leaderboard(&config)?;
    write_json(writer, &board)
}

pub(crate) fn execute_leaderboard(config: &LeaderboardConfig) -> Result<Leaderboard, CliError> {
    config.source.validate(ARG_CATCHES)?;
    let candidates = config
        .source
        .candidates_near(config.query.center, config.query.radius_meters)?;
    let index = RTreeCatchIndex::new(&candidates);
    Ok(leaderboard_in(&index, &config.query)?)
}
