//! `favorites` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use catchspot_spots::{
    DEFAULT_FAVORITE_RADIUS_METERS, DEFAULT_MIN_VISITS, FavoriteSpot, FavoriteSpotQuery,
    favorite_spots,
};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{CatchSource, DEFAULT_LIMIT, write_json};
use crate::{
    ARG_CATCHES, ARG_LIMIT, ARG_MIN_VISITS, ARG_RADIUS, ARG_USER, CliError, ENV_FAVORITES_CATCHES,
    ENV_FAVORITES_USER,
};

/// CLI arguments for the `favorites` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "favorites",
    long_about = "Cluster one angler's published, geotagged catches and list \
                 the locations visited at least --min-visits times, most \
                 visited first.",
    about = "List one angler's favorite spots"
)]
#[ortho_config(prefix = "CATCHSPOT")]
pub(crate) struct FavoritesArgs {
    /// Path to the JSON catch export.
    #[arg(long = ARG_CATCHES, value_name = "path")]
    #[serde(default)]
    pub(crate) catches: Option<Utf8PathBuf>,
    /// Angler whose catches are clustered.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Visits needed for a spot to count (default 3).
    #[arg(long = ARG_MIN_VISITS, value_name = "count")]
    #[serde(default)]
    pub(crate) min_visits: Option<usize>,
    /// Clustering radius in meters (default 200).
    #[arg(long = ARG_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Newest catches considered (default 200).
    #[arg(long = ARG_LIMIT, value_name = "rows")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl FavoritesArgs {
    pub(crate) fn into_config(self) -> Result<FavoritesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FavoritesConfig::try_from(merged)
    }
}

/// Resolved `favorites` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FavoritesConfig {
    pub(crate) source: CatchSource,
    pub(crate) user: String,
    pub(crate) query: FavoriteSpotQuery,
}

impl TryFrom<FavoritesArgs> for FavoritesConfig {
    type Error = CliError;

    fn try_from(args: FavoritesArgs) -> Result<Self, Self::Error> {
        let path = args.catches.ok_or(CliError::MissingArgument {
            field: ARG_CATCHES,
            env: ENV_FAVORITES_CATCHES,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_FAVORITES_USER,
        })?;
        Ok(Self {
            source: CatchSource {
                path,
                limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            },
            user,
            query: FavoriteSpotQuery {
                min_visits: args.min_visits.unwrap_or(DEFAULT_MIN_VISITS),
                radius_meters: args.radius.unwrap_or(DEFAULT_FAVORITE_RADIUS_METERS),
            },
        })
    }
}

pub(crate) fn run_favorites(args: FavoritesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let spots = execute_favorites(&config)?;
    write_json(writer, &spots)
}

pub(crate) fn execute_favorites(config: &FavoritesConfig) -> Result<Vec<FavoriteSpot>, CliError> {
    config.source.validate(ARG_CATCHES)?;
    let candidates = config.source.candidates(Some(&config.user))?;
    Ok(favorite_spots(&candidates, &config.query)?)
}
