//! `details` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use catchspot_spots::{
    DEFAULT_LEADERBOARD_RADIUS_METERS, SpotDetails, SpotDetailsQuery, spot_details,
};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{CatchSource, DEFAULT_LIMIT, write_json};
use crate::{
    ARG_CATCHES, ARG_LAT, ARG_LIMIT, ARG_LNG, ARG_RADIUS, ARG_USER, CliError, ENV_DETAILS_CATCHES,
    ENV_DETAILS_LAT, ENV_DETAILS_LNG,
};

/// CLI arguments for the `details` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "details",
    long_about = "Summarise the catches within --radius meters of \
                 --lat/--lng: statistics, leaderboards, recent activity and, \
                 with --user, that angler's own record.",
    about = "Describe one location"
)]
#[ortho_config(prefix = "CATCHSPOT")]
pub(crate) struct DetailsArgs {
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
    /// Radius in meters (default 300).
    #[arg(long = ARG_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Angler whose own statistics are included.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Newest catches considered (default 200).
    #[arg(long = ARG_LIMIT, value_name = "rows")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl DetailsArgs {
    pub(crate) fn into_config(self) -> Result<DetailsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DetailsConfig::try_from(merged)
    }
}

/// Resolved `details` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailsConfig {
    pub(crate) source: CatchSource,
    pub(crate) query: SpotDetailsQuery,
}

impl TryFrom<DetailsArgs> for DetailsConfig {
    type Error = CliError;

    fn try_from(args: DetailsArgs) -> Result<Self, Self::Error> {
        let path = args.catches.ok_or(CliError::MissingArgument {
            field: ARG_CATCHES,
            env: ENV_DETAILS_CATCHES,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_DETAILS_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_DETAILS_LNG,
        })?;
        let mut query = SpotDetailsQuery::new(Coord { x: lng, y: lat })
            .with_radius(args.radius.unwrap_or(DEFAULT_LEADERBOARD_RADIUS_METERS));
        query.user_id = args.user;
        Ok(Self {
            source: CatchSource {
                path,
                limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            },
            query,
        })
    }
}

pub(crate) fn run_details(args: DetailsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let details = execute_details(&config)?;
    write_json(writer, &details)
}

pub(crate) fn execute_details(config: &DetailsConfig) -> Result<SpotDetails, CliError> {
    config.source.validate(ARG_CATCHES)?;
    let candidates = config
        .source
        .candidates_near(config.query.center, config.query.radius_meters)?;
    Ok(spot_details(&candidates, &config.query)?)
}
