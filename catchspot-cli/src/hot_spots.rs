//! `hot-spots` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use catchspot_spots::{
    DEFAULT_HOT_SPOT_RADIUS_METERS, DEFAULT_MIN_ANGLERS, DEFAULT_MIN_CATCHES, HotSpot, HotSpotQuery,
    hot_spots,
};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{CatchSource, DEFAULT_LIMIT, parse_near, write_json};
use crate::{
    ARG_CATCHES, ARG_LIMIT, ARG_MIN_ANGLERS, ARG_MIN_CATCHES, ARG_NEAR, ARG_RADIUS, CliError,
    ENV_HOT_SPOTS_CATCHES,
};

/// CLI arguments for the `hot-spots` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "hot-spots",
    long_about = "Cluster every angler's published, geotagged catches and \
                 list the locations with at least --min-anglers anglers or \
                 --min-catches catches. Spots are ordered by total score, \
                 or nearest first when --near is given.",
    about = "List community hot spots"
)]
#[ortho_config(prefix = "CATCHSPOT")]
pub(crate) struct HotSpotsArgs {
    /// Path to the JSON catch export.
    #[arg(long = ARG_CATCHES, value_name = "path")]
    #[serde(default)]
    pub(crate) catches: Option<Utf8PathBuf>,
    /// Distinct anglers that qualify a spot (default 5).
    #[arg(long = ARG_MIN_ANGLERS, value_name = "count")]
    #[serde(default)]
    pub(crate) min_anglers: Option<usize>,
    /// Catches that qualify a spot (default 20).
    #[arg(long = ARG_MIN_CATCHES, value_name = "count")]
    #[serde(default)]
    pub(crate) min_catches: Option<usize>,
    /// Clustering radius in meters (default 300).
    #[arg(long = ARG_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Reference point as "lat,lng"; orders spots nearest first.
    #[arg(long = ARG_NEAR, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) near: Option<String>,
    /// Newest catches considered (default 200).
    #[arg(long = ARG_LIMIT, value_name = "rows")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl HotSpotsArgs {
    pub(crate) fn into_config(self) -> Result<HotSpotsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        HotSpotsConfig::try_from(merged)
    }
}

/// Resolved `hot-spots` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HotSpotsConfig {
    pub(crate) source: CatchSource,
    pub(crate) query: HotSpotQuery,
}

impl TryFrom<HotSpotsArgs> for HotSpotsConfig {
    type Error = CliError;

    fn try_from(args: HotSpotsArgs) -> Result<Self, Self::Error> {
        let path = args.catches.ok_or(CliError::MissingArgument {
            field: ARG_CATCHES,
            env: ENV_HOT_SPOTS_CATCHES,
        })?;
        let near = args.near.as_deref().map(parse_near).transpose()?;
        Ok(Self {
            source: CatchSource {
                path,
                limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            },
            query: HotSpotQuery {
                min_anglers: args.min_anglers.unwrap_or(DEFAULT_MIN_ANGLERS),
                min_catches: args.min_catches.unwrap_or(DEFAULT_MIN_CATCHES),
                radius_meters: args.radius.unwrap_or(DEFAULT_HOT_SPOT_RADIUS_METERS),
                near,
            },
        })
    }
}

pub(crate) fn run_hot_spots(args: HotSpotsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let spots = execute_hot_spots(&config)?;
    write_json(writer, &spots)
}

pub(crate) fn execute_hot_spots(config: &HotSpotsConfig) -> Result<Vec<HotSpot>, CliError> {
    config.source.validate(ARG_CATCHES)?;
    let candidates = config.source.candidates(None)?;
    Ok(hot_spots(&candidates, &config.query)?)
}
