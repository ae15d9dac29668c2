//! Loading and preparing the catch export shared by every command.
//!
//! The engine expects the caller to hand it a bounded, newest-first list of
//! published, geotagged catches. This module plays that caller.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use catchspot_core::{CatchRecord, search_box};
use geo::{Coord, Intersects};
use log::debug;
use serde::Serialize;

use crate::CliError;
use crate::fs::{file_is_file, open_utf8_file};

/// Rows handed to the engine when `--limit` is not given.
pub(crate) const DEFAULT_LIMIT: usize = 200;

/// Resolved catch input shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CatchSource {
    /// Path to the JSON catch export.
    pub(crate) path: Utf8PathBuf,
    /// Maximum rows handed to the engine.
    pub(crate) limit: usize,
}

impl CatchSource {
    pub(crate) fn validate(&self, field: &'static str) -> Result<(), CliError> {
        require_existing(&self.path, field)
    }

    /// Load the export and prepare it for the engine.
    pub(crate) fn candidates(&self, user: Option<&str>) -> Result<Vec<CatchRecord>, CliError> {
        let catches = load_catches(&self.path)?;
        Ok(prepare_candidates(catches, user, self.limit))
    }

    /// Load the export and prepare the rows inside the search box around
    /// `center`, so the row limit applies to the location's catches.
    pub(crate) fn candidates_near(
        &self,
        center: Coord<f64>,
        radius_meters: f64,
    ) -> Result<Vec<CatchRecord>, CliError> {
        let catches = load_catches(&self.path)?;
        Ok(prepare_near(catches, center, radius_meters, self.limit))
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a JSON array of catch records from disk.
pub(crate) fn load_catches(path: &Utf8Path) -> Result<Vec<CatchRecord>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCatches {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseCatches {
        path: path.to_path_buf(),
        source,
    })
}

/// Drop drafts and ungeotagged catches, keep `user`'s catches when given,
/// then keep the newest `limit` rows, newest first.
pub(crate) fn prepare_candidates(
    catches: Vec<CatchRecord>,
    user: Option<&str>,
    limit: usize,
) -> Vec<CatchRecord> {
    let total = catches.len();
    let mut kept: Vec<CatchRecord> = catches
        .into_iter()
        .filter(CatchRecord::is_eligible)
        .filter(|record| user.is_none_or(|id| record.user_id == id))
        .collect();
    kept.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    kept.truncate(limit);
    debug!("Prepared {} of {total} catches (limit {limit})", kept.len());
    kept
}

/// Keep the catches inside `search_box(center, radius_meters)`, then prepare
/// them as [`prepare_candidates`] does.
pub(crate) fn prepare_near(
    catches: Vec<CatchRecord>,
    center: Coord<f64>,
    radius_meters: f64,
    limit: usize,
) -> Vec<CatchRecord> {
    let bbox = search_box(center, radius_meters);
    let inside: Vec<CatchRecord> = catches
        .into_iter()
        .filter(|record| {
            record
                .position()
                .is_some_and(|position| bbox.intersects(&position))
        })
        .collect();
    prepare_candidates(inside, None, limit)
}

/// Parse a `lat,lng` pair into a coordinate.
pub(crate) fn parse_near(raw: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidNear {
        raw: raw.to_owned(),
    };
    let (lat, lng) = raw.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = lng.trim().parse().map_err(|_| invalid())?;
    Ok(Coord {
        x: longitude,
        y: latitude,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
