//! Test helpers for writing catch exports and invoking commands.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use catchspot_core::CatchRecord;
use catchspot_core::test_support::catch_at;
use std::fs;
use tempfile::TempDir;

/// A catch export written to a temporary directory.
pub(super) struct CatchExport {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) path: Utf8PathBuf,
}

impl CatchExport {
    pub(super) fn new(catches: &[CatchRecord]) -> Self {
        let payload = serde_json::to_vec_pretty(catches).expect("serialise catches");
        Self::raw(&payload)
    }

    pub(super) fn raw(contents: &[u8]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("catches.json");
        write_utf8(&path, contents);
        Self {
            _dir: dir,
            root,
            path,
        }
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Catches around a harbour at (55.0, 12.0) plus records the CLI must drop.
pub(super) fn harbour_catches() -> Vec<CatchRecord> {
    let mut missing = catch_at("no-coords", "ida", 55.0, 12.0, 1);
    missing.latitude = None;
    vec![
        catch_at("i1", "ida", 55.0000, 12.0000, 10)
            .with_species("Gedde")
            .with_weight_kg(6.0),
        catch_at("i2", "ida", 55.0003, 12.0000, 20)
            .with_species("Aborre")
            .with_length_cm(32.0),
        catch_at("i3", "ida", 55.0005, 12.0002, 30).with_species("Gedde"),
        catch_at("b1", "bo", 55.0004, 12.0001, 40)
            .with_species("Laks")
            .with_weight_kg(11.0),
        catch_at("b2", "bo", 55.0001, 12.0003, 50),
        catch_at("draft", "bo", 55.0, 12.0, 5)
            .with_weight_kg(40.0)
            .as_draft(),
        missing,
        catch_at("away", "ida", 56.0, 13.0, 60).with_weight_kg(25.0),
    ]
}

/// Parse `args` as a command line and run it, returning stdout.
pub(super) fn run_cli(args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["catchspot"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut stdout = Vec::new();
    run_with(cli.command, &mut stdout)?;
    Ok(String::from_utf8(stdout).expect("stdout utf-8"))
}

pub(super) fn run_json(args: &[&str]) -> serde_json::Value {
    let stdout = run_cli(args).unwrap_or_else(|err| panic!("command failed: {err}"));
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}
