//! End-to-end command runs against a temporary catch export.

use super::helpers::{CatchExport, harbour_catches, run_cli, run_json};
use super::*;
use catchspot_core::CatchRecord;
use catchspot_core::test_support::catch_at;
use catchspot_spots::{LeaderboardCategory, SpotQueryError};
use rstest::{fixture, rstest};

#[fixture]
fn export() -> CatchExport {
    CatchExport::new(&harbour_catches())
}

#[rstest]
fn favorites_lists_the_harbour(export: CatchExport) {
    let output = run_json(&[
        "favorites",
        "--catches",
        export.path.as_str(),
        "--user",
        "ida",
    ]);
    let spots = output.as_array().expect("array output");
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0]["visitCount"], 3);
    assert_eq!(spots[0]["latitude"], 55.0);
    assert_eq!(spots[0]["species"], serde_json::json!(["Gedde", "Aborre"]));
}

#[rstest]
fn favorites_honours_the_limit(export: CatchExport) {
    let output = run_json(&[
        "favorites",
        "--catches",
        export.path.as_str(),
        "--user",
        "ida",
        "--limit",
        "2",
    ]);
    assert_eq!(output.as_array().map(Vec::len), Some(0));
}

#[rstest]
fn hot_spots_orders_by_distance_when_near_is_given(export: CatchExport) {
    let output = run_json(&[
        "hot-spots",
        "--catches",
        export.path.as_str(),
        "--min-anglers",
        "1",
        "--near",
        "56.0,13.0",
    ]);
    let spots = output.as_array().expect("array output");
    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0]["latitude"], 56.0);
    assert_eq!(spots[0]["distanceMeters"], 0.0);
    assert_eq!(spots[1]["totalAnglers"], 2);
}

#[rstest]
fn leaderboard_ranks_the_heaviest_catches(export: CatchExport) {
    let output = run_json(&[
        "leaderboard",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
        "--category",
        "biggest_fish",
    ]);
    assert_eq!(output["category"], "biggest_fish");
    let entries = output["entries"].as_array().expect("entries");
    let ids: Vec<&str> = entries
        .iter()
        .filter_map(|entry| entry["catchId"].as_str())
        .collect();
    assert_eq!(ids, ["b1", "i1"]);
}

#[rstest]
fn leaderboard_sums_scores_per_angler(export: CatchExport) {
    let output = run_json(&[
        "leaderboard",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
        "--category",
        "highest_total_score",
    ]);
    let entries = output["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["userId"], "bo");
    assert_eq!(entries[0]["value"], 65.0);
    assert_eq!(entries[1]["value"], 28.0);
}

#[rstest]
fn leaderboard_rejects_session_scores(export: CatchExport) {
    let result = run_cli(&[
        "leaderboard",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
        "--category",
        "highest_session_score",
    ]);
    match result {
        Err(CliError::Query(SpotQueryError::UnsupportedCategory { category })) => {
            assert_eq!(category, LeaderboardCategory::HighestSessionScore);
        }
        other => panic!("expected UnsupportedCategory, found {other:?}"),
    }
}

#[rstest]
fn details_includes_the_requested_angler(export: CatchExport) {
    let output = run_json(&[
        "details",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
        "--user",
        "ida",
    ]);
    assert_eq!(output["statistics"]["totalCatches"], 5);
    assert_eq!(output["statistics"]["totalAnglers"], 2);
    assert_eq!(output["userStats"]["catchCount"], 3);
    assert_eq!(output["recentActivity"][0]["catchId"], "i1");
}

const ABROAD_CATCHES: i64 = 200;

/// A week-old harbour catch behind more than `--limit` newer catches abroad.
fn crowded_export() -> CatchExport {
    let mut catches: Vec<CatchRecord> = (0..ABROAD_CATCHES)
        .map(|n| catch_at(&format!("abroad-{n}"), "kim", 40.0, 5.0, n))
        .map(|record| record.with_weight_kg(20.0))
        .collect();
    let harbour = catch_at("harbour", "ida", 55.0, 12.0, 10_080);
    catches.push(harbour.with_weight_kg(9.0));
    CatchExport::new(&catches)
}

#[rstest]
fn leaderboard_limits_rows_after_the_location_filter() {
    let export = crowded_export();
    let output = run_json(&[
        "leaderboard",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
        "--category",
        "biggest_fish",
    ]);
    let entries = output["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["catchId"], "harbour");
}

#[rstest]
fn details_limits_rows_after_the_location_filter() {
    let export = crowded_export();
    let output = run_json(&[
        "details",
        "--catches",
        export.path.as_str(),
        "--lat",
        "55.0",
        "--lng",
        "12.0",
    ]);
    assert_eq!(output["statistics"]["totalCatches"], 1);
    assert_eq!(output["statistics"]["biggestFish"]["catchId"], "harbour");
}

#[rstest]
fn missing_export_is_reported(export: CatchExport) {
    let absent = export.root.join("absent.json");
    match run_cli(&["hot-spots", "--catches", absent.as_str()]) {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_CATCHES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn unknown_subcommands_fail_to_parse() {
    match run_cli(&["tides"]) {
        Err(CliError::ArgumentParsing(_)) => {}
        other => panic!("expected ArgumentParsing, found {other:?}"),
    }
}
