//! Behaviour-driven step definitions driving the catch command scenarios.

use super::helpers::{CatchExport, harbour_catches, run_cli};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct CommandWorld {
    export: RefCell<Option<CatchExport>>,
    result: RefCell<Option<Result<String, CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            export: RefCell::new(None),
            result: RefCell::new(None),
        }
    }

    fn run(&self, extra: &[&str]) {
        let export = self.export.borrow();
        let path = export.as_ref().expect("export prepared").path.clone();
        let mut argv = vec!["favorites", "--catches", path.as_str()];
        argv.extend_from_slice(extra);
        self.result.replace(Some(run_cli(&argv)));
    }

    fn error_kind(&self) -> String {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        format!("{error:?}")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a catch export for the harbour")]
fn harbour_export(#[from(world)] world: &CommandWorld) {
    world
        .export
        .replace(Some(CatchExport::new(&harbour_catches())));
}

#[given("a catch export that is not valid JSON")]
fn broken_export(#[from(world)] world: &CommandWorld) {
    world.export.replace(Some(CatchExport::raw(b"[{ broken")));
}

#[when("I run the favorites command for ida")]
fn run_for_ida(#[from(world)] world: &CommandWorld) {
    world.run(&["--user", "ida"]);
}

#[when("I run the favorites command without a user")]
fn run_without_user(#[from(world)] world: &CommandWorld) {
    world.run(&[]);
}

#[then("the command succeeds and prints 1 spot")]
fn prints_one_spot(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let stdout = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");
    let spots: serde_json::Value = serde_json::from_str(stdout).expect("JSON output");
    assert_eq!(spots.as_array().map(Vec::len), Some(1));
}

#[then("the command fails because the export is invalid")]
fn fails_on_invalid_export(#[from(world)] world: &CommandWorld) {
    assert!(world.error_kind().starts_with("ParseCatches"));
}

#[then("the command fails because the user is missing")]
fn fails_on_missing_user(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::MissingArgument { field, .. }) => assert_eq!(*field, ARG_USER),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/catch_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(
    favorites_happy_path,
    "listing favorite spots from a catch export"
);
register_command_scenario!(
    favorites_invalid_json,
    "rejecting an export that is not JSON"
);
register_command_scenario!(
    favorites_missing_user,
    "rejecting a favorites run without a user"
);
