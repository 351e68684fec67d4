//! `imgqa monitor` specs that need no openQA instance

use crate::prelude::*;

const STATE: &str =
    r#"{"build":"20260101","server":"openqa.opensuse.org","scheme":"https","job_ids":[1,2]}"#;

#[test]
fn monitor_without_action_is_a_usage_error() {
    let (_dir, path) = file_in_temp("state.json", STATE);
    cli().args(&["monitor"]).arg_path(&path).exits_with(2).stderr_has("nothing to do");
}

#[test]
fn monitor_with_missing_state_file_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(&["monitor", "--print-state"])
        .arg_path(&dir.path().join("missing.json"))
        .exits_with(2)
        .stderr_has("missing.json");
}

#[test]
fn monitor_with_corrupt_state_file_is_a_usage_error() {
    let (_dir, path) = file_in_temp("state.json", "{\"build\": ");
    cli().args(&["monitor", "--unfinished"]).arg_path(&path).exits_with(2);
}

#[test]
fn failed_only_needs_print_state() {
    let (_dir, path) = file_in_temp("state.json", STATE);
    cli().args(&["monitor", "--failed-only"]).arg_path(&path).exits_with(2);
}
