//! CLI help output specs

use crate::prelude::*;

#[test]
fn imgqa_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("trigger")
        .stdout_has("monitor")
        .stdout_has("job")
        .stdout_has("catalog");
}

#[test]
fn imgqa_without_command_is_a_usage_error() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn trigger_help_shows_defaults() {
    cli()
        .args(&["trigger", "--help"])
        .passes()
        .stdout_has("--dry-run")
        .stdout_has("--use-https-for-asset-download")
        .stdout_has("kiwi-functional-tests.git")
        .stdout_has("openqa.opensuse.org");
}

#[test]
fn monitor_help_shows_actions() {
    cli()
        .args(&["monitor", "--help"])
        .passes()
        .stdout_has("--print-state")
        .stdout_has("--cancel")
        .stdout_has("--unfinished")
        .stdout_has("--restart-failed");
}

#[test]
fn job_help_shows_subcommands() {
    cli().args(&["job", "--help"]).passes().stdout_has("show").stdout_has("restart");
}

#[test]
fn imgqa_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
