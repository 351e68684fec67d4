//! `imgqa trigger` specs that need no remote service

use crate::prelude::*;

#[test]
fn unknown_suite_is_a_usage_error() {
    cli()
        .args(&["trigger", "--dry-run", "--version-distri", "42+nothing"])
        .exits_with(2)
        .stderr_has("unknown suite '42+nothing'")
        .stderr_has("Tumbleweed+opensuse");
}

#[test]
fn unknown_host_os_is_rejected() {
    cli().args(&["trigger", "--dry-run", "--openqa-host-os", "windows"]).exits_with(2);
}

#[test]
fn broken_matrix_file_fails_before_any_request() {
    let (_dir, path) = file_in_temp("matrix.toml", "[[suite]]\ndistri = \"opensuse\"\n");
    cli()
        .args(&["trigger", "--dry-run", "--matrix"])
        .arg_path(&path)
        .exits_with(1)
        .stderr_has("matrix");
}
