//! `imgqa catalog` specs

use crate::prelude::*;

#[test]
fn catalog_lists_every_distribution() {
    cli()
        .args(&["catalog"])
        .passes()
        .stdout_has("Tumbleweed+opensuse")
        .stdout_has("Leap+opensuse")
        .stdout_has("Rawhide+fedora")
        .stdout_has("15+sle")
        .stdout_has("9+centos")
        .stdout_has("22.04+ubuntu")
        .stdout_has("10+debian")
        .stdout_has("rolling+archlinux");
}

#[test]
fn catalog_filters_by_distribution() {
    cli()
        .args(&["catalog", "--distri", "sle"])
        .passes()
        .stdout_has("15+sle")
        .stdout_lacks("Tumbleweed");
}

#[test]
fn catalog_json_names_obs_locations() {
    let output = cli().args(&["-o", "json", "catalog", "--version-distri", "15+sle"]).passes();
    let rows = output.json();

    similar_asserts::assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[0]["project"], "Virtualization:Appliances:Images:Testing_x86:sle15");
    assert_eq!(rows[1]["kind"], "install-iso");
    assert_eq!(rows[1]["subdir"], "iso");
}

#[test]
fn catalog_shows_memory_overrides() {
    cli()
        .args(&["catalog", "--version-distri", "Tumbleweed+opensuse"])
        .passes()
        .stdout_has("test-image-disk-legacy")
        .stdout_has("QEMURAM=2048")
        .stdout_has("QEMURAM=4096");
}

#[test]
fn unknown_distribution_is_rejected() {
    cli().args(&["catalog", "--distri", "gentoo"]).exits_with(2);
}

#[test]
fn distri_and_version_distri_conflict() {
    cli().args(&["catalog", "--distri", "sle", "--version-distri", "15+sle"]).exits_with(2);
}

#[test]
fn catalog_reads_matrix_files() {
    let (_dir, path) = file_in_temp(
        "matrix.toml",
        r#"
[[suite]]
distri = "opensuse"
version = "Slowroll"

[[suite.artifact]]
project = "home:tester:images"
package = "test-image-disk"
kind = "disk-image"
"#,
    );

    cli()
        .args(&["catalog", "--matrix"])
        .arg_path(&path)
        .passes()
        .stdout_has("Slowroll+opensuse")
        .stdout_has("test-image-disk")
        .stdout_lacks("Tumbleweed");
}
