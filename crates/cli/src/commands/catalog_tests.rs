// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use imgqa_core::catalog;

#[test]
fn views_flatten_suites_in_order() {
    let suites = catalog::select_distros(catalog::all(), &["sle"]);
    let rows = views(&suites);

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.suite == "15+sle"));
    assert_eq!(rows[0].kind, "disk-image");
    assert_eq!(rows[0].subdir, None);
    assert_eq!(rows[1].kind, "install-iso");
    assert_eq!(rows[1].subdir, Some("iso"));
    assert_eq!(rows[0].firmware_modes, &[false, true]);
}

#[test]
fn json_view_names_the_obs_location() {
    let suites = catalog::select_distros(catalog::all(), &["sle"]);
    let value = serde_json::to_value(views(&suites)).unwrap();

    assert_eq!(value[0]["project"], "Virtualization:Appliances:Images:Testing_x86:sle15");
    assert_eq!(value[0]["repository"], "images");
    assert!(value[0].get("subdir").is_none());
}

#[test]
fn unknown_suite_fails_selection() {
    let args = CatalogArgs {
        suites: SuiteArgs { version_distri: vec!["1+nothing".into()], ..SuiteArgs::default() },
    };
    assert!(handle(args, OutputFormat::Text).is_err());
}
