// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::artifact::TestKind;
use std::collections::HashSet;

#[test]
fn suite_keys_are_unique() {
    let suites = all();
    let keys: HashSet<_> = suites.iter().map(|s| s.key()).collect();
    assert_eq!(keys.len(), suites.len());
}

#[test]
fn every_suite_has_artifacts_in_testing_projects() {
    for suite in all() {
        assert!(!suite.artifacts.is_empty(), "{} is empty", suite.key());
        for artifact in &suite.artifacts {
            assert!(artifact.project.starts_with(PROJECT_PREFIX), "{}", artifact.project);
        }
    }
}

#[test]
fn iso_artifacts_live_under_iso_subdir() {
    for artifact in all().iter().flat_map(|s| s.artifacts.iter()) {
        assert_eq!(artifact.subdir.is_some(), artifact.kind.is_iso(), "{}", artifact.package);
    }
}

#[test]
fn one_artifact_per_package_and_kind() {
    for suite in all() {
        let mut seen = HashSet::new();
        for artifact in &suite.artifacts {
            assert!(
                seen.insert((artifact.package.clone(), artifact.kind)),
                "duplicate {} {} in {}",
                artifact.package,
                artifact.kind,
                suite.key()
            );
        }
    }
}

#[test]
fn bios_only_images() {
    let suites = all();
    let tumbleweed = find(&suites, "Tumbleweed+opensuse").unwrap();
    let bios_only: Vec<_> = tumbleweed
        .artifacts
        .iter()
        .filter(|a| !a.supports_firmware_mode)
        .map(|a| a.package.as_str())
        .collect();
    assert_eq!(bios_only, vec!["test-image-qcow-openstack", "test-image-live:BIOS"]);
}

#[test]
fn ramdisk_images_get_more_memory() {
    let suites = all();
    let leap = find(&suites, "Leap+opensuse").unwrap();
    let ramdisk: Vec<_> =
        leap.artifacts.iter().filter(|a| a.package == "test-image-disk-ramdisk").collect();
    assert_eq!(ramdisk.len(), 2);
    for artifact in ramdisk {
        assert_eq!(
            artifact.extra_params.get(keys::QEMURAM).map(|v| v.to_string()).as_deref(),
            Some("4096")
        );
    }
}

#[test]
fn centos_uses_versioned_repositories() {
    let suites = all();
    let centos9 = find(&suites, "9+centos").unwrap();
    assert!(centos9.artifacts.iter().all(|a| a.repository == "images_CentOS9"));
    assert!(centos9.artifacts.iter().any(|a| a.kind == TestKind::LiveIso));
}

#[test]
fn select_distros_keeps_catalog_order() {
    let selected = select_distros(all(), &[FEDORA, OPENSUSE]);
    let keys: Vec<_> = selected.iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["Tumbleweed+opensuse", "Leap+opensuse", "Rawhide+fedora", "37+fedora"]);
}

#[test]
fn find_unknown_key() {
    assert!(find(&all(), "42+plan9").is_none());
}
