// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::resolver::{ArtifactResolver, ResolveError};
use imgqa_adapters::{BuildServiceError, FakeBuildService, FakeOpenQa, OpenQaCall, OpenQaError};
use imgqa_core::test_support::{disk_artifact, live_artifact, tumbleweed_suite, TEST_PROJECT};
use imgqa_core::{keys, HostOs, JobId, ParamValue};

struct TestHarness {
    engine: TriggerEngine<FakeOpenQa, FakeBuildService>,
    openqa: FakeOpenQa,
    obs: FakeBuildService,
}

fn setup() -> TestHarness {
    let openqa = FakeOpenQa::default();
    let obs = FakeBuildService::new();
    obs.publish(TEST_PROJECT, "images", None, "test-image-disk", &["disk.qcow2"]);
    obs.publish(TEST_PROJECT, "images", None, "test-image-lvm", &["lvm.raw.xz"]);
    obs.publish(TEST_PROJECT, "images", Some("iso"), "test-image-live:BIOS", &["bios.iso"]);

    let engine =
        TriggerEngine::new(openqa.clone(), Composer::new(ArtifactResolver::new(obs.clone())));
    TestHarness { engine, openqa, obs }
}

fn options() -> RunOptions {
    RunOptions {
        casedir: "https://github.com/OSInside/kiwi-functional-tests.git".into(),
        build: "20260101".into(),
        host_os: HostOs::Opensuse,
    }
}

fn flavors(params: &[ParameterSet]) -> Vec<String> {
    params.iter().map(|p| p.get(keys::FLAVOR).map(ParamValue::to_string).unwrap_or_default()).collect()
}

#[tokio::test]
async fn two_artifacts_with_firmware_mode_make_four_calls_in_order() {
    let harness = setup();
    let suite =
        tumbleweed_suite(vec![disk_artifact("test-image-disk"), disk_artifact("test-image-lvm")]);

    let records = harness.engine.trigger(&suite, &options(), false).await.unwrap();

    assert_eq!(records.len(), 4);
    let order: Vec<(&str, bool)> =
        records.iter().map(|r| (r.package.as_str(), r.firmware_mode)).collect();
    assert_eq!(
        order,
        vec![
            ("test-image-disk", false),
            ("test-image-disk", true),
            ("test-image-lvm", false),
            ("test-image-lvm", true),
        ]
    );
    let created = harness.openqa.created();
    assert_eq!(
        flavors(&created),
        vec!["kiwi-test-disk", "kiwi-test-disk-efi", "kiwi-test-disk", "kiwi-test-disk-efi"]
    );
    assert!(created[2].contains_key(keys::HDD_1_DECOMPRESS_URL));
    assert!(records.iter().all(|r| r.reply.as_ref().is_some_and(|reply| reply.ids.len() == 1)));
}

#[tokio::test]
async fn bios_only_artifacts_run_once() {
    let harness = setup();
    let suite = tumbleweed_suite(vec![
        live_artifact("test-image-live:BIOS").without_firmware_mode(),
        disk_artifact("test-image-disk"),
    ]);

    let records = harness.engine.trigger(&suite, &options(), false).await.unwrap();

    let modes: Vec<bool> = records.iter().map(|r| r.firmware_mode).collect();
    assert_eq!(modes, vec![false, false, true]);
}

#[tokio::test]
async fn suites_without_firmware_mode_skip_efi_runs() {
    let harness = setup();
    let mut suite =
        tumbleweed_suite(vec![disk_artifact("test-image-disk"), disk_artifact("test-image-lvm")]);
    suite.with_firmware_mode = false;

    let records = harness.engine.trigger(&suite, &options(), false).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.params.as_ref().is_ok_and(|p| !p.contains_key(keys::UEFI))));
}

#[tokio::test]
async fn dry_run_composes_without_creating_jobs() {
    let harness = setup();
    let suite = tumbleweed_suite(vec![disk_artifact("test-image-disk")]);

    let records = harness.engine.trigger(&suite, &options(), true).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.reply.is_none()));
    assert!(harness.openqa.calls().is_empty());
}

#[tokio::test]
async fn failed_call_is_recorded_and_later_calls_still_go_out() {
    let harness = setup();
    harness.openqa.push_reply(Err(OpenQaError::Transport {
        url: "https://openqa.opensuse.org/api/v1/isos".into(),
        message: "connection reset".into(),
    }));
    harness.openqa.push_reply(Ok(JobCreationReply {
        count: 0,
        ids: vec![],
        scheduled_product_id: 7,
        error: Some("no templates found for kiwi-test-disk-efi".into()),
    }));
    let suite =
        tumbleweed_suite(vec![disk_artifact("test-image-disk"), disk_artifact("test-image-lvm")]);

    let records = harness.engine.trigger(&suite, &options(), false).await.unwrap();

    assert_eq!(harness.openqa.created().len(), 4);
    let errors: Vec<bool> = records.iter().map(TriggerRecord::is_error).collect();
    assert_eq!(errors, vec![true, true, false, false]);
    let first = records[0].reply.as_ref().unwrap();
    assert!(first.error.as_deref().unwrap().contains("connection reset"));
    assert!(first.ids.is_empty());
}

#[tokio::test]
async fn failed_lookup_skips_its_artifact_and_the_rest_still_go_out() {
    let harness = setup();
    harness.obs.fail_package(
        "test-image-lvm",
        BuildServiceError::Transport {
            url: "https://api.opensuse.org/build".into(),
            message: "connection reset".into(),
        },
    );
    let suite =
        tumbleweed_suite(vec![disk_artifact("test-image-lvm"), disk_artifact("test-image-disk")]);

    let records = harness.engine.trigger(&suite, &options(), false).await.unwrap();

    assert_eq!(records.len(), 4);
    let errors: Vec<bool> = records.iter().map(TriggerRecord::is_error).collect();
    assert_eq!(errors, vec![true, true, false, false]);
    assert!(matches!(records[0].params, Err(ComposeError::Resolve(ResolveError::Remote { .. }))));
    assert!(records[0].reply.is_none());
    assert!(records[1].error().unwrap().contains("connection reset"));
    assert_eq!(flavors(&harness.openqa.created()), vec!["kiwi-test-disk", "kiwi-test-disk-efi"]);
}

#[tokio::test]
async fn failed_lookup_leaves_other_suites_in_the_build() {
    let harness = setup();
    harness.obs.fail_package(
        "test-image-lvm",
        BuildServiceError::Status {
            url: "https://api.opensuse.org/build".into(),
            status: 503,
            message: "maintenance".into(),
        },
    );
    let mut leap = tumbleweed_suite(vec![disk_artifact("test-image-lvm")]);
    leap.version = "Leap".into();
    let suites = vec![leap, tumbleweed_suite(vec![disk_artifact("test-image-disk")])];

    let (build, records) = harness.engine.trigger_all(&suites, &options(), false).await.unwrap();

    assert_eq!(records.iter().filter(|r| r.is_error()).count(), 2);
    assert_eq!(build.job_ids, vec![JobId::new(1000), JobId::new(1001)]);
}

#[tokio::test]
async fn unpublished_artifact_aborts_before_any_job_is_created() {
    let harness = setup();
    let suite = tumbleweed_suite(vec![
        disk_artifact("test-image-disk"),
        disk_artifact("test-image-unpublished"),
    ]);

    let err = harness.engine.trigger(&suite, &options(), false).await.unwrap_err();

    let TriggerError::Compose { suite: key, source } = err;
    assert_eq!(key, "Tumbleweed+opensuse");
    assert!(matches!(source, ComposeError::Resolve(ResolveError::AmbiguousArtifact { .. })));
    assert!(harness.openqa.created().is_empty());
    assert!(!harness.obs.calls().is_empty());
}

#[tokio::test]
async fn trigger_all_collects_job_ids_in_call_order() {
    let harness = setup();
    let mut leap = tumbleweed_suite(vec![disk_artifact("test-image-lvm")]);
    leap.version = "Leap".into();
    leap.with_firmware_mode = false;
    let suites = vec![tumbleweed_suite(vec![disk_artifact("test-image-disk")]), leap];

    let (build, records) = harness.engine.trigger_all(&suites, &options(), false).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(build.build, "20260101");
    assert_eq!(build.server, "openqa.opensuse.org");
    assert_eq!(build.job_ids, vec![JobId::new(1000), JobId::new(1001), JobId::new(1002)]);
    assert_eq!(harness.openqa.calls().len(), 3);
    assert!(matches!(harness.openqa.calls()[0], OpenQaCall::CreateJobs(_)));
}

#[tokio::test]
async fn dry_run_build_has_no_jobs() {
    let harness = setup();
    let suites = vec![tumbleweed_suite(vec![disk_artifact("test-image-disk")])];

    let (build, records) = harness.engine.trigger_all(&suites, &options(), true).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(build.is_empty());
}
