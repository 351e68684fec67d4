// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;
use imgqa_adapters::{FakeOpenQa, OpenQaCall, OpenQaError};
use imgqa_core::{Endpoint, JobResult, JobState};

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    args: MonitorArgs,
}

fn parse(argv: &[&str]) -> MonitorArgs {
    let mut full = vec!["imgqa", "state.json"];
    full.extend_from_slice(argv);
    Harness::try_parse_from(full).unwrap().args
}

fn build(raw: &[u64]) -> Build {
    Build::new("20260101", &Endpoint::default(), raw.iter().copied().map(JobId::new))
}

fn setup(jobs: Vec<Job>) -> (BuildTracker<FakeOpenQa>, FakeOpenQa) {
    let openqa = FakeOpenQa::default();
    for job in jobs {
        openqa.insert_job(job);
    }
    (BuildTracker::new(openqa.clone()), openqa)
}

fn done(id: u64, result: JobResult) -> Job {
    Job::builder().id(id).state(JobState::Done).result(result).build()
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map(|e| e.code).unwrap_or(-1)
}

#[tokio::test]
async fn no_action_is_a_usage_error() {
    let err = handle(parse(&[]), OutputFormat::Text).await.unwrap_err();
    assert_eq!(exit_code(&err), crate::exit_error::USAGE);
}

#[tokio::test]
async fn unreadable_state_file_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let args = Harness::try_parse_from(["imgqa", path.to_str().unwrap(), "--print-state"])
        .unwrap()
        .args;

    let err = handle(args, OutputFormat::Text).await.unwrap_err();

    assert_eq!(exit_code(&err), crate::exit_error::USAGE);
}

#[test]
fn failed_only_requires_print_state() {
    assert!(Harness::try_parse_from(["imgqa", "state.json", "--failed-only"]).is_err());
    let args = parse(&["-p", "-f", "-vv"]);
    assert!(args.failed_only);
    assert_eq!(args.verbosity, 2);
}

#[tokio::test]
async fn print_state_follows_clones_by_default() {
    let (tracker, openqa) = setup(vec![
        Job::builder().id(1).clone_id(2).build(),
        Job::builder().id(2).origin_id(1).build(),
    ]);

    run(&tracker, build(&[1]), &parse(&["-p"]), OutputFormat::Json).await.unwrap();

    assert_eq!(openqa.calls().last(), Some(&OpenQaCall::GetJob(JobId::new(2))));
}

#[tokio::test]
async fn no_resolve_clones_reads_the_scheduled_jobs() {
    let (tracker, openqa) = setup(vec![
        Job::builder().id(1).clone_id(2).build(),
        Job::builder().id(2).origin_id(1).build(),
    ]);

    run(&tracker, build(&[1]), &parse(&["-p", "--no-resolve-clones"]), OutputFormat::Text)
        .await
        .unwrap();

    assert_eq!(openqa.calls(), vec![OpenQaCall::GetJob(JobId::new(1))]);
}

#[tokio::test]
async fn cancel_goes_to_every_job_and_reports_partial_failure() {
    let (tracker, openqa) = setup(vec![
        Job::builder().id(1).build(),
        done(2, JobResult::Passed),
        Job::builder().id(3).state(JobState::Running).build(),
    ]);
    openqa.fail_cancel(
        JobId::new(2),
        OpenQaError::Status {
            url: "https://openqa.opensuse.org/api/v1/jobs/2/cancel".into(),
            status: 400,
            message: "Job already finished".into(),
        },
    );

    let args = parse(&["--cancel", "--no-resolve-clones"]);
    let err = run(&tracker, build(&[1, 2, 3]), &args, OutputFormat::Text).await.unwrap_err();

    assert_eq!(exit_code(&err), crate::exit_error::PARTIAL_FAILURE);
    let cancelled = openqa.calls().into_iter().filter(|c| matches!(c, OpenQaCall::Cancel(_))).count();
    assert_eq!(cancelled, 3);
    assert_eq!(openqa.job(JobId::new(1)).unwrap().state, JobState::Cancelled);
    assert_eq!(openqa.job(JobId::new(3)).unwrap().state, JobState::Cancelled);
}

#[tokio::test]
async fn restart_failed_only_touches_failed_jobs() {
    let (tracker, openqa) = setup(vec![
        done(1, JobResult::Passed),
        done(2, JobResult::Failed),
        done(3, JobResult::Softfailed),
        Job::builder().id(4).state(JobState::Running).build(),
    ]);

    run(
        &tracker,
        build(&[1, 2, 3, 4]),
        &parse(&["--restart-failed", "--no-resolve-clones"]),
        OutputFormat::Json,
    )
    .await
    .unwrap();

    let restarted: Vec<OpenQaCall> =
        openqa.calls().into_iter().filter(|c| matches!(c, OpenQaCall::Restart(_))).collect();
    assert_eq!(restarted, vec![OpenQaCall::Restart(JobId::new(2))]);
}

#[tokio::test]
async fn unfinished_lists_without_mutating() {
    let (tracker, openqa) =
        setup(vec![Job::builder().id(1).build(), done(2, JobResult::Passed)]);

    run(&tracker, build(&[1, 2]), &parse(&["--unfinished"]), OutputFormat::Text).await.unwrap();

    assert!(openqa.calls().iter().all(|c| matches!(c, OpenQaCall::GetJob(_))));
}
