// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build snapshots.
//!
//! A snapshot is the JSON form of a [`Build`]:
//!
//! ```json
//! {"build": "20260101", "server": "openqa.opensuse.org", "scheme": "https", "job_ids": [1, 2]}
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! reader never sees a half-written file.

use chrono::NaiveDateTime;
use imgqa_core::Build;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("{} is not a build snapshot: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

/// `kiwi_build_<build>_<YYYY_Month_DD-HH_MM_SS>.json`
pub fn snapshot_file_name(build: &str, at: NaiveDateTime) -> String {
    format!("kiwi_build_{}_{}.json", build, at.format("%Y_%B_%d-%H_%M_%S"))
}

/// Write `build` to `path`, replacing any previous snapshot there.
pub fn save(path: &Path, build: &Build) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(build)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp).map_err(io_error(&tmp))?;
    file.write_all(&json).map_err(io_error(&tmp))?;
    file.write_all(b"\n").map_err(io_error(&tmp))?;
    file.sync_all().map_err(io_error(&tmp))?;
    drop(file);
    fs::rename(&tmp, path).map_err(io_error(path))?;

    tracing::debug!(path = %path.display(), jobs = build.len(), "saved build snapshot");
    Ok(())
}

/// Write `build` into `dir` under its timestamped file name.
pub fn save_in(dir: &Path, build: &Build, at: NaiveDateTime) -> Result<PathBuf, StoreError> {
    let path = dir.join(snapshot_file_name(&build.build, at));
    save(&path, build)?;
    Ok(path)
}

pub fn load(path: &Path) -> Result<Build, StoreError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&content)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
