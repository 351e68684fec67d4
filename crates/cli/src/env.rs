// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Log filter: IMGQA_LOG > RUST_LOG > `warn`
pub fn log_filter() -> String {
    non_empty("IMGQA_LOG").or_else(|| non_empty("RUST_LOG")).unwrap_or_else(|| "warn".to_string())
}

/// Config file: IMGQA_CONFIG > <config dir>/imgqa/config.toml
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = non_empty("IMGQA_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("imgqa").join("config.toml"))
}

pub fn openqa_key() -> Option<String> {
    non_empty("IMGQA_OPENQA_KEY")
}

pub fn openqa_secret() -> Option<String> {
    non_empty("IMGQA_OPENQA_SECRET")
}

pub fn obs_api_url() -> Option<String> {
    non_empty("IMGQA_OBS_API_URL")
}

pub fn obs_user() -> Option<String> {
    non_empty("IMGQA_OBS_USER")
}

pub fn obs_password() -> Option<String> {
    non_empty("IMGQA_OBS_PASSWORD")
}

/// `Some(false)` when `NO_COLOR` is set, `Some(true)` when `COLOR=1`.
pub fn color_choice() -> Option<bool> {
    if non_empty("NO_COLOR").is_some() {
        return Some(false);
    }
    if non_empty("COLOR").is_some_and(|v| v == "1") {
        return Some(true);
    }
    None
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
