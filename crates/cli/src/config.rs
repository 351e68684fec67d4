// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration.
//!
//! ```toml
//! [openqa]
//! key = "1234567890ABCDEF"
//! secret = "1234567890ABCDEF"
//!
//! [obs]
//! api_url = "https://api.opensuse.org"
//! username = "kiwi"
//! password = "..."
//! download_domain = "opensuse.org"
//! ```
//!
//! Every value can be overridden from the environment (see [`crate::env`]).
//! A missing file is the same as an empty one.

use crate::env;
use anyhow::{Context, Result};
use imgqa_adapters::{ApiCredentials, ObsCredentials, DEFAULT_API_URL, DEFAULT_DOWNLOAD_DOMAIN};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenQaSection {
    pub key: Option<String>,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObsSection {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub download_domain: String,
}

impl Default for ObsSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: None,
            password: None,
            download_domain: DEFAULT_DOWNLOAD_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub openqa: OpenQaSection,
    pub obs: ObsSection,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match env::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    fn apply_env(&mut self) {
        if let Some(key) = env::openqa_key() {
            self.openqa.key = Some(key);
        }
        if let Some(secret) = env::openqa_secret() {
            self.openqa.secret = Some(secret);
        }
        if let Some(url) = env::obs_api_url() {
            self.obs.api_url = url;
        }
        if let Some(user) = env::obs_user() {
            self.obs.username = Some(user);
        }
        if let Some(password) = env::obs_password() {
            self.obs.password = Some(password);
        }
    }

    /// openQA API key pair, if both halves are configured.
    pub fn openqa_credentials(&self) -> Option<ApiCredentials> {
        match (&self.openqa.key, &self.openqa.secret) {
            (Some(key), Some(secret)) => {
                Some(ApiCredentials { key: key.clone(), secret: secret.clone() })
            }
            _ => None,
        }
    }

    pub fn obs_credentials(&self) -> Option<ObsCredentials> {
        match (&self.obs.username, &self.obs.password) {
            (Some(username), Some(password)) => Some(ObsCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
