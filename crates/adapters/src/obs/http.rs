// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed OBS client.
//!
//! OBS answers with small flat XML documents; only one attribute of one
//! element kind is needed from each, so they are scanned rather than parsed.

use super::{BuildService, BuildServiceError, ObsCredentials};
use async_trait::async_trait;
use imgqa_core::Arch;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static BINARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<binary\b[^>]*?\bfilename="([^"]*)""#).expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<entry\b[^>]*?\bname="([^"]*)""#).expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("constant regex pattern is valid")
});

/// File names from a `<binarylist>` document.
pub fn parse_binarylist(xml: &str) -> Vec<String> {
    scan(&BINARY_PATTERN, xml)
}

/// Entry names from a `<directory>` document.
pub fn parse_directory(xml: &str) -> Vec<String> {
    scan(&ENTRY_PATTERN, xml)
}

fn scan(pattern: &Regex, xml: &str) -> Vec<String> {
    pattern.captures_iter(xml).map(|caps| unescape(&caps[1])).collect()
}

/// Decodes named and numeric character references in one pass. Unknown or
/// invalid references are kept as written.
fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    ENTITY_PATTERN
        .replace_all(value, |caps: &regex::Captures<'_>| {
            decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    let code = match name {
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        "amp" => return Some('&'),
        _ => match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => name.strip_prefix('#')?.parse().ok()?,
        },
    };
    char::from_u32(code)
}

/// Client for an OBS API instance
#[derive(Clone)]
pub struct HttpBuildService {
    api_url: String,
    credentials: Option<ObsCredentials>,
    http: reqwest::Client,
}

impl HttpBuildService {
    pub fn new(
        api_url: impl Into<String>,
        credentials: Option<ObsCredentials>,
    ) -> Result<Self, BuildServiceError> {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent(concat!("imgqa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BuildServiceError::Transport {
                url: api_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { api_url, credentials, http })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, segments: &[&str]) -> String {
        format!("{}/{}", self.api_url, segments.join("/"))
    }

    async fn get(&self, url: String) -> Result<String, BuildServiceError> {
        tracing::debug!(%url, "OBS request");
        let mut request = self.http.get(&url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }
        let response = request.send().await.map_err(|e| transport(&url, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport(&url, e))?;
        if !status.is_success() {
            return Err(BuildServiceError::Status {
                url,
                status: status.as_u16(),
                message: status_summary(&body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl BuildService for HttpBuildService {
    async fn package_binaries(
        &self,
        project: &str,
        repository: &str,
        arch: Arch,
        package: &str,
    ) -> Result<Vec<String>, BuildServiceError> {
        let arch = arch.to_string();
        let body = self.get(self.url(&["build", project, repository, &arch, package])).await?;
        Ok(parse_binarylist(&body))
    }

    async fn published_binaries(
        &self,
        project: &str,
        repository: &str,
        subdir: Option<&str>,
    ) -> Result<Vec<String>, BuildServiceError> {
        let mut segments = vec!["published", project, repository];
        segments.extend(subdir);
        let body = self.get(self.url(&segments)).await?;
        Ok(parse_directory(&body))
    }
}

fn transport(url: &str, err: reqwest::Error) -> BuildServiceError {
    BuildServiceError::Transport { url: url.to_string(), message: err.to_string() }
}

/// OBS errors come as `<status code="..."><summary>...</summary></status>`.
fn status_summary(body: &str) -> String {
    #[allow(clippy::expect_used)]
    static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<summary>(.*?)</summary>").expect("constant regex pattern is valid")
    });
    match SUMMARY.captures(body) {
        Some(caps) => unescape(caps[1].trim()),
        None => body.trim().chars().take(200).collect(),
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
