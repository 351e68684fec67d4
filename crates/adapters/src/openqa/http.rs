// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed openQA client.
//!
//! Mutating routes are signed the way openQA expects: the hex HMAC-SHA1 of
//! `path?query` followed by the request time, keyed with the API secret.

use super::{ApiCredentials, OpenQaClient, OpenQaError};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use imgqa_core::{Endpoint, Job, JobCreationReply, JobId, ParameterSet};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

const API_KEY_HEADER: &str = "x-api-key";
const API_MICROTIME_HEADER: &str = "x-api-microtime";
const API_HASH_HEADER: &str = "x-api-hash";

/// Signature openQA checks in `X-API-Hash`.
pub fn sign_request(secret: &str, path_and_query: &str, microtime: &str) -> String {
    #[allow(clippy::expect_used)]
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(path_and_query.as_bytes());
    mac.update(microtime.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[derive(Deserialize)]
struct JobEnvelope {
    job: Job,
}

/// Client for one openQA instance over HTTP(S).
#[derive(Clone)]
pub struct HttpOpenQa {
    endpoint: Endpoint,
    credentials: Option<ApiCredentials>,
    http: reqwest::Client,
}

impl HttpOpenQa {
    pub fn new(endpoint: Endpoint, credentials: Option<ApiCredentials>) -> Result<Self, OpenQaError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("imgqa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OpenQaError::Transport {
                url: endpoint.base_url(),
                message: e.to_string(),
            })?;
        Ok(Self { endpoint, credentials, http })
    }

    fn prepare(
        &self,
        method: Method,
        route: &str,
        query: &[(String, String)],
        signed: bool,
    ) -> Result<Request, OpenQaError> {
        let url = self.endpoint.api_url(route);
        let mut builder = self.http.request(method, url.as_str());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let mut request = builder.build().map_err(|e| transport(&url, e))?;
        request.headers_mut().insert(ACCEPT, HeaderValue::from_static("application/json"));

        if signed {
            let credentials = self.credentials.as_ref().ok_or_else(|| {
                OpenQaError::MissingCredentials { server: self.endpoint.server.clone() }
            })?;
            let microtime = microtime();
            let hash = sign_request(&credentials.secret, &path_and_query(request.url()), &microtime);
            let headers = request.headers_mut();
            headers.insert(API_KEY_HEADER, header_value(&url, &credentials.key)?);
            headers.insert(API_MICROTIME_HEADER, header_value(&url, &microtime)?);
            headers.insert(API_HASH_HEADER, header_value(&url, &hash)?);
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, OpenQaError> {
        let url = display_url(request.url());
        tracing::debug!(method = %request.method(), %url, "openQA request");

        let response = self.http.execute(request).await.map_err(|e| transport(&url, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport(&url, e))?;
        if !status.is_success() {
            return Err(OpenQaError::Status {
                url,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        serde_json::from_str(&body).map_err(|e| OpenQaError::Decode { url, message: e.to_string() })
    }

    /// Signed POST without parameters whose reply only matters for its `errors`.
    async fn post_action(&self, route: &str) -> Result<(), OpenQaError> {
        let request = self.prepare(Method::POST, route, &[], true)?;
        let url = display_url(request.url());
        let reply: serde_json::Value = self.send(request).await?;
        match reply.get("errors").and_then(|e| e.as_array()) {
            Some(errors) if !errors.is_empty() => Err(OpenQaError::Status {
                url,
                status: 200,
                message: errors.iter().map(value_text).collect::<Vec<_>>().join("; "),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl OpenQaClient for HttpOpenQa {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn get_job(&self, id: JobId) -> Result<Job, OpenQaError> {
        let request = self.prepare(Method::GET, &format!("jobs/{id}"), &[], false)?;
        let envelope: JobEnvelope = self.send(request).await?;
        Ok(envelope.job)
    }

    async fn cancel_job(&self, id: JobId) -> Result<(), OpenQaError> {
        self.post_action(&format!("jobs/{id}/cancel")).await
    }

    async fn restart_job(&self, id: JobId) -> Result<(), OpenQaError> {
        self.post_action(&format!("jobs/{id}/restart")).await
    }

    async fn create_jobs(&self, params: &ParameterSet) -> Result<JobCreationReply, OpenQaError> {
        let request = self.prepare(Method::POST, "isos", &params.to_pairs(), true)?;
        self.send(request).await
    }
}

fn microtime() -> String {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs().to_string()
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// URL without its query string; `POST isos` queries are long and noisy.
fn display_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

fn header_value(url: &str, value: &str) -> Result<HeaderValue, OpenQaError> {
    HeaderValue::from_str(value).map_err(|e| OpenQaError::Transport {
        url: url.to_string(),
        message: format!("invalid header value: {e}"),
    })
}

fn transport(url: &str, err: reqwest::Error) -> OpenQaError {
    OpenQaError::Transport { url: url.to_string(), message: err.to_string() }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// openQA reports failures as `{"error": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    if let Some(error) = parsed.as_ref().and_then(|v| v.get("error")) {
        return value_text(error);
    }
    let body = body.trim();
    if body.len() > 200 {
        let cut = (0..=200).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
