//! Submission dispatcher: sends one resolved payload to one directory, or
//! simulates it in dry-run mode, and normalizes the outcome.
//!
//! Every failure past client construction is caught here and turned into an
//! `error` result, so one bad directory never stops the rest of a run.

use chrono::Utc;
use outreach_core::config::DispatchConfig;
use outreach_core::error::{OutreachError, OutreachResult};
use outreach_core::types::{
    DirectoryTarget, HttpMethod, Payload, SubmissionResult, SubmissionStatus,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Marker appended to raw response text that was cut short.
pub const TRUNCATION_MARKER: char = '…';

/// Performs directory submissions over a shared HTTP client.
#[derive(Debug, Clone)]
pub struct SubmissionDispatcher {
    client: Client,
    response_sample_max_chars: usize,
}

/// A completed exchange with a 2xx status.
struct Delivered {
    status: u16,
    sample: Option<Value>,
}

/// Why a live submission failed, plus whatever response was captured.
struct Undelivered {
    message: String,
    sample: Option<Value>,
}

impl Undelivered {
    fn new(message: String) -> Self {
        Self {
            message,
            sample: None,
        }
    }
}

impl SubmissionDispatcher {
    /// Build a dispatcher whose client enforces the configured timeout.
    pub fn new(config: &DispatchConfig) -> OutreachResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OutreachError::HttpClient(e.to_string()))?;

        info!(
            timeout_ms = config.timeout_ms,
            sample_max_chars = config.response_sample_max_chars,
            "Submission dispatcher initialized"
        );

        Ok(Self::with_client(client, config.response_sample_max_chars))
    }

    /// Use a preconfigured client.
    pub fn with_client(client: Client, response_sample_max_chars: usize) -> Self {
        Self {
            client,
            response_sample_max_chars,
        }
    }

    /// Submit `payload` to `directory`, or simulate it when `dry_run` is set.
    pub async fn submit(
        &self,
        directory: &DirectoryTarget,
        payload: Payload,
        dry_run: bool,
    ) -> SubmissionResult {
        if dry_run {
            debug!(directory_id = %directory.id, "Simulating submission");
            return SubmissionResult {
                directory_id: directory.id.clone(),
                directory_name: directory.name.clone(),
                status: SubmissionStatus::Success,
                message: format!(
                    "Dry run: payload for {} prepared, submission simulated",
                    directory.name
                ),
                payload_preview: payload,
                response_sample: None,
                timestamp: Utc::now(),
            };
        }

        let start = Instant::now();
        let outcome = self.deliver(directory, &payload).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message, sample) = match outcome {
            Ok(delivered) => {
                info!(
                    directory_id = %directory.id,
                    http_status = delivered.status,
                    latency_ms,
                    "Submission accepted"
                );
                (
                    SubmissionStatus::Success,
                    format!("Submitted to {} (HTTP {})", directory.name, delivered.status),
                    delivered.sample,
                )
            }
            Err(failure) => {
                warn!(
                    directory_id = %directory.id,
                    error = %failure.message,
                    latency_ms,
                    "Submission failed"
                );
                (SubmissionStatus::Error, failure.message, failure.sample)
            }
        };

        metrics::counter!(
            "outreach.submissions",
            "status" => status.as_str(),
            "tier" => directory.tier.as_str()
        )
        .increment(1);
        metrics::histogram!("outreach.submission.latency_ms").record(latency_ms as f64);

        SubmissionResult {
            directory_id: directory.id.clone(),
            directory_name: directory.name.clone(),
            status,
            message,
            payload_preview: payload,
            response_sample: sample,
            timestamp: Utc::now(),
        }
    }

    /// One attempt, no retry.
    async fn deliver(
        &self,
        directory: &DirectoryTarget,
        payload: &Payload,
    ) -> Result<Delivered, Undelivered> {
        let url = url::Url::parse(&directory.submission_url).map_err(|e| {
            Undelivered::new(format!(
                "Invalid submission URL for {}: {e}",
                directory.name
            ))
        })?;

        let mut headers = HeaderMap::new();
        let request = match directory.method {
            HttpMethod::Get => self.client.get(url).query(&query_pairs(payload)),
            HttpMethod::Post => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                let body = serde_json::to_vec(payload).map_err(|e| {
                    Undelivered::new(format!("Failed to encode payload for {}: {e}", directory.name))
                })?;
                self.client.post(url).body(body)
            }
        };
        // Directory headers are applied last so they override the default content type.
        for (name, value) in directory.headers.iter().flatten() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                Undelivered::new(format!("Invalid header name '{name}' for {}", directory.name))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                Undelivered::new(format!("Invalid value for header '{name}' for {}", directory.name))
            })?;
            headers.insert(name, value);
        }

        let response = request.headers(headers).send().await.map_err(|e| {
            if e.is_timeout() {
                Undelivered::new(format!("Request to {} timed out: {}", directory.name, describe(&e)))
            } else {
                Undelivered::new(format!("Request to {} failed: {}", directory.name, describe(&e)))
            }
        })?;

        let status = response.status();
        let text = read_capped(response, self.response_sample_max_chars)
            .await
            .map_err(|e| {
                Undelivered::new(format!(
                    "Failed to read response from {}: {}",
                    directory.name,
                    describe(&e)
                ))
            })?;
        let sample = sample_response(&text, self.response_sample_max_chars);

        if !status.is_success() {
            return Err(Undelivered {
                message: format!(
                    "{} responded with HTTP {}",
                    directory.name,
                    status.as_u16()
                ),
                sample,
            });
        }

        Ok(Delivered {
            status: status.as_u16(),
            sample,
        })
    }
}

/// GET payloads travel as query parameters; non-string values use their JSON text.
fn query_pairs(payload: &Payload) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Read at most enough of the body to hold `max_chars` characters plus one,
/// so an oversized body is still recognized as truncated.
async fn read_capped(mut response: Response, max_chars: usize) -> reqwest::Result<String> {
    let limit = max_chars.saturating_add(1).saturating_mul(4);
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= limit {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Best-effort capture of a response body, never longer than `max_chars`
/// characters plus the marker. Bodies within the cap are returned as parsed
/// JSON when they parse; anything else is text cut to `max_chars`. Blank
/// bodies yield `None`.
pub fn sample_response(text: &str, max_chars: usize) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    let mut chars = text.chars();
    let mut sample: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        sample.push(TRUNCATION_MARKER);
        return Some(Value::String(sample));
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(text) {
        return Some(parsed);
    }
    Some(Value::String(sample))
}

/// Error text including its source chain; reqwest's top-level message alone
/// rarely names the cause.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
