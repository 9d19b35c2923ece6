//! Campaign, directory, and submission types shared by the engine and the API.

use crate::error::{OutreachError, OutreachResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Ordered JSON object used for payload templates and resolved payloads.
pub type Payload = Map<String, Value>;

// ─── Enumerations ───────────────────────────────────────────────────────────

/// Copy register used by the content synthesizer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CampaignTone {
    #[default]
    Authoritative,
    Conversational,
    Technical,
    Playful,
}

impl CampaignTone {
    pub const ALL: [CampaignTone; 4] = [
        CampaignTone::Authoritative,
        CampaignTone::Conversational,
        CampaignTone::Technical,
        CampaignTone::Playful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignTone::Authoritative => "authoritative",
            CampaignTone::Conversational => "conversational",
            CampaignTone::Technical => "technical",
            CampaignTone::Playful => "playful",
        }
    }
}

impl fmt::Display for CampaignTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignTone {
    type Err = OutreachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignTone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OutreachError::Validation(format!("unsupported tone '{s}'")))
    }
}

/// Directory quality tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryTier {
    #[default]
    Foundational,
    Niche,
    Advanced,
}

impl DirectoryTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryTier::Foundational => "foundational",
            DirectoryTier::Niche => "niche",
            DirectoryTier::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }
}

// ─── Directory ──────────────────────────────────────────────────────────────

/// An external listing endpoint that receives one submission per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTarget {
    pub id: String,
    pub name: String,
    pub description: String,
    pub submission_url: String,
    pub method: HttpMethod,
    /// Values may contain `{{placeholder}}` tokens.
    #[schema(value_type = Object)]
    pub payload_template: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub headers: Option<BTreeMap<String, String>>,
    pub tier: DirectoryTier,
}

// ─── Campaign ───────────────────────────────────────────────────────────────

/// A validated campaign. Built by the request boundary, read-only for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    pub target_url: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tone: CampaignTone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_pitch: Option<String>,
    pub directories: Vec<DirectoryTarget>,
}

impl CampaignRequest {
    /// Refuse requests the core cannot safely default on its own.
    pub fn validate(&self) -> OutreachResult<()> {
        if self.target_url.trim().is_empty() {
            return Err(OutreachError::Validation("targetUrl is required".to_string()));
        }
        if !self.keywords.iter().any(|k| !k.trim().is_empty()) {
            return Err(OutreachError::Validation(
                "at least one keyword is required".to_string(),
            ));
        }
        if self.directories.is_empty() {
            return Err(OutreachError::Validation(
                "at least one directory is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Non-blank keywords, trimmed, in input order.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect()
    }

    pub fn primary_keyword(&self) -> &str {
        self.keyword_list().first().copied().unwrap_or_default()
    }

    /// Brand shown in generated copy: the company name when given, otherwise
    /// the host of `target_url` without a leading `www.`.
    pub fn brand_name(&self) -> String {
        if let Some(name) = non_blank(&self.company_name) {
            return name.to_string();
        }
        match url::Url::parse(self.target_url.trim()) {
            Ok(url) => match url.host_str() {
                Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
                None => self.target_url.trim().to_string(),
            },
            Err(_) => self.target_url.trim().to_string(),
        }
    }

    pub fn contact_email(&self) -> Option<&str> {
        non_blank(&self.contact_email)
    }

    pub fn logo_url(&self) -> Option<&str> {
        non_blank(&self.logo_url)
    }

    pub fn custom_pitch(&self) -> Option<&str> {
        non_blank(&self.custom_pitch)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Caller-controlled run switches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    pub dry_run: bool,
}

// ─── Outputs ────────────────────────────────────────────────────────────────

/// Copy generated once per run and shared by every directory's payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CampaignAssets {
    pub headline: String,
    pub pitch: String,
    pub article: String,
}

/// Outcome of one directory submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub directory_id: String,
    pub directory_name: String,
    pub status: SubmissionStatus,
    pub message: String,
    #[schema(value_type = Object)]
    pub payload_preview: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub response_sample: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }
}

/// Everything a completed run produced, results in directory order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CampaignRun {
    pub assets: CampaignAssets,
    pub results: Vec<SubmissionResult>,
}

impl CampaignRun {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.len() - self.success_count()
    }
}
