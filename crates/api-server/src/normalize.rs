//! Request boundary: coerces a loosely-shaped JSON campaign payload into a
//! validated [`CampaignRequest`].
//!
//! Lenient where a sensible default exists (keywords, tone, directory fields)
//! and strict where it does not (`targetUrl`, an empty directory list).

use outreach_core::config::CampaignDefaults;
use outreach_core::directories::default_directories;
use outreach_core::types::{
    CampaignRequest, CampaignTone, DirectoryTarget, DirectoryTier, HttpMethod, RunOptions,
};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("targetUrl is required")]
    MissingTargetUrl,

    #[error("unsupported tone '{0}'")]
    UnsupportedTone(String),

    #[error("at least one directory with id and submissionUrl is required")]
    NoDirectories,
}

/// Build a campaign request and run options from a raw `POST /v1/run` body.
pub fn campaign_request(
    body: &Value,
    defaults: &CampaignDefaults,
) -> Result<(CampaignRequest, RunOptions), NormalizeError> {
    let body = body.as_object().ok_or(NormalizeError::NotAnObject)?;

    let target_url = string_field(body, "targetUrl").ok_or(NormalizeError::MissingTargetUrl)?;

    let mut keywords = keywords(body.get("keywords"));
    if keywords.is_empty() {
        keywords.push(defaults.default_keyword.clone());
    }

    let tone = match body.get("tone") {
        None | Some(Value::Null) => defaults.default_tone,
        Some(Value::String(s)) if s.trim().is_empty() => defaults.default_tone,
        Some(Value::String(s)) => s
            .parse::<CampaignTone>()
            .map_err(|_| NormalizeError::UnsupportedTone(s.clone()))?,
        Some(other) => return Err(NormalizeError::UnsupportedTone(other.to_string())),
    };

    let directories = match body.get("directories") {
        Some(Value::Array(entries)) => {
            let directories: Vec<DirectoryTarget> =
                entries.iter().filter_map(directory).collect();
            if directories.is_empty() {
                return Err(NormalizeError::NoDirectories);
            }
            directories
        }
        _ => default_directories(),
    };

    let request = CampaignRequest {
        target_url,
        keywords,
        tone,
        company_name: string_field(body, "companyName"),
        contact_email: string_field(body, "contactEmail"),
        logo_url: string_field(body, "logoUrl"),
        custom_pitch: string_field(body, "customPitch"),
        directories,
    };
    let options = RunOptions {
        dry_run: body.get("dryRun").and_then(Value::as_bool).unwrap_or(false),
    };

    Ok((request, options))
}

/// Accepts an array of strings or one comma-separated string.
fn keywords(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Entries without an `id` or `submissionUrl` are dropped.
fn directory(value: &Value) -> Option<DirectoryTarget> {
    let entry = value.as_object()?;
    let id = string_field(entry, "id")?;
    let submission_url = string_field(entry, "submissionUrl")?;

    let method = match entry.get("method").and_then(Value::as_str) {
        Some("GET") => HttpMethod::Get,
        _ => HttpMethod::Post,
    };
    let tier = match entry.get("tier").and_then(Value::as_str) {
        Some("niche") => DirectoryTier::Niche,
        Some("advanced") => DirectoryTier::Advanced,
        _ => DirectoryTier::Foundational,
    };
    let headers = entry.get("headers").and_then(Value::as_object).map(|headers| {
        headers
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|v| (name.clone(), v.to_string())))
            .collect()
    });

    Some(DirectoryTarget {
        name: string_field(entry, "name").unwrap_or_else(|| id.clone()),
        description: string_field(entry, "description")
            .unwrap_or_else(|| "Custom directory".to_string()),
        payload_template: entry
            .get("payloadTemplate")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        id,
        submission_url,
        method,
        headers,
        tier,
    })
}

/// Trimmed string value; blank or non-string counts as absent.
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> CampaignDefaults {
        CampaignDefaults::default()
    }

    #[test]
    fn test_minimal_body_uses_defaults() {
        let (request, options) =
            campaign_request(&json!({"targetUrl": "https://acme.io"}), &defaults()).unwrap();

        assert_eq!(request.target_url, "https://acme.io");
        assert_eq!(request.keywords, vec!["backlink automation"]);
        assert_eq!(request.tone, CampaignTone::Authoritative);
        assert_eq!(request.directories, default_directories());
        assert!(request.company_name.is_none());
        assert!(!options.dry_run);
    }

    #[test]
    fn test_missing_or_blank_target_url() {
        assert_eq!(
            campaign_request(&json!({"keywords": ["a"]}), &defaults()).unwrap_err(),
            NormalizeError::MissingTargetUrl
        );
        assert_eq!(
            campaign_request(&json!({"targetUrl": "   "}), &defaults()).unwrap_err(),
            NormalizeError::MissingTargetUrl
        );
        assert_eq!(
            campaign_request(&json!(["not", "an", "object"]), &defaults()).unwrap_err(),
            NormalizeError::NotAnObject
        );
    }

    #[test]
    fn test_keywords_from_array_and_string() {
        let (request, _) = campaign_request(
            &json!({"targetUrl": "https://acme.io", "keywords": [" seo ", 4, "", "growth"]}),
            &defaults(),
        )
        .unwrap();
        assert_eq!(request.keywords, vec!["seo", "growth"]);

        let (request, _) = campaign_request(
            &json!({"targetUrl": "https://acme.io", "keywords": "seo automation, , backlink growth"}),
            &defaults(),
        )
        .unwrap();
        assert_eq!(request.keywords, vec!["seo automation", "backlink growth"]);

        let (request, _) = campaign_request(
            &json!({"targetUrl": "https://acme.io", "keywords": []}),
            &defaults(),
        )
        .unwrap();
        assert_eq!(request.keywords, vec!["backlink automation"]);
    }

    #[test]
    fn test_tone_parsing() {
        let (request, _) = campaign_request(
            &json!({"targetUrl": "https://acme.io", "tone": "playful"}),
            &defaults(),
        )
        .unwrap();
        assert_eq!(request.tone, CampaignTone::Playful);

        assert_eq!(
            campaign_request(
                &json!({"targetUrl": "https://acme.io", "tone": "sarcastic"}),
                &defaults()
            )
            .unwrap_err(),
            NormalizeError::UnsupportedTone("sarcastic".to_string())
        );
    }

    #[test]
    fn test_directory_coercion() {
        let body = json!({
            "targetUrl": "https://acme.io",
            "dryRun": true,
            "directories": [
                {"id": "d1", "submissionUrl": "https://d1.test/submit", "method": "GET",
                 "tier": "advanced", "payloadTemplate": {"u": "{{targetUrl}}"},
                 "headers": {"X-Key": "abc", "X-Num": 5}},
                {"id": "no-url"},
                {"submissionUrl": "https://no-id.test"},
                "not an object",
                {"id": "d2", "submissionUrl": "https://d2.test", "method": "get", "tier": "elite"}
            ]
        });

        let (request, options) = campaign_request(&body, &defaults()).unwrap();

        assert!(options.dry_run);
        assert_eq!(request.directories.len(), 2);

        let d1 = &request.directories[0];
        assert_eq!(d1.name, "d1");
        assert_eq!(d1.description, "Custom directory");
        assert_eq!(d1.method, HttpMethod::Get);
        assert_eq!(d1.tier, DirectoryTier::Advanced);
        assert_eq!(d1.payload_template["u"], "{{targetUrl}}");
        let headers = d1.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["X-Key"], "abc");

        let d2 = &request.directories[1];
        assert_eq!(d2.method, HttpMethod::Post);
        assert_eq!(d2.tier, DirectoryTier::Foundational);
        assert!(d2.payload_template.is_empty());
        assert!(d2.headers.is_none());
    }

    #[test]
    fn test_all_directories_filtered_out_is_rejected() {
        let body = json!({"targetUrl": "https://acme.io", "directories": [{"id": "x"}]});
        assert_eq!(
            campaign_request(&body, &defaults()).unwrap_err(),
            NormalizeError::NoDirectories
        );
    }
}
