//! Built-in directory catalog used when a campaign names no directories.
//!
//! The endpoints are public echo services so a live run returns real
//! responses without registering anywhere.

use crate::types::{DirectoryTarget, DirectoryTier, HttpMethod, Payload};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub fn default_directories() -> Vec<DirectoryTarget> {
    vec![
        DirectoryTarget {
            id: "startup-launchpad".to_string(),
            name: "Startup Launchpad".to_string(),
            description: "General startup listing with broad discovery traffic.".to_string(),
            submission_url: "https://httpbin.org/post".to_string(),
            method: HttpMethod::Post,
            payload_template: template(json!({
                "name": "{{companyName}}",
                "url": "{{targetUrl}}",
                "tagline": "{{headline}}",
                "description": "{{pitch}}",
                "email": "{{contactEmail}}",
                "logo": "{{logoUrl}}"
            })),
            headers: None,
            tier: DirectoryTier::Foundational,
        },
        DirectoryTarget {
            id: "saas-index".to_string(),
            name: "SaaS Index".to_string(),
            description: "Curated index of software products grouped by category.".to_string(),
            submission_url: "https://httpbin.org/anything/saas-index".to_string(),
            method: HttpMethod::Post,
            payload_template: template(json!({
                "product": {
                    "title": "{{companyName}}",
                    "website": "{{targetUrl}}",
                    "summary": "{{pitch}}"
                },
                "categories": ["{{primaryKeyword}}"],
                "keywords": "{{keywords}}"
            })),
            headers: Some(BTreeMap::from([(
                "X-Listing-Source".to_string(),
                "outreach-express".to_string(),
            )])),
            tier: DirectoryTier::Foundational,
        },
        DirectoryTarget {
            id: "devtools-digest".to_string(),
            name: "DevTools Digest".to_string(),
            description: "Developer tool roundup that accepts long-form write-ups.".to_string(),
            submission_url: "https://postman-echo.com/post".to_string(),
            method: HttpMethod::Post,
            payload_template: template(json!({
                "headline": "{{headline}}",
                "body": "{{article}}",
                "link": "{{targetUrl}}",
                "contact": "{{contactEmail}}"
            })),
            headers: None,
            tier: DirectoryTier::Niche,
        },
        DirectoryTarget {
            id: "founder-board".to_string(),
            name: "Founder Board".to_string(),
            description: "Community board where founders share launches.".to_string(),
            submission_url: "https://httpbin.org/anything/founder-board".to_string(),
            method: HttpMethod::Post,
            payload_template: template(json!({
                "title": "{{headline}}",
                "post": "{{pitch}}\n\n{{targetUrl}}",
                "tone": "{{tone}}"
            })),
            headers: Some(BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )])),
            tier: DirectoryTier::Niche,
        },
        DirectoryTarget {
            id: "link-ping".to_string(),
            name: "Link Ping".to_string(),
            description: "Lightweight GET ping that records a URL and keyword set.".to_string(),
            submission_url: "https://postman-echo.com/get".to_string(),
            method: HttpMethod::Get,
            payload_template: template(json!({
                "url": "{{targetUrl}}",
                "q": "{{keywords}}",
                "source": "{{directoryId}}"
            })),
            headers: None,
            tier: DirectoryTier::Advanced,
        },
    ]
}

fn template(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}
