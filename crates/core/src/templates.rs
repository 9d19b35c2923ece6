//! Payload template resolution using `{{placeholder}}` syntax.
//!
//! Substitution is permissive: unknown tokens and unterminated braces are
//! copied through untouched so a custom template never aborts a run.

use crate::types::{CampaignAssets, CampaignRequest, DirectoryTarget, Payload};
use serde_json::Value;
use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder names a template may reference.
pub const PLACEHOLDERS: [&str; 13] = [
    "targetUrl",
    "keywords",
    "primaryKeyword",
    "companyName",
    "contactEmail",
    "logoUrl",
    "tone",
    "tier",
    "directoryId",
    "directoryName",
    "headline",
    "pitch",
    "article",
];

/// Lookup table of placeholder values for one directory in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    values: BTreeMap<&'static str, String>,
}

impl ResolvedContext {
    pub fn new(
        request: &CampaignRequest,
        assets: &CampaignAssets,
        directory: &DirectoryTarget,
    ) -> Self {
        let mut values = BTreeMap::new();
        values.insert("targetUrl", request.target_url.trim().to_string());
        values.insert("keywords", request.keyword_list().join(", "));
        values.insert("primaryKeyword", request.primary_keyword().to_string());
        values.insert("companyName", request.brand_name());
        values.insert(
            "contactEmail",
            request.contact_email().unwrap_or_default().to_string(),
        );
        values.insert("logoUrl", request.logo_url().unwrap_or_default().to_string());
        values.insert("tone", request.tone.as_str().to_string());
        values.insert("tier", directory.tier.as_str().to_string());
        values.insert("directoryId", directory.id.clone());
        values.insert("directoryName", directory.name.clone());
        values.insert("headline", assets.headline.clone());
        values.insert("pitch", assets.pitch.clone());
        values.insert("article", assets.article.clone());
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitute every recognized token in `template`.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                // Unterminated token: keep the remainder as written.
                out.push_str(&rest[start..]);
                return out;
            };
            let name = &after_open[..end];
            if name.contains(OPEN) {
                // A stray `{{` opens nothing; the real token starts later.
                out.push_str(OPEN);
                rest = after_open;
                continue;
            }
            let token_len = OPEN.len() + end + CLOSE.len();
            match self.get(name.trim()) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + token_len]),
            }
            rest = &rest[start + token_len..];
        }

        out.push_str(rest);
        out
    }
}

/// Render a directory's payload template against `context`.
///
/// Top-level strings are rendered. Objects and arrays have their direct
/// string members rendered; anything nested deeper passes through as-is.
/// Key set and key order match the template.
pub fn resolve_payload(template: &Payload, context: &ResolvedContext) -> Payload {
    template
        .iter()
        .map(|(key, value)| (key.clone(), resolve_value(value, context, true)))
        .collect()
}

fn resolve_value(value: &Value, context: &ResolvedContext, descend: bool) -> Value {
    match value {
        Value::String(s) => Value::String(context.render(s)),
        Value::Object(fields) if descend => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, context, false)))
                .collect(),
        ),
        Value::Array(items) if descend => Value::Array(
            items
                .iter()
                .map(|v| resolve_value(v, context, false))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CampaignTone, DirectoryTier, HttpMethod};
    use serde_json::json;

    fn context() -> ResolvedContext {
        let directory = DirectoryTarget {
            id: "d1".to_string(),
            name: "Startup Hub".to_string(),
            description: "Test".to_string(),
            submission_url: "https://d1.test/submit".to_string(),
            method: HttpMethod::Post,
            payload_template: Payload::new(),
            headers: None,
            tier: DirectoryTier::Niche,
        };
        let request = CampaignRequest {
            target_url: "https://acme.io".to_string(),
            keywords: vec!["widgets".to_string(), "gadgets".to_string()],
            tone: CampaignTone::Technical,
            company_name: Some("Acme".to_string()),
            contact_email: None,
            logo_url: None,
            custom_pitch: None,
            directories: vec![directory.clone()],
        };
        let assets = CampaignAssets {
            headline: "Acme Widgets".to_string(),
            pitch: "Buy widgets".to_string(),
            article: "# Article".to_string(),
        };
        ResolvedContext::new(&request, &assets, &directory)
    }

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => Payload::new(),
        }
    }

    #[test]
    fn test_known_placeholders_are_replaced() {
        let ctx = context();
        assert_eq!(
            ctx.render("{{companyName}} at {{ targetUrl }} for {{keywords}}"),
            "Acme at https://acme.io for widgets, gadgets"
        );
        assert_eq!(ctx.render("{{tier}}/{{tone}}/{{directoryName}}"), "niche/technical/Startup Hub");
    }

    #[test]
    fn test_absent_optional_field_renders_empty() {
        assert_eq!(context().render("mail:{{contactEmail}}"), "mail:");
    }

    #[test]
    fn test_unknown_and_malformed_tokens_are_kept() {
        let ctx = context();
        assert_eq!(ctx.render("{{unknown}} {{headline}}"), "{{unknown}} Acme Widgets");
        assert_eq!(ctx.render("open {{headline"), "open {{headline");
        assert_eq!(ctx.render("{{}}"), "{{}}");
        assert_eq!(
            ctx.render("literal {{ then {{headline}}"),
            "literal {{ then Acme Widgets"
        );
        assert_eq!(ctx.render("{{{{headline}}"), "{{Acme Widgets");
        assert_eq!(ctx.render("no tokens"), "no tokens");
    }

    #[test]
    fn test_recognized_only_leaves_no_delimiters() {
        let ctx = context();
        for name in PLACEHOLDERS {
            let rendered = ctx.render(&format!("{{{{{name}}}}}"));
            assert!(!rendered.contains("{{"), "{name} left delimiters");
        }
    }

    #[test]
    fn test_resolve_payload_preserves_order_and_depth() {
        let template = payload(json!({
            "url": "{{targetUrl}}",
            "title": "{{headline}}",
            "count": 3,
            "meta": {
                "brand": "{{companyName}}",
                "deep": { "pitch": "{{pitch}}" }
            },
            "tags": ["{{primaryKeyword}}", 1],
            "custom": "{{notAField}}"
        }));

        let resolved = resolve_payload(&template, &context());

        let keys: Vec<&str> = resolved.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["url", "title", "count", "meta", "tags", "custom"]);
        assert_eq!(resolved["url"], "https://acme.io");
        assert_eq!(resolved["title"], "Acme Widgets");
        assert_eq!(resolved["count"], 3);
        assert_eq!(resolved["meta"]["brand"], "Acme");
        assert_eq!(resolved["meta"]["deep"]["pitch"], "{{pitch}}");
        assert_eq!(resolved["tags"], json!(["widgets", 1]));
        assert_eq!(resolved["custom"], "{{notAField}}");
    }
}
