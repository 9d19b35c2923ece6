//! Content synthesizer: turns campaign intent into headline, pitch, and an
//! article blueprint. Pure and deterministic; the same request always yields
//! the same copy.

use outreach_core::types::{CampaignAssets, CampaignRequest, CampaignTone};
use tracing::debug;

/// Generates campaign copy from a request. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSynthesizer;

impl ContentSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, request: &CampaignRequest) -> CampaignAssets {
        let brand = request.brand_name();
        let url = request.target_url.trim();
        let keywords = request.keyword_list();
        let primary = keywords.first().copied().unwrap_or("your growth");
        let voice = Voice::for_tone(request.tone);

        let headline = voice.headline(&brand, primary);
        let pitch = match request.custom_pitch() {
            Some(custom) => custom.to_string(),
            None => voice.pitch(&brand, url, &keywords, primary),
        };
        let article = voice.article(&headline, &brand, url, &keywords, request.contact_email());

        debug!(
            tone = %request.tone,
            brand = %brand,
            keywords = keywords.len(),
            custom_pitch = request.custom_pitch().is_some(),
            "Campaign assets generated"
        );

        CampaignAssets {
            headline,
            pitch,
            article,
        }
    }
}

/// Convenience wrapper around [`ContentSynthesizer::generate`].
pub fn generate_assets(request: &CampaignRequest) -> CampaignAssets {
    ContentSynthesizer::new().generate(request)
}

/// Tone-specific phrasing. One arm per tone in every method so a new tone
/// cannot compile without copy of its own.
#[derive(Debug, Clone, Copy)]
struct Voice(CampaignTone);

impl Voice {
    fn for_tone(tone: CampaignTone) -> Self {
        Self(tone)
    }

    fn headline(&self, brand: &str, primary: &str) -> String {
        let topic = title_case(primary);
        match self.0 {
            CampaignTone::Authoritative => format!("{brand}: The Definitive Platform for {topic}"),
            CampaignTone::Conversational => format!("How {brand} Makes {topic} Feel Easy"),
            CampaignTone::Technical => format!("{brand} Benchmarks: Measurable Gains in {topic}"),
            CampaignTone::Playful => format!("{brand} Just Made {topic} Fun Again!"),
        }
    }

    fn pitch(&self, brand: &str, url: &str, keywords: &[&str], primary: &str) -> String {
        let topics = join_natural(keywords);
        match self.0 {
            CampaignTone::Authoritative => format!(
                "{brand} delivers enterprise-grade {topics} for teams that cannot afford guesswork. \
                 Proven workflows and accountable results, built to scale. Learn more at {url}."
            ),
            CampaignTone::Conversational => format!(
                "Hey there! We built {brand} because we were tired of wrestling with {primary}. \
                 If {topics} is on your plate too, we'd love for you to take a look at {url}."
            ),
            CampaignTone::Technical => format!(
                "{brand} takes a measurable approach to {topics}: instrumented pipelines, \
                 reproducible benchmarks, and metrics you can audit. Documentation and data at {url}."
            ),
            CampaignTone::Playful => format!(
                "Say hello to {brand}! We turn {topics} into something you'll actually look \
                 forward to. Come play at {url}!"
            ),
        }
    }

    fn intro(&self, brand: &str) -> String {
        match self.0 {
            CampaignTone::Authoritative => format!(
                "{brand} sets the standard for organizations that treat growth as an engineering discipline."
            ),
            CampaignTone::Conversational => {
                format!("We started {brand} to solve a problem we kept running into ourselves.")
            }
            CampaignTone::Technical => format!(
                "This outline covers how {brand} is built, what it measures, and the numbers behind it."
            ),
            CampaignTone::Playful => {
                format!("Buckle up: {brand} is here to make the boring parts delightful.")
            }
        }
    }

    fn section(&self, brand: &str, keyword: &str) -> String {
        match self.0 {
            CampaignTone::Authoritative => format!(
                "Why {brand} leads on {keyword}: governance, scale, and outcomes leadership can verify."
            ),
            CampaignTone::Conversational => format!(
                "Here's how we think about {keyword}, and what we learned helping teams like yours."
            ),
            CampaignTone::Technical => format!(
                "Architecture notes for {keyword}: inputs, throughput targets, and the metrics we track."
            ),
            CampaignTone::Playful => {
                format!("Fun fact: {keyword} doesn't have to be a chore. Here's the {brand} twist.")
            }
        }
    }

    fn call_to_action(&self) -> &'static str {
        match self.0 {
            CampaignTone::Authoritative => "Book a strategy session",
            CampaignTone::Conversational => "Come say hi",
            CampaignTone::Technical => "Read the docs and run the benchmarks",
            CampaignTone::Playful => "Jump in",
        }
    }

    fn article(
        &self,
        headline: &str,
        brand: &str,
        url: &str,
        keywords: &[&str],
        contact_email: Option<&str>,
    ) -> String {
        let mut article = String::new();
        article.push_str(&format!("# {headline}\n\n"));
        article.push_str(&format!("## Overview\n{}\n\n", self.intro(brand)));
        for keyword in keywords {
            article.push_str(&format!(
                "## {}\n{}\n\n",
                title_case(keyword),
                self.section(brand, keyword)
            ));
        }
        article.push_str(&format!(
            "## Get Started\n{} at {url}.",
            self.call_to_action()
        ));
        if let Some(email) = contact_email {
            article.push_str(&format!(" Questions? Reach the team at {email}."));
        }
        article
    }
}

/// "a", "a and b", "a, b and c".
fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
