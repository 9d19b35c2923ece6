//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Outreach Express API",
        version = "0.1.0",
        description = "Campaign copy generation and sequential directory submission.\n\nA run generates a headline, pitch, and article once, renders them into each directory's payload template, and submits to every directory in order.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Campaigns", description = "Campaign runs and the directory catalog"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Campaigns
        crate::rest::run_campaign,
        crate::rest::list_directories,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Campaign types
        outreach_core::types::CampaignRequest,
        outreach_core::types::CampaignTone,
        outreach_core::types::DirectoryTarget,
        outreach_core::types::DirectoryTier,
        outreach_core::types::HttpMethod,
        outreach_core::types::CampaignAssets,
        outreach_core::types::SubmissionResult,
        outreach_core::types::SubmissionStatus,
        outreach_core::types::CampaignRun,
        crate::rest::RunCampaignBody,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
