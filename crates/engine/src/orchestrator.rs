//! Campaign orchestrator: generates assets once, then walks the directory
//! list in order, resolving each payload template before submitting it.
//!
//! Submissions run strictly one at a time. Results come back in directory
//! order and a failing directory is settled before the next one starts.

use crate::dispatcher::SubmissionDispatcher;
use crate::observer::{NoOpObserver, RunObserver};
use crate::synthesizer::ContentSynthesizer;
use outreach_core::config::DispatchConfig;
use outreach_core::error::OutreachResult;
use outreach_core::templates::{resolve_payload, ResolvedContext};
use outreach_core::types::{CampaignRequest, CampaignRun, RunOptions};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Drives a full campaign run. Holds no per-run state, so one instance can
/// serve concurrent runs.
#[derive(Debug, Clone)]
pub struct CampaignOrchestrator {
    synthesizer: ContentSynthesizer,
    dispatcher: SubmissionDispatcher,
}

impl CampaignOrchestrator {
    pub fn new(dispatcher: SubmissionDispatcher) -> Self {
        Self {
            synthesizer: ContentSynthesizer::new(),
            dispatcher,
        }
    }

    pub fn from_config(config: &DispatchConfig) -> OutreachResult<Self> {
        Ok(Self::new(SubmissionDispatcher::new(config)?))
    }

    /// Run a campaign and return assets plus one result per directory.
    ///
    /// Fails only on run-level problems (see [`CampaignRequest::validate`]);
    /// per-directory failures are reported inside the returned results.
    pub async fn run(
        &self,
        request: &CampaignRequest,
        options: RunOptions,
    ) -> OutreachResult<CampaignRun> {
        self.run_with_observer(request, options, &NoOpObserver).await
    }

    /// Like [`run`](Self::run), notifying `observer` after each submission.
    pub async fn run_with_observer(
        &self,
        request: &CampaignRequest,
        options: RunOptions,
        observer: &dyn RunObserver,
    ) -> OutreachResult<CampaignRun> {
        if let Err(e) = request.validate() {
            warn!(error = %e, "Campaign rejected before any submission");
            return Err(e);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!(
            "run",
            %run_id,
            dry_run = options.dry_run,
            directories = request.directories.len()
        );
        self.execute(request, options, observer)
            .instrument(span)
            .await
    }

    async fn execute(
        &self,
        request: &CampaignRequest,
        options: RunOptions,
        observer: &dyn RunObserver,
    ) -> OutreachResult<CampaignRun> {
        let start = Instant::now();
        info!(target_url = %request.target_url, tone = %request.tone, "Campaign run started");

        let assets = self.synthesizer.generate(request);

        let total = request.directories.len();
        let mut results = Vec::with_capacity(total);
        for (index, directory) in request.directories.iter().enumerate() {
            let context = ResolvedContext::new(request, &assets, directory);
            let payload = resolve_payload(&directory.payload_template, &context);
            let result = self
                .dispatcher
                .submit(directory, payload, options.dry_run)
                .await;

            info!(
                directory_id = %result.directory_id,
                status = result.status.as_str(),
                position = index + 1,
                total,
                "Directory processed"
            );
            observer.on_submission(index, total, &result);
            results.push(result);
        }

        let run = CampaignRun { assets, results };
        metrics::counter!(
            "outreach.runs",
            "mode" => if options.dry_run { "dry_run" } else { "live" }
        )
        .increment(1);
        info!(
            succeeded = run.success_count(),
            failed = run.error_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Campaign run finished"
        );

        Ok(run)
    }
}
