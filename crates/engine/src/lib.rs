//! Campaign generation and submission engine.
//!
//! Synthesizes campaign copy, renders it through each directory's payload
//! template, and submits the results one directory at a time.

pub mod dispatcher;
pub mod observer;
pub mod orchestrator;
pub mod synthesizer;

pub use dispatcher::SubmissionDispatcher;
pub use observer::{CaptureObserver, NoOpObserver, RunObserver};
pub use orchestrator::CampaignOrchestrator;
pub use synthesizer::{generate_assets, ContentSynthesizer};
