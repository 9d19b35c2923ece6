pub mod config;
pub mod directories;
pub mod error;
pub mod templates;
pub mod types;

pub use config::AppConfig;
pub use error::{OutreachError, OutreachResult};
pub use templates::{resolve_payload, ResolvedContext};
pub use types::*;
