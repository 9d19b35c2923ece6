#![warn(clippy::unwrap_used)]

pub mod normalize;
pub mod rest;
pub mod server;
pub mod swagger;

pub use server::{build_router, ApiServer};
pub use swagger::ApiDoc;
