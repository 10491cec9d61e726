//! API Client
//!
//! Browser adapter for the report API.

pub mod client;

pub use client::{get_api_base, GlooReportApi};
