//! # Civic Reporter
//!
//! Client core for a civic issue-reporting dashboard: a form that submits
//! reports (with an optional photo) to a backend, and a dashboard that lists
//! reports, shows aggregate metrics and draws two charts.
//!
//! The crate is browser-independent. Everything that touches the network or
//! a screen sits behind a port:
//!
//! - [`api::ReportApi`]: the backend's HTTP contract
//! - [`render::RenderTarget`]: where pages, metrics, lists, toasts and the
//!   form are drawn
//! - [`render::ChartPort`]: a chart backend
//!
//! [`controller::AppController`] owns all state and drives the ports.
//!
//! ## Modules
//!
//! - [`report`]: data model
//! - [`api`]: HTTP port, wire types and the native `reqwest` adapter
//! - [`store`]: the report snapshot with last-issued-wins reloads
//! - [`render`]: pure state → view-model functions
//! - [`confirm`]: two-step delete confirmation
//! - [`form`]: form validation and the photo slot
//! - [`toast`]: notifications
//! - [`config`]: configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use civic_reporter::api::http::HttpReportApi;
//! use civic_reporter::controller::{AppController, Ports};
//! use civic_reporter::render::{ChartPort, ChartSeries, HtmlRenderTarget};
//! use civic_reporter::Config;
//!
//! struct NoChart;
//!
//! impl ChartPort for NoChart {
//!     fn show_series(&mut self, _series: &ChartSeries) {}
//!     fn show_placeholder(&mut self) {}
//!     fn render(&mut self) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     civic_reporter::logging::init_logging(&config.logging);
//!
//!     let api = Rc::new(HttpReportApi::new(&config.api)?);
//!     let controller = AppController::new(
//!         api,
//!         &config,
//!         Ports {
//!             target: Box::new(HtmlRenderTarget::default()),
//!             status_chart: Box::new(NoChart),
//!             weekly_chart: Box::new(NoChart),
//!         },
//!     );
//!
//!     controller.start().await?;
//!     println!("{:?}", controller.metrics());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod form;
#[cfg(feature = "native")]
pub mod logging;
pub mod render;
pub mod report;
pub mod store;
pub mod toast;

pub use config::Config;
pub use controller::{AppController, DeleteOutcome, Page, Ports, ReloadOutcome};
pub use error::{ClientError, ClientResult, FileError, ValidationError};
pub use report::{IssueType, NewReport, PhotoUpload, Report, ReportId, Status, WeeklyStats};
