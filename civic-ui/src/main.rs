//! Civic Reporter Dashboard
//!
//! Browser frontend for reporting civic issues and tracking them on a
//! dashboard, built with Leptos (WASM).
//!
//! # Features
//!
//! - Report form with photo upload (picker or drag-and-drop)
//! - Dashboard metrics, status doughnut and weekly bar chart
//! - Resolve/Reopen and two-step delete per report
//! - Toast notifications
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All state lives in the `civic-reporter` controller; the
//! components here mirror it through signals and talk to the backend through
//! a `gloo-net` client.

use leptos::*;

use civic_reporter::Config;

mod api;
mod app;
mod components;
mod logging;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = Config::default();
    logging::init_logging(&config.logging.level);

    // Mount the app to the document body
    mount_to_body(move || view! { <app::App config=config /> });
}
