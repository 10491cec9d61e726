//! App Root Component
//!
//! Provides global state, wires the last-resort error handlers and switches
//! between the two pages.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use civic_reporter::controller::Page;
use civic_reporter::Config;

use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Report};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App(config: Config) -> impl IntoView {
    // Provide global state to all components
    provide_global_state(&config);

    let state = use_context::<GlobalState>().expect("GlobalState not found");
    install_global_error_handlers(&state);
    state.start();

    let page = state.page;

    view! {
        <div class="min-h-screen bg-slate-50 flex flex-col">
            // Navigation header
            <Nav />

            // Main content area
            <main class="flex-1 container mx-auto px-4 py-8">
                <div id="report-page" class:hidden=move || page.get() != Page::Report>
                    <Report />
                </div>
                <div id="dashboard-page" class:hidden=move || page.get() != Page::Dashboard>
                    <Dashboard />
                </div>
            </main>

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Log uncaught errors and unhandled promise rejections; never shown to the user
fn install_global_error_handlers(state: &GlobalState) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let controller = state.controller.clone();
    let on_error = Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
        controller.report_uncaught(&event.message());
    }) as Box<dyn FnMut(_)>);

    let controller = state.controller.clone();
    let on_rejection = Closure::wrap(Box::new(move |event: web_sys::PromiseRejectionEvent| {
        controller.report_uncaught(&format!("Unhandled rejection: {:?}", event.reason()));
    }) as Box<dyn FnMut(_)>);

    let _ = window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    let _ = window.add_event_listener_with_callback(
        "unhandledrejection",
        on_rejection.as_ref().unchecked_ref(),
    );
    on_error.forget();
    on_rejection.forget();
}
