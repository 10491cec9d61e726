//! Navigation Component
//!
//! Header bar with the two page buttons.

use leptos::*;

use civic_reporter::controller::Page;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-white border-b border-slate-200 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🏙️"</span>
                        <span class="text-xl font-bold text-slate-800">"Civic Reporter"</span>
                    </div>

                    <div class="flex items-center space-x-1">
                        <NavButton page=Page::Report icon="📝" />
                        <NavButton page=Page::Dashboard icon="📊" />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Page switch button, highlighted while its page is visible
#[component]
fn NavButton(page: Page, icon: &'static str) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let current = state.page;

    let on_click = move |_| state.navigate(page);

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "nav-btn px-4 py-2 rounded-lg font-medium transition-colors";
                if current.get() == page {
                    format!("{} active bg-blue-600 text-white", base)
                } else {
                    format!("{} text-slate-600 hover:bg-slate-100", base)
                }
            }
        >
            {icon}" "{page.label()}
        </button>
    }
}
