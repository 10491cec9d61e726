//! Metric Card Component
//!
//! One headline count on the dashboard.

use leptos::*;

/// Metric card component
#[component]
pub fn MetricCard(
    /// Card title
    label: &'static str,
    icon: &'static str,
    /// Accent classes for the icon badge
    accent: &'static str,
    /// DOM id of the value, e.g. "metric-total"
    id: &'static str,
    #[prop(into)]
    value: Signal<usize>,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-5 border border-slate-100 shadow-sm">
            <div class="flex items-center justify-between">
                <span class="text-slate-500 text-sm">{label}</span>
                <span class=format!("w-10 h-10 rounded-lg flex items-center justify-center {}", accent)>
                    {icon}
                </span>
            </div>

            <div id=id class="text-3xl font-bold mt-2 text-slate-800">
                {move || value.get()}
            </div>
        </div>
    }
}
