//! Dashboard Page
//!
//! Metric cards, the two charts and the report list.

use leptos::*;

use crate::components::{MetricCard, ReportList, StatusChart, WeeklyChart};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let metrics = state.metrics;
    let loading = state.loading;

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold text-slate-800">"Dashboard"</h1>
                <p class="text-slate-500 mt-1">"Track and manage reported issues"</p>
            </div>

            <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <MetricCard
                    label="Total Reports"
                    icon="📋"
                    accent="bg-blue-50"
                    id="metric-total"
                    value=Signal::derive(move || metrics.get().total)
                />
                <MetricCard
                    label="Active Issues"
                    icon="⏳"
                    accent="bg-amber-50"
                    id="metric-active"
                    value=Signal::derive(move || metrics.get().active)
                />
                <MetricCard
                    label="Resolved"
                    icon="✅"
                    accent="bg-emerald-50"
                    id="metric-resolved"
                    value=Signal::derive(move || metrics.get().resolved)
                />
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-white rounded-xl p-6 border border-slate-100 shadow-sm">
                    <h2 class="text-xl font-semibold mb-4 text-slate-800">"Status Overview"</h2>
                    <StatusChart display=state.status_chart />
                </section>

                <section class="bg-white rounded-xl p-6 border border-slate-100 shadow-sm">
                    <h2 class="text-xl font-semibold mb-4 text-slate-800">"This Week"</h2>
                    <WeeklyChart display=state.weekly_chart />
                </section>
            </div>

            <section class="bg-white rounded-xl p-6 border border-slate-100 shadow-sm">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold text-slate-800">"Recent Reports"</h2>
                    <span id="report-count-badge" class="px-3 py-1 rounded-full bg-slate-100 text-sm text-slate-600">
                        {move || metrics.get().count_label()}
                    </span>
                </div>

                // Loading state
                {move || {
                    if loading.get() {
                        view! {
                            <div class="h-32 flex items-center justify-center">
                                <div class="loading-spinner w-8 h-8" />
                            </div>
                        }.into_view()
                    } else {
                        view! { <ReportList /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}
