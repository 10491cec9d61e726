//! Report Page

use leptos::*;

use crate::components::ReportForm;

#[component]
pub fn Report() -> impl IntoView {
    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-slate-800">"Report an Issue"</h1>
                <p class="text-slate-500 mt-1">"Help keep the city clean and safe"</p>
            </div>

            <section class="bg-white rounded-xl p-6 border border-slate-100 shadow-sm">
                <ReportForm />
            </section>
        </div>
    }
}
