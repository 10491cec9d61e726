//! Report List Component
//!
//! One row per report with the Resolve/Reopen action and the two-step
//! delete control. Text is inserted as text nodes, never as markup.

use leptos::*;

use civic_reporter::controller::Page;
use civic_reporter::render::{Media, ReportRow};

use crate::state::global::GlobalState;

/// Report list, or the empty state when there are no reports
#[component]
pub fn ReportList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let list = state.list;

    view! {
        <div id="reports-list" class="space-y-3">
            {move || {
                let list = list.get();
                if list.is_empty() {
                    view! { <EmptyState /> }.into_view()
                } else {
                    list.rows
                        .into_iter()
                        .map(|row| view! { <ReportItem row=row /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="empty-state" class="flex flex-col items-center justify-center py-12 text-center">
            <div class="text-5xl mb-4">"📭"</div>
            <h3 class="text-lg font-semibold text-slate-700">"No reports yet"</h3>
            <p class="text-slate-500 mb-4">"Be the first to report an issue in your community."</p>
            <button
                on:click=move |_| state.navigate(Page::Report)
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Report an Issue"
            </button>
        </div>
    }
}

#[component]
fn Thumbnail(media: Media) -> impl IntoView {
    match media {
        Media::Photo {
            url,
            alt,
            fallback_glyph,
        } => {
            let failed = create_rw_signal(false);
            view! {
                <Show
                    when=move || !failed.get()
                    fallback=move || view! { <span class="text-2xl">{fallback_glyph}</span> }
                >
                    <img
                        src=url.clone()
                        alt=alt.clone()
                        class="w-full h-full object-cover"
                        loading="lazy"
                        on:error=move |_| failed.set(true)
                    />
                </Show>
            }
            .into_view()
        }
        Media::Glyph(glyph) => view! { <span class="text-2xl">{glyph}</span> }.into_view(),
    }
}

#[component]
fn ReportItem(row: ReportRow) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let status_state = state.clone();
    let status_id = row.id.clone();
    let target = row.action.target();
    let on_status = move |_| status_state.set_status(status_id.clone(), target);

    let delete_id = row.id.clone();
    let on_delete = move |_| state.press_delete(delete_id.clone());

    let delete_class = if row.delete.armed {
        "px-3 py-1 rounded-lg text-sm bg-red-600 text-white"
    } else {
        "px-3 py-1 rounded-lg text-sm bg-slate-100 text-slate-600 hover:bg-red-50"
    };

    view! {
        <div class="report-item flex items-start gap-4 p-4 rounded-xl border border-slate-100" data-report-id=row.id.to_string()>
            <div class="w-16 h-16 rounded-xl bg-slate-100 flex-shrink-0 overflow-hidden flex items-center justify-center">
                <Thumbnail media=row.media />
            </div>
            <div class="flex-1 min-w-0">
                <div class="flex items-start justify-between gap-2 mb-1">
                    <h4 class="font-semibold text-slate-800 truncate">{row.title}</h4>
                    <span class=format!("status-badge {} flex-shrink-0", row.badge.class)>
                        {row.badge.label}
                    </span>
                </div>
                <p class="text-sm text-slate-500 line-clamp-2 mb-2">{row.excerpt}</p>
                <div class="flex items-center gap-3 text-xs text-slate-400">
                    <span>"📍 "{row.location}</span>
                    <span>"•"</span>
                    <span>"🕐 "{row.time_ago}</span>
                </div>
            </div>
            <div class="flex flex-col gap-2">
                <button
                    on:click=on_status
                    title=row.action.title()
                    class="px-3 py-1 rounded-lg text-sm bg-emerald-50 text-emerald-700 hover:bg-emerald-100"
                >
                    {row.action.label()}
                </button>
                <button on:click=on_delete title="Delete" class=delete_class>
                    {row.delete.label}
                </button>
            </div>
        </div>
    }
}
