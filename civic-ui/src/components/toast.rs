//! Toast Notification Component
//!
//! Bottom-right stack of notifications. Each toast removes itself after its
//! display time.

use leptos::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use civic_reporter::toast::Toast as ToastData;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let toasts = state.toasts;

    // One dismiss timer per toast id
    let scheduled: Rc<RefCell<HashSet<u64>>> = Rc::default();
    create_effect(move |_| {
        let current = toasts.get();
        let mut scheduled = scheduled.borrow_mut();
        for toast in &current {
            if scheduled.insert(toast.id) {
                state.schedule_dismiss(toast);
            }
        }
        scheduled.retain(|id| current.iter().any(|t| t.id == *id));
    });

    view! {
        <div id="toast-container" class="fixed bottom-4 right-4 z-50 space-y-2">
            {move || {
                toasts.get()
                    .into_iter()
                    .map(|toast| view! { <ToastMessage toast=toast /> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn ToastMessage(toast: ToastData) -> impl IntoView {
    view! {
        <div class=format!(
            "toast flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            toast.kind.bg_class()
        )>
            <span class="text-lg">{toast.kind.icon()}</span>
            <span class="text-sm font-medium">{toast.message}</span>
        </div>
    }
}
