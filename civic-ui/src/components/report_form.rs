//! Report Form Component
//!
//! Issue type, description, location and an optional photo picked with the
//! file dialog or dropped onto the drop zone.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader};

use civic_reporter::form::{PhotoCandidate, PhotoState, ReportDraft};
use civic_reporter::IssueType;

use crate::state::global::GlobalState;

/// Validate `file` and read it for preview and upload
fn attach_photo(state: &GlobalState, file: File) {
    let candidate = PhotoCandidate {
        file_name: file.name(),
        mime_type: file.type_(),
        size: file.size() as u64,
    };

    // Rejections are shown as toasts by the controller
    let Ok(ticket) = state.controller.select_photo(&candidate) else {
        return;
    };

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            state.controller.photo_failed(ticket, &format!("{:?}", e));
            return;
        }
    };

    let onload = {
        let reader = reader.clone();
        let controller = state.controller.clone();
        let file = file.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            let bytes = match reader.result() {
                Ok(result) => match result.dyn_ref::<js_sys::ArrayBuffer>() {
                    Some(buffer) => js_sys::Uint8Array::new(buffer).to_vec(),
                    None => {
                        controller.photo_failed(ticket, "unexpected reader result");
                        return;
                    }
                },
                Err(e) => {
                    controller.photo_failed(ticket, &format!("{:?}", e));
                    return;
                }
            };

            match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(preview_url) => controller.photo_loaded(ticket, preview_url, bytes),
                Err(e) => controller.photo_failed(ticket, &format!("{:?}", e)),
            }
        }) as Box<dyn FnMut(_)>)
    };

    let onerror = {
        let controller = state.controller.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            controller.photo_failed(ticket, "read error");
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if let Err(e) = reader.read_as_array_buffer(&file) {
        state.controller.photo_failed(ticket, &format!("{:?}", e));
    }
}

/// Report submission form
#[component]
pub fn ReportForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let form = state.form;

    let (issue_type, set_issue_type) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (location, set_location) = create_signal(String::new());

    let state_for_submit = state.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let draft = ReportDraft {
            issue_type: issue_type.get(),
            description: description.get(),
            location: location.get(),
        };
        let controller = state_for_submit.controller.clone();
        spawn_local(async move {
            // On failure the entered values stay in place
            if controller.submit(&draft).await.is_ok() {
                set_issue_type.set(String::new());
                set_description.set(String::new());
                set_location.set(String::new());
            }
        });
    };

    view! {
        <form id="report-form" on:submit=on_submit class="space-y-5">
            // Issue type
            <div>
                <label class="block text-sm font-medium text-slate-700 mb-1">"Issue Type *"</label>
                <select
                    id="issue-type"
                    class="w-full px-4 py-2 rounded-lg border border-slate-200"
                    prop:value=issue_type
                    on:change=move |ev| set_issue_type.set(event_target_value(&ev))
                >
                    <option value="">"Select an issue type"</option>
                    {IssueType::ALL
                        .iter()
                        .map(|t| view! {
                            <option value=t.label().to_string()>{t.glyph()}" "{t.label().to_string()}</option>
                        })
                        .collect_view()}
                </select>
            </div>

            // Description
            <div>
                <label class="block text-sm font-medium text-slate-700 mb-1">"Description *"</label>
                <textarea
                    id="description"
                    rows="4"
                    placeholder="Describe the issue..."
                    class="w-full px-4 py-2 rounded-lg border border-slate-200"
                    prop:value=description
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
            </div>

            // Location
            <div>
                <label class="block text-sm font-medium text-slate-700 mb-1">"Location"</label>
                <input
                    id="location"
                    type="text"
                    placeholder="Street, landmark or area"
                    class="w-full px-4 py-2 rounded-lg border border-slate-200"
                    prop:value=location
                    on:input=move |ev| set_location.set(event_target_value(&ev))
                />
            </div>

            <PhotoDropZone />

            <button
                type="submit"
                id="submit-btn"
                disabled=move || form.get().submit_disabled()
                class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:opacity-60 text-white rounded-lg font-semibold flex items-center justify-center gap-2"
            >
                <Show when=move || form.get().submit.busy>
                    <div class="loading-spinner w-4 h-4" />
                </Show>
                {move || form.get().submit.label()}
            </button>
        </form>
    }
}

/// Photo picker, drop target and preview
#[component]
fn PhotoDropZone() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let form = state.form;
    let input_ref = create_node_ref::<html::Input>();
    let (dragging, set_dragging) = create_signal(false);

    // Release the previous preview URL once it is no longer shown
    create_effect(move |previous: Option<Option<String>>| {
        let current = match form.get().photo {
            PhotoState::Preview { preview_url, .. } => Some(preview_url),
            _ => None,
        };
        if let Some(Some(old)) = previous {
            if current.as_ref() != Some(&old) {
                let _ = web_sys::Url::revoke_object_url(&old);
            }
        }
        current
    });

    let state_for_change = state.clone();
    let on_change = move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            attach_photo(&state_for_change, file);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let state_for_drop = state.clone();
    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            attach_photo(&state_for_drop, file);
        }
    };

    let on_remove = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        state.controller.remove_photo();
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-slate-700 mb-1">"Photo (optional)"</label>
            <input
                node_ref=input_ref
                type="file"
                id="photo-input"
                accept="image/jpeg,image/png"
                class="hidden"
                on:change=on_change
            />
            <div
                id="upload-area"
                on:click=open_picker
                on:dragover=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    set_dragging.set(true);
                }
                on:dragleave=move |_| set_dragging.set(false)
                on:drop=on_drop
                class=move || {
                    let base = "border-2 border-dashed rounded-xl p-6 text-center cursor-pointer transition-colors";
                    if dragging.get() {
                        format!("{} dragover border-blue-500 bg-blue-50", base)
                    } else {
                        format!("{} border-slate-200 hover:border-blue-400", base)
                    }
                }
            >
                {move || match form.get().photo {
                    PhotoState::Empty => view! {
                        <div id="upload-placeholder" class="text-slate-500">
                            <div class="text-3xl mb-2">"📷"</div>
                            <p>"Click to upload or drag and drop"</p>
                            <p class="text-xs">"JPG or PNG, up to 5MB"</p>
                        </div>
                    }.into_view(),
                    PhotoState::Reading { file_name } => view! {
                        <div class="flex items-center justify-center gap-2 text-slate-500">
                            <div class="loading-spinner w-4 h-4" />
                            <span>{file_name}</span>
                        </div>
                    }.into_view(),
                    PhotoState::Preview { file_name, preview_url } => view! {
                        <div id="image-preview" class="flex items-center gap-4">
                            <img src=preview_url alt="Preview" class="w-20 h-20 object-cover rounded-lg" />
                            <span class="flex-1 text-left text-sm text-slate-700 truncate">{file_name}</span>
                            <button
                                type="button"
                                on:click=on_remove.clone()
                                class="px-3 py-1 rounded-lg text-sm bg-red-50 text-red-600 hover:bg-red-100"
                            >
                                "✕ Remove"
                            </button>
                        </div>
                    }.into_view(),
                }}
            </div>
        </div>
    }
}
