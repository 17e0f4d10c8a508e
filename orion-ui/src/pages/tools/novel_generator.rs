//! Novel Generator Tool

use leptos::*;
use orion::models::NovelLength;
use orion::nav::ToolPage;
use orion::tools::novel::NOVEL_MODELS;
use orion::tools::{NovelForm, Pov};

use super::ToolHeader;
use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 \
                           border border-gray-600 focus:border-primary focus:outline-none";

/// Generate a draft with the backend model, then save it into a folder
#[component]
pub fn NovelGenerator() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let form = create_rw_signal(NovelForm::default());
    let (tag_input, set_tag_input) = create_signal(String::new());
    let (output, set_output) = create_signal(String::new());
    let (generating, set_generating) = create_signal(false);
    let (saving, set_saving) = create_signal(false);
    let folders = create_rw_signal(Vec::<String>::new());

    spawn_local(async move {
        match api::fetch_novel_folders().await {
            Ok(f) => folders.set(f.folders),
            Err(e) => web_sys::console::warn_1(&e.into()),
        }
    });

    let push_tag = move || {
        let raw = tag_input.get_untracked();
        form.update(|f| {
            f.add_tag(&raw);
        });
        set_tag_input.set(String::new());
    };

    let generate = move |_| {
        if generating.get_untracked() {
            return;
        }
        let request = form.with_untracked(|f| f.request());
        set_generating.set(true);
        spawn_local(async move {
            match api::generate_novel(&request).await {
                Ok(draft) => set_output.set(draft.novel),
                Err(e) => state.show_error(&e),
            }
            set_generating.set(false);
        });
    };

    let save = move |_| {
        let Some(request) = form.with_untracked(|f| f.save_request(&output.get_untracked())) else {
            state.show_error("Generate something first");
            return;
        };
        set_saving.set(true);
        spawn_local(async move {
            match api::save_novel(&request).await {
                Ok(saved) if saved.success => {
                    let path = saved.path.unwrap_or(request.filename.unwrap_or_default());
                    state.show_success(&format!("Saved to {}", path));
                }
                Ok(_) => state.show_error("Failed to save novel"),
                Err(e) => state.show_error(&e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="max-w-5xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::NovelGenerator />

            <div class="grid lg:grid-cols-2 gap-6">
                <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                        <input
                            type="text"
                            prop:value=move || form.with(|f| f.title.clone())
                            on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                            class=INPUT_CLASS
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Concept"</label>
                        <textarea
                            rows="4"
                            placeholder="Setting, characters, conflict..."
                            prop:value=move || form.with(|f| f.concept.clone())
                            on:input=move |ev| form.update(|f| f.concept = event_target_value(&ev))
                            class=INPUT_CLASS
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Genres"</label>
                        <div class="flex flex-wrap gap-2 mb-2">
                            {move || form.with(|f| f.tags.clone()).into_iter().map(|tag| {
                                let label = tag.clone();
                                view! {
                                    <span class="flex items-center text-xs bg-gray-700 rounded-full px-3 py-1">
                                        {label}
                                        <button
                                            class="ml-2 text-gray-400 hover:text-white"
                                            on:click=move |_| form.update(|f| f.remove_tag(&tag))
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                            }).collect_view()}
                        </div>
                        <input
                            type="text"
                            placeholder="Add a genre and press Enter"
                            prop:value=move || tag_input.get()
                            on:input=move |ev| set_tag_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    push_tag();
                                }
                            }
                            class=INPUT_CLASS
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Length"</label>
                            <select
                                on:change=move |ev| {
                                    if let Some(l) = NovelLength::parse(&event_target_value(&ev)) {
                                        form.update(|f| f.length = l);
                                    }
                                }
                                class=INPUT_CLASS
                            >
                                {NovelLength::ALL.into_iter().map(|l| view! {
                                    <option value=l.as_str() selected=move || form.with(|f| f.length == l)>{l.label()}</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Point of view"</label>
                            <select
                                on:change=move |ev| {
                                    if let Some(p) = Pov::parse(&event_target_value(&ev)) {
                                        form.update(|f| f.pov = p);
                                    }
                                }
                                class=INPUT_CLASS
                            >
                                {Pov::ALL.into_iter().map(|p| view! {
                                    <option value=p.as_str() selected=move || form.with(|f| f.pov == p)>{p.as_str()}</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Model"</label>
                            <select
                                on:change=move |ev| form.update(|f| f.model = event_target_value(&ev))
                                class=INPUT_CLASS
                            >
                                {NOVEL_MODELS.into_iter().map(|m| view! { <option value=m>{m}</option> }).collect_view()}
                            </select>
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Language"</label>
                            <input
                                type="text"
                                prop:value=move || form.with(|f| f.language.clone())
                                on:input=move |ev| form.update(|f| f.language = event_target_value(&ev))
                                class=INPUT_CLASS
                            />
                        </div>
                    </div>

                    <label class="flex items-center space-x-2 text-sm">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.outline_only)
                            on:change=move |ev| form.update(|f| f.outline_only = event_target_checked(&ev))
                        />
                        <span>"Outline only"</span>
                    </label>

                    <button
                        on:click=generate
                        disabled=move || generating.get()
                        class="w-full py-3 bg-primary hover:opacity-90 disabled:opacity-50 rounded-lg font-medium"
                    >
                        {move || if generating.get() { "Generating..." } else { "Generate" }}
                    </button>
                </div>

                <div class="bg-gray-800 rounded-xl p-6 flex flex-col space-y-4">
                    <div class="flex-1 min-h-[300px] bg-gray-900 rounded-lg p-4 overflow-auto whitespace-pre-wrap text-sm">
                        {move || if generating.get() {
                            view! { <Loading label="Writing your story..." /> }.into_view()
                        } else if output.with(|o| o.is_empty()) {
                            view! { <p class="text-gray-500">"Your story will appear here"</p> }.into_view()
                        } else {
                            output.get().into_view()
                        }}
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Folder"</label>
                            <input
                                type="text"
                                list="novel-folders"
                                prop:value=move || form.with(|f| f.folder.clone())
                                on:input=move |ev| form.update(|f| f.folder = event_target_value(&ev))
                                class=INPUT_CLASS
                            />
                            <datalist id="novel-folders">
                                {move || folders.get().into_iter().map(|f| view! { <option value=f /> }).collect_view()}
                            </datalist>
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"File name"</label>
                            <input
                                type="text"
                                placeholder="defaults to the title"
                                prop:value=move || form.with(|f| f.filename.clone())
                                on:input=move |ev| form.update(|f| f.filename = event_target_value(&ev))
                                class=INPUT_CLASS
                            />
                        </div>
                    </div>

                    <button
                        on:click=save
                        disabled=move || saving.get() || output.with(|o| o.is_empty())
                        class="py-3 bg-gray-600 hover:bg-gray-500 disabled:opacity-50 rounded-lg font-medium"
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
