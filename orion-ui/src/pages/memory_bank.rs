//! Memory Bank Page
//!
//! Knowledge sources the backend can draw on: totals, search, add, status
//! changes and deletion.

use leptos::*;
use orion::listing::memory::{format_size, search};
use orion::listing::MemoryStats;
use orion::models::{MemoryItem, MemoryPatch, NewMemoryItem};

use crate::api;
use crate::components::{ConfirmModal, ListSkeleton, Modal};
use crate::state::global::GlobalState;

const STATUSES: [&str; 4] = ["Pending", "Processing", "Indexed", "Failed"];
const TYPES: [&str; 5] = ["Text", "PDF", "Web", "Image", "Audio"];

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-2 \
                           border border-gray-600 focus:border-primary focus:outline-none";

fn blank_item() -> NewMemoryItem {
    NewMemoryItem {
        name: String::new(),
        kind: TYPES[0].to_string(),
        size: String::new(),
        source: "Manual".to_string(),
        status: STATUSES[0].to_string(),
    }
}

/// Memory bank page component
#[component]
pub fn MemoryBank() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let items = create_rw_signal(Vec::<MemoryItem>::new());
    let loading = create_rw_signal(true);
    let (query, set_query) = create_signal(String::new());
    let (adding, set_adding) = create_signal(false);
    let draft = create_rw_signal(blank_item());
    let (deleting, set_deleting) = create_signal(None::<i64>);
    let viewing = create_rw_signal(None::<MemoryItem>);

    let reload = move || {
        spawn_local(async move {
            match api::fetch_memory_items().await {
                Ok(list) => items.set(list),
                Err(e) => {
                    items.set(Vec::new());
                    state.show_error(&e);
                }
            }
            loading.set(false);
        });
    };
    reload();

    let create = move |_| {
        let item = draft.get_untracked();
        if item.name.trim().is_empty() {
            state.show_error("Name is required");
            return;
        }
        set_adding.set(false);
        spawn_local(async move {
            match api::create_memory_item(&item).await {
                Ok(_) => {
                    draft.set(blank_item());
                    reload();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let set_status = move |id: i64, status: String| {
        spawn_local(async move {
            match api::update_memory_item(id, &MemoryPatch::status(status)).await {
                Ok(_) => reload(),
                Err(e) => state.show_error(&e),
            }
        });
    };

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(id) = deleting.get_untracked() else {
            return;
        };
        set_deleting.set(None);
        spawn_local(async move {
            match api::delete_memory_item(id).await {
                Ok(_) => reload(),
                Err(e) => state.show_error(&e),
            }
        });
    });

    // Row details come from the item endpoint, not the cached list
    let open_details = move |id: i64| {
        spawn_local(async move {
            match api::fetch_memory_item(id).await {
                Ok(item) => viewing.set(Some(item)),
                Err(e) => state.show_error(&e),
            }
        });
    };

    let stats = move || items.with(|i| MemoryStats::from_items(i));

    view! {
        <div class="max-w-5xl mx-auto px-6 py-8 space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Memory Bank"</h1>
                    <p class="text-gray-400 mt-1">"What the assistant knows about"</p>
                </div>
                <button
                    on:click=move |_| set_adding.set(true)
                    class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium"
                >
                    "+ Add Memory"
                </button>
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <StatCard label="Items" value=Signal::derive(move || stats().total_items.to_string()) />
                <StatCard label="Total size" value=Signal::derive(move || {
                    let s = stats();
                    if s.unknown_sizes > 0 {
                        format!("{} (+{} unknown)", format_size(s.total_bytes), s.unknown_sizes)
                    } else {
                        format_size(s.total_bytes)
                    }
                }) />
                <StatCard label="Indexed" value=Signal::derive(move || stats().count("Indexed").to_string()) />
                <StatCard label="Pending" value=Signal::derive(move || stats().count("Pending").to_string()) />
            </div>

            <input
                type="text"
                placeholder="Search memories..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
                class="w-full bg-gray-800 rounded-lg px-4 py-3
                       border border-gray-700 focus:border-primary focus:outline-none"
            />

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=4 /> }.into_view();
                }
                let all = items.get();
                let shown: Vec<MemoryItem> = search(&all, &query.get()).into_iter().cloned().collect();
                if shown.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-12">"No memories yet"</p>
                    }.into_view();
                }
                view! {
                    <table class="w-full bg-gray-800 rounded-xl overflow-hidden text-sm">
                        <thead class="bg-gray-700 text-gray-300 text-left">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Type"</th>
                                <th class="px-4 py-3">"Size"</th>
                                <th class="px-4 py-3">"Source"</th>
                                <th class="px-4 py-3">"Status"</th>
                                <th class="px-4 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-700">
                            {shown.into_iter().map(|item| {
                                let id = item.id;
                                let current = item.status.clone();
                                view! {
                                    <tr>
                                        <td class="px-4 py-3 font-medium">
                                            <button class="hover:underline text-left" on:click=move |_| open_details(id)>
                                                {item.name}
                                            </button>
                                        </td>
                                        <td class="px-4 py-3">{item.kind}</td>
                                        <td class="px-4 py-3">{item.size}</td>
                                        <td class="px-4 py-3">{item.source}</td>
                                        <td class="px-4 py-3">
                                            <select
                                                on:change=move |ev| set_status(id, event_target_value(&ev))
                                                class="bg-gray-700 rounded px-2 py-1"
                                            >
                                                {STATUSES.into_iter().map(|s| view! {
                                                    <option value=s selected=current == s>{s}</option>
                                                }).collect_view()}
                                            </select>
                                        </td>
                                        <td class="px-4 py-3 text-right">
                                            <button class="text-red-400" on:click=move |_| set_deleting.set(Some(id))>
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            }}

            <Modal
                open=adding
                title="Add memory"
                on_close=Callback::new(move |_| set_adding.set(false))
            >
                <div class="space-y-3">
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                    <select
                        on:change=move |ev| draft.update(|d| d.kind = event_target_value(&ev))
                        class=INPUT_CLASS
                    >
                        {TYPES.into_iter().map(|t| view! { <option value=t>{t}</option> }).collect_view()}
                    </select>
                    <input
                        type="text"
                        placeholder="Size, e.g. 1.5 MB"
                        prop:value=move || draft.with(|d| d.size.clone())
                        on:input=move |ev| draft.update(|d| d.size = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                    <input
                        type="text"
                        placeholder="Source"
                        prop:value=move || draft.with(|d| d.source.clone())
                        on:input=move |ev| draft.update(|d| d.source = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                    <div class="flex justify-end">
                        <button on:click=create class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium">
                            "Add"
                        </button>
                    </div>
                </div>
            </Modal>

            <Modal
                open=Signal::derive(move || viewing.with(|v| v.is_some()))
                title="Memory details"
                on_close=Callback::new(move |_| viewing.set(None))
            >
                {move || viewing.get().map(|item| view! {
                    <dl class="grid grid-cols-3 gap-y-2 text-sm">
                        <dt class="text-gray-400">"Name"</dt><dd class="col-span-2">{item.name}</dd>
                        <dt class="text-gray-400">"Type"</dt><dd class="col-span-2">{item.kind}</dd>
                        <dt class="text-gray-400">"Size"</dt><dd class="col-span-2">{item.size}</dd>
                        <dt class="text-gray-400">"Source"</dt><dd class="col-span-2">{item.source}</dd>
                        <dt class="text-gray-400">"Status"</dt><dd class="col-span-2">{item.status}</dd>
                    </dl>
                })}
            </Modal>

            <ConfirmModal
                open=Signal::derive(move || deleting.get().is_some())
                title="Delete memory"
                message=Signal::derive(|| "This memory item will be removed.".to_string())
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |_| set_deleting.set(None))
            />
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <div class="text-sm text-gray-400">{label}</div>
            <div class="text-2xl font-bold mt-1">{move || value.get()}</div>
        </div>
    }
}
