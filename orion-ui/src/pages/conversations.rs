//! Conversations Page
//!
//! Every conversation, searchable and grouped by last update.

use leptos::*;
use leptos_router::*;
use orion::listing::conversations::{group_by_date, search};
use orion::models::{date_label, Conversation, ConversationPatch, NewConversation};
use orion::nav::share_url;

use crate::api;
use crate::components::{ConfirmModal, ListSkeleton, Modal};
use crate::state::global::GlobalState;

/// Conversations page component
#[component]
pub fn Conversations() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let conversations = create_rw_signal(Vec::<Conversation>::new());
    let loading = create_rw_signal(true);
    let (query, set_query) = create_signal(String::new());
    let (renaming, set_renaming) = create_signal(None::<i64>);
    let (new_title, set_new_title) = create_signal(String::new());
    let (deleting, set_deleting) = create_signal(None::<i64>);

    let reload = move || {
        spawn_local(async move {
            match api::fetch_conversations().await {
                Ok(list) => conversations.set(list),
                Err(e) => {
                    conversations.set(Vec::new());
                    state.show_error(&e);
                }
            }
            loading.set(false);
        });
    };
    reload();

    let new_chat = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            let conversation = NewConversation {
                title: "New Chat".to_string(),
                smart_tags: Vec::new(),
                is_active: true,
                last_updated: date_label(chrono::Local::now()),
                messages: Vec::new(),
            };
            match api::create_conversation(&conversation).await {
                Ok(created) => navigate(&format!("/chat/{}", created.id), Default::default()),
                Err(e) => state.show_error(&e),
            }
        });
    };

    let save_rename = Callback::new(move |_: ()| {
        let Some(id) = renaming.get_untracked() else {
            return;
        };
        set_renaming.set(None);
        let title = new_title.get_untracked().trim().to_string();
        if title.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::update_conversation(id, &ConversationPatch::rename(title)).await {
                Ok(_) => {
                    reload();
                    state.refresh_lists();
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(id) = deleting.get_untracked() else {
            return;
        };
        set_deleting.set(None);
        spawn_local(async move {
            match api::delete_conversation(id).await {
                Ok(_) => {
                    state.show_success("Conversation deleted");
                    reload();
                    state.refresh_lists();
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    let share = move |id: i64| {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        state.show_copyable("Share link", share_url(&origin, id));
    };

    view! {
        <div class="max-w-4xl mx-auto px-6 py-8 space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Conversations"</h1>
                    <p class="text-gray-400 mt-1">"All of your chats in one place"</p>
                </div>
                <button
                    on:click=new_chat
                    class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium"
                >
                    "+ New Chat"
                </button>
            </div>

            <input
                type="text"
                placeholder="Search by title or tag..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
                class="w-full bg-gray-800 rounded-lg px-4 py-3
                       border border-gray-700 focus:border-primary focus:outline-none"
            />

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }
                let all = conversations.get();
                let q = query.get();
                let matched = search(&all, &q);
                if matched.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-12">"No conversations found"</p>
                    }.into_view();
                }

                group_by_date(&matched).into_iter().map(|group| view! {
                    <section>
                        <h2 class="text-sm text-gray-500 mb-2">{group.date.clone()}</h2>
                        <div class="bg-gray-800 rounded-xl divide-y divide-gray-700">
                            {group.conversations.into_iter().map(|c| {
                                let id = c.id;
                                let title = c.display_title();
                                let rename_title = title.clone();
                                let tags = c.smart_tags.clone();
                                view! {
                                    <div class="flex items-center px-4 py-3">
                                        <A href=format!("/chat/{}", id) class="flex-1 min-w-0">
                                            <div class="font-medium truncate">{title}</div>
                                            <div class="flex flex-wrap gap-1 mt-1">
                                                {tags.into_iter().map(|t| view! {
                                                    <span class="text-xs bg-gray-700 rounded px-2 py-0.5">{t}</span>
                                                }).collect_view()}
                                            </div>
                                        </A>
                                        <div class="flex space-x-2 text-sm">
                                            <button on:click=move |_| {
                                                set_new_title.set(rename_title.clone());
                                                set_renaming.set(Some(id));
                                            }>"Rename"</button>
                                            <button on:click=move |_| share(id)>"Share"</button>
                                            <button class="text-red-400" on:click=move |_| set_deleting.set(Some(id))>"Delete"</button>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </section>
                }).collect_view()
            }}

            <Modal
                open=Signal::derive(move || renaming.get().is_some())
                title="Rename conversation"
                on_close=Callback::new(move |_| set_renaming.set(None))
            >
                <input
                    type="text"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 mb-4
                           border border-gray-600 focus:border-primary focus:outline-none"
                />
                <div class="flex justify-end">
                    <button
                        on:click=move |_| save_rename.call(())
                        class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium"
                    >
                        "Save"
                    </button>
                </div>
            </Modal>

            <ConfirmModal
                open=Signal::derive(move || deleting.get().is_some())
                title="Delete conversation"
                message=Signal::derive(|| "This conversation will be removed permanently.".to_string())
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |_| set_deleting.set(None))
            />
        </div>
    }
}
