//! Sidebar Component
//!
//! New chat button, recent conversations, characters and the page links.
//! Both lists are re-fetched on every route change; highlighting comes from
//! [`SidebarState`].

use leptos::*;
use leptos_router::*;
use orion::models::ConversationPatch;
use orion::nav::{redirect_after_delete, share_url, Route as AppRoute, SidebarState};

use crate::api;
use crate::components::{ConfirmModal, Modal};
use crate::state::global::GlobalState;

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Sidebar navigation component
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let location = use_location();
    let sidebar = create_rw_signal(SidebarState::default());

    create_effect(move |_| {
        let path = location.pathname.get();
        state.lists_version.track();

        spawn_local(async move {
            let conversations = api::fetch_conversations().await.unwrap_or_default();
            let characters = api::fetch_characters().await.unwrap_or_default();
            sidebar.update(|s| {
                s.set_conversations(conversations);
                s.set_characters(characters);
                s.apply_path(&path);
            });
        });
    });

    let (search, set_search) = create_signal(String::new());
    create_effect(move |_| {
        let query = search.get();
        sidebar.update(|s| s.search = query);
    });

    view! {
        <aside class="w-72 shrink-0 bg-gray-800 border-r border-gray-700 flex flex-col">
            <A href="/chat" class="flex items-center space-x-3 px-5 h-16 border-b border-gray-700">
                <span class="text-2xl">"✨"</span>
                <span class="text-xl font-bold">"Orion"</span>
            </A>

            <div class="p-4 space-y-3">
                <A
                    href="/chat"
                    class=move || {
                        let base = "block w-full text-center px-4 py-2 rounded-lg font-medium transition-colors";
                        if sidebar.with(|s| s.is_new_chat_active()) {
                            format!("{} bg-primary text-white", base)
                        } else {
                            format!("{} bg-gray-700 hover:bg-gray-600", base)
                        }
                    }
                >
                    "+ New Chat"
                </A>
                <input
                    type="text"
                    placeholder="Search chats..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-3 py-2 text-sm
                           border border-gray-600 focus:border-primary focus:outline-none"
                />
            </div>

            <div class="flex-1 overflow-y-auto px-2 space-y-6">
                <RecentConversations sidebar=sidebar />
                <CharacterList sidebar=sidebar />
            </div>

            <nav class="border-t border-gray-700 p-2 space-y-1">
                <NavLink href="/characters" icon="🎭" label="Characters" />
                <NavLink href="/memory" icon="🧠" label="Memory Bank" />
                <NavLink href="/tool" icon="🧰" label="Tools" />
                <NavLink href="/settings" icon="⚙️" label="Settings" />
            </nav>
        </aside>
    }
}

/// Up to three recent conversations with rename/share/delete
#[component]
fn RecentConversations(sidebar: RwSignal<SidebarState>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let location = use_location();
    let navigate = use_navigate();

    let (renaming, set_renaming) = create_signal(None::<i64>);
    let (new_title, set_new_title) = create_signal(String::new());
    let (deleting, set_deleting) = create_signal(None::<i64>);

    let start_rename = move |id: i64, title: String| {
        set_new_title.set(title);
        set_renaming.set(Some(id));
    };

    let share = move |id: i64| {
        state.show_copyable("Share link", share_url(&origin(), id));
    };

    let save_rename = Callback::new(move |_: ()| {
        let Some(id) = renaming.get_untracked() else {
            return;
        };
        let title = new_title.get_untracked().trim().to_string();
        set_renaming.set(None);
        if title.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::update_conversation(id, &ConversationPatch::rename(title)).await {
                Ok(_) => state.refresh_lists(),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(id) = deleting.get_untracked() else {
            return;
        };
        set_deleting.set(None);
        let current = AppRoute::parse(&location.pathname.get_untracked());
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::delete_conversation(id).await {
                Ok(_) => {
                    state.refresh_lists();
                    if let Some(route) = redirect_after_delete(&current, id) {
                        navigate(&route.path(), Default::default());
                    }
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    view! {
        <section>
            <h3 class="px-3 mb-2 text-xs uppercase tracking-wider text-gray-500">"Recent"</h3>
            <div class="space-y-1">
                {move || {
                    let recent: Vec<_> = sidebar.with(|s| s.recent().into_iter().cloned().collect());
                    if recent.is_empty() {
                        return view! {
                            <p class="px-3 text-sm text-gray-500">"No conversations yet"</p>
                        }.into_view();
                    }
                    recent.into_iter().map(|conv| {
                        let id = conv.id;
                        let title = conv.title.clone();
                        let row_class = if conv.is_active {
                            "bg-gray-700 text-white"
                        } else {
                            "text-gray-300 hover:bg-gray-700"
                        };
                        view! {
                            <div class=format!("group flex items-center rounded-lg {}", row_class)>
                                <A href=format!("/chat/{}", id) class="flex-1 px-3 py-2 text-sm truncate">
                                    {conv.title}
                                </A>
                                <div class="hidden group-hover:flex items-center pr-2 space-x-1 text-xs">
                                    <button title="Rename" on:click=move |_| start_rename(id, title.clone())>"✏️"</button>
                                    <button title="Share" on:click=move |_| share(id)>"🔗"</button>
                                    <button title="Delete" on:click=move |_| set_deleting.set(Some(id))>"🗑️"</button>
                                </div>
                            </div>
                        }
                    }).collect_view()
                }}
            </div>
            <Show when=move || sidebar.with(|s| s.has_more())>
                <A href="/conversations" class="block px-3 py-2 text-sm text-primary hover:underline">
                    "View All"
                </A>
            </Show>

            <Modal
                open=Signal::derive(move || renaming.get().is_some())
                title="Rename conversation"
                on_close=Callback::new(move |_| set_renaming.set(None))
            >
                <input
                    type="text"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            save_rename.call(());
                        }
                    }
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
        </section>
    }
}

/// All characters; the open character chat is highlighted
#[component]
fn CharacterList(sidebar: RwSignal<SidebarState>) -> impl IntoView {
    view! {
        <section>
            <div class="flex items-center justify-between px-3 mb-2">
                <h3 class="text-xs uppercase tracking-wider text-gray-500">"Characters"</h3>
                <A href="/character/new" class="text-xs text-primary hover:underline">"+ New"</A>
            </div>
            <div class="space-y-1">
                {move || {
                    sidebar.with(|s| s.characters.clone()).into_iter().map(|c| {
                        let class = if c.active() {
                            "flex items-center space-x-2 px-3 py-2 rounded-lg text-sm bg-gray-700 text-white"
                        } else {
                            "flex items-center space-x-2 px-3 py-2 rounded-lg text-sm text-gray-300 hover:bg-gray-700"
                        };
                        let initial = c.name.chars().next().unwrap_or('?').to_string();
                        view! {
                            <A href=format!("/characterchat/{}", c.character_id) class=class>
                                <span class="w-6 h-6 rounded-full bg-primary flex items-center justify-center text-xs">
                                    {initial}
                                </span>
                                <span class="truncate">{c.short_name().to_string()}</span>
                            </A>
                        }
                    }).collect_view()
                }}
            </div>
        </section>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    icon: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="flex items-center space-x-3 px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            <span>{icon}</span>
            <span>{label}</span>
        </A>
    }
}
