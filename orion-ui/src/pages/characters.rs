//! Characters Page
//!
//! Persona gallery with search and category filter.

use leptos::*;
use leptos_router::*;
use orion::listing::characters::{categories, filter};
use orion::models::CharacterPersona;

use crate::api;
use crate::components::{ConfirmModal, ListSkeleton, RowShape};
use crate::state::global::GlobalState;

/// Characters page component
#[component]
pub fn Characters() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let characters = create_rw_signal(Vec::<CharacterPersona>::new());
    let loading = create_rw_signal(true);
    let (query, set_query) = create_signal(String::new());
    let (category, set_category) = create_signal(None::<String>);
    let (deleting, set_deleting) = create_signal(None::<CharacterPersona>);

    let reload = move || {
        spawn_local(async move {
            match api::fetch_characters().await {
                Ok(list) => characters.set(list),
                Err(e) => {
                    characters.set(Vec::new());
                    state.show_error(&e);
                }
            }
            loading.set(false);
        });
    };
    reload();

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(persona) = deleting.get_untracked() else {
            return;
        };
        set_deleting.set(None);
        spawn_local(async move {
            match api::delete_character(&persona.character_id).await {
                Ok(_) => {
                    state.show_success(&format!("{} deleted", persona.name));
                    reload();
                    state.refresh_lists();
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    view! {
        <div class="max-w-6xl mx-auto px-6 py-8 space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Characters"</h1>
                    <p class="text-gray-400 mt-1">"Personas you can roleplay with"</p>
                </div>
                <A href="/character/new" class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium">
                    "+ Create Character"
                </A>
            </div>

            <div class="flex flex-col md:flex-row gap-3">
                <input
                    type="text"
                    placeholder="Search name, description or tag..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    class="flex-1 bg-gray-800 rounded-lg px-4 py-3
                           border border-gray-700 focus:border-primary focus:outline-none"
                />
                <select
                    on:change=move |ev| {
                        // "" is the all-categories option; real categories are never empty
                        let value = event_target_value(&ev);
                        set_category.set((!value.is_empty()).then_some(value));
                    }
                    class="bg-gray-800 rounded-lg px-4 py-3 border border-gray-700 capitalize"
                >
                    <option value="" selected=move || category.with(|c| c.is_none())>"All categories"</option>
                    {move || characters.with(|c| categories(c)).into_iter().map(|cat| {
                        let label = cat.clone();
                        let value = cat.clone();
                        view! {
                            <option value=value selected=move || category.with(|c| c.as_deref() == Some(cat.as_str()))>{label}</option>
                        }
                    }).collect_view()}
                </select>
            </div>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=6 shape=RowShape::Avatar /> }.into_view();
                }
                let all = characters.get();
                let shown: Vec<CharacterPersona> =
                    filter(&all, &query.get(), category.get().as_deref()).into_iter().cloned().collect();
                if shown.is_empty() {
                    return view! {
                        <p class="text-center text-gray-500 py-12">"No characters found"</p>
                    }.into_view();
                }

                view! {
                    <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-4">
                        {shown.into_iter().map(|c| {
                            let to_delete = c.clone();
                            view! {
                                <div class="bg-gray-800 rounded-xl p-5 flex flex-col">
                                    <div class="flex items-center space-x-3 mb-3">
                                        <div class="w-12 h-12 rounded-full bg-primary flex items-center justify-center text-xl">
                                            {c.name.chars().next().unwrap_or('?').to_string()}
                                        </div>
                                        <div class="min-w-0">
                                            <h3 class="font-semibold truncate">{c.name.clone()}</h3>
                                            <p class="text-xs text-gray-400 capitalize">{c.category.clone()}</p>
                                        </div>
                                    </div>
                                    <p class="text-sm text-gray-300 flex-1">{c.short_description.clone()}</p>
                                    <div class="flex flex-wrap gap-1 my-3">
                                        {c.tags.iter().map(|t| view! {
                                            <span class="text-xs bg-gray-700 rounded px-2 py-0.5">{t.clone()}</span>
                                        }).collect_view()}
                                    </div>
                                    <div class="flex space-x-2 text-sm">
                                        <A href=format!("/characterchat/{}", c.character_id) class="flex-1 text-center px-3 py-2 bg-primary rounded-lg">
                                            "Chat"
                                        </A>
                                        <A href=format!("/character/{}/detail", c.character_id) class="px-3 py-2 bg-gray-700 rounded-lg">
                                            "View"
                                        </A>
                                        <A href=format!("/character/{}/edit", c.character_id) class="px-3 py-2 bg-gray-700 rounded-lg">
                                            "Edit"
                                        </A>
                                        <button
                                            on:click=move |_| set_deleting.set(Some(to_delete.clone()))
                                            class="px-3 py-2 bg-red-600 hover:bg-red-700 rounded-lg"
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}

            <ConfirmModal
                open=Signal::derive(move || deleting.get().is_some())
                title="Delete character"
                message=Signal::derive(move || {
                    deleting.get()
                        .map(|c| format!("{} and its chat history will be deleted.", c.name))
                        .unwrap_or_default()
                })
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |_| set_deleting.set(None))
            />
        </div>
    }
}
