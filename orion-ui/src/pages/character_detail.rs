//! Character Detail Page

use leptos::*;
use leptos_router::*;
use orion::models::CharacterPersona;

use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;

/// Read-only persona profile with chat and edit actions
#[component]
pub fn CharacterDetail() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let persona = create_rw_signal(None::<CharacterPersona>);
    let activating = create_rw_signal(false);

    create_effect(move |_| {
        let id = params.with(|p| p.get("id").cloned().unwrap_or_default());
        spawn_local(async move {
            match api::fetch_character(&id).await {
                Ok(p) => persona.set(Some(p)),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let activate = move |_| {
        let Some(id) = persona.with_untracked(|p| p.as_ref().map(|p| p.character_id.clone())) else {
            return;
        };
        activating.set(true);
        spawn_local(async move {
            match api::activate_character(&id).await {
                Ok(_) => {
                    persona.update(|p| {
                        if let Some(p) = p.as_mut() {
                            p.is_active = Some(true);
                        }
                    });
                    state.show_success("Character activated");
                    state.refresh_lists();
                }
                Err(e) => state.show_error(&e),
            }
            activating.set(false);
        });
    };

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8">
            {move || match persona.get() {
                None => view! { <Loading label="Loading character..." /> }.into_view(),
                Some(p) => view! {
                    <div class="bg-gray-800 rounded-xl p-8 space-y-6">
                        <div class="flex items-center space-x-4">
                            <div class="w-20 h-20 rounded-full bg-primary flex items-center justify-center text-3xl">
                                {p.name.chars().next().unwrap_or('?').to_string()}
                            </div>
                            <div>
                                <h1 class="text-3xl font-bold">{p.name.clone()}</h1>
                                <p class="text-gray-400">{p.short_description.clone()}</p>
                                <p class="text-xs text-gray-500 mt-1 capitalize">
                                    {format!("{} · {}", p.category, p.visibility)}
                                </p>
                            </div>
                        </div>

                        <dl class="grid md:grid-cols-2 gap-4 text-sm">
                            <Detail label="Relationship" value=p.user_relationship.clone() />
                            <Detail label="Role" value=p.character_role.clone() />
                            <Detail label="Calls you" value=p.user_nickname().to_string() />
                            <Detail label="Voice" value=p.voice_id.clone().unwrap_or_else(|| "Default".to_string()) />
                        </dl>

                        <div>
                            <h2 class="text-sm text-gray-400 mb-1">"Greeting"</h2>
                            <p class="italic whitespace-pre-wrap">{p.greeting.clone()}</p>
                        </div>

                        <div>
                            <h2 class="text-sm text-gray-400 mb-1">"Definition"</h2>
                            <p class="whitespace-pre-wrap text-gray-300">{p.definition.clone()}</p>
                        </div>

                        <div class="flex flex-wrap gap-2">
                            {p.tags.iter().map(|t| view! {
                                <span class="text-xs bg-gray-700 rounded-full px-3 py-1">{t.clone()}</span>
                            }).collect_view()}
                        </div>

                        <div class="flex space-x-2">
                            <A href=format!("/characterchat/{}", p.character_id) class="px-4 py-2 bg-primary rounded-lg font-medium">
                                "Chat"
                            </A>
                            <A href=format!("/character/{}/edit", p.character_id) class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">
                                "Edit"
                            </A>
                            <button
                                on:click=activate
                                disabled=move || activating.get() || persona.with(|p| p.as_ref().map_or(false, |p| p.active()))
                                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded-lg"
                            >
                                {move || if persona.with(|p| p.as_ref().map_or(false, |p| p.active())) { "Active" } else { "Set active" }}
                            </button>
                        </div>
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-gray-400">{label}</dt>
            <dd>{if value.is_empty() { "-".to_string() } else { value }}</dd>
        </div>
    }
}
