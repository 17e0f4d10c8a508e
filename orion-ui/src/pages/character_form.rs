//! Create and Edit Character Pages

use leptos::*;
use leptos_router::*;
use orion::listing::characters::{
    add_tag, remove_tag, SUGGESTED_RELATIONSHIPS, SUGGESTED_ROLES, SUGGESTED_TAGS,
};
use orion::listing::CharacterForm;
use orion::models::{CharacterPatch, CharacterPersona};

use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 \
                           border border-gray-600 focus:border-primary focus:outline-none";

/// Labelled text input bound to a getter and a setter
#[component]
fn TextField<G, S>(
    label: &'static str,
    value: G,
    on_input: S,
    #[prop(optional)]
    placeholder: &'static str,
    #[prop(optional)]
    multiline: bool,
) -> impl IntoView
where
    G: Fn() -> String + Copy + 'static,
    S: Fn(String) + Copy + 'static,
{
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            {if multiline {
                view! {
                    <textarea
                        rows="4"
                        placeholder=placeholder
                        prop:value=move || value()
                        on:input=move |ev| on_input(event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                }.into_view()
            } else {
                view! {
                    <input
                        type="text"
                        placeholder=placeholder
                        prop:value=move || value()
                        on:input=move |ev| on_input(event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                }.into_view()
            }}
        </div>
    }
}

/// Clickable suggestion chips
#[component]
fn Suggestions<F>(items: &'static [&'static str], on_pick: F) -> impl IntoView
where
    F: Fn(&'static str) + Copy + 'static,
{
    view! {
        <div class="flex flex-wrap gap-2 mt-2">
            {items.iter().map(|&item| view! {
                <button
                    type="button"
                    on:click=move |_| on_pick(item)
                    class="text-xs bg-gray-700 hover:bg-gray-600 rounded-full px-3 py-1"
                >
                    {item}
                </button>
            }).collect_view()}
        </div>
    }
}

/// Create Character page component
#[component]
pub fn CreateCharacter() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let form = create_rw_signal(CharacterForm::default());
    let saving = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let input = match form.with_untracked(|f| f.validate()) {
            Ok(input) => input,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };
        saving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_character(&input).await {
                Ok(persona) => {
                    state.refresh_lists();
                    navigate(&format!("/characterchat/{}", persona.character_id), Default::default());
                }
                Err(e) => state.show_error(&e),
            }
            saving.set(false);
        });
    };

    let append_tag = move |tag: &'static str| {
        form.update(|f| {
            if f.tags.trim().is_empty() {
                f.tags = tag.to_string();
            } else {
                f.tags = format!("{}, {}", f.tags.trim_end_matches([',', ' ']), tag);
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8 space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Create Character"</h1>
                <p class="text-gray-400 mt-1">"Describe who you want to talk to"</p>
            </div>

            <form on:submit=submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <TextField
                    label="Name *"
                    value=move || form.with(|f| f.name.clone())
                    on_input=move |v: String| form.update(|f| f.name = v)
                />
                <TextField
                    label="Short description *"
                    value=move || form.with(|f| f.short_description.clone())
                    on_input=move |v: String| form.update(|f| f.short_description = v)
                />
                <div>
                    <TextField
                        label="Relationship to you"
                        value=move || form.with(|f| f.user_relationship.clone())
                        on_input=move |v: String| form.update(|f| f.user_relationship = v)
                    />
                    <Suggestions
                        items=&SUGGESTED_RELATIONSHIPS
                        on_pick=move |s: &'static str| form.update(|f| f.user_relationship = s.to_string())
                    />
                </div>
                <div>
                    <TextField
                        label="Role"
                        value=move || form.with(|f| f.character_role.clone())
                        on_input=move |v: String| form.update(|f| f.character_role = v)
                    />
                    <Suggestions
                        items=&SUGGESTED_ROLES
                        on_pick=move |s: &'static str| form.update(|f| f.character_role = s.to_string())
                    />
                </div>
                <TextField
                    label="What should they call you?"
                    placeholder="User"
                    value=move || form.with(|f| f.user_persona_nickname.clone())
                    on_input=move |v: String| form.update(|f| f.user_persona_nickname = v)
                />
                <TextField
                    label="Greeting"
                    multiline=true
                    value=move || form.with(|f| f.greeting.clone())
                    on_input=move |v: String| form.update(|f| f.greeting = v)
                />
                <div class="grid md:grid-cols-2 gap-4">
                    <TextField
                        label="Category"
                        placeholder="general"
                        value=move || form.with(|f| f.category.clone())
                        on_input=move |v: String| form.update(|f| f.category = v)
                    />
                    <TextField
                        label="Visibility"
                        placeholder="private"
                        value=move || form.with(|f| f.visibility.clone())
                        on_input=move |v: String| form.update(|f| f.visibility = v)
                    />
                </div>
                <div>
                    <TextField
                        label="Tags (comma separated)"
                        value=move || form.with(|f| f.tags.clone())
                        on_input=move |v: String| form.update(|f| f.tags = v)
                    />
                    <Suggestions items=&SUGGESTED_TAGS on_pick=append_tag />
                </div>

                <div class="flex justify-end space-x-2 pt-2">
                    <A href="/characters" class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg">"Cancel"</A>
                    <button
                        type="submit"
                        disabled=move || saving.get()
                        class="px-4 py-2 bg-primary hover:opacity-90 disabled:opacity-50 rounded-lg font-medium"
                    >
                        {move || if saving.get() { "Creating..." } else { "Create" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Edit Character page component
#[component]
pub fn EditCharacter() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let navigate = use_navigate();

    let persona = create_rw_signal(None::<CharacterPersona>);
    let (tag_input, set_tag_input) = create_signal(String::new());

    create_effect(move |_| {
        let id = params.with(|p| p.get("id").cloned().unwrap_or_default());
        spawn_local(async move {
            match api::fetch_character(&id).await {
                Ok(p) => persona.set(Some(p)),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let edit = move |f: fn(&mut CharacterPersona, String)| {
        move |value: String| persona.update(|p| {
            if let Some(p) = p.as_mut() {
                f(p, value);
            }
        })
    };
    let field = move |f: fn(&CharacterPersona) -> String| {
        move || persona.with(|p| p.as_ref().map(f).unwrap_or_default())
    };

    let push_tag = move || {
        let raw = tag_input.get_untracked();
        persona.update(|p| {
            if let Some(p) = p.as_mut() {
                add_tag(&mut p.tags, &raw);
            }
        });
        set_tag_input.set(String::new());
    };

    let save = move |then_chat: bool| {
        let Some(current) = persona.get_untracked() else {
            return;
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::update_character(&current.character_id, &CharacterPatch::from(&current)).await {
                Ok(_) => {
                    state.show_success("Character saved");
                    state.refresh_lists();
                    if then_chat {
                        navigate(&format!("/characterchat/{}", current.character_id), Default::default());
                    }
                }
                Err(e) => state.show_error(&e),
            }
        });
    };
    let save = store_value(save);

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8 space-y-6">
            <h1 class="text-3xl font-bold">"Edit Character"</h1>

            <Show when=move || persona.with(|p| p.is_some()) fallback=|| view! { <Loading /> }>
                <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <TextField label="Name" value=field(|p| p.name.clone()) on_input=edit(|p, v| p.name = v) />
                    <TextField
                        label="Short description"
                        value=field(|p| p.short_description.clone())
                        on_input=edit(|p, v| p.short_description = v)
                    />
                    <TextField
                        label="Relationship to you"
                        value=field(|p| p.user_relationship.clone())
                        on_input=edit(|p, v| p.user_relationship = v)
                    />
                    <TextField
                        label="Role"
                        value=field(|p| p.character_role.clone())
                        on_input=edit(|p, v| p.character_role = v)
                    />
                    <TextField
                        label="What should they call you?"
                        value=field(|p| p.user_persona_nickname.clone().unwrap_or_default())
                        on_input=edit(|p, v| p.user_persona_nickname = (!v.trim().is_empty()).then_some(v))
                    />
                    <TextField
                        label="Greeting"
                        multiline=true
                        value=field(|p| p.greeting.clone())
                        on_input=edit(|p, v| p.greeting = v)
                    />
                    <TextField
                        label="Definition"
                        multiline=true
                        value=field(|p| p.definition.clone())
                        on_input=edit(|p, v| p.definition = v)
                    />
                    <div class="grid md:grid-cols-2 gap-4">
                        <TextField label="Category" value=field(|p| p.category.clone()) on_input=edit(|p, v| p.category = v) />
                        <TextField label="Visibility" value=field(|p| p.visibility.clone()) on_input=edit(|p, v| p.visibility = v) />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Tags"</label>
                        <div class="flex flex-wrap gap-2 mb-2">
                            {move || persona.with(|p| p.as_ref().map(|p| p.tags.clone()).unwrap_or_default())
                                .into_iter()
                                .map(|tag| {
                                    let label = tag.clone();
                                    view! {
                                        <span class="flex items-center text-xs bg-gray-700 rounded-full px-3 py-1">
                                            {label}
                                            <button
                                                class="ml-2 text-gray-400 hover:text-white"
                                                on:click=move |_| persona.update(|p| {
                                                    if let Some(p) = p.as_mut() {
                                                        remove_tag(&mut p.tags, &tag);
                                                    }
                                                })
                                            >
                                                "×"
                                            </button>
                                        </span>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <div class="flex space-x-2">
                            <input
                                type="text"
                                placeholder="Add a tag"
                                prop:value=move || tag_input.get()
                                on:input=move |ev| set_tag_input.set(event_target_value(&ev))
                                on:keydown=move |ev| {
                                    if ev.key() == "Enter" {
                                        push_tag();
                                    }
                                }
                                class=INPUT_CLASS
                            />
                            <button on:click=move |_| push_tag() class="px-4 bg-gray-600 hover:bg-gray-500 rounded-lg">
                                "Add"
                            </button>
                        </div>
                    </div>

                    <div class="flex justify-end space-x-2 pt-2">
                        <button
                            on:click=move |_| save.with_value(|f| f(false))
                            class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                        >
                            "Save"
                        </button>
                        <button
                            on:click=move |_| save.with_value(|f| f(true))
                            class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium"
                        >
                            "Save & Chat"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
