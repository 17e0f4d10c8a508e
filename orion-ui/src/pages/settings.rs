//! Settings Page
//!
//! Appearance, the active AI agent, backend connection and version info.

use leptos::*;
use orion::models::CharacterPersona;
use orion::store::theme::{preview_for, THEMES};

use crate::api;
use crate::state::global::GlobalState;
use crate::state::theme::use_theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Appearance,
    Agent,
    Profile,
    About,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Appearance, Tab::Agent, Tab::Profile, Tab::About];

    fn label(&self) -> &'static str {
        match self {
            Tab::Appearance => "Appearance",
            Tab::Agent => "AI Agent",
            Tab::Profile => "Profile",
            Tab::About => "About",
        }
    }
}

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    let (tab, set_tab) = create_signal(Tab::Appearance);

    view! {
        <div class="max-w-5xl mx-auto px-6 py-8 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Personalize your studio"</p>
            </div>

            <div class="flex flex-col md:flex-row gap-6">
                <nav class="md:w-48 flex md:flex-col gap-1">
                    {Tab::ALL.into_iter().map(|t| view! {
                        <button
                            on:click=move |_| set_tab.set(t)
                            class=move || {
                                let base = "text-left px-4 py-2 rounded-lg font-medium transition-colors";
                                if tab.get() == t {
                                    format!("{} bg-primary text-white", base)
                                } else {
                                    format!("{} text-gray-400 hover:bg-gray-800", base)
                                }
                            }
                        >
                            {t.label()}
                        </button>
                    }).collect_view()}
                </nav>

                <div class="flex-1">
                    {move || match tab.get() {
                        Tab::Appearance => view! { <AppearanceSettings /> }.into_view(),
                        Tab::Agent => view! { <AgentSettings /> }.into_view(),
                        Tab::Profile => view! { <ConnectionSettings /> }.into_view(),
                        Tab::About => view! { <AboutSection /> }.into_view(),
                    }}
                </div>
            </div>
        </div>
    }
}

/// Theme picker
#[component]
fn AppearanceSettings() -> impl IntoView {
    let theme = use_theme();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Color Themes"</h2>
            <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-4">
                {THEMES.iter().map(|t| {
                    let id = t.id;
                    let preview = preview_for(id);
                    view! {
                        <button
                            on:click=move |_| theme.set(id)
                            class=move || {
                                let base = "p-4 rounded-xl border-2 text-left transition-colors";
                                if theme.theme.get() == id {
                                    format!("{} border-primary", base)
                                } else {
                                    format!("{} border-gray-700 hover:border-gray-500", base)
                                }
                            }
                        >
                            <div class="flex h-10 rounded-lg overflow-hidden mb-3">
                                <div class="flex-1" style=format!("background:{}", preview.light)></div>
                                <div class="flex-1" style=format!("background:{}", preview.default)></div>
                                <div class="flex-1" style=format!("background:{}", preview.dark)></div>
                            </div>
                            <span class="font-medium">{t.name}</span>
                        </button>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}

/// Pick which character the backend treats as active
#[component]
fn AgentSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let characters = create_rw_signal(Vec::<CharacterPersona>::new());

    let reload = move || {
        spawn_local(async move {
            match api::fetch_characters().await {
                Ok(list) => characters.set(list),
                Err(e) => state.show_error(&e),
            }
        });
    };
    reload();

    let activate = move |id: String| {
        spawn_local(async move {
            match api::activate_character(&id).await {
                Ok(_) => {
                    state.show_success("Active character updated");
                    reload();
                    state.refresh_lists();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-1">"AI Agent"</h2>
            <p class="text-sm text-gray-400 mb-4">"The active character answers on the backend's behalf"</p>
            {move || {
                let list = characters.get();
                if list.is_empty() {
                    return view! { <p class="text-gray-500">"No characters yet"</p> }.into_view();
                }
                list.into_iter().map(|c| {
                    let id = c.character_id.clone();
                    let active = c.active();
                    view! {
                        <div class="flex items-center justify-between p-3 rounded-lg hover:bg-gray-700">
                            <div>
                                <div class="font-medium">{c.name}</div>
                                <div class="text-xs text-gray-400">{c.short_description}</div>
                            </div>
                            {if active {
                                view! { <span class="text-sm text-green-400">"Active"</span> }.into_view()
                            } else {
                                view! {
                                    <button
                                        on:click=move |_| activate(id.clone())
                                        class="px-3 py-1 text-sm bg-gray-600 hover:bg-gray-500 rounded-lg"
                                    >
                                        "Activate"
                                    </button>
                                }.into_view()
                            }}
                        </div>
                    }
                }).collect_view()
            }}
        </section>
    }
}

/// Backend origin
#[component]
fn ConnectionSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (backend_url, set_backend_url) = create_signal(api::get_backend_url());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_backend_url(&backend_url.get_untracked());

        spawn_local(async move {
            match api::fetch_conversations().await {
                Ok(_) => {
                    set_test_result.set(Some(true));
                    state.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_backend_url(&backend_url.get_untracked());
        state.show_success("Backend URL saved");
        state.refresh_lists();
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Backend Connection"</h2>
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Backend URL"</label>
                <div class="flex space-x-2">
                    <input
                        type="text"
                        prop:value=move || backend_url.get()
                        on:input=move |ev| set_backend_url.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary focus:outline-none"
                    />
                    <button
                        on:click=test_connection
                        disabled=move || testing.get()
                        class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700 rounded-lg font-medium"
                    >
                        {move || if testing.get() { "Testing..." } else { "Test" }}
                    </button>
                    <button on:click=save_url class="px-4 py-3 bg-primary hover:opacity-90 rounded-lg font-medium">
                        "Save"
                    </button>
                </div>
            </div>
            <div class="flex items-center space-x-2 text-sm">
                <span class="text-gray-400">"Status:"</span>
                {move || match test_result.get() {
                    Some(true) => view! { <span class="text-green-400">"Connected"</span> }.into_view(),
                    Some(false) => view! { <span class="text-red-400">"Failed"</span> }.into_view(),
                    None => view! { <span class="text-gray-400">"Not tested"</span> }.into_view(),
                }}
            </div>
        </section>
    }
}

#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About Orion"</h2>
            <div class="space-y-2 text-gray-400">
                <p>
                    <span class="text-gray-300">"Version: "</span>
                    {env!("CARGO_PKG_VERSION")}
                </p>
                <p>"Chat, roleplay characters, a memory bank and a few small tools."</p>
                <p>"Built with Rust and Leptos."</p>
            </div>
        </section>
    }
}
