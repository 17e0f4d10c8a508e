//! Character Chat Page
//!
//! Roleplay with one persona. The transcript is saved one second after the
//! last change; the pending save is replaced on every change and dropped
//! when the page goes away.

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_router::*;
use orion::models::{clock_label, CharacterPersona, CharacterTurn, Speaker, DEFAULT_MODEL};
use orion::session::transcript::user_turns;
use orion::session::{build_prompt, greeting_turns, opening_turns, should_save, CHARACTER_FALLBACK, HISTORY_TURNS};

use crate::api;
use crate::components::{ConfirmModal, Loading, TypingIndicator};
use crate::state::global::GlobalState;

/// Quiet period before the transcript is saved
const SAVE_DEBOUNCE_MS: u32 = 1000;

/// Replies are held back at least this long so the typing dots show
const MIN_TYPING_MS: f64 = 600.0;

fn now_label() -> String {
    clock_label(chrono::Local::now())
}

/// What a confirm dialog is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Reset,
    Delete,
}

/// Character chat page component
#[component]
pub fn CharacterChat() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let navigate = use_navigate();

    let character_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let persona = create_rw_signal(None::<CharacterPersona>);
    let turns = create_rw_signal(Vec::<CharacterTurn>::new());
    let typing = create_rw_signal(false);
    let (input, set_input) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(None::<Pending>);

    let saver = store_value(None::<Timeout>);
    let generation = store_value(0u64);

    on_cleanup(move || saver.set_value(None));

    let schedule_save = move || {
        let current = turns.get_untracked();
        if !should_save(&current) {
            saver.set_value(None);
            return;
        }
        let Some(id) = persona.with_untracked(|p| p.as_ref().map(|p| p.character_id.clone())) else {
            return;
        };
        let timer = Timeout::new(SAVE_DEBOUNCE_MS, move || {
            spawn_local(async move {
                if let Err(e) = api::save_character_conversation(&id, &current).await {
                    state.show_error(&e);
                }
            });
        });
        // Replacing the old timer drops it, which cancels it
        saver.set_value(Some(timer));
    };

    create_effect(move |_| {
        let id = character_id();
        saver.set_value(None);
        generation.update_value(|g| *g += 1);
        let expected = generation.get_value();
        persona.set(None);
        turns.set(Vec::new());
        typing.set(false);

        let navigate = navigate.clone();
        spawn_local(async move {
            let loaded = match api::fetch_character(&id).await {
                Ok(p) => p,
                Err(e) => {
                    state.show_error(&e);
                    navigate("/characters", Default::default());
                    return;
                }
            };
            let opening = match api::fetch_character_conversation(&id).await {
                Ok(saved) => opening_turns(&loaded, &saved, &now_label()),
                Err(_) => greeting_turns(&loaded, &now_label()),
            };
            if generation.get_value() != expected {
                return;
            }
            turns.set(opening);
            persona.set(Some(loaded));
        });
    });

    let send = move |text: String| {
        let message = text.trim().to_string();
        if message.is_empty() || typing.get_untracked() {
            return;
        }
        let Some(current) = persona.get_untracked() else {
            return;
        };
        set_input.set(String::new());

        let prompt = turns.with_untracked(|t| build_prompt(&current, t, &message, HISTORY_TURNS));
        turns.update(|t| t.push(CharacterTurn::user(message, now_label())));
        schedule_save();
        typing.set(true);

        let expected = generation.get_value();
        let started = js_sys::Date::now();
        spawn_local(async move {
            let result = api::send_chat(&prompt, DEFAULT_MODEL, None).await;
            let waited = js_sys::Date::now() - started;
            if waited < MIN_TYPING_MS {
                TimeoutFuture::new((MIN_TYPING_MS - waited) as u32).await;
            }
            if generation.get_value() != expected {
                return;
            }

            let line = match result {
                Ok(reply) => reply.response,
                Err(_) => CHARACTER_FALLBACK.to_string(),
            };
            turns.update(|t| t.push(CharacterTurn::character(line, now_label())));
            typing.set(false);
            schedule_save();
        });
    };

    // Delete the saved transcript; `reseed` restores the greeting afterwards
    let clear_transcript = move |reseed: bool| {
        saver.set_value(None);
        let Some(current) = persona.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::delete_character_conversation(&current.character_id).await {
                Ok(_) => {
                    let next = if reseed {
                        greeting_turns(&current, &now_label())
                    } else {
                        Vec::new()
                    };
                    turns.set(next);
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let on_confirm = Callback::new(move |_: ()| {
        match confirm.get_untracked() {
            Some(Pending::Reset) => clear_transcript(true),
            Some(Pending::Delete) => clear_transcript(false),
            None => {}
        }
        set_confirm.set(None);
    });

    view! {
        <div class="flex h-full">
            <div class="flex-1 flex flex-col">
                {move || match persona.get() {
                    None => view! { <Loading label="Loading character..." /> }.into_view(),
                    Some(p) => {
                        let name = p.short_name().to_string();
                        let typing_name = name.clone();
                        let full_name = p.name.clone();
                        let role = p.character_role.clone();
                        view! {
                            <header class="flex items-center justify-between px-6 h-16 border-b border-gray-700">
                                <div>
                                    <h1 class="text-lg font-semibold">{full_name}</h1>
                                    <p class="text-xs text-gray-400">{role}</p>
                                </div>
                                <div class="flex space-x-2 text-sm">
                                    <button
                                        on:click=move |_| set_confirm.set(Some(Pending::Reset))
                                        class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg"
                                    >
                                        "Reset"
                                    </button>
                                    <button
                                        on:click=move |_| set_confirm.set(Some(Pending::Delete))
                                        class="px-3 py-1 bg-red-600 hover:bg-red-700 rounded-lg"
                                    >
                                        "Delete"
                                    </button>
                                </div>
                            </header>
                            <div class="flex-1 overflow-y-auto px-6 py-6 space-y-3">
                                {move || turns.get().into_iter().map(|turn| {
                                    view! { <TurnBubble turn=turn name=name.clone() /> }
                                }).collect_view()}
                                <Show when=move || typing.get()>
                                    <TypingIndicator name=typing_name.clone() />
                                </Show>
                            </div>
                        }.into_view()
                    }
                }}

                <div class="border-t border-gray-700 p-4 flex space-x-2">
                    <input
                        type="text"
                        placeholder="Say something..."
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                send(input.get_untracked());
                            }
                        }
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary focus:outline-none"
                    />
                    <button
                        on:click=move |_| send(input.get_untracked())
                        disabled=move || typing.get()
                        class="px-5 py-3 bg-primary hover:opacity-90 disabled:opacity-50 rounded-lg font-medium"
                    >
                        "Send"
                    </button>
                </div>
            </div>

            <SidePanel persona=persona turns=turns on_new_chat=move || clear_transcript(true) />

            <ConfirmModal
                open=Signal::derive(move || confirm.get().is_some())
                title="Are you sure?"
                message=Signal::derive(move || match confirm.get() {
                    Some(Pending::Reset) => "The conversation will be deleted and restart from the greeting.".to_string(),
                    _ => "The conversation will be deleted.".to_string(),
                })
                on_confirm=on_confirm
                on_cancel=Callback::new(move |_| set_confirm.set(None))
                confirm_label="Confirm"
            />
        </div>
    }
}

#[component]
fn TurnBubble(turn: CharacterTurn, name: String) -> impl IntoView {
    let (row, bubble, speaker) = match turn.speaker {
        Speaker::User => ("flex justify-end", "bg-primary text-white", "You".to_string()),
        Speaker::Character => ("flex justify-start", "bg-gray-800 text-gray-100", name),
    };

    view! {
        <div class=row>
            <div class="max-w-[75%]">
                <div class="text-xs text-gray-500 mb-1">{speaker}" · "{turn.timestamp}</div>
                <div class=format!("rounded-xl px-4 py-3 whitespace-pre-wrap {}", bubble)>
                    {turn.content}
                </div>
            </div>
        </div>
    }
}

/// Persona summary, turn counter and a fresh-start button
#[component]
fn SidePanel<F>(
    persona: RwSignal<Option<CharacterPersona>>,
    turns: RwSignal<Vec<CharacterTurn>>,
    on_new_chat: F,
) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    view! {
        <aside class="w-72 shrink-0 border-l border-gray-700 p-6 space-y-4 hidden lg:block">
            {move || persona.get().map(|p| view! {
                <div class="space-y-2">
                    <div class="w-16 h-16 rounded-full bg-primary flex items-center justify-center text-2xl">
                        {p.name.chars().next().unwrap_or('?').to_string()}
                    </div>
                    <h2 class="text-lg font-semibold">{p.name.clone()}</h2>
                    <p class="text-sm text-gray-400">{p.short_description.clone()}</p>
                    <dl class="text-sm space-y-1">
                        <div><dt class="inline text-gray-500">"Relationship: "</dt><dd class="inline">{p.user_relationship.clone()}</dd></div>
                        <div><dt class="inline text-gray-500">"Calls you: "</dt><dd class="inline">{p.user_nickname().to_string()}</dd></div>
                    </dl>
                    <A href=format!("/character/{}/detail", p.character_id) class="text-sm text-primary hover:underline">
                        "View profile"
                    </A>
                </div>
            })}
            <div class="text-sm text-gray-400">
                {move || format!("{} messages from you", turns.with(|t| user_turns(t)))}
            </div>
            <button
                on:click=move |_| on_new_chat()
                class="w-full px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
            >
                "New chat"
            </button>
        </aside>
    }
}
