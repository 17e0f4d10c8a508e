//! Chat Page
//!
//! General chat keyed by the `:id` route param. A first exchange creates the
//! conversation and rewrites the URL in place.

use leptos::*;
use leptos_router::*;
use orion::listing::suggestions;
use orion::models::{
    clock_label, date_label, title_snippet, ConversationMessage, MessageKind, NewConversation,
    Reaction, DEFAULT_MODEL,
};
use orion::nav::Route as AppRoute;
use orion::session::CHAT_FALLBACK;

use crate::api;
use crate::components::{Loading, TypingIndicator};
use crate::state::global::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatState {
    NoConversation,
    Loading,
    Ready,
}

/// Chat page component
#[component]
pub fn Chat() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let navigate = use_navigate();

    let route_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));

    let chat_state = create_rw_signal(ChatState::NoConversation);
    let conversation_id = create_rw_signal(None::<i64>);
    let messages = create_rw_signal(Vec::<ConversationMessage>::new());
    let pending = create_rw_signal(false);
    let (input, set_input) = create_signal(String::new());

    // Replies from an older generation are dropped: cancel and navigation
    // both bump it.
    let generation = store_value(0u64);
    let last_message_id = store_value(0i64);

    let next_message_id = move || {
        let now = chrono::Utc::now().timestamp_millis();
        last_message_id.update_value(|last| *last = now.max(*last + 1));
        last_message_id.get_value()
    };

    create_effect(move |_| {
        let target = route_id();
        if target.is_some() && target == conversation_id.get_untracked() {
            return;
        }

        generation.update_value(|g| *g += 1);
        pending.set(false);

        match target {
            None => {
                conversation_id.set(None);
                messages.set(Vec::new());
                chat_state.set(ChatState::NoConversation);
            }
            Some(id) => {
                chat_state.set(ChatState::Loading);
                let expected = generation.get_value();
                spawn_local(async move {
                    let result = api::fetch_conversation(id).await;
                    if generation.get_value() != expected {
                        return;
                    }
                    match result {
                        Ok(conversation) => {
                            conversation_id.set(Some(conversation.id));
                            messages.set(conversation.messages);
                            chat_state.set(ChatState::Ready);
                        }
                        Err(_) => {
                            conversation_id.set(None);
                            messages.set(Vec::new());
                            chat_state.set(ChatState::NoConversation);
                        }
                    }
                });
            }
        }
    });

    let send = move |text: String| {
        let prompt = text.trim().to_string();
        if prompt.is_empty() || pending.get_untracked() {
            return;
        }
        set_input.set(String::new());

        let user_message =
            ConversationMessage::sent(next_message_id(), prompt.clone(), clock_label(chrono::Local::now()));
        messages.update(|m| m.push(user_message.clone()));
        pending.set(true);

        generation.update_value(|g| *g += 1);
        let expected = generation.get_value();
        let conv_id = conversation_id.get_untracked();
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = api::send_chat(&prompt, DEFAULT_MODEL, conv_id).await;
            if generation.get_value() != expected {
                return;
            }
            pending.set(false);

            let reply = match result {
                Ok(reply) => reply,
                Err(_) => {
                    let fallback = ConversationMessage::received(
                        next_message_id(),
                        CHAT_FALLBACK,
                        clock_label(chrono::Local::now()),
                    );
                    messages.update(|m| m.push(fallback));
                    return;
                }
            };

            let reply_message = ConversationMessage::received(
                next_message_id(),
                reply.response,
                clock_label(chrono::Local::now()),
            )
            .with_tool_action(reply.tool_action);
            messages.update(|m| m.push(reply_message.clone()));

            match conv_id {
                Some(id) => {
                    for message in [&user_message, &reply_message] {
                        if let Err(e) = api::add_message(id, message).await {
                            state.show_error(&e);
                            return;
                        }
                    }
                    if let Ok(conversation) = api::fetch_conversation(id).await {
                        if generation.get_value() == expected {
                            messages.set(conversation.messages);
                        }
                    }
                }
                None => {
                    let conversation = NewConversation {
                        title: title_snippet(&prompt),
                        smart_tags: Vec::new(),
                        is_active: true,
                        last_updated: date_label(chrono::Local::now()),
                        messages: vec![user_message, reply_message],
                    };
                    match api::create_conversation(&conversation).await {
                        Ok(created) => {
                            conversation_id.set(Some(created.id));
                            chat_state.set(ChatState::Ready);
                            navigate(
                                &AppRoute::Chat(Some(created.id)).path(),
                                NavigateOptions {
                                    replace: true,
                                    ..Default::default()
                                },
                            );
                        }
                        Err(e) => state.show_error(&e),
                    }
                }
            }
        });
    };
    let send = store_value(send);

    let cancel = move |_| {
        generation.update_value(|g| *g += 1);
        pending.set(false);
    };

    let react = move |id: i64, reaction: Reaction| {
        messages.update(|m| {
            if let Some(message) = m.iter_mut().find(|m| m.id == id) {
                message.reactions.toggle(reaction);
            }
        });
    };

    view! {
        <div class="flex flex-col h-full">
            <div class="flex-1 overflow-y-auto px-6 py-8">
                {move || match chat_state.get() {
                    ChatState::Loading => view! { <Loading label="Loading conversation..." /> }.into_view(),
                    _ if messages.with(|m| m.is_empty()) => view! {
                        <EmptyChat input=input on_pick=move |s: String| send.with_value(|f| f(s)) />
                    }.into_view(),
                    _ => view! {
                        <div class="max-w-3xl mx-auto space-y-4">
                            <For
                                each=move || messages.get()
                                key=|m| (m.id, m.reactions.likes, m.reactions.dislikes)
                                children=move |m| view! { <MessageBubble message=m on_react=react /> }
                            />
                        </div>
                    }.into_view(),
                }}
                <Show when=move || pending.get()>
                    <div class="max-w-3xl mx-auto">
                        <TypingIndicator name="Orion" />
                    </div>
                </Show>
            </div>

            <div class="border-t border-gray-700 p-4">
                <div class="max-w-3xl mx-auto flex space-x-2">
                    <input
                        type="text"
                        placeholder="Type a message..."
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                send.with_value(|f| f(input.get_untracked()));
                            }
                        }
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary focus:outline-none"
                    />
                    {move || if pending.get() {
                        view! {
                            <button
                                on:click=cancel
                                class="px-5 py-3 bg-gray-600 hover:bg-gray-500 rounded-lg font-medium"
                            >
                                "Stop"
                            </button>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                on:click=move |_| send.with_value(|f| f(input.get_untracked()))
                                class="px-5 py-3 bg-primary hover:opacity-90 rounded-lg font-medium"
                            >
                                "Send"
                            </button>
                        }.into_view()
                    }}
                </div>
            </div>
        </div>
    }
}

/// Welcome screen with suggestions filtered by the current input
#[component]
fn EmptyChat<F>(input: ReadSignal<String>, on_pick: F) -> impl IntoView
where
    F: Fn(String) + Copy + 'static,
{
    view! {
        <div class="max-w-2xl mx-auto text-center mt-16">
            <div class="text-5xl mb-4">"✨"</div>
            <h1 class="text-3xl font-bold mb-2">"How can I help you today?"</h1>
            <p class="text-gray-400 mb-8">"Ask anything, or start from a suggestion."</p>
            <div class="grid sm:grid-cols-2 gap-3">
                {move || {
                    suggestions::matching(&input.get())
                        .into_iter()
                        .map(|s| view! {
                            <button
                                on:click=move |_| on_pick(s.to_string())
                                class="text-left bg-gray-800 hover:bg-gray-700 rounded-lg px-4 py-3 text-sm transition-colors"
                            >
                                {s}
                            </button>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn MessageBubble<F>(message: ConversationMessage, on_react: F) -> impl IntoView
where
    F: Fn(i64, Reaction) + Copy + 'static,
{
    let id = message.id;
    let sent = message.kind == MessageKind::Sent;
    let (row, bubble) = if sent {
        ("flex justify-end", "bg-primary text-white")
    } else {
        ("flex justify-start", "bg-gray-800 text-gray-100")
    };
    let tool_summary = message.tool_action.as_ref().and_then(|a| a.summary());
    let liked = message.reactions.likes > 0;
    let disliked = message.reactions.dislikes > 0;

    view! {
        <div class=row>
            <div class="max-w-[80%]">
                <div class=format!("rounded-xl px-4 py-3 whitespace-pre-wrap {}", bubble)>
                    {message.content}
                </div>
                {tool_summary.map(|s| view! {
                    <div class="mt-1 text-xs text-gray-400 italic">{s}</div>
                })}
                <div class="flex items-center space-x-2 mt-1 text-xs text-gray-500">
                    <span>{message.timestamp}</span>
                    <Show when=move || !sent>
                        <button
                            class=if liked { "text-green-400" } else { "hover:text-gray-300" }
                            on:click=move |_| on_react(id, Reaction::Like)
                        >
                            "👍"
                        </button>
                        <button
                            class=if disliked { "text-red-400" } else { "hover:text-gray-300" }
                            on:click=move |_| on_react(id, Reaction::Dislike)
                        >
                            "👎"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
