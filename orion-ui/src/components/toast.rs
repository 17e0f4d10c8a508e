//! Notice stack in the bottom-right corner
//!
//! Renders [`GlobalState::notices`]. Save and activation results, backend
//! failures, share links and picked colors all land here.

use leptos::*;

use crate::state::global::{GlobalState, Notice, NoticeKind};

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-6 right-4 z-50 flex flex-col items-end space-y-2" aria-live="polite">
            <For
                each=move || state.notices.get()
                key=|n| n.id
                children=move |notice| view! { <NoticeCard notice=notice /> }
            />
        </div>
    }
}

#[component]
fn NoticeCard(notice: Notice) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let id = notice.id;

    let (icon, tone) = match notice.kind {
        NoticeKind::Success => ("✓", "bg-green-600"),
        NoticeKind::Error => ("!", "bg-red-600"),
        NoticeKind::Copyable => ("⧉", "bg-gray-700 border border-gray-600"),
    };

    view! {
        <div
            role=if notice.kind == NoticeKind::Error { "alert" } else { "status" }
            class=format!("w-80 {} text-white px-4 py-3 rounded-lg shadow-lg", tone)
        >
            <div class="flex items-start space-x-3">
                <span class="font-bold">{icon}</span>
                <span class="flex-1 text-sm font-medium break-words">{notice.text}</span>
                <button
                    on:click=move |_| state.dismiss(id)
                    class="text-white/70 hover:text-white"
                    title="Dismiss"
                >
                    "×"
                </button>
            </div>
            {notice.value.map(|value| view! {
                <input
                    type="text"
                    readonly
                    prop:value=value
                    on:focus=|ev| event_target::<web_sys::HtmlInputElement>(&ev).select()
                    class="mt-2 w-full bg-gray-900 rounded px-2 py-1 text-xs font-mono"
                />
            })}
        </div>
    }
}
