//! Placeholders while the backend answers

use leptos::*;

/// Centered spinner with a line saying what is being fetched
#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".into())]
    label: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-16 text-gray-400" role="status">
            <div class="loading-spinner w-8 h-8" />
            <span class="mt-3 text-sm">{label}</span>
        </div>
    }
}

/// Dots under the last message while a reply is pending
#[component]
pub fn TypingIndicator(
    #[prop(into, optional)]
    name: Option<String>,
) -> impl IntoView {
    let who = name.unwrap_or_else(|| "Orion".to_string());
    view! {
        <div class="flex items-center space-x-2 text-gray-400 text-sm px-4 py-2" aria-label=format!("{} is typing", who)>
            <span>{who}</span>
            {[0.0, 0.2, 0.4].into_iter().map(|delay| view! {
                <span class="typing-dot" style=format!("animation-delay: {}s", delay)>"●"</span>
            }).collect_view()}
        </div>
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowShape {
    /// Title and date line (conversations, memory table)
    #[default]
    Plain,
    /// Avatar circle next to a name and description (characters)
    Avatar,
}

/// Pulsing rows shaped like the list they stand in for
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
    #[prop(optional)]
    shape: RowShape,
) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|i| {
                // Stagger widths so the rows do not look stamped
                let width = ["w-2/3", "w-1/2", "w-3/4"][i % 3];
                view! {
                    <div class="flex items-center bg-gray-800 rounded-lg p-3 space-x-3">
                        {(shape == RowShape::Avatar).then(|| view! {
                            <div class="w-10 h-10 rounded-full bg-gray-700 shrink-0" />
                        })}
                        <div class="flex-1 space-y-2">
                            <div class=format!("h-3 bg-gray-700 rounded {}", width) />
                            <div class="h-2 bg-gray-700 rounded w-1/3" />
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
