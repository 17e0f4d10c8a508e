//! Modal dialogs

use leptos::*;

/// Centered dialog over a dimmed backdrop; clicking the backdrop closes it
#[component]
pub fn Modal(
    #[prop(into)]
    open: Signal<bool>,
    #[prop(into)]
    title: String,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div
                class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center"
                on:click=move |_| on_close.call(())
            >
                <div
                    class="bg-gray-800 rounded-xl p-6 w-full max-w-md shadow-xl"
                    on:click=|ev| ev.stop_propagation()
                >
                    <h2 class="text-xl font-semibold mb-4">{title.clone()}</h2>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

/// Yes/no confirmation for destructive actions
#[component]
pub fn ConfirmModal(
    #[prop(into)]
    open: Signal<bool>,
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: Signal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(default = "Delete")]
    confirm_label: &'static str,
) -> impl IntoView {
    view! {
        <Modal open=open title=title on_close=on_cancel>
            <p class="text-gray-300 mb-6">{move || message.get()}</p>
            <div class="flex justify-end space-x-2">
                <button
                    on:click=move |_| on_cancel.call(())
                    class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg transition-colors"
                >
                    "Cancel"
                </button>
                <button
                    on:click=move |_| on_confirm.call(())
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
                >
                    {confirm_label}
                </button>
            </div>
        </Modal>
    }
}
