//! Todo List Tool

use leptos::*;
use orion::nav::ToolPage;
use orion::store::StoreError;
use orion::tools::{Todo, TodoList};

use super::ToolHeader;
use crate::state::global::GlobalState;
use crate::state::BrowserStore;

/// Todo list kept in local storage
#[component]
pub fn TodoListTool() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let list = store_value(TodoList::load(BrowserStore));
    let items = create_rw_signal(list.with_value(|l| l.items().to_vec()));
    let (input, set_input) = create_signal(String::new());

    // Apply a change, then refresh the rendered snapshot
    let mutate = move |f: &dyn Fn(&mut TodoList<BrowserStore>) -> Result<(), StoreError>| {
        list.update_value(|l| {
            if let Err(e) = f(l) {
                state.show_error(&format!("Could not save todos: {}", e));
            }
        });
        items.set(list.with_value(|l| l.items().to_vec()));
    };

    let add = move || {
        let text = input.get_untracked();
        mutate(&|l| l.add(&text).map(|_| ()));
        set_input.set(String::new());
    };

    let remaining = move || items.with(|i| i.iter().filter(|t| !t.completed).count());
    let has_completed = move || items.with(|i| i.iter().any(|t| t.completed));

    view! {
        <div class="max-w-2xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::TodoList />

            <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="flex space-x-2">
                    <input
                        type="text"
                        placeholder="What needs doing?"
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                add();
                            }
                        }
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary focus:outline-none"
                    />
                    <button on:click=move |_| add() class="px-4 bg-primary hover:opacity-90 rounded-lg font-medium">
                        "Add"
                    </button>
                </div>

                <ul class="divide-y divide-gray-700">
                    <For
                        each=move || items.get()
                        key=|todo: &Todo| (todo.id, todo.completed)
                        children=move |todo: Todo| {
                            let id = todo.id;
                            view! {
                                <li class="flex items-center py-3">
                                    <input
                                        type="checkbox"
                                        checked=todo.completed
                                        on:change=move |_| mutate(&|l| l.toggle(id).map(|_| ()))
                                        class="mr-3 w-4 h-4"
                                    />
                                    <span class=if todo.completed { "flex-1 line-through text-gray-500" } else { "flex-1" }>
                                        {todo.text}
                                    </span>
                                    <button
                                        on:click=move |_| mutate(&|l| l.remove(id).map(|_| ()))
                                        class="text-gray-500 hover:text-red-400"
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>

                <div class="flex items-center justify-between text-sm text-gray-400">
                    <span>{move || format!("{} remaining", remaining())}</span>
                    <Show when=has_completed>
                        <button
                            on:click=move |_| mutate(&|l| l.clear_completed().map(|_| ()))
                            class="hover:text-white"
                        >
                            "Clear completed"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
