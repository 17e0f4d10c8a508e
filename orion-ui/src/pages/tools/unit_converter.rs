//! Unit Converter Tool

use leptos::*;
use orion::nav::ToolPage;
use orion::tools::units::format_value;
use orion::tools::{convert, Category};

use super::ToolHeader;

const SELECT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600";

fn first_two(category: Category) -> (String, String) {
    let units = category.units();
    let from = units.first().map(|u| u.id).unwrap_or_default();
    let to = units.get(1).or(units.first()).map(|u| u.id).unwrap_or_default();
    (from.to_string(), to.to_string())
}

/// Converts a value between two units of one category
#[component]
pub fn UnitConverter() -> impl IntoView {
    let (category, set_category) = create_signal(Category::Length);
    let (value, set_value) = create_signal("1".to_string());
    let (defaults_from, defaults_to) = first_two(Category::Length);
    let (from, set_from) = create_signal(defaults_from);
    let (to, set_to) = create_signal(defaults_to);

    let pick_category = move |raw: String| {
        let Some(c) = Category::parse(&raw) else {
            return;
        };
        let (f, t) = first_two(c);
        set_category.set(c);
        set_from.set(f);
        set_to.set(t);
    };

    let swap = move |_| {
        let f = from.get_untracked();
        set_from.set(to.get_untracked());
        set_to.set(f);
    };

    let result = move || {
        let Ok(x) = value.get().trim().parse::<f64>() else {
            return "Enter a number".to_string();
        };
        match convert(category.get(), x, &from.get(), &to.get()) {
            Ok(y) => format_value(y),
            Err(e) => e.to_string(),
        }
    };

    let unit_options = move |selected: ReadSignal<String>| {
        category.get().units().iter().map(move |u| view! {
            <option value=u.id selected=move || selected.get() == u.id>
                {format!("{} ({})", u.label, u.id)}
            </option>
        }).collect_view()
    };

    view! {
        <div class="max-w-2xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::UnitConverter />

            <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Category"</label>
                    <select on:change=move |ev| pick_category(event_target_value(&ev)) class=SELECT_CLASS>
                        {Category::ALL.into_iter().map(|c| view! {
                            <option value=c.as_str() class="capitalize">{c.as_str()}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Value"</label>
                    <input
                        type="number"
                        prop:value=move || value.get()
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary focus:outline-none"
                    />
                </div>

                <div class="grid grid-cols-[1fr_auto_1fr] gap-2 items-end">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"From"</label>
                        <select on:change=move |ev| set_from.set(event_target_value(&ev)) class=SELECT_CLASS>
                            {move || unit_options(from)}
                        </select>
                    </div>
                    <button on:click=swap class="px-3 py-3 bg-gray-600 hover:bg-gray-500 rounded-lg" title="Swap">
                        "⇄"
                    </button>
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"To"</label>
                        <select on:change=move |ev| set_to.set(event_target_value(&ev)) class=SELECT_CLASS>
                            {move || unit_options(to)}
                        </select>
                    </div>
                </div>

                <div class="bg-gray-700 rounded-lg p-4 text-center">
                    <div class="text-sm text-gray-400">"Result"</div>
                    <div class="text-3xl font-bold mt-1">{result}</div>
                </div>
            </div>
        </div>
    }
}
