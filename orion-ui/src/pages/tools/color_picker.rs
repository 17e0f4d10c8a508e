//! Color Picker Tool

use leptos::*;
use orion::nav::ToolPage;
use orion::tools::{color::palette, Harmony, Rgb};

use super::ToolHeader;
use crate::state::global::GlobalState;

const DEFAULT_COLOR: Rgb = Rgb::new(0x00, 0x77, 0xb6);

/// Color swatch with hex, RGB and HSL readouts plus harmony palettes
#[component]
pub fn ColorPicker() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (color, set_color) = create_signal(DEFAULT_COLOR);
    let (hex_input, set_hex_input) = create_signal(DEFAULT_COLOR.to_hex());
    let (harmony, set_harmony) = create_signal(Harmony::Complementary);

    // Typed hex only applies once it parses
    let on_hex = move |raw: String| {
        if let Ok(rgb) = Rgb::from_hex(&raw) {
            set_color.set(rgb);
        }
        set_hex_input.set(raw);
    };

    let pick = move |rgb: Rgb| {
        set_color.set(rgb);
        set_hex_input.set(rgb.to_hex());
    };

    let show_value = move |text: String| state.show_copyable("Color value", text);

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::ColorPicker />

            <div class="bg-gray-800 rounded-xl p-6 space-y-6">
                <div class="flex flex-col md:flex-row gap-6">
                    <div
                        class="w-full md:w-48 h-48 rounded-xl border border-gray-600"
                        style=move || format!("background:{}", color.get().to_hex())
                    ></div>

                    <div class="flex-1 space-y-3">
                        <div class="flex space-x-2">
                            <input
                                type="color"
                                prop:value=move || color.get().to_hex()
                                on:input=move |ev| on_hex(event_target_value(&ev))
                                class="w-14 h-12 bg-transparent"
                            />
                            <input
                                type="text"
                                prop:value=move || hex_input.get()
                                on:input=move |ev| on_hex(event_target_value(&ev))
                                class="flex-1 bg-gray-700 rounded-lg px-4 py-3 font-mono
                                       border border-gray-600 focus:border-primary focus:outline-none"
                            />
                        </div>
                        {move || {
                            let c = color.get();
                            let rows = [("HEX", c.to_hex()), ("RGB", c.to_string()), ("HSL", c.to_hsl().to_string())];
                            rows.into_iter().map(|(label, text)| {
                                let shown = text.clone();
                                view! {
                                    <button
                                        on:click=move |_| show_value(text.clone())
                                        class="w-full flex justify-between px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                                    >
                                        <span class="text-gray-400">{label}</span>
                                        <span class="font-mono">{shown}</span>
                                    </button>
                                }
                            }).collect_view()
                        }}
                    </div>
                </div>

                <div>
                    <div class="flex flex-wrap gap-2 mb-4">
                        {Harmony::ALL.into_iter().map(|h| view! {
                            <button
                                on:click=move |_| set_harmony.set(h)
                                class=move || {
                                    let base = "px-3 py-1 rounded-full text-sm";
                                    if harmony.get() == h {
                                        format!("{} bg-primary text-white", base)
                                    } else {
                                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                    }
                                }
                            >
                                {h.label()}
                            </button>
                        }).collect_view()}
                    </div>
                    <div class="flex rounded-xl overflow-hidden h-24">
                        {move || palette(color.get(), harmony.get()).into_iter().map(|swatch| {
                            let text_class = if swatch.is_light() { "text-gray-900" } else { "text-white" };
                            view! {
                                <button
                                    on:click=move |_| pick(swatch)
                                    class=format!("flex-1 flex items-end justify-center pb-2 text-xs font-mono {}", text_class)
                                    style=format!("background:{}", swatch.to_hex())
                                >
                                    {swatch.to_hex()}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
