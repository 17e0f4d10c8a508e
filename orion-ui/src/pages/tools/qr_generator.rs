//! QR Generator Tool
//!
//! Encodes text with the core QR encoder and paints the module matrix onto a
//! canvas.

use leptos::*;
use orion::nav::ToolPage;
use orion::tools::qr::max_bytes;
use orion::tools::{EcLevel, QrCode};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use super::ToolHeader;
use crate::state::global::GlobalState;

const CANVAS_SIZE: u32 = 288;
const QUIET_ZONE: usize = 4;

/// QR generator page component
#[component]
pub fn QrGenerator() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (text, set_text) = create_signal("https://example.com".to_string());
    let (level, set_level) = create_signal(EcLevel::Low);
    let canvas_ref = create_node_ref::<html::Canvas>();

    let code = create_memo(move |_| {
        let t = text.get();
        if t.is_empty() {
            return None;
        }
        Some(QrCode::encode_text(&t, level.get()).map_err(|e| e.to_string()))
    });

    create_effect(move |_| {
        let current = code.get();
        if let Some(canvas) = canvas_ref.get() {
            match current {
                Some(Ok(qr)) => draw_code(&canvas, &qr),
                _ => clear(&canvas),
            }
        }
    });

    let download = move |_| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        if !matches!(code.get_untracked(), Some(Ok(_))) {
            state.show_error("Nothing to download yet");
            return;
        }
        match canvas.to_data_url_with_type("image/png") {
            Ok(url) => save_as(&url, "qrcode.png"),
            Err(_) => state.show_error("Could not export the QR code"),
        }
    };

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::QrGenerator />

            <div class="bg-gray-800 rounded-xl p-6 grid md:grid-cols-2 gap-6">
                <div class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Text or URL"</label>
                        <textarea
                            rows="4"
                            prop:value=move || text.get()
                            on:input=move |ev| set_text.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary focus:outline-none"
                        />
                        <p class="text-xs text-gray-500 mt-1">
                            {move || format!("{} / {} bytes", text.with(|t| t.len()), max_bytes(level.get()))}
                        </p>
                    </div>
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Error correction"</label>
                        <select
                            on:change=move |ev| {
                                if let Some(l) = EcLevel::parse(&event_target_value(&ev)) {
                                    set_level.set(l);
                                }
                            }
                            class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600"
                        >
                            <option value="L">"Low (7%)"</option>
                            <option value="M">"Medium (15%)"</option>
                        </select>
                    </div>
                    {move || match code.get() {
                        Some(Ok(qr)) => view! {
                            <p class="text-sm text-gray-400">
                                {format!("Version {} · {}×{} modules · mask {}", qr.version(), qr.size(), qr.size(), qr.mask())}
                            </p>
                        }.into_view(),
                        Some(Err(e)) => view! { <p class="text-sm text-red-400">{e}</p> }.into_view(),
                        None => view! { <p class="text-sm text-gray-500">"Type something to encode"</p> }.into_view(),
                    }}
                </div>

                <div class="flex flex-col items-center space-y-4">
                    <canvas
                        node_ref=canvas_ref
                        width=CANVAS_SIZE
                        height=CANVAS_SIZE
                        class="rounded-lg bg-white"
                    />
                    <button on:click=download class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium">
                        "Download PNG"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn clear(canvas: &HtmlCanvasElement) {
    if let Some(ctx) = context(canvas) {
        ctx.set_fill_style(&"#ffffff".into());
        ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }
}

/// Paint dark modules scaled to the canvas, with a white quiet zone
fn draw_code(canvas: &HtmlCanvasElement, qr: &QrCode) {
    let Some(ctx) = context(canvas) else {
        return;
    };
    let side = canvas.width() as f64;
    let cells = (qr.size() + QUIET_ZONE * 2) as f64;
    let cell = side / cells;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, side, side);

    ctx.set_fill_style(&"#000000".into());
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get(x, y) {
                let px = (x + QUIET_ZONE) as f64 * cell;
                let py = (y + QUIET_ZONE) as f64 * cell;
                // Overdraw by a fraction to avoid hairline gaps
                ctx.fill_rect(px, py, cell + 0.5, cell + 0.5);
            }
        }
    }
}

fn save_as(url: &str, filename: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };
    if let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() {
        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.click();
    }
}
