//! Mood Board Tool
//!
//! Draggable sticky notes and images. The board is written to local storage
//! after every change; a drag is saved once, on release.

use leptos::*;
use orion::nav::ToolPage;
use orion::store::StoreError;
use orion::tools::mood_board::{clamp_position, NOTE_COLORS};
use orion::tools::{MoodBoard, Note, NoteKind, Roll};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::ToolHeader;
use crate::components::ConfirmModal;
use crate::state::global::GlobalState;
use crate::state::BrowserStore;

type Board = MoodBoard<BrowserStore>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    id: i64,
    /// Pointer offset from the note's top-left corner
    dx: f64,
    dy: f64,
}

fn roll() -> Roll {
    Roll::random(&mut rand::thread_rng())
}

/// Mood board page component
#[component]
pub fn MoodBoardTool() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let board = store_value(MoodBoard::load(BrowserStore));
    let notes = create_rw_signal(board.with_value(|b| b.notes().to_vec()));
    let (drag, set_drag) = create_signal(None::<Drag>);
    let (editing, set_editing) = create_signal(None::<i64>);
    let (image_url, set_image_url) = create_signal(String::new());
    let (confirm_clear, set_confirm_clear) = create_signal(false);
    let board_ref = create_node_ref::<html::Div>();

    let mutate = move |f: &dyn Fn(&mut Board) -> Result<(), StoreError>| {
        board.update_value(|b| {
            if let Err(e) = f(b) {
                state.show_error(&format!("Could not save board: {}", e));
            }
        });
        notes.set(board.with_value(|b| b.notes().to_vec()));
    };

    let bounds = move || {
        board_ref
            .get_untracked()
            .map(|el| el.get_bounding_client_rect())
            .map(|r| (r.left(), r.top(), r.width(), r.height()))
    };

    let add_image = move |data_url: String| {
        if data_url.trim().is_empty() {
            return;
        }
        mutate(&|b| b.add_image(data_url.trim(), roll()).map(|_| ()));
    };

    let on_file = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let Ok(reader) = web_sys::FileReader::new() else {
            state.show_error("File upload is not supported here");
            return;
        };

        let onload = {
            let reader = reader.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(url) = reader.result().ok().and_then(|r| r.as_string()) {
                    add_image(url);
                }
            }) as Box<dyn FnMut(_)>)
        };
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        if reader.read_as_data_url(&file).is_err() {
            state.show_error("Could not read the image");
        }
        input.set_value("");
    };

    let start_drag = move |ev: ev::MouseEvent, note: &Note| {
        if editing.get_untracked() == Some(note.id) {
            return;
        }
        let Some((left, top, _, _)) = bounds() else {
            return;
        };
        set_drag.set(Some(Drag {
            id: note.id,
            dx: ev.client_x() as f64 - left - note.x,
            dy: ev.client_y() as f64 - top - note.y,
        }));
    };

    // Only the rendered copy moves while dragging
    let on_move = move |ev: ev::MouseEvent| {
        let Some(d) = drag.get_untracked() else {
            return;
        };
        let Some((left, top, width, height)) = bounds() else {
            return;
        };
        let (x, y) = clamp_position(
            ev.client_x() as f64 - left - d.dx,
            ev.client_y() as f64 - top - d.dy,
            width,
            height,
        );
        notes.update(|list| {
            if let Some(n) = list.iter_mut().find(|n| n.id == d.id) {
                n.x = x;
                n.y = y;
            }
        });
    };

    let end_drag = move |_| {
        let Some(d) = drag.get_untracked() else {
            return;
        };
        set_drag.set(None);
        let Some((_, _, width, height)) = bounds() else {
            return;
        };
        let Some((x, y)) = notes.with_untracked(|list| list.iter().find(|n| n.id == d.id).map(|n| (n.x, n.y))) else {
            return;
        };
        mutate(&|b| b.move_to(d.id, x, y, (width, height)).map(|_| ()));
    };

    view! {
        <div class="max-w-6xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::MoodBoard />

            <div class="flex flex-wrap items-center gap-2 mb-4">
                <button
                    on:click=move |_| mutate(&|b| b.add_text(roll()).map(|_| ()))
                    class="px-4 py-2 bg-primary hover:opacity-90 rounded-lg font-medium"
                >
                    "+ Note"
                </button>
                <label class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg cursor-pointer">
                    "+ Image"
                    <input type="file" accept="image/*" class="hidden" on:change=on_file />
                </label>
                <input
                    type="text"
                    placeholder="or paste an image URL"
                    prop:value=move || image_url.get()
                    on:input=move |ev| set_image_url.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            add_image(image_url.get_untracked());
                            set_image_url.set(String::new());
                        }
                    }
                    class="flex-1 min-w-[12rem] bg-gray-800 rounded-lg px-4 py-2
                           border border-gray-700 focus:border-primary focus:outline-none"
                />
                <button
                    on:click=move |_| set_confirm_clear.set(true)
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg"
                >
                    "Clear"
                </button>
            </div>

            <div
                node_ref=board_ref
                on:mousemove=on_move
                on:mouseup=end_drag
                on:mouseleave=end_drag
                class="relative h-[600px] bg-gray-800 rounded-xl overflow-hidden border border-gray-700 select-none"
            >
                <For
                    each=move || notes.get()
                    key=|note: &Note| note.id
                    children=move |note: Note| {
                        let id = note.id;
                        let kind = note.kind;
                        let current = move || notes.with(|list| list.iter().find(|n| n.id == id).cloned());
                        view! {
                            <div
                                class="absolute rounded-lg shadow-lg text-gray-900 cursor-move group"
                                style=move || current().map(|n| format!(
                                    "left:{}px;top:{}px;width:{}px;height:{}px;background:{}",
                                    n.x, n.y, n.width, n.height, n.color
                                )).unwrap_or_default()
                                on:mousedown=move |ev| {
                                    if let Some(n) = current() {
                                        start_drag(ev, &n);
                                    }
                                }
                                on:dblclick=move |_| {
                                    if kind == NoteKind::Text {
                                        set_editing.set(Some(id));
                                    }
                                }
                            >
                                <button
                                    on:mousedown=|ev| ev.stop_propagation()
                                    on:click=move |_| mutate(&|b| b.delete(id).map(|_| ()))
                                    class="absolute top-1 right-2 hidden group-hover:block text-gray-600 hover:text-red-600"
                                >
                                    "×"
                                </button>
                                {move || match (kind, editing.get() == Some(id)) {
                                    (NoteKind::Image, _) => view! {
                                        <img
                                            src=current().map(|n| n.content).unwrap_or_default()
                                            class="w-full h-full object-cover rounded-lg pointer-events-none"
                                        />
                                    }.into_view(),
                                    (NoteKind::Text, true) => view! {
                                        <textarea
                                            prop:value=current().map(|n| n.content).unwrap_or_default()
                                            on:blur=move |ev| {
                                                let text = event_target_value(&ev);
                                                mutate(&|b| b.set_content(id, &text).map(|_| ()));
                                                set_editing.set(None);
                                            }
                                            class="w-full h-full p-3 bg-transparent resize-none focus:outline-none"
                                        />
                                    }.into_view(),
                                    (NoteKind::Text, false) => view! {
                                        <div class="w-full h-full p-3 overflow-auto whitespace-pre-wrap text-sm">
                                            {current().map(|n| n.content).unwrap_or_default()}
                                        </div>
                                        <div class="absolute bottom-1 left-2 hidden group-hover:flex space-x-1">
                                            {NOTE_COLORS.into_iter().map(|c| view! {
                                                <button
                                                    on:mousedown=|ev| ev.stop_propagation()
                                                    on:click=move |_| mutate(&|b| b.set_color(id, c).map(|_| ()))
                                                    class="w-3 h-3 rounded-full border border-gray-400"
                                                    style=format!("background:{}", c)
                                                ></button>
                                            }).collect_view()}
                                        </div>
                                    }.into_view(),
                                }}
                            </div>
                        }
                    }
                />
                <Show when=move || notes.with(|n| n.is_empty())>
                    <p class="absolute inset-0 flex items-center justify-center text-gray-500">
                        "Add a note or an image to get started"
                    </p>
                </Show>
            </div>

            <ConfirmModal
                open=confirm_clear
                title="Clear board"
                message=Signal::derive(|| "Every note and image on the board will be removed.".to_string())
                confirm_label="Clear"
                on_confirm=Callback::new(move |_| {
                    set_confirm_clear.set(false);
                    mutate(&|b| b.clear());
                })
                on_cancel=Callback::new(move |_| set_confirm_clear.set(false))
            />
        </div>
    }
}
