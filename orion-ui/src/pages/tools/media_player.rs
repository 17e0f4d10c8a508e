//! Media Player Tool
//!
//! Local audio files queued into a [`Playlist`] and played through one
//! `<audio>` element.

use leptos::*;
use orion::nav::ToolPage;
use orion::tools::media::format_time;
use orion::tools::{Playlist, Repeat, Track};
use wasm_bindgen::JsCast;

use super::ToolHeader;
use crate::state::global::GlobalState;

fn repeat_label(repeat: Repeat) -> &'static str {
    match repeat {
        Repeat::Off => "Repeat: off",
        Repeat::All => "Repeat: all",
        Repeat::One => "Repeat: one",
    }
}

/// Media player page component
#[component]
pub fn MediaPlayer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let playlist = create_rw_signal(Playlist::new());
    let (playing, set_playing) = create_signal(false);
    let (position, set_position) = create_signal(0.0_f64);
    let (duration, set_duration) = create_signal(0.0_f64);
    let (volume, set_volume) = create_signal(1.0_f64);
    let audio_ref = create_node_ref::<html::Audio>();

    let current_src = create_memo(move |_| playlist.with(|p| p.current().map(|t| t.src.clone())));

    let play = move || {
        let Some(audio) = audio_ref.get_untracked() else {
            return;
        };
        match audio.play() {
            Ok(_) => set_playing.set(true),
            Err(_) => state.show_error("Playback failed"),
        }
    };

    let pause = move || {
        if let Some(audio) = audio_ref.get_untracked() {
            let _ = audio.pause();
        }
        set_playing.set(false);
    };

    // Load the new source whenever the current track changes
    create_effect(move |_| {
        let src = current_src.get();
        let Some(audio) = audio_ref.get() else {
            return;
        };
        match src {
            Some(src) => {
                audio.set_src(&src);
                set_position.set(0.0);
                if playing.get_untracked() {
                    play();
                }
            }
            None => {
                audio.remove_attribute("src").ok();
                pause();
            }
        }
    });

    create_effect(move |_| {
        let v = volume.get();
        if let Some(audio) = audio_ref.get() {
            audio.set_volume(v);
        }
    });

    let on_files = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        playlist.update(|p| {
            for i in 0..files.length() {
                let Some(file) = files.get(i) else {
                    continue;
                };
                match web_sys::Url::create_object_url_with_blob(&file) {
                    Ok(url) => p.add(Track::new(file.name(), url)),
                    Err(_) => state.show_error(&format!("Could not open {}", file.name())),
                }
            }
        });
        input.set_value("");
    };

    let next = move || {
        let before = current_src.get_untracked();
        let advanced = playlist.try_update(|p| p.next().is_some()).unwrap_or(false);
        if !advanced {
            pause();
            return;
        }
        // Same src means the effect will not reload it, so rewind by hand
        if current_src.get_untracked() == before {
            if let Some(audio) = audio_ref.get_untracked() {
                audio.set_current_time(0.0);
            }
            if playing.get_untracked() {
                play();
            }
        }
    };

    let previous = move || {
        // Restart the track first when well into it
        if position.get_untracked() > 3.0 {
            if let Some(audio) = audio_ref.get_untracked() {
                audio.set_current_time(0.0);
            }
            return;
        }
        playlist.update(|p| {
            p.previous();
        });
    };

    let toggle_shuffle = move |_| {
        playlist.update(|p| {
            if p.is_shuffled() {
                p.unshuffle();
            } else {
                p.shuffle(&mut rand::thread_rng());
            }
        });
    };

    let remove = move |index: usize| {
        if let Some(track) = playlist.try_update(|p| p.remove(index)).flatten() {
            let _ = web_sys::Url::revoke_object_url(&track.src);
        }
    };

    on_cleanup(move || {
        playlist.with_untracked(|p| {
            for track in p.tracks() {
                let _ = web_sys::Url::revoke_object_url(&track.src);
            }
        });
    });

    view! {
        <div class="max-w-3xl mx-auto px-6 py-8">
            <ToolHeader tool=ToolPage::MediaPlayer />

            <audio
                node_ref=audio_ref
                on:timeupdate=move |_| {
                    if let Some(a) = audio_ref.get_untracked() {
                        set_position.set(a.current_time());
                    }
                }
                on:loadedmetadata=move |_| {
                    if let Some(a) = audio_ref.get_untracked() {
                        set_duration.set(a.duration());
                    }
                }
                on:ended=move |_| next()
            />

            <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="text-center">
                    <div class="text-lg font-semibold truncate">
                        {move || playlist.with(|p| p.current().map(|t| t.title.clone()))
                            .unwrap_or_else(|| "Nothing queued".to_string())}
                    </div>
                    <div class="text-sm text-gray-400">
                        {move || format!("{} / {}", format_time(position.get()), format_time(duration.get()))}
                    </div>
                </div>

                <input
                    type="range"
                    min="0"
                    step="0.1"
                    prop:max=move || duration.get().max(0.0).to_string()
                    prop:value=move || position.get().to_string()
                    on:input=move |ev| {
                        if let (Ok(t), Some(a)) = (event_target_value(&ev).parse::<f64>(), audio_ref.get_untracked()) {
                            a.set_current_time(t);
                        }
                    }
                    class="w-full"
                />

                <div class="flex items-center justify-center space-x-3">
                    <button
                        on:click=toggle_shuffle
                        class=move || if playlist.with(|p| p.is_shuffled()) {
                            "px-3 py-2 rounded-lg bg-primary"
                        } else {
                            "px-3 py-2 rounded-lg bg-gray-700 hover:bg-gray-600"
                        }
                    >
                        "Shuffle"
                    </button>
                    <button on:click=move |_| previous() class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">"⏮"</button>
                    <button
                        on:click=move |_| if playing.get_untracked() { pause() } else { play() }
                        disabled=move || current_src.with(|s| s.is_none())
                        class="px-5 py-2 bg-primary hover:opacity-90 disabled:opacity-50 rounded-lg font-medium"
                    >
                        {move || if playing.get() { "Pause" } else { "Play" }}
                    </button>
                    <button on:click=move |_| next() class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">"⏭"</button>
                    <button
                        on:click=move |_| playlist.update(|p| p.repeat = p.repeat.cycle())
                        class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                    >
                        {move || repeat_label(playlist.with(|p| p.repeat))}
                    </button>
                </div>

                <div class="flex items-center space-x-2 text-sm text-gray-400">
                    <span>"Volume"</span>
                    <input
                        type="range"
                        min="0"
                        max="1"
                        step="0.05"
                        prop:value=move || volume.get().to_string()
                        on:input=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                set_volume.set(v.clamp(0.0, 1.0));
                            }
                        }
                        class="flex-1"
                    />
                </div>
            </div>

            <div class="bg-gray-800 rounded-xl p-6 mt-6">
                <div class="flex items-center justify-between mb-3">
                    <h2 class="font-semibold">"Playlist"</h2>
                    <label class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg cursor-pointer text-sm">
                        "+ Add files"
                        <input type="file" accept="audio/*,video/*" multiple class="hidden" on:change=on_files />
                    </label>
                </div>
                {move || {
                    let (tracks, current) = playlist.with(|p| (p.tracks().to_vec(), p.current_index()));
                    if tracks.is_empty() {
                        return view! { <p class="text-gray-500 text-sm">"No tracks yet"</p> }.into_view();
                    }
                    tracks.into_iter().enumerate().map(|(i, track)| view! {
                        <div class=if current == Some(i) {
                            "flex items-center px-3 py-2 rounded-lg bg-gray-700"
                        } else {
                            "flex items-center px-3 py-2 rounded-lg hover:bg-gray-700"
                        }>
                            <button
                                on:click=move |_| {
                                    playlist.update(|p| {
                                        p.select(i);
                                    });
                                    play();
                                }
                                class="flex-1 text-left truncate"
                            >
                                {track.title}
                            </button>
                            <button on:click=move |_| remove(i) class="text-gray-500 hover:text-red-400 ml-2">"×"</button>
                        </div>
                    }).collect_view()
                }}
            </div>
        </div>
    }
}
