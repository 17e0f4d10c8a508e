//! Tool Pages
//!
//! Small self-contained utilities under `/tool/*`.

use leptos::*;
use leptos_router::*;
use orion::nav::ToolPage;

pub mod color_picker;
pub mod media_player;
pub mod mood_board;
pub mod novel_generator;
pub mod qr_generator;
pub mod todo_list;
pub mod unit_converter;

pub use color_picker::ColorPicker;
pub use media_player::MediaPlayer;
pub use mood_board::MoodBoardTool;
pub use novel_generator::NovelGenerator;
pub use qr_generator::QrGenerator;
pub use todo_list::TodoListTool;
pub use unit_converter::UnitConverter;

/// Tool gallery
#[component]
pub fn ToolsIndex() -> impl IntoView {
    view! {
        <div class="max-w-5xl mx-auto px-6 py-8 space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Tools"</h1>
                <p class="text-gray-400 mt-1">"Handy utilities that run in your browser"</p>
            </div>
            <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-4">
                {ToolPage::ALL.into_iter().map(|tool| view! {
                    <A
                        href=format!("/tool/{}", tool.slug())
                        class="block bg-gray-800 hover:bg-gray-700 rounded-xl p-5 transition-colors"
                    >
                        <h3 class="font-semibold text-lg">{tool.title()}</h3>
                        <p class="text-sm text-gray-400 mt-1">{tool.description()}</p>
                    </A>
                }).collect_view()}
            </div>
        </div>
    }
}

/// Title row with a link back to the gallery
#[component]
fn ToolHeader(tool: ToolPage) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between mb-6">
            <div>
                <h1 class="text-3xl font-bold">{tool.title()}</h1>
                <p class="text-gray-400 mt-1">{tool.description()}</p>
            </div>
            <A href="/tool" class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm">
                "← All tools"
            </A>
        </div>
    }
}
