//! App Root Component
//!
//! Route table, global providers and the sidebar layout.

use leptos::*;
use leptos_router::*;
use orion::nav::{Resolution, Route as AppRoute};

use crate::components::{Sidebar, Toast};
use crate::pages::tools::{
    ColorPicker, MediaPlayer, MoodBoardTool, NovelGenerator, QrGenerator, TodoListTool,
    ToolsIndex, UnitConverter,
};
use crate::pages::{
    CharacterChat, CharacterDetail, Characters, Chat, Conversations, CreateCharacter,
    EditCharacter, MemoryBank, Settings,
};
use crate::state::global::provide_global_state;
use crate::state::theme::provide_theme;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_theme();

    view! {
        <Router>
            <div class="h-screen bg-gray-900 text-white flex overflow-hidden">
                <Sidebar />

                <main class="flex-1 overflow-y-auto">
                    <Routes>
                        <Route path="/chat" view=Chat />
                        <Route path="/chat/:id" view=Chat />
                        <Route path="/conversations" view=Conversations />
                        <Route path="/characters" view=Characters />
                        <Route path="/character/new" view=CreateCharacter />
                        <Route path="/character/:id/detail" view=CharacterDetail />
                        <Route path="/character/:id/edit" view=EditCharacter />
                        <Route path="/characterchat/:id" view=CharacterChat />
                        <Route path="/tool" view=ToolsIndex />
                        <Route path="/tool/media-player" view=MediaPlayer />
                        <Route path="/tool/todo-list" view=TodoListTool />
                        <Route path="/tool/mood-board" view=MoodBoardTool />
                        <Route path="/tool/unit-converter" view=UnitConverter />
                        <Route path="/tool/color-picker" view=ColorPicker />
                        <Route path="/tool/qr-generator" view=QrGenerator />
                        <Route path="/tool/novel-generator" view=NovelGenerator />
                        <Route path="/memory" view=MemoryBank />
                        <Route path="/settings" view=Settings />
                        // `/`, legacy paths and unknown paths
                        <Route path="/*any" view=Fallback />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Paths without a page of their own: follow redirects from the shared
/// route table, otherwise show the not-found page.
#[component]
fn Fallback() -> impl IntoView {
    let location = use_location();

    move || match AppRoute::resolve(&location.pathname.get()) {
        Resolution::Redirect(route) => view! {
            <Redirect
                path=route.path()
                options=NavigateOptions { replace: true, ..Default::default() }
            />
        }
        .into_view(),
        Resolution::Render(_) => view! { <NotFound /> }.into_view(),
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/chat"
                class="px-6 py-3 bg-primary hover:opacity-90 rounded-lg font-medium transition-colors"
            >
                "Back to Chat"
            </A>
        </div>
    }
}
