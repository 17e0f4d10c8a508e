//! Orion Studio
//!
//! Browser front end for the Orion chat and roleplay studio, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - General chat with conversation history
//! - Roleplay chats with character personas
//! - Memory bank management
//! - Local utility tools (todo list, mood board, unit converter, ...)
//!
//! # Architecture
//!
//! Client-side rendered Leptos application. Routing, sidebar highlighting,
//! prompt building and tool logic come from the `orion` crate; this crate
//! only renders and talks to the studio backend over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
