//! API Client
//!
//! HTTP calls to the studio backend.

pub mod client;

pub use client::*;
