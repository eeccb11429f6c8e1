//! # client
//!
//! Leptos + WASM single-page console for operating Backpack trading
//! accounts, batches and units.
//!
//! The session lifecycle (store, refresh loop, route guard) lives in the
//! `session` crate; this crate wires it into reactive state, browser storage,
//! `gloo-net` requests and the page components.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
