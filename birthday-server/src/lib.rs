//! Birthday site in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! The page flow (landing, loading, minigame, letter), both minigames, and
//! the feedback journal all live here. The only thing that leaves the
//! browser is the optional copy of journal notes sent to the `feedback-log`
//! service.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
pub mod flow;
pub mod game;
pub mod journal;
pub mod routes;

/// Install the console logger and panic hook. Call once from the worker
/// before the first request.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("birthday-server: initialized");
}

/// Replace the site configuration with the given JSON (all fields optional).
/// Returns "ok", or an error message when the JSON is rejected.
#[wasm_bindgen]
pub fn configure(json: &str) -> String {
    match game::state::configure_json(json) {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            log::warn!("{}", e);
            e
        }
    }
}

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/flow/page")
/// * `query`  — Query string (e.g., "?foo=bar")
/// * `body`   — Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Page flow
    router.insert("/api/flow/page", "flow_page").ok();
    router.insert("/api/flow/start", "flow_start").ok();
    router.insert("/api/flow/advance", "flow_advance").ok();
    router.insert("/api/flow/tick", "flow_tick").ok();

    // Minigames
    router.insert("/api/detective/reveal", "detective_reveal").ok();
    router.insert("/api/game/flip", "game_flip").ok();
    router.insert("/api/game/continue", "game_continue").ok();
    router.insert("/api/game/skip", "game_skip").ok();

    // Letter
    router.insert("/api/letter/celebrate", "letter_celebrate").ok();
    router.insert("/api/letter/start-over", "letter_start_over").ok();

    // Journal
    router.insert("/api/journal", "journal").ok();
    router.insert("/api/journal/add", "journal_add").ok();
    router.insert("/api/journal/edit", "journal_edit").ok();
    router.insert("/api/journal/delete", "journal_delete").ok();
    router.insert("/api/journal/restore", "journal_restore").ok();

    // Effects
    router.insert("/api/effects/mute", "effects_mute").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("flow_page", "GET") => routes::flow::handle_page_get(query),
            ("flow_start", "POST") => routes::flow::handle_start_post(body),
            ("flow_advance", "POST") => routes::flow::handle_advance_post(body),
            ("flow_tick", "POST") => routes::flow::handle_tick_post(body),

            ("detective_reveal", "POST") => routes::detective::handle_reveal_post(body),
            ("game_flip", "POST") => routes::game::handle_flip_post(body),
            ("game_continue", "POST") => routes::game::handle_continue_post(body),
            ("game_skip", "POST") => routes::game::handle_skip_post(body),

            ("letter_celebrate", "POST") => routes::letter::handle_celebrate_post(body),
            ("letter_start_over", "POST") => routes::letter::handle_start_over_post(body),

            ("journal", "GET") => routes::journal::handle_journal_get(query),
            ("journal_add", "POST") => routes::journal::handle_add_post(body),
            ("journal_edit", "POST") => routes::journal::handle_edit_post(body),
            ("journal_delete", "POST") => routes::journal::handle_delete_post(body),
            ("journal_restore", "POST") => routes::journal::handle_restore_post(body),

            ("effects_mute", "POST") => routes::effects::handle_mute_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-rose-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-rose-600">405 — method not allowed</span>"#.to_string()
}
