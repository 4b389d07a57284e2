//! `/api/flow/*` routes — page rendering, navigation, and the page clock.
//!
//! Every page-level route answers with the whole current page fragment
//! (swapped into `#app`) followed by any side-effect scripts the request
//! produced. The page is split into the mute toggle, the `#stage` holding
//! the current page's content, and the `#journal-slot` below it.
//!
//! While the current page has timers pending, `#stage` polls
//! `/api/flow/tick` so the JS bridge keeps the page clock moving. Tick
//! responses replace only `#stage`; the journal slot is sent out-of-band
//! and only when it appears or disappears, so a half-typed note survives.

use crate::effects::Effects;
use crate::flow::controller::Session;
use crate::flow::page::Page;
use crate::game::state::{Site, with_site_mut};
use crate::routes::util::{escape_html, get_num, get_param, parse_form_body};
use crate::routes::effects::render_mute_button;
use crate::routes::letter::{journal_visible, render_journal_slot};
use crate::routes::{detective, game, letter};

/// Poll interval the page fragment asks HTMX for while timers are pending.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Render the current page plus any queued scripts.
pub fn respond(site: &mut Site) -> String {
    let mut html = render_page(site);
    html.push_str(&site.drain_scripts());
    html
}

/// Render the current page fragment.
pub fn render_page(site: &Site) -> String {
    format!(
        r#"<div id="page">{}{}{}</div>"#,
        render_mute_button(site.flow.effects().is_muted()),
        render_stage(site),
        render_journal_slot(site, false)
    )
}

/// Render the polled part of the page.
pub fn render_stage(site: &Site) -> String {
    let page = site.flow.page();
    let inner = match site.flow.session() {
        Session::Landing => render_landing(site),
        Session::Loading { bar, .. } => render_loading(bar.progress()),
        Session::Detective(board) => detective::render_board(board),
        Session::Game(board) => game::render_board(board),
        Session::Letter(stage) => letter::render_letter(site, stage),
    };

    let polling = if site.flow.timers().pending() > 0 {
        format!(
            r##" hx-post="/api/flow/tick" hx-trigger="every {ms}ms" hx-vals='{{"elapsed":"{ms}"}}' hx-target="#stage" hx-swap="outerHTML""##,
            ms = TICK_INTERVAL_MS
        )
    } else {
        String::new()
    };

    format!(
        r#"<div id="stage" data-page="{}" data-path="{}"{}>{}</div>"#,
        page.name(),
        page.path(),
        polling,
        inner
    )
}

fn render_landing(site: &Site) -> String {
    let recipient = escape_html(&site.flow.config().recipient);
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="flex flex-col items-center justify-center min-h-screen px-6 py-10">"#);
    html.push_str(&format!(
        r#"<h1 class="font-pacifico text-5xl md:text-6xl text-transparent bg-clip-text bg-gradient-to-r from-rose-500 to-pink-500 mb-6">{}</h1>"#,
        recipient
    ));
    html.push_str(r#"<h2 class="font-dancing text-3xl md:text-5xl text-pink-600 mb-10 text-center">Happy Birthday!</h2>"#);
    html.push_str(
        r##"<button class="bg-gradient-to-r from-pink-500 to-rose-500 text-white text-lg md:text-xl font-bold py-3 px-8 rounded-full shadow-md" hx-post="/api/flow/start" hx-target="#app" hx-swap="innerHTML">Open your surprise &#x2728;</button>"##,
    );
    html.push_str("</div>");
    html
}

fn render_loading(progress: u32) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="w-full h-screen flex flex-col items-center justify-center">"#);
    html.push_str(r#"<h1 class="text-5xl md:text-6xl font-bold mb-8 font-playfair">Loading Your Adventure</h1>"#);
    html.push_str(r#"<div class="w-64 h-2 bg-gray-700 rounded-full overflow-hidden mb-8">"#);
    html.push_str(&format!(
        r#"<div class="h-full bg-gradient-to-r from-pink-500 via-purple-500 to-cyan-500" style="width: {}%"></div>"#,
        progress
    ));
    html.push_str("</div>");
    html.push_str(&format!(r#"<p class="text-xl text-gray-300">{}%</p>"#, progress));
    html.push_str("</div>");
    html
}

// ── GET /api/flow/page ─────────────────────────────────────────────

/// Handle GET /api/flow/page
/// Returns the current page fragment (initial load and reloads).
pub fn handle_page_get(_query: &str) -> String {
    with_site_mut(respond)
}

// ── POST /api/flow/start ───────────────────────────────────────────

/// Handle POST /api/flow/start
/// Landing page button. Ignored anywhere but the landing page.
pub fn handle_start_post(_body: &str) -> String {
    with_site_mut(|site| {
        site.flow.start();
        respond(site)
    })
}

// ── POST /api/flow/advance ─────────────────────────────────────────

/// Handle POST /api/flow/advance
/// Body: page={landing|loading|detective|game|letter}
pub fn handle_advance_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(target) = get_param(&params, "page").and_then(Page::parse) else {
        return r#"<span class="text-rose-600">Unknown page</span>"#.to_string();
    };
    with_site_mut(|site| {
        site.flow.advance(target);
        respond(site)
    })
}

// ── POST /api/flow/tick ────────────────────────────────────────────

/// Handle POST /api/flow/tick
/// Body: elapsed={ms}. Fires every timer that came due and re-renders
/// `#stage`, plus the journal slot if it just appeared or went away.
pub fn handle_tick_post(body: &str) -> String {
    let params = parse_form_body(body);
    let elapsed: u64 = get_num(&params, "elapsed").unwrap_or(TICK_INTERVAL_MS);
    with_site_mut(|site| {
        let journal_was_visible = journal_visible(site);
        site.flow.tick(elapsed);
        let mut html = render_stage(site);
        if journal_visible(site) != journal_was_visible {
            html.push_str(&render_journal_slot(site, true));
        }
        html.push_str(&site.drain_scripts());
        html
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::game::state::{reset_site, with_site};

    fn reset_state() {
        reset_site(SiteConfig::default());
    }

    #[test]
    fn landing_shows_recipient_and_start_button() {
        reset_state();
        crate::game::state::configure_json(r#"{"recipient":"Ada <3"}"#).unwrap();
        let html = handle_page_get("");
        assert!(html.contains(r#"data-page="landing""#));
        assert!(html.contains("Ada &lt;3"));
        assert!(html.contains("/api/flow/start"));
        assert!(!html.contains("every 100ms"));
        reset_state();
    }

    #[test]
    fn start_moves_to_loading_and_polls() {
        reset_state();
        let html = handle_start_post("");
        assert!(html.contains(r#"data-page="loading""#));
        assert!(html.contains("/api/flow/tick"));
        assert!(html.contains("play('reveal')"));
        reset_state();
    }

    #[test]
    fn advance_rejects_unknown_page() {
        reset_state();
        let html = handle_advance_post("page=backstage");
        assert!(html.contains("Unknown page"));
        with_site(|s| assert_eq!(s.flow.page(), Page::Landing));
        reset_state();
    }

    #[test]
    fn advance_goes_anywhere_known() {
        reset_state();
        let html = handle_advance_post("page=letter");
        assert!(html.contains(r#"data-page="letter""#));
        let html = handle_advance_post("page=landing");
        assert!(html.contains(r#"data-page="landing""#));
        reset_state();
    }

    #[test]
    fn ticking_through_loading_reaches_minigame() {
        reset_state();
        handle_start_post("");
        let mut html = String::new();
        for _ in 0..40 {
            html = handle_tick_post("elapsed=1000");
            if !html.contains(r#"data-page="loading""#) {
                break;
            }
        }
        assert!(html.contains(r#"data-page="detective""#));
        reset_state();
    }

    #[test]
    fn tick_swaps_only_the_stage() {
        reset_state();
        let html = handle_start_post("");
        assert!(html.contains(r#"<div id="page">"#));
        assert!(html.contains("mute-toggle"));
        assert!(html.contains(r#"id="journal-slot""#));

        let html = handle_tick_post("elapsed=100");
        assert!(html.starts_with(r#"<div id="stage""#));
        assert!(html.contains(r##"hx-target="#stage" hx-swap="outerHTML""##));
        assert!(!html.contains(r#"id="page""#));
        assert!(!html.contains("mute-toggle"));
        assert!(!html.contains("journal-slot"));
        reset_state();
    }

    #[test]
    fn tick_defaults_elapsed_when_missing() {
        reset_state();
        handle_start_post("");
        let html = handle_tick_post("elapsed=abc");
        assert!(html.contains(r#"data-page="loading""#));
        reset_state();
    }
}
