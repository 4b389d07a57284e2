//! `/api/letter/*` routes — the final letter page.

use crate::flow::controller::Session;
use crate::flow::letter::{LetterStage, letter_lines};
use crate::game::state::{Site, with_site_mut};
use crate::routes::flow::respond;
use crate::routes::journal::render_journal;
use crate::routes::util::escape_html;

// ── POST /api/letter/celebrate ─────────────────────────────────────

/// Handle POST /api/letter/celebrate
pub fn handle_celebrate_post(_body: &str) -> String {
    with_site_mut(|site| {
        site.flow.celebrate();
        respond(site)
    })
}

// ── POST /api/letter/start-over ────────────────────────────────────

/// Handle POST /api/letter/start-over
/// Closes the letter and reopens it from the top.
pub fn handle_start_over_post(_body: &str) -> String {
    with_site_mut(|site| {
        site.flow.start_over();
        respond(site)
    })
}

/// Render the letter in its current stage, with the journal underneath.
pub fn render_letter(site: &Site, stage: &LetterStage) -> String {
    let config = site.flow.config();
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div class="min-h-screen flex flex-col items-center py-12 px-4">"#);

    if !stage.open {
        html.push_str(r#"<div class="envelope closed text-7xl">&#x1F48C;</div></div>"#);
        return html;
    }

    html.push_str(r#"<div class="letter bg-white/90 rounded-2xl shadow-xl max-w-2xl w-full p-8 font-lora">"#);
    if stage.content_visible {
        for (text, heading) in letter_lines(&config.recipient, &config.sender) {
            if text.is_empty() {
                html.push_str(r#"<div class="h-4"></div>"#);
            } else if heading {
                html.push_str(&format!(
                    r#"<p class="font-dancing text-3xl text-rose-600 mb-2">{}</p>"#,
                    escape_html(&text)
                ));
            } else {
                html.push_str(&format!(
                    r#"<p class="text-slate-700 leading-relaxed mb-2">{}</p>"#,
                    escape_html(&text)
                ));
            }
        }
    } else {
        html.push_str(r#"<p class="text-center text-rose-400 animate-pulse">Opening&hellip;</p>"#);
    }
    html.push_str("</div>");

    if stage.content_visible && !stage.celebrating {
        html.push_str(
            r##"<button class="mt-8 bg-gradient-to-r from-pink-500 to-rose-500 text-white font-bold py-3 px-8 rounded-full" hx-post="/api/letter/celebrate" hx-target="#app" hx-swap="innerHTML">Celebrate &#x1F389;</button>"##,
        );
    }
    if stage.celebrating {
        html.push_str(r#"<div class="confetti" aria-hidden="true"></div>"#);
    }
    if stage.start_over_visible {
        html.push_str(
            r##"<button class="mt-4 text-rose-500 underline" hx-post="/api/letter/start-over" hx-target="#app" hx-swap="innerHTML">Read it again</button>"##,
        );
    }

    html.push_str("</div>");
    html
}

/// The journal shows under the letter once its content is visible.
pub fn journal_visible(site: &Site) -> bool {
    matches!(site.flow.session(), Session::Letter(stage) if stage.content_visible)
}

/// Render `#journal-slot`, holding the journal panel when it is visible.
/// With `oob` set the slot replaces the one already on the page.
pub fn render_journal_slot(site: &Site, oob: bool) -> String {
    let mut html = String::with_capacity(2048);
    if oob {
        html.push_str(r#"<div id="journal-slot" hx-swap-oob="true">"#);
    } else {
        html.push_str(r#"<div id="journal-slot">"#);
    }
    if journal_visible(site) {
        html.push_str(r#"<div id="journal" class="mt-10 mx-auto max-w-2xl w-full px-4">"#);
        html.push_str(&render_journal(&site.journal.list()));
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::game::state::reset_site;
    use crate::routes::flow::{handle_advance_post, handle_tick_post};

    fn reset_state() {
        reset_site(SiteConfig::default());
    }

    #[test]
    fn letter_opens_then_shows_content_and_journal() {
        reset_state();
        crate::game::state::configure_json(r#"{"recipient":"Ada","sender":"Grace"}"#).unwrap();
        let html = handle_advance_post("page=letter");
        assert!(html.contains("Opening"));
        assert!(!html.contains("Dear Ada"));

        let html = handle_tick_post("elapsed=1000");
        assert!(html.contains("Dear Ada,"));
        assert!(html.contains("With love, Grace"));
        assert!(html.contains(r#"id="journal""#));
        assert!(html.contains("play('music_start')"));
        reset_state();
    }

    #[test]
    fn celebrate_then_start_over() {
        reset_state();
        handle_advance_post("page=letter");
        handle_tick_post("elapsed=1000");

        let html = handle_celebrate_post("");
        assert!(html.contains("confetti"));
        assert!(html.contains("play('celebrate')"));
        assert!(!html.contains("Read it again"));

        let html = handle_tick_post("elapsed=4000");
        assert!(html.contains("Read it again"));

        let html = handle_start_over_post("");
        assert!(html.contains("envelope closed"));
        assert!(html.contains("play('music_stop')"));

        let html = handle_tick_post("elapsed=500");
        assert!(html.contains("Opening"));
        let html = handle_tick_post("elapsed=1000");
        assert!(html.contains("Celebrate"));
        reset_state();
    }

    #[test]
    fn ticks_leave_the_journal_form_alone() {
        reset_state();
        handle_advance_post("page=letter");
        let html = handle_tick_post("elapsed=1000");
        assert!(html.contains(r#"<div id="journal-slot" hx-swap-oob="true">"#));
        assert!(html.contains("/api/journal/add"));

        crate::routes::journal::handle_add_post("text=draft");
        handle_celebrate_post("");
        for _ in 0..39 {
            let html = handle_tick_post("elapsed=100");
            assert!(html.contains("/api/flow/tick"));
            assert!(!html.contains("/api/journal/add"));
            assert!(!html.contains("journal-entry"));
        }

        let html = handle_tick_post("elapsed=100");
        assert!(html.contains("Read it again"));
        assert!(!html.contains("/api/flow/tick"));
        assert!(!html.contains("/api/journal/add"));
        reset_state();
    }

    #[test]
    fn start_over_hides_the_journal_until_reopened() {
        reset_state();
        handle_advance_post("page=letter");
        handle_tick_post("elapsed=1000");
        handle_celebrate_post("");
        handle_tick_post("elapsed=4000");

        let html = handle_start_over_post("");
        assert!(html.contains(r#"<div id="journal-slot"></div>"#));
        let html = handle_tick_post("elapsed=500");
        assert!(!html.contains("journal-slot"));
        let html = handle_tick_post("elapsed=1000");
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains(r#"id="journal""#));
        reset_state();
    }

    #[test]
    fn celebrate_before_content_is_ignored() {
        reset_state();
        handle_advance_post("page=letter");
        let html = handle_celebrate_post("");
        assert!(!html.contains("confetti"));
        reset_state();
    }
}
