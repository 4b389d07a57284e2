//! `/api/game/*` routes — the memory card-match board.

use crate::game::card_match::{CardBoard, PAIR_COUNT};
use crate::game::state::with_site_mut;
use crate::routes::flow::respond;
use crate::routes::util::{get_num, parse_form_body};

// ── POST /api/game/flip ────────────────────────────────────────────

/// Handle POST /api/game/flip
/// Body: index={0..15}
pub fn handle_flip_post(body: &str) -> String {
    let params = parse_form_body(body);
    let index: Option<usize> = get_num(&params, "index");
    with_site_mut(|site| {
        if let Some(index) = index {
            site.flow.flip_card(index);
        }
        respond(site)
    })
}

// ── POST /api/game/continue ────────────────────────────────────────

/// Handle POST /api/game/continue
/// Moves on to the letter once every pair is matched.
pub fn handle_continue_post(_body: &str) -> String {
    with_site_mut(|site| {
        site.flow.continue_game();
        respond(site)
    })
}

// ── POST /api/game/skip ────────────────────────────────────────────

/// Handle POST /api/game/skip
/// Skips straight to the letter after the first move.
pub fn handle_skip_post(_body: &str) -> String {
    with_site_mut(|site| {
        site.flow.skip_game();
        respond(site)
    })
}

/// Render the card grid, counters, and continue/skip actions.
pub fn render_board(board: &CardBoard) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div class="container mx-auto max-w-4xl py-8 px-4">"#);
    html.push_str(r#"<h1 class="font-dancing text-4xl md:text-5xl text-center mb-8 text-pink-600">Birthday Memory Game</h1>"#);
    html.push_str(&format!(
        r#"<div class="flex justify-center gap-6 mb-6"><span>Moves: <strong>{}</strong></span><span>Matches: <strong>{}</strong>/{}</span></div>"#,
        board.moves(),
        board.matches(),
        PAIR_COUNT
    ));

    html.push_str(r#"<div class="grid grid-cols-4 gap-3 md:gap-4">"#);
    for (i, card) in board.cards().iter().enumerate() {
        let face_up = card.flipped || card.matched;
        let state = if card.matched {
            "matched"
        } else if card.flipped {
            "flipped"
        } else {
            "down"
        };
        html.push_str(&format!(
            r##"<button class="card card-{} aspect-square rounded-xl text-4xl flex items-center justify-center shadow-md" aria-label="Card {}" hx-post="/api/game/flip" hx-vals='{{"index":"{}"}}' hx-target="#app" hx-swap="innerHTML">"##,
            state,
            i + 1,
            i
        ));
        if face_up {
            html.push_str(card.emoji);
        } else {
            html.push_str("&#x2753;");
        }
        html.push_str("</button>");
    }
    html.push_str("</div>");

    if board.is_complete() {
        html.push_str(&format!(
            r##"<div class="text-center mt-8"><p class="text-2xl text-pink-600 mb-4">All pairs found in {} moves!</p><button class="bg-gradient-to-r from-pink-500 to-rose-500 text-white font-bold py-3 px-8 rounded-full" hx-post="/api/game/continue" hx-target="#app" hx-swap="innerHTML">Continue to your letter &#x1F48C;</button></div>"##,
            board.moves()
        ));
    } else if board.can_skip() {
        html.push_str(
            r##"<div class="text-center mt-6"><button class="text-pink-500 underline text-sm" hx-post="/api/game/skip" hx-target="#app" hx-swap="innerHTML">Skip to the letter</button></div>"##,
        );
    }

    html.push_str("</div>");
    html
}
