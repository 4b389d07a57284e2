//! `/api/detective/*` routes — the clue-reveal board.

use crate::game::detective::{CLUE_COUNT, ClueBoard};
use crate::game::state::with_site_mut;
use crate::routes::flow::respond;
use crate::routes::util::{get_num, parse_form_body};

// ── POST /api/detective/reveal ─────────────────────────────────────

/// Handle POST /api/detective/reveal
/// Body: id={1..5}. Unknown or missing ids re-render without changes.
pub fn handle_reveal_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id: Option<u32> = get_num(&params, "id");
    with_site_mut(|site| {
        if let Some(id) = id {
            site.flow.reveal_clue(id);
        }
        respond(site)
    })
}

/// Render the clue board.
pub fn render_board(board: &ClueBoard) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(r#"<div class="relative w-full h-screen overflow-hidden">"#);
    html.push_str(r#"<h1 class="text-center text-5xl font-bold pt-8 font-playfair">Detective Mode</h1>"#);
    html.push_str(&format!(
        r#"<p class="text-center text-lg">Clues found: <strong>{}</strong>/{}</p>"#,
        board.revealed_count(),
        CLUE_COUNT
    ));

    for clue in board.clues() {
        html.push_str(&format!(
            r##"<div class="absolute cursor-pointer" style="left: {}%; top: {}%; transform: translate(-50%, -50%)" hx-post="/api/detective/reveal" hx-vals='{{"id":"{}"}}' hx-target="#app" hx-swap="innerHTML">"##,
            clue.position.x, clue.position.y, clue.id
        ));
        if clue.revealed {
            html.push_str(&format!(
                r#"<div class="clue revealed bg-white/90 rounded-xl p-4 max-w-xs shadow-lg"><p class="text-slate-800">{}</p></div>"#,
                clue.text
            ));
        } else {
            html.push_str(
                r#"<div class="clue sealed w-20 h-20 rounded-full bg-purple-600 flex items-center justify-center text-3xl">&#x1F50D;</div>"#,
            );
        }
        html.push_str("</div>");
    }

    if board.is_complete() {
        html.push_str(
            r#"<div class="absolute inset-0 flex items-center justify-center bg-black/50"><p class="text-4xl text-white font-bold">Case closed! &#x1F389;</p></div>"#,
        );
    }

    html.push_str("</div>");
    html
}
