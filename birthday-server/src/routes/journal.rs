//! `/api/journal/*` routes — the visitor's feedback notes.
//!
//! Each mutation answers with the re-rendered journal panel (swapped into
//! `#journal`) and a `localStorage.setItem` script carrying the whole list.
//! Rejected input (blank text, bad index) just re-renders the panel.

use crate::game::state::{Site, with_site, with_site_mut};
use crate::journal::STORAGE_KEY;
use crate::routes::util::{escape_html, get_num, get_param, parse_form_body};

// ── GET /api/journal ───────────────────────────────────────────────

/// Handle GET /api/journal
pub fn handle_journal_get(_query: &str) -> String {
    with_site(|site| render_journal(&site.journal.list()))
}

// ── POST /api/journal/add ──────────────────────────────────────────

/// Handle POST /api/journal/add
/// Body: text={note}
pub fn handle_add_post(body: &str) -> String {
    let params = parse_form_body(body);
    let text = get_param(&params, "text").unwrap_or("");
    with_site_mut(|site| {
        let added = site.journal.add(text);
        let mut html = respond(site);
        if added && site.flow.config().mirror_to_log {
            html.push_str(&mirror_script(&site.flow.config().feedback_endpoint, text.trim()));
        }
        html
    })
}

// ── POST /api/journal/edit ─────────────────────────────────────────

/// Handle POST /api/journal/edit
/// Body: index={n}&text={note}
pub fn handle_edit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let index: Option<usize> = get_num(&params, "index");
    let text = get_param(&params, "text").unwrap_or("");
    with_site_mut(|site| {
        if let Some(index) = index {
            site.journal.edit(index, text);
        }
        respond(site)
    })
}

// ── POST /api/journal/delete ───────────────────────────────────────

/// Handle POST /api/journal/delete
/// Body: index={n}
pub fn handle_delete_post(body: &str) -> String {
    let params = parse_form_body(body);
    let index: Option<usize> = get_num(&params, "index");
    with_site_mut(|site| {
        if let Some(index) = index {
            site.journal.delete(index);
        }
        respond(site)
    })
}

// ── POST /api/journal/restore ──────────────────────────────────────

/// Handle POST /api/journal/restore
/// Body: the raw `localStorage` value (a JSON array of strings), sent by
/// the bridge on page load. Unreadable values are kept as-is and read back
/// as an empty journal, so nothing the visitor stored is overwritten until
/// they write a new note.
pub fn handle_restore_post(body: &str) -> String {
    let raw = body.trim();
    if raw.is_empty() {
        return "ok".to_string();
    }
    with_site_mut(|site| {
        site.journal.store_mut().restore(STORAGE_KEY, raw.to_string());
    });
    "ok".to_string()
}

fn respond(site: &mut Site) -> String {
    let mut html = render_journal(&site.journal.list());
    html.push_str(&site.drain_scripts());
    html
}

/// Fire-and-forget copy of a new note to the feedback log service.
fn mirror_script(endpoint: &str, text: &str) -> String {
    let payload = serde_json::json!({ "feedback": text }).to_string();
    let endpoint_lit = serde_json::to_string(endpoint).unwrap_or_else(|_| "\"\"".to_string());
    let payload_lit = serde_json::to_string(&payload).unwrap_or_else(|_| "\"{}\"".to_string());
    format!(
        "<script>fetch({},{{method:'POST',headers:{{'Content-Type':'application/json'}},body:{}}}).catch(function(){{}});</script>",
        endpoint_lit,
        payload_lit.replace("</", "<\\/")
    )
}

/// Render the journal panel: add form plus one editable row per note.
pub fn render_journal(entries: &[String]) -> String {
    let mut html = String::with_capacity(1024 + entries.len() * 512);
    html.push_str(r#"<div class="bg-white/80 rounded-2xl p-6 shadow">"#);
    html.push_str(r#"<h3 class="font-dancing text-2xl text-rose-600 mb-3">Leave a note back</h3>"#);

    html.push_str(
        r##"<form class="flex gap-2 mb-4" hx-post="/api/journal/add" hx-target="#journal" hx-swap="innerHTML"><input type="text" name="text" required class="flex-1 border rounded px-2 py-1" placeholder="Write something..."><button type="submit" class="bg-rose-500 text-white rounded px-4 py-1">Send</button></form>"##,
    );

    if entries.is_empty() {
        html.push_str(r#"<p class="text-sm text-slate-400">No notes yet.</p>"#);
    }

    html.push_str(r#"<ul class="space-y-2">"#);
    for (i, entry) in entries.iter().enumerate() {
        let text = escape_html(entry);
        html.push_str(r#"<li class="journal-entry flex gap-2 items-center">"#);
        html.push_str(&format!(
            r##"<form class="flex-1 flex gap-2" hx-post="/api/journal/edit" hx-target="#journal" hx-swap="innerHTML"><input type="hidden" name="index" value="{i}"><input type="text" name="text" value="{text}" class="flex-1 border rounded px-2 py-1"><button type="submit" class="text-sm text-slate-600">Save</button></form>"##,
            i = i,
            text = text
        ));
        html.push_str(&format!(
            r##"<button class="text-sm text-rose-500" hx-post="/api/journal/delete" hx-vals='{{"index":"{}"}}' hx-target="#journal" hx-swap="innerHTML">Delete</button>"##,
            i
        ));
        html.push_str("</li>");
    }
    html.push_str("</ul></div>");
    html
}
