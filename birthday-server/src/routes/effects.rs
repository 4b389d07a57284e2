//! `/api/effects/*` routes — sound toggle.

use crate::effects::Effects;
use crate::game::state::with_site_mut;

// ── POST /api/effects/mute ─────────────────────────────────────────

/// Handle POST /api/effects/mute
/// Toggles cue playback and returns the updated toggle button.
pub fn handle_mute_post(_body: &str) -> String {
    let muted = with_site_mut(|site| site.flow.effects_mut().toggle_mute());
    render_mute_button(muted)
}

pub fn render_mute_button(muted: bool) -> String {
    let (icon, label) = if muted {
        ("&#x1F507;", "Unmute sounds")
    } else {
        ("&#x1F50A;", "Mute sounds")
    };
    format!(
        r##"<button id="mute-toggle" class="fixed top-4 right-4 text-2xl" aria-label="{}" aria-pressed="{}" hx-post="/api/effects/mute" hx-target="#mute-toggle" hx-swap="outerHTML">{}</button>"##,
        label, muted, icon
    )
}
