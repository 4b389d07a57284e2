//! Global site state container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the WASM module alive, so the current page, its
//! minigame board, and the journal mirror persist across `handle_request`
//! calls for the whole visit. A full page reload starts over on the landing
//! page (the journal comes back through `/api/journal/restore`).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;

use crate::config::SiteConfig;
use crate::effects::ScriptEffects;
use crate::flow::controller::FlowController;
use crate::journal::{Journal, LocalStore};

pub type BrowserFlow = FlowController<ScriptEffects, ChaCha8Rng>;

/// Everything the worker keeps between requests.
pub struct Site {
    pub flow: BrowserFlow,
    pub journal: Journal<LocalStore>,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            flow: FlowController::new(config, ScriptEffects::new(), ChaCha8Rng::from_entropy()),
            journal: Journal::new(LocalStore::new()),
        }
    }

    /// Pending side-effect scripts (cues, storage writes) for the response.
    pub fn drain_scripts(&mut self) -> String {
        let mut js = self.flow.effects_mut().drain_script();
        js.push_str(&self.journal.store_mut().drain_script());
        js
    }
}

thread_local! {
    static SITE: RefCell<Site> = RefCell::new(Site::new(SiteConfig::default()));
}

/// Execute a closure with read access to the site state.
pub fn with_site<F, R>(f: F) -> R
where
    F: FnOnce(&Site) -> R,
{
    SITE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the site state.
pub fn with_site_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Site) -> R,
{
    SITE.with(|s| f(&mut s.borrow_mut()))
}

/// Throw away all state and start over on the landing page.
pub fn reset_site(config: SiteConfig) {
    SITE.with(|s| {
        *s.borrow_mut() = Site::new(config);
    });
}

/// Replace the site configuration. Returns Ok(()) on success; invalid JSON
/// leaves the previous configuration in place.
pub fn configure_json(json: &str) -> Result<(), String> {
    let config = SiteConfig::from_json(json)?;
    log::info!(
        "site configured for {} ({:?}, {:?} loading)",
        config.recipient,
        config.minigame,
        config.loading
    );
    with_site_mut(|site| site.flow.set_config(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinigameChoice;
    use crate::flow::page::Page;

    #[test]
    fn fresh_site_is_on_landing() {
        reset_site(SiteConfig::default());
        with_site(|s| {
            assert_eq!(s.flow.page(), Page::Landing);
            assert!(s.journal.list().is_empty());
        });
    }

    #[test]
    fn configure_replaces_config_and_rejects_garbage() {
        reset_site(SiteConfig::default());
        configure_json(r#"{"minigame":"card_match","recipient":"Ada"}"#).unwrap();
        with_site(|s| {
            assert_eq!(s.flow.config().minigame, MinigameChoice::CardMatch);
            assert_eq!(s.flow.config().recipient, "Ada");
        });

        assert!(configure_json("not json {{{").is_err());
        with_site(|s| assert_eq!(s.flow.config().recipient, "Ada"));
        reset_site(SiteConfig::default());
    }

    #[test]
    fn drain_scripts_collects_cues_and_writes() {
        reset_site(SiteConfig::default());
        let js = with_site_mut(|s| {
            s.flow.start();
            s.journal.add("hello");
            s.drain_scripts()
        });
        assert!(js.contains("play('reveal')"));
        assert!(js.contains("localStorage.setItem"));
        assert!(with_site_mut(|s| s.drain_scripts()).is_empty());
        reset_site(SiteConfig::default());
    }
}
