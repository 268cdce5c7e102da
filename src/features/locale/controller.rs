//! Locale Controller
//!
//! Loads the persisted locale on mount and flips it on each button click.

use tracing::{debug, info};

use super::apply_locale;
use crate::dom::Dom;
use crate::domain::config::LocaleConfig;
use crate::eventing::{EventKind, EventOutcome, EventSource, ListenTarget, ListenerId, UiEvent};
use crate::features::Controller;
use crate::i18n::Locale;
use crate::storage::LocalePreference;

pub struct LocaleController {
    preference: LocalePreference,
    config: LocaleConfig,
    locale: Locale,
    button_listener: Option<ListenerId>,
}

impl LocaleController {
    pub fn new(preference: LocalePreference, config: &LocaleConfig) -> Self {
        Self {
            preference,
            config: config.clone(),
            locale: Locale::PRIMARY,
            button_listener: None,
        }
    }

    /// Currently displayed locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Flip, persist and re-apply the locale
    pub fn toggle(&mut self, dom: &mut dyn Dom) -> Locale {
        self.locale = self.locale.other();
        self.preference.save(self.locale);
        apply_locale(dom, self.locale, &self.config);
        info!(locale = self.locale.token(), "Locale toggled");
        self.locale
    }
}

impl Controller for LocaleController {
    fn name(&self) -> &'static str {
        "locale"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        self.locale = self.preference.load();
        apply_locale(dom, self.locale, &self.config);

        match dom.element_by_id(&self.config.button_id) {
            Some(button) => {
                self.button_listener =
                    Some(events.add_listener(ListenTarget::Element(button), EventKind::Click));
            }
            None => debug!(id = %self.config.button_id, "No locale button on page"),
        }
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        _events: &mut dyn EventSource,
    ) -> EventOutcome {
        if let UiEvent::Click { listener, .. } = event {
            if Some(*listener) == self.button_listener {
                self.toggle(dom);
            }
        }
        EventOutcome::default()
    }
}
