//! Scroll Style Switch
//!
//! Flags the navbar as scrolled while the page is scrolled past a threshold.
//! Every scroll event re-applies the state; there is no throttling.

use tracing::trace;

use crate::dom::{Dom, ElementId, Selector};
use crate::domain::config::HeaderConfig;
use crate::eventing::{EventKind, EventOutcome, EventSource, ListenTarget, ListenerId, UiEvent};
use crate::features::Controller;

/// Navbar state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Top,
    Scrolled,
}

impl HeaderState {
    /// Strictly above the threshold is scrolled
    pub fn from_offset(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            HeaderState::Scrolled
        } else {
            HeaderState::Top
        }
    }
}

pub struct ScrollStyleController {
    config: HeaderConfig,
    navbar: Option<ElementId>,
    listener: Option<ListenerId>,
}

impl ScrollStyleController {
    pub fn new(config: &HeaderConfig) -> Self {
        Self {
            config: config.clone(),
            navbar: None,
            listener: None,
        }
    }

    fn apply(&self, dom: &mut dyn Dom) {
        let Some(navbar) = self.navbar else {
            return;
        };
        let state = HeaderState::from_offset(dom.scroll_y(), self.config.threshold_px);
        trace!(?state, scroll_y = dom.scroll_y(), "Navbar state");
        match state {
            HeaderState::Scrolled => dom.add_class(navbar, &self.config.scrolled_class),
            HeaderState::Top => dom.remove_class(navbar, &self.config.scrolled_class),
        }
    }
}

impl Controller for ScrollStyleController {
    fn name(&self) -> &'static str {
        "scroll_style"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        self.navbar = dom.query(&Selector::class(&self.config.navbar_class));
        self.listener = Some(events.add_listener(ListenTarget::Window, EventKind::Scroll));
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        _events: &mut dyn EventSource,
    ) -> EventOutcome {
        if let UiEvent::Scroll { listener } = event {
            if Some(*listener) == self.listener {
                self.apply(dom);
            }
        }
        EventOutcome::default()
    }
}
