//! Smooth Anchor Scroll
//!
//! In-page links scroll smoothly to their target, leaving room for the
//! fixed header, instead of jumping.

use tracing::debug;

use crate::dom::{Dom, ElementId, ScrollBehavior, Selector};
use crate::domain::config::AnchorConfig;
use crate::eventing::{EventKind, EventOutcome, EventSource, ListenTarget, ListenerId, UiEvent};
use crate::features::Controller;

/// Scroll destination for a target at `target_top`
pub fn destination_offset(target_top: f64, header_offset: f64) -> f64 {
    target_top - header_offset
}

/// Fragment id of an in-page href; `None` for a bare `#` or other links
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub struct AnchorScrollController {
    header_offset: f64,
    anchors: Vec<(ListenerId, ElementId)>,
}

impl AnchorScrollController {
    pub fn new(config: &AnchorConfig) -> Self {
        Self {
            header_offset: config.header_offset_px,
            anchors: Vec::new(),
        }
    }

    fn scroll_to_fragment(&self, anchor: ElementId, dom: &mut dyn Dom) {
        let href = dom.attribute(anchor, "href").unwrap_or_default();
        let Some(target) = fragment_id(&href).and_then(|id| dom.element_by_id(id)) else {
            debug!(%href, "Anchor target not found");
            return;
        };
        let top = destination_offset(dom.offset_top(target), self.header_offset);
        debug!(%href, top, "Smooth scrolling to anchor");
        dom.scroll_to(top, ScrollBehavior::Smooth);
    }
}

impl Controller for AnchorScrollController {
    fn name(&self) -> &'static str {
        "anchor_scroll"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        self.anchors = dom
            .query_all(&Selector::fragment_links())
            .into_iter()
            .map(|anchor| {
                let listener = events.add_listener(ListenTarget::Element(anchor), EventKind::Click);
                (listener, anchor)
            })
            .collect();
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        _events: &mut dyn EventSource,
    ) -> EventOutcome {
        let UiEvent::Click { listener, .. } = event else {
            return EventOutcome::default();
        };
        let Some(&(_, anchor)) = self.anchors.iter().find(|(id, _)| id == listener) else {
            return EventOutcome::default();
        };

        self.scroll_to_fragment(anchor, dom);
        EventOutcome::prevent_default()
    }
}
