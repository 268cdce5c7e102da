//! Entrance Animation Trigger
//!
//! Content blocks present at startup get `animate-in` once they scroll into
//! view. Elements stay observed; re-adding the flag on later crossings is
//! harmless.

use ahash::AHashMap;
use tracing::debug;

use crate::dom::{Dom, ElementId, Selector};
use crate::domain::config::EntranceConfig;
use crate::eventing::{
    EventOutcome, EventSource, ObserverId, ObserverOptions, RootMargin, UiEvent,
};
use crate::features::Controller;

/// Per-element animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntranceState {
    #[default]
    Waiting,
    Revealed,
}

pub struct EntranceController {
    config: EntranceConfig,
    observer: Option<ObserverId>,
    states: AHashMap<ElementId, EntranceState>,
}

impl EntranceController {
    pub fn new(config: &EntranceConfig) -> Self {
        Self {
            config: config.clone(),
            observer: None,
            states: AHashMap::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.config.threshold,
            root_margin: RootMargin::bottom(self.config.bottom_margin_px),
        }
    }

    pub fn state(&self, element: ElementId) -> Option<EntranceState> {
        self.states.get(&element).copied()
    }
}

impl Controller for EntranceController {
    fn name(&self) -> &'static str {
        "entrance"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        let observer = events.create_observer(self.options());
        self.observer = Some(observer);

        let blocks = dom.query_all(&Selector::any_class(self.config.classes.iter().cloned()));
        debug!(count = blocks.len(), "Observing content blocks");
        for block in blocks {
            self.states.insert(block, EntranceState::Waiting);
            events.observe(observer, block);
        }
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        _events: &mut dyn EventSource,
    ) -> EventOutcome {
        let UiEvent::Intersection { observer, entries } = event else {
            return EventOutcome::default();
        };
        if Some(*observer) != self.observer {
            return EventOutcome::default();
        }

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(state) = self.states.get_mut(&entry.target) else {
                continue;
            };
            *state = EntranceState::Revealed;
            dom.add_class(entry.target, &self.config.animate_class);
        }
        EventOutcome::default()
    }
}
