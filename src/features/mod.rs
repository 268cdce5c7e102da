//! Features - Independent Page Behaviors
//!
//! Each feature owns a disjoint slice of the page and a controller that
//! registers its own listeners on mount. Feature state is an explicit enum
//! projected onto class flags only when written to the DOM.

pub mod anchor_scroll;
pub mod counter;
pub mod entrance;
pub mod locale;
pub mod navigation;
pub mod scroll_style;

use crate::dom::Dom;
use crate::eventing::{EventOutcome, EventSource, UiEvent};

/// A self-initializing page behavior
pub trait Controller {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Snapshot the elements this behavior works on and register listeners
    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource);

    /// React to an event routed to one of this controller's registrations
    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        events: &mut dyn EventSource,
    ) -> EventOutcome;
}
