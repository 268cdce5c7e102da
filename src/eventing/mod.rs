//! Eventing - UI Event Source Abstraction
//!
//! Controllers never install platform callbacks themselves. They register
//! listeners, visibility observers and interval timers through
//! [`EventSource`]; the registration is recorded by the
//! [`registry::Registry`] and forwarded to the host as [`HostRequest`]s.
//! The host later reports platform activity back as [`UiEvent`]s, which the
//! site routes to the controller owning the matching registration.
//!
//! ```text
//! Controller::mount → EventSource → Registry ──HostRequest──▶ Host
//!                                                              │
//! Controller::handle ◀── Site routing ◀────── UiEvent ─────────┘
//! ```

pub mod registry;
pub mod visibility;

use std::time::Duration;

use crate::dom::ElementId;

/// Handle of a registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Handle of a visibility observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u32);

/// Handle of a repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Listened event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    Element(ElementId),
    Document,
    Window,
}

/// Root margin of a visibility observer, in pixels. Positive values grow
/// the viewport, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Margin affecting the bottom edge only
    pub fn bottom(px: f64) -> Self {
        Self {
            bottom: px,
            ..Default::default()
        }
    }

    /// CSS form, e.g. `0px 0px -50px 0px`
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Visibility observer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObserverOptions {
    /// Visible fraction at which an element counts as intersecting. Zero
    /// means any overlap, including an edge touch.
    pub threshold: f64,
    pub root_margin: RootMargin,
}

/// One visibility observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element in `[0, 1]`
    pub ratio: f64,
}

/// Events routed to controllers
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A click reached a listener; `target` is the innermost clicked element
    Click {
        listener: ListenerId,
        target: ElementId,
    },
    /// The window scrolled
    Scroll { listener: ListenerId },
    /// Observed elements changed visibility
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
    /// A repeating timer fired
    TimerTick { timer: TimerId },
}

/// What the platform should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Suppress the platform default (e.g. fragment navigation)
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }

    /// Combine outcomes of several handlers for the same event
    pub fn merge(self, other: EventOutcome) -> Self {
        Self {
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}

/// Requests from the registry to the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    Listen {
        listener: ListenerId,
        target: ListenTarget,
        kind: EventKind,
    },
    CreateObserver {
        observer: ObserverId,
        options: ObserverOptions,
    },
    Observe {
        observer: ObserverId,
        element: ElementId,
    },
    Unobserve {
        observer: ObserverId,
        element: ElementId,
    },
    StartInterval {
        timer: TimerId,
        period: Duration,
    },
    StopInterval {
        timer: TimerId,
    },
}

/// Registration surface handed to controllers
pub trait EventSource {
    fn add_listener(&mut self, target: ListenTarget, kind: EventKind) -> ListenerId;

    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId;

    fn observe(&mut self, observer: ObserverId, element: ElementId);

    /// Stop delivering entries for `element`; no-op when not observed
    fn unobserve(&mut self, observer: ObserverId, element: ElementId);

    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer; no-op when already cancelled
    fn clear_interval(&mut self, timer: TimerId);
}
