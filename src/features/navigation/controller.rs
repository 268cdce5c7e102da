//! Navigation Controller

use tracing::debug;

use super::{MenuClick, MenuState};
use crate::dom::{Dom, ElementId, Selector};
use crate::domain::config::NavigationConfig;
use crate::eventing::{EventKind, EventOutcome, EventSource, ListenTarget, ListenerId, UiEvent};
use crate::features::Controller;

pub struct NavigationController {
    config: NavigationConfig,
    state: MenuState,
    hamburger: Option<ElementId>,
    menu: Option<ElementId>,
    hamburger_listener: Option<ListenerId>,
    link_listeners: Vec<ListenerId>,
    document_listener: Option<ListenerId>,
}

impl NavigationController {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            config: config.clone(),
            state: MenuState::Closed,
            hamburger: None,
            menu: None,
            hamburger_listener: None,
            link_listeners: Vec::new(),
            document_listener: None,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    fn is_within(&self, root: Option<ElementId>, target: ElementId, dom: &dyn Dom) -> bool {
        root.is_some_and(|root| dom.contains(root, target))
    }

    fn classify(&self, listener: ListenerId, target: ElementId, dom: &dyn Dom) -> Option<MenuClick> {
        if Some(listener) == self.hamburger_listener {
            return Some(MenuClick::Hamburger);
        }
        if self.link_listeners.contains(&listener) {
            return Some(MenuClick::Link);
        }
        if Some(listener) == self.document_listener {
            let inside = self.is_within(self.hamburger, target, dom)
                || self.is_within(self.menu, target, dom);
            return Some(if inside {
                MenuClick::Inside
            } else {
                MenuClick::Outside
            });
        }
        None
    }

    fn set_state(&mut self, state: MenuState, dom: &mut dyn Dom) {
        if state != self.state {
            debug!(from = ?self.state, to = ?state, "Menu state changed");
        }
        self.state = state;
        self.project(dom);
    }

    /// Write the state to the three class flags
    fn project(&self, dom: &mut dyn Dom) {
        let flags = [
            (self.hamburger, self.config.active_class.as_str()),
            (self.menu, self.config.active_class.as_str()),
            (dom.body(), self.config.body_lock_class.as_str()),
        ];
        for (element, class) in flags {
            let Some(element) = element else {
                continue;
            };
            if self.state.is_open() {
                dom.add_class(element, class);
            } else {
                dom.remove_class(element, class);
            }
        }
    }
}

impl Controller for NavigationController {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        self.hamburger = dom.query(&Selector::class(&self.config.hamburger_class));
        self.menu = dom.query(&Selector::class(&self.config.menu_class));

        if let Some(hamburger) = self.hamburger {
            self.hamburger_listener =
                Some(events.add_listener(ListenTarget::Element(hamburger), EventKind::Click));
        }

        self.link_listeners = dom
            .query_all(&Selector::class(&self.config.link_class))
            .into_iter()
            .map(|link| events.add_listener(ListenTarget::Element(link), EventKind::Click))
            .collect();

        self.document_listener = Some(events.add_listener(ListenTarget::Document, EventKind::Click));

        debug!(
            hamburger = self.hamburger.is_some(),
            menu = self.menu.is_some(),
            links = self.link_listeners.len(),
            "Navigation mounted"
        );
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        _events: &mut dyn EventSource,
    ) -> EventOutcome {
        if let UiEvent::Click { listener, target } = event {
            if let Some(click) = self.classify(*listener, *target, dom) {
                let next = self.state.on_click(click);
                self.set_state(next, dom);
            }
        }
        EventOutcome::default()
    }
}
