//! Site - Controller Lifecycle and Event Routing
//!
//! A [`Site`] owns the page, the six controllers and the registration
//! registry. Hosts call the `dispatch_*` methods when platform activity
//! happens and drain [`HostRequest`]s afterwards.

use crossbeam_channel::Receiver;
use tracing::{debug, info, trace};

use crate::dom::{Dom, ElementId};
use crate::domain::config::SiteConfig;
use crate::eventing::registry::Registry;
use crate::eventing::{
    EventKind, EventOutcome, HostRequest, IntersectionEntry, ListenTarget, ObserverId, TimerId,
    UiEvent,
};
use crate::features::Controller;
use crate::features::anchor_scroll::AnchorScrollController;
use crate::features::counter::CounterController;
use crate::features::entrance::EntranceController;
use crate::features::locale::LocaleController;
use crate::features::navigation::NavigationController;
use crate::features::scroll_style::ScrollStyleController;
use crate::storage::{LocalePreference, MemoryStore, PreferenceStore};
use crate::theme::inject_styles;

/// One page with its behaviors
pub struct Site<D: Dom> {
    dom: D,
    config: SiteConfig,
    store: Option<Box<dyn PreferenceStore>>,
    controllers: Vec<Box<dyn Controller>>,
    registry: Registry,
    requests: Receiver<HostRequest>,
    loaded: bool,
}

impl<D: Dom> Site<D> {
    /// Wrap a page at module load. The stylesheet is injected right away;
    /// controllers wait for [`Site::on_content_loaded`].
    pub fn new(mut dom: D, config: SiteConfig, store: Box<dyn PreferenceStore>) -> Self {
        inject_styles(&mut dom, &config);
        let registry = Registry::new();
        let requests = registry.requests();

        Self {
            dom,
            config,
            store: Some(store),
            controllers: Vec::new(),
            registry,
            requests,
            loaded: false,
        }
    }

    /// Construct and mount every controller. Runs once; later calls are
    /// ignored.
    pub fn on_content_loaded(&mut self) {
        if self.loaded {
            debug!("Content already loaded");
            return;
        }
        self.loaded = true;

        let store: Box<dyn PreferenceStore> = match self.store.take() {
            Some(store) => store,
            None => Box::new(MemoryStore::new()),
        };
        let preference = LocalePreference::new(store, self.config.locale.storage_key.clone());

        self.controllers = vec![
            Box::new(LocaleController::new(preference, &self.config.locale)),
            Box::new(NavigationController::new(&self.config.navigation)),
            Box::new(ScrollStyleController::new(&self.config.header)),
            Box::new(AnchorScrollController::new(&self.config.anchor)),
            Box::new(EntranceController::new(&self.config.entrance)),
            Box::new(CounterController::new(&self.config.counter)),
        ];

        for (owner, controller) in self.controllers.iter_mut().enumerate() {
            let mut events = self.registry.scoped(owner);
            controller.mount(&mut self.dom, &mut events);
            debug!(controller = controller.name(), "Controller mounted");
        }
        info!(controllers = self.controllers.len(), "Site behaviors initialized");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Names of the mounted controllers, in mount order
    pub fn controller_names(&self) -> Vec<&'static str> {
        self.controllers.iter().map(|c| c.name()).collect()
    }

    /// Receiver of pending host requests
    pub fn requests(&self) -> Receiver<HostRequest> {
        self.requests.clone()
    }

    /// Take every pending host request
    pub fn drain_requests(&self) -> Vec<HostRequest> {
        self.requests.try_iter().collect()
    }

    /// A click on `target`.
    ///
    /// Element listeners whose element contains the target run first (in
    /// registration order), then document listeners, then window listeners.
    pub fn dispatch_click(&mut self, target: ElementId) -> EventOutcome {
        let mut element_hits = Vec::new();
        let mut document_hits = Vec::new();
        let mut window_hits = Vec::new();

        for record in self.registry.listeners(EventKind::Click) {
            match record.target {
                ListenTarget::Element(element) => {
                    if self.dom.contains(element, target) {
                        element_hits.push((record.owner, record.id));
                    }
                }
                ListenTarget::Document => document_hits.push((record.owner, record.id)),
                ListenTarget::Window => window_hits.push((record.owner, record.id)),
            }
        }

        let mut outcome = EventOutcome::default();
        for (owner, listener) in element_hits
            .into_iter()
            .chain(document_hits)
            .chain(window_hits)
        {
            let event = UiEvent::Click { listener, target };
            outcome = outcome.merge(self.route(owner, &event));
        }
        trace!(?target, prevented = outcome.default_prevented, "Click dispatched");
        outcome
    }

    /// The window scrolled
    pub fn dispatch_scroll(&mut self) {
        let hits: Vec<_> = self
            .registry
            .listeners(EventKind::Scroll)
            .filter(|l| l.target == ListenTarget::Window)
            .map(|l| (l.owner, l.id))
            .collect();

        for (owner, listener) in hits {
            self.route(owner, &UiEvent::Scroll { listener });
        }
    }

    /// Visibility entries reported for `observer`. Entries for elements the
    /// observer no longer watches are dropped.
    pub fn dispatch_intersections(&mut self, observer: ObserverId, entries: Vec<IntersectionEntry>) {
        let Some(record) = self.registry.observer(observer) else {
            debug!(?observer, "Entries for unknown observer dropped");
            return;
        };
        let owner = record.owner;
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|e| record.targets.contains(&e.target))
            .collect();
        if entries.is_empty() {
            return;
        }

        self.route(owner, &UiEvent::Intersection { observer, entries });
    }

    /// An interval fired. Ticks of cleared timers are ignored.
    pub fn dispatch_timer(&mut self, timer: TimerId) {
        let Some(record) = self.registry.timer(timer) else {
            trace!(?timer, "Tick of cleared timer ignored");
            return;
        };
        let owner = record.owner;
        self.route(owner, &UiEvent::TimerTick { timer });
    }

    fn route(&mut self, owner: usize, event: &UiEvent) -> EventOutcome {
        let Some(controller) = self.controllers.get_mut(owner) else {
            return EventOutcome::default();
        };
        let mut events = self.registry.scoped(owner);
        controller.handle(event, &mut self.dom, &mut events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementSpec, MemoryDom, Selector};

    fn site() -> Site<MemoryDom> {
        let dom = MemoryDom::with_body(
            vec![
                ElementSpec::new("nav").with_class("navbar").child(
                    ElementSpec::new("div")
                        .with_class("hamburger")
                        .child(ElementSpec::new("span").with_class("bar")),
                ),
                ElementSpec::new("p").with_id("outside"),
            ],
            800.0,
        );
        Site::new(dom, SiteConfig::default(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn styles_are_injected_before_content_loads() {
        let site = site();
        assert!(!site.is_loaded());
        assert_eq!(site.dom().head_styles().count(), 1);
        assert!(site.controller_names().is_empty());
    }

    #[test]
    fn content_loaded_mounts_all_controllers_once() {
        let mut site = site();
        site.on_content_loaded();
        let listeners = site.registry().listeners(EventKind::Click).count();

        site.on_content_loaded();
        assert_eq!(site.registry().listeners(EventKind::Click).count(), listeners);
        assert_eq!(
            site.controller_names(),
            vec!["locale", "navigation", "scroll_style", "anchor_scroll", "entrance", "counter"]
        );
    }

    #[test]
    fn click_inside_hamburger_child_opens_menu() {
        let mut site = site();
        site.on_content_loaded();
        let hamburger = site.dom().query(&Selector::class("hamburger")).expect("hamburger");
        let span = site.dom().query(&Selector::class("bar")).expect("span");

        site.dispatch_click(span);
        assert!(site.dom().has_class(hamburger, "active"));

        let outside = site.dom().element_by_id("outside").expect("outside");
        site.dispatch_click(outside);
        assert!(!site.dom().has_class(hamburger, "active"));
    }

    #[test]
    fn ticks_of_unknown_timers_are_ignored() {
        let mut site = site();
        site.on_content_loaded();
        site.dispatch_timer(TimerId(9999));
        site.dispatch_intersections(ObserverId(9999), Vec::new());
    }
}
