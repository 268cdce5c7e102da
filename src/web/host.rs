//! BrowserHost - Wires a [`Site`] to the browser
//!
//! One document click listener and one window scroll listener feed the
//! site, which routes to controllers itself. Observers and intervals are
//! created on demand from host requests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::AHashMap;
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::WebDom;
use crate::app::Site;
use crate::eventing::{HostRequest, IntersectionEntry, ObserverId, ObserverOptions, TimerId};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct HostState {
    site: Site<WebDom>,
    observers: AHashMap<ObserverId, (IntersectionObserver, ObserverCallback)>,
    intervals: AHashMap<TimerId, (i32, Closure<dyn FnMut()>)>,
    /// Closures of cleared intervals. A closure may be clearing its own
    /// interval, so it cannot be dropped while running.
    retired: Vec<Closure<dyn FnMut()>>,
}

pub struct BrowserHost {
    state: Rc<RefCell<HostState>>,
}

impl BrowserHost {
    /// Attach page-level listeners. Controllers are not mounted until
    /// [`BrowserHost::load`].
    pub fn install(site: Site<WebDom>) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(HostState {
            site,
            observers: AHashMap::new(),
            intervals: AHashMap::new(),
            retired: Vec::new(),
        }));

        let (window, document) = {
            let state = state.borrow();
            let dom = state.site.dom();
            (dom.window().clone(), dom.document().clone())
        };

        let weak = Rc::downgrade(&state);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            with_state(&weak, |state| {
                let target = state.site.dom().intern(element);
                let outcome = state.site.dispatch_click(target);
                if outcome.default_prevented {
                    event.prevent_default();
                }
            });
        });
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        let weak = Rc::downgrade(&state);
        let on_scroll = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_state(&weak, |state| state.site.dispatch_scroll());
        });
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();

        Ok(Self { state })
    }

    /// Fire the content-loaded hook
    pub fn load(&self) {
        with_state(&Rc::downgrade(&self.state), |state| {
            state.site.on_content_loaded();
        });
    }
}

/// Run `f` against the host state, then service whatever it requested
fn with_state(weak: &Weak<RefCell<HostState>>, f: impl FnOnce(&mut HostState)) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = state.try_borrow_mut() else {
        warn!("Re-entrant browser callback skipped");
        return;
    };
    f(&mut guard);
    service(&mut guard, weak);
}

fn service(state: &mut HostState, weak: &Weak<RefCell<HostState>>) {
    for request in state.site.drain_requests() {
        debug!(?request, "Host request");
        let result = match request {
            HostRequest::Listen { .. } => Ok(()),
            HostRequest::CreateObserver { observer, options } => {
                create_observer(state, weak, observer, options)
            }
            HostRequest::Observe { observer, element } => {
                if let (Some((handle, _)), Some(element)) =
                    (state.observers.get(&observer), state.site.dom().element(element))
                {
                    handle.observe(&element);
                }
                Ok(())
            }
            HostRequest::Unobserve { observer, element } => {
                if let (Some((handle, _)), Some(element)) =
                    (state.observers.get(&observer), state.site.dom().element(element))
                {
                    handle.unobserve(&element);
                }
                Ok(())
            }
            HostRequest::StartInterval { timer, period } => {
                start_interval(state, weak, timer, period.as_millis())
            }
            HostRequest::StopInterval { timer } => {
                if let Some((handle, callback)) = state.intervals.remove(&timer) {
                    state.site.dom().window().clear_interval_with_handle(handle);
                    state.retired.push(callback);
                }
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(error = ?e, "Host request failed");
        }
    }
}

fn create_observer(
    state: &mut HostState,
    weak: &Weak<RefCell<HostState>>,
    observer: ObserverId,
    options: ObserverOptions,
) -> Result<(), JsValue> {
    let weak = weak.clone();
    let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
        with_state(&weak, |state| {
            let entries = entries
                .iter()
                .map(|value| value.unchecked_into::<IntersectionObserverEntry>())
                .map(|entry| IntersectionEntry {
                    target: state.site.dom().intern(entry.target()),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
                .collect();
            state.site.dispatch_intersections(observer, entries);
        });
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin.to_css());
    let handle = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    state.observers.insert(observer, (handle, callback));
    Ok(())
}

fn start_interval(
    state: &mut HostState,
    weak: &Weak<RefCell<HostState>>,
    timer: TimerId,
    period_ms: u128,
) -> Result<(), JsValue> {
    let weak = weak.clone();
    let callback = Closure::<dyn FnMut()>::new(move || {
        with_state(&weak, |state| state.site.dispatch_timer(timer));
    });
    let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
    let handle = state
        .site
        .dom()
        .window()
        .set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        )?;
    state.intervals.insert(timer, (handle, callback));
    Ok(())
}
