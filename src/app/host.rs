//! VirtualHost - Headless Host with a Virtual Clock
//!
//! Services host requests against a [`MemoryDom`]: visibility is computed
//! from element layout, intervals run on a virtual clock, and clicks and
//! scrolls are synthesized by the caller.

use std::collections::BTreeMap;
use std::time::Duration;

use ahash::AHashMap;
use crossbeam_channel::Receiver;
use tracing::{debug, trace};

use super::Site;
use crate::constants::REPLAY_TRACE_CAPACITY;
use crate::dom::{Dom, ElementId, MemoryDom, Selector};
use crate::eventing::visibility::{Viewport, observe_entry};
use crate::eventing::{
    EventOutcome, HostRequest, IntersectionEntry, ObserverId, ObserverOptions, TimerId,
};
use crate::helpers::TraceLog;

/// Upper bound of request rounds per pump. Controllers only react to a
/// finite set of elements, so a quiet page settles well before this.
const MAX_PUMP_ROUNDS: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    period: Duration,
    next_due: Duration,
}

/// Headless host driving a [`Site`] over a [`MemoryDom`]
pub struct VirtualHost {
    site: Site<MemoryDom>,
    requests: Receiver<HostRequest>,
    now: Duration,
    observers: AHashMap<ObserverId, ObserverOptions>,
    /// Last reported intersection state per observed element
    observed: BTreeMap<(ObserverId, ElementId), bool>,
    timers: BTreeMap<TimerId, ScheduledTimer>,
    trace: TraceLog,
}

impl VirtualHost {
    pub fn new(site: Site<MemoryDom>) -> Self {
        let requests = site.requests();
        Self {
            site,
            requests,
            now: Duration::ZERO,
            observers: AHashMap::new(),
            observed: BTreeMap::new(),
            timers: BTreeMap::new(),
            trace: TraceLog::new(REPLAY_TRACE_CAPACITY),
        }
    }

    /// Fire the content-loaded hook and service the resulting registrations
    pub fn load(&mut self) {
        self.trace.record(self.now, "content loaded");
        self.site.on_content_loaded();
        self.pump();
    }

    pub fn site(&self) -> &Site<MemoryDom> {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Site<MemoryDom> {
        &mut self.site
    }

    pub fn dom(&self) -> &MemoryDom {
        self.site.dom()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Intervals the host is still running
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest running interval
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.next_due).min()
    }

    /// Click an element
    pub fn click(&mut self, target: ElementId) -> EventOutcome {
        let label = self.describe(target);
        self.trace.record(self.now, format!("click {label}"));
        let before = self.site.dom().scroll_y();
        let outcome = self.site.dispatch_click(target);
        self.pump();
        self.settle_scroll(before);
        outcome
    }

    /// Click the first element matching `selector`; `None` when nothing
    /// matches
    pub fn click_selector(&mut self, selector: &Selector) -> Option<EventOutcome> {
        let target = self.site.dom().query(selector)?;
        Some(self.click(target))
    }

    /// Scroll the window as a user would
    pub fn scroll_to(&mut self, y: f64) {
        let before = self.site.dom().scroll_y();
        self.site.dom_mut().set_scroll_y(y);
        let settled = self.site.dom().scroll_y();
        self.trace.record(self.now, format!("scroll to {settled}"));
        self.settle_scroll(before);
    }

    /// Run the clock forward, firing every interval that falls due
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        while let Some((timer, due)) = self.earliest_due(until) {
            self.now = due;
            self.site.dispatch_timer(timer);
            self.pump();
            if let Some(scheduled) = self.timers.get_mut(&timer) {
                scheduled.next_due = due + scheduled.period;
            }
        }
        self.now = until;
    }

    /// Advance until no interval is running or `limit` has elapsed.
    /// Returns whether the page went idle.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.now + limit;
        while let Some(due) = self.next_due() {
            if due > deadline {
                break;
            }
            self.advance(due.saturating_sub(self.now));
        }
        self.timers.is_empty()
    }

    fn earliest_due(&self, until: Duration) -> Option<(TimerId, Duration)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, t)| (*id, t.next_due))
    }

    /// Service host requests until the site stops producing them
    fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let batch: Vec<_> = self.requests.try_iter().collect();
            if batch.is_empty() {
                return;
            }

            let mut initial: BTreeMap<ObserverId, Vec<IntersectionEntry>> = BTreeMap::new();
            for request in batch {
                trace!(?request, "Host request");
                match request {
                    HostRequest::Listen { .. } => {}
                    HostRequest::CreateObserver { observer, options } => {
                        self.observers.insert(observer, options);
                    }
                    HostRequest::Observe { observer, element } => {
                        let Some(entry) = self.entry(observer, element) else {
                            continue;
                        };
                        self.observed.insert((observer, element), entry.is_intersecting);
                        initial.entry(observer).or_default().push(entry);
                    }
                    HostRequest::Unobserve { observer, element } => {
                        self.observed.remove(&(observer, element));
                    }
                    HostRequest::StartInterval { timer, period } => {
                        self.trace
                            .record(self.now, format!("interval {} started", timer.0));
                        self.timers.insert(
                            timer,
                            ScheduledTimer {
                                period,
                                next_due: self.now + period,
                            },
                        );
                    }
                    HostRequest::StopInterval { timer } => {
                        self.trace
                            .record(self.now, format!("interval {} stopped", timer.0));
                        self.timers.remove(&timer);
                    }
                }
            }

            for (observer, entries) in initial {
                self.site.dispatch_intersections(observer, entries);
            }
        }
        debug!("Host request pump did not settle");
    }

    /// Report a scroll if the offset moved, then re-evaluate visibility
    fn settle_scroll(&mut self, before: f64) {
        if self.site.dom().scroll_y() == before {
            return;
        }
        self.site.dispatch_scroll();
        self.pump();
        self.refresh_visibility();
    }

    /// Deliver entries for every observed element whose state changed
    fn refresh_visibility(&mut self) {
        let mut changed: BTreeMap<ObserverId, Vec<IntersectionEntry>> = BTreeMap::new();
        let keys: Vec<_> = self.observed.keys().copied().collect();
        for (observer, element) in keys {
            let Some(entry) = self.entry(observer, element) else {
                continue;
            };
            let previous = self.observed.insert((observer, element), entry.is_intersecting);
            if previous != Some(entry.is_intersecting) {
                changed.entry(observer).or_default().push(entry);
            }
        }

        for (observer, entries) in changed {
            self.site.dispatch_intersections(observer, entries);
        }
        self.pump();
    }

    fn entry(&self, observer: ObserverId, element: ElementId) -> Option<IntersectionEntry> {
        let options = self.observers.get(&observer)?;
        let dom = self.site.dom();
        if !dom.is_attached(element) {
            return Some(IntersectionEntry {
                target: element,
                is_intersecting: false,
                ratio: 0.0,
            });
        }
        let (top, height) = dom.layout(element);
        let viewport = Viewport {
            scroll_y: dom.scroll_y(),
            height: dom.viewport_height(),
        };
        Some(observe_entry(element, top, height, viewport, options))
    }

    fn describe(&self, element: ElementId) -> String {
        let dom = self.site.dom();
        match dom.attribute(element, "id") {
            Some(id) => format!("#{id}"),
            None => dom
                .classes(element)
                .first()
                .map_or_else(|| format!("element {}", element.index()), |c| format!(".{c}")),
        }
    }
}
