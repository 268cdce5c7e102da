//! Registry - Registration Bookkeeping
//!
//! Records which controller owns every listener, observer and timer, and
//! forwards each registration change to the host over a channel. Ownership
//! is by controller slot (its index in the site's controller list).

use std::time::Duration;

use ahash::AHashMap;
use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use super::{
    EventKind, EventSource, HostRequest, ListenTarget, ListenerId, ObserverId, ObserverOptions,
    TimerId,
};
use crate::dom::ElementId;

/// Shortest interval period a host is asked to run
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A registered listener
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerRecord {
    pub id: ListenerId,
    pub owner: usize,
    pub target: ListenTarget,
    pub kind: EventKind,
}

/// A visibility observer and its current targets
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverRecord {
    pub id: ObserverId,
    pub owner: usize,
    pub options: ObserverOptions,
    pub targets: Vec<ElementId>,
}

/// An active interval timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerRecord {
    pub owner: usize,
    pub period: Duration,
}

/// Registration bookkeeping for one page
#[derive(Debug)]
pub struct Registry {
    next_id: u32,
    listeners: Vec<ListenerRecord>,
    observers: Vec<ObserverRecord>,
    timers: AHashMap<TimerId, TimerRecord>,
    tx: Sender<HostRequest>,
    rx: Receiver<HostRequest>,
}

impl Registry {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            next_id: 1,
            listeners: Vec::new(),
            observers: Vec::new(),
            timers: AHashMap::new(),
            tx,
            rx,
        }
    }

    /// Registration surface attributing everything to `owner`
    pub fn scoped(&mut self, owner: usize) -> ScopedSource<'_> {
        ScopedSource {
            registry: self,
            owner,
        }
    }

    /// Receiver of host requests
    ///
    /// Requests from every controller are multiplexed into this channel in
    /// registration order.
    pub fn requests(&self) -> Receiver<HostRequest> {
        self.rx.clone()
    }

    /// Listeners of a kind, in registration order
    pub fn listeners(&self, kind: EventKind) -> impl Iterator<Item = &ListenerRecord> {
        self.listeners.iter().filter(move |l| l.kind == kind)
    }

    pub fn observers(&self) -> &[ObserverRecord] {
        &self.observers
    }

    pub fn observer(&self, id: ObserverId) -> Option<&ObserverRecord> {
        self.observers.iter().find(|o| o.id == id)
    }

    pub fn timer(&self, id: TimerId) -> Option<&TimerRecord> {
        self.timers.get(&id)
    }

    /// Number of intervals not yet cleared
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn send(&self, request: HostRequest) {
        let _ = self.tx.send(request);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// [`EventSource`] bound to one controller slot
pub struct ScopedSource<'a> {
    registry: &'a mut Registry,
    owner: usize,
}

impl EventSource for ScopedSource<'_> {
    fn add_listener(&mut self, target: ListenTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.registry.next());
        self.registry.listeners.push(ListenerRecord {
            id,
            owner: self.owner,
            target,
            kind,
        });
        self.registry.send(HostRequest::Listen {
            listener: id,
            target,
            kind,
        });
        id
    }

    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId {
        let id = ObserverId(self.registry.next());
        self.registry.observers.push(ObserverRecord {
            id,
            owner: self.owner,
            options,
            targets: Vec::new(),
        });
        self.registry.send(HostRequest::CreateObserver {
            observer: id,
            options,
        });
        id
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        let owner = self.owner;
        let Some(record) = self
            .registry
            .observers
            .iter_mut()
            .find(|o| o.id == observer && o.owner == owner)
        else {
            debug!(?observer, "observe on unknown observer ignored");
            return;
        };
        if record.targets.contains(&element) {
            return;
        }
        record.targets.push(element);
        self.registry
            .send(HostRequest::Observe { observer, element });
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        let owner = self.owner;
        let Some(record) = self
            .registry
            .observers
            .iter_mut()
            .find(|o| o.id == observer && o.owner == owner)
        else {
            return;
        };
        let before = record.targets.len();
        record.targets.retain(|t| *t != element);
        if record.targets.len() != before {
            self.registry
                .send(HostRequest::Unobserve { observer, element });
        }
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_INTERVAL);
        let id = TimerId(self.registry.next());
        self.registry.timers.insert(
            id,
            TimerRecord {
                owner: self.owner,
                period,
            },
        );
        self.registry
            .send(HostRequest::StartInterval { timer: id, period });
        id
    }

    fn clear_interval(&mut self, timer: TimerId) {
        let owned = self
            .registry
            .timers
            .get(&timer)
            .is_some_and(|t| t.owner == self.owner);
        if owned {
            self.registry.timers.remove(&timer);
            self.registry.send(HostRequest::StopInterval { timer });
        }
    }
}
