//! Counter Controller
//!
//! One observer for all stat numbers; one interval per running ramp. Each
//! element is unobserved as soon as its ramp starts, and each interval is
//! cleared on the tick that reaches the target.

use std::time::Duration;

use ahash::AHashMap;
use tracing::{debug, info};

use super::{CounterRamp, render_value};
use crate::dom::{Dom, ElementId, Selector};
use crate::domain::config::CounterConfig;
use crate::eventing::{
    EventOutcome, EventSource, IntersectionEntry, ObserverId, ObserverOptions, TimerId, UiEvent,
};
use crate::features::Controller;
use crate::utils::format::parse_digits;

struct RunningCounter {
    element: ElementId,
    ramp: CounterRamp,
}

pub struct CounterController {
    config: CounterConfig,
    observer: Option<ObserverId>,
    running: AHashMap<TimerId, RunningCounter>,
}

impl CounterController {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            config: config.clone(),
            observer: None,
            running: AHashMap::new(),
        }
    }

    /// Number of ramps still ticking
    pub fn running(&self) -> usize {
        self.running.len()
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    fn start(
        &mut self,
        observer: ObserverId,
        entry: &IntersectionEntry,
        dom: &mut dyn Dom,
        events: &mut dyn EventSource,
    ) {
        events.unobserve(observer, entry.target);

        let text = dom.text(entry.target);
        let Some(target) = parse_digits(&text) else {
            debug!(%text, "Counter text has no digits, left as is");
            return;
        };
        let ramp = CounterRamp::new(
            target,
            Duration::from_millis(self.config.duration_ms),
            self.tick_period(),
        );
        let timer = events.set_interval(self.tick_period());
        debug!(%text, target, ?timer, "Counter started");

        self.running.insert(
            timer,
            RunningCounter {
                element: entry.target,
                ramp,
            },
        );
    }

    fn tick(&mut self, timer: TimerId, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        let Some(counter) = self.running.get_mut(&timer) else {
            return;
        };
        let step = counter.ramp.tick();
        let element = counter.element;
        let target = counter.ramp.target();

        if step.finished {
            events.clear_interval(timer);
            self.running.remove(&timer);
            info!(target, "Counter finished");
        }

        let text = render_value(&dom.text(element), step.value);
        dom.set_text(element, &text);
    }
}

impl Controller for CounterController {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn mount(&mut self, dom: &mut dyn Dom, events: &mut dyn EventSource) {
        let observer = events.create_observer(ObserverOptions::default());
        self.observer = Some(observer);

        let counters = dom.query_all(&Selector::class(&self.config.counter_class));
        debug!(count = counters.len(), "Observing counters");
        for counter in counters {
            events.observe(observer, counter);
        }
    }

    fn handle(
        &mut self,
        event: &UiEvent,
        dom: &mut dyn Dom,
        events: &mut dyn EventSource,
    ) -> EventOutcome {
        match event {
            UiEvent::Intersection { observer, entries } if Some(*observer) == self.observer => {
                for entry in entries.iter().filter(|e| e.is_intersecting) {
                    self.start(*observer, entry, dom, events);
                }
            }
            UiEvent::TimerTick { timer } => self.tick(*timer, dom, events),
            _ => {}
        }
        EventOutcome::default()
    }
}
