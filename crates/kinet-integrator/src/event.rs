//! Named extension events and the synchronous hook registry.
//!
//! [`EventBus`] maps each [`Event`] to an ordered list of handlers, each
//! tagged with the [`SubscriberId`] of its owner. Firing is synchronous and
//! in-thread: handlers run in registration order and the first error aborts
//! the remaining handlers for that event.

use std::fmt;

use indexmap::IndexMap;
use kinet_core::{SimError, SubscriberId};
use smallvec::SmallVec;

use crate::context::StepContext;

/// An extension point of the run loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Once per `run`, before anything else.
    BeforeRun,
    /// At the start of every step.
    BeforeStep,
    /// At the end of every step.
    AfterStep,
    /// Once per `run`, after the last step.
    AfterRun,
    /// A mid-step event fired by a specific [`StepScheme`](crate::StepScheme).
    Scheme(&'static str),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeRun => write!(f, "before_run"),
            Self::BeforeStep => write!(f, "before_step"),
            Self::AfterStep => write!(f, "after_step"),
            Self::AfterRun => write!(f, "after_run"),
            Self::Scheme(name) => write!(f, "{name}"),
        }
    }
}

/// First velocity half-update of a velocity-Verlet splitting, fired after
/// the half kick that precedes the drift.
pub const UPDATE_VELOCITY_1: Event = Event::Scheme("update_velocity_1");

/// Second velocity half-update of a velocity-Verlet splitting, fired after
/// the half kick with the freshly computed forces.
pub const UPDATE_VELOCITY_2: Event = Event::Scheme("update_velocity_2");

/// A registered event handler.
pub type HookFn = Box<dyn FnMut(&mut StepContext<'_>) -> Result<(), SimError> + Send>;

struct Subscription {
    subscriber: SubscriberId,
    handler: HookFn,
}

/// Ordered handler lists per event.
#[derive(Default)]
pub struct EventBus {
    hooks: IndexMap<Event, SmallVec<[Subscription; 2]>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `event`, owned by `subscriber`.
    ///
    /// Registering the same subscriber twice is allowed and results in two
    /// invocations per firing.
    pub fn subscribe(&mut self, event: Event, subscriber: SubscriberId, handler: HookFn) {
        self.hooks.entry(event).or_default().push(Subscription {
            subscriber,
            handler,
        });
    }

    /// Remove every handler `subscriber` registered for `event`.
    ///
    /// Returns the number of handlers removed (zero is not an error).
    pub fn unsubscribe(&mut self, event: Event, subscriber: SubscriberId) -> usize {
        match self.hooks.get_mut(&event) {
            Some(list) => {
                let before = list.len();
                list.retain(|s| s.subscriber != subscriber);
                before - list.len()
            }
            None => 0,
        }
    }

    /// Remove every handler `subscriber` registered, on any event.
    pub fn unsubscribe_all(&mut self, subscriber: SubscriberId) -> usize {
        self.hooks
            .values_mut()
            .map(|list| {
                let before = list.len();
                list.retain(|s| s.subscriber != subscriber);
                before - list.len()
            })
            .sum()
    }

    /// Number of handlers registered for `event`.
    pub fn subscriber_count(&self, event: Event) -> usize {
        self.hooks.get(&event).map_or(0, |list| list.len())
    }

    /// Whether `subscriber` has any handler on `event`.
    pub fn is_subscribed(&self, event: Event, subscriber: SubscriberId) -> bool {
        self.hooks
            .get(&event)
            .is_some_and(|list| list.iter().any(|s| s.subscriber == subscriber))
    }

    /// Invoke the handlers for `event` in registration order.
    ///
    /// # Errors
    ///
    /// The first handler error, unmodified. Later handlers do not run.
    pub fn fire(&mut self, event: Event, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        if let Some(list) = self.hooks.get_mut(&event) {
            for sub in list.iter_mut() {
                (sub.handler)(ctx)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.hooks.iter().map(|(event, list)| (event, list.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinet_core::ParticleSystem;
    use kinet_space::OpenBoundary;
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> HookFn {
        let log = Arc::clone(log);
        Box::new(move |_ctx: &mut StepContext<'_>| {
            log.lock().unwrap().push(tag);
            Ok(())
        })
    }

    #[test]
    fn fires_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (SubscriberId::next(), SubscriberId::next());
        let mut bus = EventBus::new();
        bus.subscribe(Event::BeforeStep, a, recorder(&log, "a1"));
        bus.subscribe(Event::BeforeStep, b, recorder(&log, "b"));
        bus.subscribe(Event::BeforeStep, a, recorder(&log, "a2"));
        bus.subscribe(Event::AfterStep, a, recorder(&log, "after"));

        let mut system = ParticleSystem::new();
        let mut ctx = StepContext::new(&mut system, &OpenBoundary, 1.0);
        bus.fire(Event::BeforeStep, &mut ctx).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a1", "b", "a2"]);
    }

    #[test]
    fn error_aborts_remaining_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let s = SubscriberId::next();
        let mut bus = EventBus::new();
        bus.subscribe(Event::AfterRun, s, recorder(&log, "first"));
        bus.subscribe(
            Event::AfterRun,
            s,
            Box::new(|_ctx: &mut StepContext<'_>| {
                Err(SimError::ExecutionFailed {
                    reason: "boom".into(),
                })
            }),
        );
        bus.subscribe(Event::AfterRun, s, recorder(&log, "never"));

        let mut system = ParticleSystem::new();
        let mut ctx = StepContext::new(&mut system, &OpenBoundary, 1.0);
        let err = bus.fire(Event::AfterRun, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            SimError::ExecutionFailed {
                reason: "boom".into()
            }
        );
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (SubscriberId::next(), SubscriberId::next());
        let mut bus = EventBus::new();
        bus.subscribe(UPDATE_VELOCITY_1, a, recorder(&log, "a"));
        bus.subscribe(UPDATE_VELOCITY_1, b, recorder(&log, "b"));
        bus.subscribe(UPDATE_VELOCITY_2, a, recorder(&log, "a"));

        assert_eq!(bus.unsubscribe(UPDATE_VELOCITY_1, a), 1);
        assert!(!bus.is_subscribed(UPDATE_VELOCITY_1, a));
        assert!(bus.is_subscribed(UPDATE_VELOCITY_2, a));
        assert_eq!(bus.subscriber_count(UPDATE_VELOCITY_1), 1);

        assert_eq!(bus.unsubscribe_all(a), 1);
        assert_eq!(bus.unsubscribe_all(a), 0);
        assert_eq!(bus.unsubscribe(Event::BeforeRun, b), 0);
    }

    #[test]
    fn firing_unknown_event_is_noop() {
        let mut bus = EventBus::new();
        let mut system = ParticleSystem::new();
        let mut ctx = StepContext::new(&mut system, &OpenBoundary, 1.0);
        assert!(bus.fire(Event::Scheme("nobody"), &mut ctx).is_ok());
    }

    #[test]
    fn event_display() {
        assert_eq!(Event::BeforeRun.to_string(), "before_run");
        assert_eq!(UPDATE_VELOCITY_2.to_string(), "update_velocity_2");
    }
}
