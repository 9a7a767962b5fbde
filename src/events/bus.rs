//! Synchronous in-process event bus.
//!
//! Handlers are called in subscription order, on the engine's thread,
//! before the operation that produced the events returns. A handler gets a
//! shared reference to the event and nothing else, so it cannot reach back
//! into the engine.

use rustc_hash::FxHashMap;

use super::event::{CombatEvent, EventCategory};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Event handler callback.
pub type EventHandler = Box<dyn FnMut(&CombatEvent)>;

struct Subscriber {
    /// `None` receives every category.
    categories: Option<Vec<EventCategory>>,
    handler: EventHandler,
}

impl Subscriber {
    fn wants(&self, category: EventCategory) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |categories| categories.contains(&category))
    }
}

/// Category-filtered publish/subscribe channel.
///
/// ## Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use deck_combat::events::{CombatEvent, EventBus};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut bus = EventBus::new();
/// let id = bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
///
/// bus.publish(&CombatEvent::GameOver { victory: true });
/// bus.unsubscribe(id);
/// bus.publish(&CombatEvent::GameOver { victory: false });
///
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    subscribers: FxHashMap<SubscriptionId, Subscriber>,
    /// Subscription order.
    order: Vec<SubscriptionId>,
    next_id: u32,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &mut self,
        categories: Option<Vec<EventCategory>>,
        handler: EventHandler,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Subscriber { categories, handler });
        self.order.push(id);
        id
    }

    /// Receive every event.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        self.insert(None, Box::new(handler))
    }

    /// Receive only events in the given categories.
    pub fn subscribe_to<F>(&mut self, categories: &[EventCategory], handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        self.insert(Some(categories.to_vec()), Box::new(handler))
    }

    /// Remove a subscription. Returns true if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.subscribers.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&s| s != id);
        true
    }

    /// Deliver one event to every interested subscriber.
    pub fn publish(&mut self, event: &CombatEvent) {
        let category = event.category();
        for id in &self.order {
            if let Some(subscriber) = self.subscribers.get_mut(id) {
                if subscriber.wants(category) {
                    (subscriber.handler)(event);
                }
            }
        }
    }

    /// Deliver events in order.
    pub fn publish_all(&mut self, events: &[CombatEvent]) {
        if events.is_empty() {
            return;
        }
        tracing::trace!(count = events.len(), subscribers = self.order.len(), "publishing events");
        for event in events {
            self.publish(event);
        }
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.order)
            .finish()
    }
}
