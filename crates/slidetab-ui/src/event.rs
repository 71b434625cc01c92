use slidetab_engine::coords::Vec2;

// ── input ─────────────────────────────────────────────────────────────────

/// Input events routed into the widget tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Primary button pressed and released at `pos` (a tap).
    Click { pos: Vec2 },
}

/// Result of [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

// ── control events ────────────────────────────────────────────────────────

/// Notifications a control publishes to its observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// A selection pass settled. Fired for every pass, including ones that
    /// re-select the current segment or match no segment at all.
    ValueChanged { selected_index: usize },
}

/// Returned by [`ControlEvents::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener registry owned by a control.
///
/// Listeners run synchronously, in subscription order, on the thread that
/// triggered the event. They receive the event only, never the control, so a
/// listener cannot re-enter the control that is notifying it.
#[derive(Default)]
pub struct ControlEvents {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&ControlEvent)>)>,
}

impl ControlEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&ControlEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &ControlEvent) {
        log::trace!("emit {event:?} to {} listener(s)", self.listeners.len());
        for (_, f) in &mut self.listeners {
            f(event);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_listeners_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut events = ControlEvents::new();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            events.subscribe(move |_| seen.borrow_mut().push(tag));
        }
        events.emit(&ControlEvent::ValueChanged { selected_index: 0 });
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut events = ControlEvents::new();
        let id = {
            let count = count.clone();
            events.subscribe(move |_| *count.borrow_mut() += 1)
        };
        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit(&ControlEvent::ValueChanged { selected_index: 1 });
        assert_eq!(*count.borrow(), 0);
        assert!(events.is_empty());
    }
}
