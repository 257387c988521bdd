use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;

use crate::config::TICK_INTERVAL_MS;

/// A widget that re-derives its display from wall-clock time on every tick.
pub trait Updatable {
    fn on_tick(&self, now: DateTime<Utc>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Drives a 1 Hz notification cycle for one mounted view.
///
/// Every tick samples `now` once and hands it to each listener in registration
/// order. Listeners may join or leave while the scheduler runs; the listener
/// list is snapshotted at the start of a tick, so a listener added mid-tick
/// first fires on the next one and a listener removed mid-tick is skipped.
///
/// `stop()` is idempotent and takes effect immediately: a timer callback the
/// platform already queued finds the scheduler stopped and delivers nothing.
pub struct TickScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Updatable>)>>,
    next_id: Cell<u64>,
    stopped: Cell<bool>,
    interval: RefCell<Option<Interval>>,
}

impl Inner {
    fn tick(&self, now: DateTime<Utc>) -> usize {
        if self.stopped.get() {
            return 0;
        }
        let snapshot: Vec<(ListenerId, Rc<dyn Updatable>)> = self.listeners.borrow().clone();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if self.stopped.get() {
                break;
            }
            if !self.is_registered(id) {
                continue;
            }
            listener.on_tick(now);
            delivered += 1;
        }
        delivered
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(live, _)| *live == id)
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                stopped: Cell::new(false),
                interval: RefCell::new(None),
            }),
        }
    }

    /// Appends a listener. On a stopped scheduler the listener is dropped and
    /// never notified.
    pub fn register(&self, listener: Rc<dyn Updatable>) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        if !self.inner.stopped.get() {
            self.inner.listeners.borrow_mut().push((id, listener));
        }
        id
    }

    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(live, _)| *live != id);
        listeners.len() != before
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        !self.inner.stopped.get() && self.inner.interval.borrow().is_some()
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// Registers `listeners` in order and arms the browser interval.
    /// Calling `start` again only registers; a stopped scheduler stays stopped.
    pub fn start(
        &self,
        listeners: impl IntoIterator<Item = Rc<dyn Updatable>>,
    ) -> Vec<ListenerId> {
        let ids = listeners
            .into_iter()
            .map(|listener| self.register(listener))
            .collect();

        if self.inner.stopped.get() || self.inner.interval.borrow().is_some() {
            return ids;
        }

        let weak = Rc::downgrade(&self.inner);
        let interval = Interval::new(TICK_INTERVAL_MS, move || {
            if let Some(inner) = weak.upgrade() {
                inner.tick(Utc::now());
            }
        });
        *self.inner.interval.borrow_mut() = Some(interval);
        ids
    }

    /// Delivers one tick synchronously. Returns how many listeners were notified.
    pub fn tick(&self, now: DateTime<Utc>) -> usize {
        self.inner.tick(now)
    }

    pub fn stop(&self) {
        self.inner.stopped.set(true);
        if let Some(interval) = self.inner.interval.borrow_mut().take() {
            interval.cancel();
        }
        self.inner.listeners.borrow_mut().clear();
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

thread_local! {
    static VIEW_TICKER: RefCell<Option<TickScheduler>> = const { RefCell::new(None) };
}

/// Replaces the ticker of the current view with a fresh running one.
pub fn mount_view_ticker() {
    teardown_view_ticker();
    let ticker = TickScheduler::new();
    ticker.start(std::iter::empty::<Rc<dyn Updatable>>());
    VIEW_TICKER.with(|slot| {
        *slot.borrow_mut() = Some(ticker);
    });
}

pub fn teardown_view_ticker() {
    let old = VIEW_TICKER.with(|slot| slot.borrow_mut().take());
    if let Some(ticker) = old {
        ticker.stop();
    }
}

/// Adds a widget to the current view's ticker. `None` when no view ticker is mounted.
pub fn register_with_view(listener: Rc<dyn Updatable>) -> Option<ListenerId> {
    VIEW_TICKER.with(|slot| slot.borrow().as_ref().map(|ticker| ticker.register(listener)))
}

pub fn unregister_from_view(id: ListenerId) {
    VIEW_TICKER.with(|slot| {
        if let Some(ticker) = slot.borrow().as_ref() {
            ticker.unregister(id);
        }
    });
}
