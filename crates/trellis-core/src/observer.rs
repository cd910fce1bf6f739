//! Listener lists for Trellis events.
//!
//! An [`Observers`] list holds callbacks registered for one event category.
//! Each registration returns a [`ListenerId`] token that removes it again.
//!
//! Listeners receive a mutable context (the GUI coordinator in practice) and
//! the event being dispatched. Because listeners may mutate the context, and
//! the list itself usually lives inside that context, dispatch works on a
//! snapshot of the list:
//!
//! - a listener removed during a dispatch is not invoked later in that
//!   dispatch (the caller supplies a liveness check)
//! - a listener that re-enters its own dispatch is skipped
//! - dispatch stops as soon as the event is consumed
//!
//! # Example
//!
//! ```
//! use trellis_core::observer::{Consumable, Observers};
//!
//! struct Ping { consumed: bool, hits: u32 }
//!
//! impl Consumable for Ping {
//!     fn is_consumed(&self) -> bool { self.consumed }
//!     fn consume(&mut self) { self.consumed = true; }
//! }
//!
//! let mut list: Observers<Vec<&str>, Ping> = Observers::new();
//! list.add(|log: &mut Vec<&str>, ping: &mut Ping| {
//!     log.push("first");
//!     ping.hits += 1;
//!     ping.consume();
//! });
//! list.add(|log: &mut Vec<&str>, _ping: &mut Ping| log.push("second"));
//!
//! let mut log = Vec::new();
//! let mut ping = Ping { consumed: false, hits: 0 };
//! list.emit(&mut log, &mut ping);
//! assert_eq!(log, vec!["first"]);
//! assert_eq!(ping.hits, 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A token identifying one listener registration.
///
/// Tokens are unique for the lifetime of the process, so a stale token never
/// removes a listener registered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of the token.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Events whose propagation can be stopped by a listener.
pub trait Consumable {
    /// Whether a listener has consumed the event.
    fn is_consumed(&self) -> bool;

    /// Stop propagation to the remaining listeners of this dispatch.
    fn consume(&mut self);
}

/// A shared, re-entrancy-checked listener callback.
pub type ListenerFn<C, E> = Rc<RefCell<dyn FnMut(&mut C, &mut E)>>;

/// A snapshot of a listener list, taken before dispatch.
pub type ListenerSnapshot<C, E> = Vec<(ListenerId, ListenerFn<C, E>)>;

/// An ordered list of listeners for one event category.
pub struct Observers<C, E> {
    entries: Vec<(ListenerId, ListenerFn<C, E>)>,
}

impl<C, E> Default for Observers<C, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C, E> fmt::Debug for Observers<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<C: 'static, E: 'static> Observers<C, E> {
    /// Create an empty listener list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners run in registration order.
    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &mut E) + 'static,
    {
        let id = ListenerId::next();
        let callback: ListenerFn<C, E> = Rc::new(RefCell::new(listener));
        self.entries.push((id, callback));
        tracing::trace!(target: targets::CORE, %id, "listener added");
        id
    }
}

impl<C, E> Observers<C, E> {
    /// Remove a listener by token.
    ///
    /// Returns `false` if the token is not registered here.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = self.entries.len() != before;
        if !removed {
            tracing::trace!(target: targets::CORE, %id, "remove of unknown listener ignored");
        }
        removed
    }

    /// Whether the token is currently registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copy the current registrations for a later [`dispatch`].
    pub fn snapshot(&self) -> ListenerSnapshot<C, E> {
        self.entries
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect()
    }
}

impl<C, E: Consumable> Observers<C, E> {
    /// Dispatch to a list that does not live inside the context.
    ///
    /// Returns whether the event was consumed.
    pub fn emit(&self, ctx: &mut C, event: &mut E) -> bool {
        dispatch(ctx, self.snapshot(), event, |_, _| true)
    }
}

/// Dispatch an event to a snapshot of listeners.
///
/// `is_live` is asked before each call whether the token is still
/// registered, so removals made by earlier listeners take effect at once.
/// Returns whether the event was consumed.
pub fn dispatch<C, E, L>(
    ctx: &mut C,
    snapshot: ListenerSnapshot<C, E>,
    event: &mut E,
    is_live: L,
) -> bool
where
    E: Consumable,
    L: Fn(&C, ListenerId) -> bool,
{
    for (id, callback) in snapshot {
        if event.is_consumed() {
            break;
        }
        if !is_live(ctx, id) {
            continue;
        }
        let Ok(mut callback) = callback.try_borrow_mut() else {
            tracing::trace!(target: targets::CORE, %id, "re-entrant listener skipped");
            continue;
        };
        (*callback)(ctx, event);
    }
    event.is_consumed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestEvent {
        consumed: bool,
        seen: Vec<u32>,
    }

    impl Consumable for TestEvent {
        fn is_consumed(&self) -> bool {
            self.consumed
        }

        fn consume(&mut self) {
            self.consumed = true;
        }
    }

    /// A context that owns its own listener list, as the coordinator does.
    #[derive(Default)]
    struct Host {
        list: Observers<Host, TestEvent>,
        calls: u32,
    }

    fn dispatch_host(host: &mut Host, event: &mut TestEvent) -> bool {
        let snapshot = host.list.snapshot();
        dispatch(host, snapshot, event, |h, id| h.list.contains(id))
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut host = Host::default();
        host.list.add(|_, p: &mut TestEvent| p.seen.push(1));
        host.list.add(|_, p: &mut TestEvent| p.seen.push(2));
        host.list.add(|_, p: &mut TestEvent| p.seen.push(3));

        let mut event = TestEvent::default();
        assert!(!dispatch_host(&mut host, &mut event));
        assert_eq!(event.seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_consume_stops_propagation() {
        let mut host = Host::default();
        host.list.add(|_, p: &mut TestEvent| {
            p.seen.push(1);
            p.consume();
        });
        host.list.add(|_, p: &mut TestEvent| p.seen.push(2));

        let mut event = TestEvent::default();
        assert!(dispatch_host(&mut host, &mut event));
        assert_eq!(event.seen, vec![1]);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_not_called() {
        let mut host = Host::default();
        let victim = std::rc::Rc::new(std::cell::Cell::new(None));
        let victim_ref = victim.clone();
        host.list.add(move |h: &mut Host, _| {
            if let Some(id) = victim_ref.get() {
                h.list.remove(id);
            }
        });
        let second = host.list.add(|h: &mut Host, _| h.calls += 1);
        victim.set(Some(second));

        let mut event = TestEvent::default();
        dispatch_host(&mut host, &mut event);
        assert_eq!(host.calls, 0);
        assert_eq!(host.list.len(), 1);
    }

    #[test]
    fn test_reentrant_listener_is_skipped() {
        let mut host = Host::default();
        host.list.add(|h: &mut Host, _| {
            h.calls += 1;
            let mut inner = TestEvent::default();
            dispatch_host(h, &mut inner);
        });

        let mut event = TestEvent::default();
        dispatch_host(&mut host, &mut event);
        assert_eq!(host.calls, 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reentrant_skip_is_traced() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut host = Host::default();
            host.list.add(|h: &mut Host, _| {
                let mut inner = TestEvent::default();
                dispatch_host(h, &mut inner);
            });
            dispatch_host(&mut host, &mut TestEvent::default());
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("listener added"));
        assert!(output.contains("re-entrant listener skipped"));
        assert!(output.contains(targets::CORE));
    }

    #[test]
    fn test_remove_unknown_token() {
        let mut list: Observers<(), TestEvent> = Observers::new();
        let id = list.add(|_, _| {});
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut a: Observers<(), TestEvent> = Observers::new();
        let mut b: Observers<(), TestEvent> = Observers::new();
        let first = a.add(|_, _| {});
        let second = b.add(|_, _| {});
        assert_ne!(first, second);
        assert!(!b.contains(first));
    }
}
