//! Signal/slot system for Marmot.
//!
//! This module provides a type-safe multicast mechanism for change
//! notification. Signals are emitted by the widget tree when state changes
//! (a size was assigned, a widget finished initializing), and connected
//! slots (callbacks) are invoked in response.
//!
//! Unlike a general cross-thread signal bus, Marmot's frame model is
//! single-threaded and cooperative: every emission invokes its slots
//! directly, in registration order. Connections are stored in an ordered
//! list so that "clear everything and install mine" semantics (used by
//! custom render handlers) behave predictably.
//!
//! # Example
//!
//! ```
//! use marmot_core::Signal;
//!
//! let size_changed = Signal::<(f32, f32)>::new();
//! let id = size_changed.connect(|&(w, h)| {
//!     println!("resized to {w}x{h}");
//! });
//! size_changed.emit((100.0, 50.0));
//! size_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a signal-slot connection.
///
/// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`] to
/// remove that specific slot. IDs are unique per signal and are never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// Internal storage for a single connection.
struct Connection<Args> {
    id: ConnectionId,
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with an ordered list of connected slots.
///
/// When a signal is emitted, all connected slots are invoked with the
/// provided arguments, in the order they were connected.
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to slots. Use `()` for signals with no
///   arguments, or a tuple for several.
pub struct Signal<Args> {
    /// Active connections, in registration order.
    connections: Mutex<Vec<Connection<Args>>>,
    /// Source for the next connection ID.
    next_id: AtomicU64,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later. Slots are invoked in connection order.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.lock().push(Connection {
            id,
            slot: Arc::new(slot),
        });
        id
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let before = connections.len();
        connections.retain(|c| c.id != id);
        connections.len() != before
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// The number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during batch
    /// updates to suppress cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in order.
    ///
    /// The slot list is snapshotted before invocation, so a slot may connect
    /// or disconnect handlers on the same signal without deadlocking; such
    /// changes take effect on the next emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "marmot_core::signal", "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> =
            self.connections.lock().iter().map(|c| c.slot.clone()).collect();
        tracing::trace!(target: "marmot_core::signal", slot_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn emit_invokes_slots_in_order() {
        let signal = Signal::<i32>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let a = log.clone();
        signal.connect(move |n| a.lock().push(("a", *n)));
        let b = log.clone();
        signal.connect(move |n| b.lock().push(("b", *n)));

        signal.emit(7);
        assert_eq!(*log.lock(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn disconnect_removes_only_that_slot() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicI32::new(0));

        let c1 = count.clone();
        let id = signal.connect(move |()| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = count.clone();
        signal.connect(move |()| {
            c2.fetch_add(10, Ordering::SeqCst);
        });

        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn disconnect_all_clears_everything() {
        let signal = Signal::<()>::new();
        signal.connect(|()| {});
        signal.connect(|()| {});
        assert_eq!(signal.connection_count(), 2);
        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn blocked_signal_does_not_emit() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicI32::new(0));
        let c = count.clone();
        signal.connect(move |()| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn slot_may_reconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let inner = signal.clone();
        signal.connect(move |()| {
            inner.connect(|()| {});
        });
        signal.emit(());
        assert_eq!(signal.connection_count(), 2);
    }
}
