//! Signal/slot change notifications.
//!
//! A type-safe, Qt-style observer mechanism for the engine's state
//! changes. Hosts connect slots (closures) to a [`Signal`] and receive a
//! call whenever the signal is emitted.
//!
//! The engine is single-threaded by contract, so this is a
//! direct-dispatch implementation: slots run synchronously in the
//! emitting call, in connection order, with no queuing and no event loop.
//!
//! # Example
//!
//! ```
//! use accordion::Signal;
//!
//! let expanded = Signal::<u32>::new();
//!
//! let id = expanded.connect(|row| {
//!     println!("row {row} expanded");
//! });
//!
//! expanded.emit(7);
//! expanded.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`]
    /// to remove that slot. The ID stays valid until the connection is
    /// disconnected or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A signal with any number of connected slots.
///
/// `Args` is the payload passed by reference to every slot; use `()` for
/// argument-less signals. Emission is re-entrancy-safe in the one way
/// that matters for direct dispatch: a slot may disconnect itself (or any
/// other slot) while running, because emission walks a snapshot of the
/// connection table.
pub struct Signal<Args> {
    /// All active connections.
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether emission is temporarily suppressed.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Creates a signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects a slot, returning its connection ID.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Disconnects a slot by its ID.
    ///
    /// Returns `true` if the connection existed and was removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnects every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Blocks or unblocks emission, returning the previous state.
    ///
    /// While blocked, [`emit`](Self::emit) does nothing. Connections are
    /// unaffected.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::Relaxed)
    }

    /// Returns `true` if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Relaxed)
    }

    /// Invokes every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            return;
        }
        // Snapshot so slots may connect/disconnect during emission.
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
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
