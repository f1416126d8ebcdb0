//! Workspace change notifications.
//!
//! The decompiler mutates the graph through many intermediate states, so the
//! whole traversal runs with notifications disabled. Disabling is scoped: the
//! guard re-enables on drop, on every exit path.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{BlockId, VariableId};

/// A change to the workspace, recorded while notifications are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    BlockCreated(BlockId),
    BlockDisposed(BlockId),
    Connected { parent: BlockId, child: BlockId },
    Chained { previous: BlockId, next: BlockId },
    VariableCreated(VariableId),
}

#[derive(Debug, Default)]
struct EventState {
    disabled: Cell<u32>,
    log: RefCell<Vec<ChangeEvent>>,
}

/// Shared handle to the workspace's notification stream. Cloning is cheap and
/// lets a disable guard outlive the `&mut Workspace` borrow the builders hold.
#[derive(Debug, Clone, Default)]
pub struct EventStream {
    state: Rc<EventState>,
}

impl EventStream {
    pub fn enabled(&self) -> bool {
        self.state.disabled.get() == 0
    }

    /// Suspends notifications until the returned guard drops. Nests.
    #[must_use = "notifications re-enable as soon as the guard drops"]
    pub fn disable(&self) -> EventsGuard {
        self.state.disabled.set(self.state.disabled.get() + 1);
        EventsGuard {
            state: Rc::clone(&self.state),
        }
    }

    pub(super) fn record(&self, event: ChangeEvent) {
        if self.enabled() {
            self.state.log.borrow_mut().push(event);
        }
    }

    /// Drains and returns all recorded events.
    pub fn take(&self) -> Vec<ChangeEvent> {
        self.state.log.take()
    }

    pub fn len(&self) -> usize {
        self.state.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII guard returned by [`EventStream::disable`].
pub struct EventsGuard {
    state: Rc<EventState>,
}

impl Drop for EventsGuard {
    fn drop(&mut self) {
        let depth = self.state.disabled.get();
        self.state.disabled.set(depth.saturating_sub(1));
    }
}
