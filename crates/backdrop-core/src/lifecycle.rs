use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Owner side of the animation-loop cancellation flag.
///
/// The loop holds a [`LoopToken`] and checks it at the top of every scheduled
/// frame. Cancelling is synchronous: once [`LoopHandle::cancel`] returns, no
/// token reports active again.
#[derive(Debug)]
pub struct LoopHandle {
    active: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn token(&self) -> LoopToken {
        LoopToken {
            active: self.active.clone(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Returns `true` only for the call that actually stopped the loop.
    pub fn cancel(&self) -> bool {
        self.active.replace(false)
    }
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Loop side of the cancellation flag.
#[derive(Clone, Debug)]
pub struct LoopToken {
    active: Rc<Cell<bool>>,
}

impl LoopToken {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Outcome of reaching into a shared mount slot from a callback.
#[derive(Debug, PartialEq, Eq)]
pub enum SlotAccess<R> {
    Ran(R),
    /// Slot already borrowed further up the stack.
    Busy,
    /// Slot dropped or emptied by unmount.
    Vacant,
}

impl<R> SlotAccess<R> {
    pub fn ran(self) -> Option<R> {
        match self {
            SlotAccess::Ran(r) => Some(r),
            SlotAccess::Busy | SlotAccess::Vacant => None,
        }
    }
}

impl SlotAccess<bool> {
    /// Whether a frame loop should schedule another callback. A busy slot skips a frame only.
    pub fn keep_running(self) -> bool {
        match self {
            SlotAccess::Ran(keep) => keep,
            SlotAccess::Busy => true,
            SlotAccess::Vacant => false,
        }
    }
}

/// Run `f` on the slot's value without panicking on re-entrant borrows.
pub fn with_slot<T, R>(
    slot: &Weak<RefCell<Option<T>>>,
    f: impl FnOnce(&mut T) -> R,
) -> SlotAccess<R> {
    let Some(slot) = slot.upgrade() else {
        return SlotAccess::Vacant;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        return SlotAccess::Busy;
    };
    match guard.as_mut() {
        Some(value) => SlotAccess::Ran(f(value)),
        None => SlotAccess::Vacant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_slot_skips_but_keeps_loop_alive() {
        let slot = Rc::new(RefCell::new(Some(7u32)));
        let weak = Rc::downgrade(&slot);
        let _held = slot.borrow_mut();
        let access = with_slot(&weak, |v| *v > 0);
        assert_eq!(access, SlotAccess::Busy);
        assert!(access.keep_running());
    }

    #[test]
    fn vacant_slot_stops_loop() {
        let slot: Rc<RefCell<Option<u32>>> = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&slot);
        assert_eq!(with_slot(&weak, |_| true), SlotAccess::Vacant);
        assert!(!with_slot(&weak, |_| true).keep_running());

        let dropped = {
            let gone = Rc::new(RefCell::new(Some(1u32)));
            Rc::downgrade(&gone)
        };
        assert!(!with_slot(&dropped, |_| true).keep_running());
    }

    #[test]
    fn live_slot_runs_closure() {
        let slot = Rc::new(RefCell::new(Some(2u32)));
        let weak = Rc::downgrade(&slot);
        let bumped = with_slot(&weak, |v| {
            *v += 1;
            *v
        });
        assert_eq!(bumped.ran(), Some(3));
        assert!(!with_slot(&weak, |_| false).keep_running(), "torn-down backdrop stops");
        assert_eq!(*slot.borrow(), Some(3));
    }

    #[test]
    fn cancel_reaches_every_token() {
        let handle = LoopHandle::new();
        let a = handle.token();
        let b = a.clone();
        assert!(a.is_active() && b.is_active());
        assert!(handle.cancel());
        assert!(!a.is_active());
        assert!(!b.is_active());
        assert!(!handle.cancel(), "second cancel is a no-op");
    }

    #[test]
    fn dropping_handle_stops_loop() {
        let token = LoopHandle::new().token();
        assert!(!token.is_active());
    }
}
