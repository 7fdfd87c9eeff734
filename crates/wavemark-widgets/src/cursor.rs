//! Pointer-cursor hint shared by every marker on the UI thread
//!
//! There is a single cursor slot. A marker takes it with [`acquire`] when
//! hovered and gives it back with [`release`]. Only the current owner can
//! release the slot, so when hovers overlap the most recent owner wins and an
//! older marker's hover-end can't reset a cursor it no longer owns.
//!
//! The slot is thread-local: iced delivers every event on the UI thread, and
//! tests running on separate threads each see their own slot.

use iced::mouse;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying a holder of the cursor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorOwner(u64);

impl CursorOwner {
    /// Allocate a token no other owner uses
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

thread_local! {
    static SLOT: Cell<Option<(CursorOwner, mouse::Interaction)>> = const { Cell::new(None) };
}

/// Take the cursor slot for `owner`, replacing any previous holder
pub fn acquire(owner: CursorOwner, interaction: mouse::Interaction) {
    SLOT.with(|slot| slot.set(Some((owner, interaction))));
}

/// Give the slot back if `owner` still holds it
///
/// Returns whether the cursor was reset.
pub fn release(owner: CursorOwner) -> bool {
    SLOT.with(|slot| match slot.get() {
        Some((holder, _)) if holder == owner => {
            slot.set(None);
            true
        }
        _ => false,
    })
}

/// Cursor to display right now
pub fn current() -> mouse::Interaction {
    SLOT.with(|slot| {
        slot.get()
            .map(|(_, interaction)| interaction)
            .unwrap_or_default()
    })
}

/// Current holder of the slot, if any
pub fn owner() -> Option<CursorOwner> {
    SLOT.with(|slot| slot.get().map(|(owner, _)| owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let owner = CursorOwner::next();
        acquire(owner, mouse::Interaction::ResizingHorizontally);
        assert_eq!(current(), mouse::Interaction::ResizingHorizontally);
        assert_eq!(super::owner(), Some(owner));

        assert!(release(owner));
        assert_eq!(current(), mouse::Interaction::default());
        assert!(!release(owner));
    }

    #[test]
    fn test_most_recent_owner_wins() {
        let first = CursorOwner::next();
        let second = CursorOwner::next();

        acquire(first, mouse::Interaction::ResizingHorizontally);
        acquire(second, mouse::Interaction::Pointer);

        // Stale owner can't reset the cursor
        assert!(!release(first));
        assert_eq!(current(), mouse::Interaction::Pointer);

        assert!(release(second));
        assert_eq!(current(), mouse::Interaction::default());
    }
}
