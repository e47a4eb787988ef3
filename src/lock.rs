//! DFU Ownership Arbitration Lock
//!
//! Serializes competing firmware-update sessions so only one transport's
//! update procedure is in flight at a time. The displaced transport learns
//! about the new owner through [`DfuOwner::owner_changed`] and gets a chance
//! to reset its client-visible progress state.
//!
//! No operation blocks or suspends: each one is a single bounded critical
//! section, and acquisition fails immediately under contention. Retry policy
//! (typically a caller-owned timeout that releases the lock) lives entirely
//! outside the lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::owner::{owner_eq, DfuOwner};

/// Current holder of the DFU resource.
///
/// The tagged representation makes "held iff an owner is set" impossible to
/// violate, replacing the flag-plus-pointer pair such a lock is classically
/// built from.
enum Ownership {
    Free,
    Held(&'static dyn DfuOwner),
}

struct LockState {
    ownership: Ownership,
    /// Last identity to have held the lock. Survives release; used only to
    /// notify that identity when a different one acquires later.
    previous: Option<&'static dyn DfuOwner>,
}

/// Single-writer mutual exclusion over the shared "DFU in progress" resource.
///
/// Generic over the `RawMutex` flavor: firmware instantiates a `static` with
/// `CriticalSectionRawMutex` so all execution contexts (BLE stack callbacks,
/// management-protocol handlers, timeout handlers) arbitrate through genuinely
/// atomic transitions; single-threaded callers and tests use `NoopRawMutex`.
pub struct DfuLock<M: RawMutex> {
    state: Mutex<M, RefCell<LockState>>,
}

impl<M: RawMutex> DfuLock<M> {
    /// Creates a free lock with no previous owner.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(LockState {
                ownership: Ownership::Free,
                previous: None,
            })),
        }
    }

    /// Attempts the free→held transition on behalf of `new_owner`.
    ///
    /// On success the previous owner, if any and if a different identity, is
    /// notified synchronously with `new_owner` as argument before this
    /// returns. On contention nothing changes and `false` is returned; this
    /// includes calls by the current owner itself, so use
    /// [`check_and_try_acquire`](Self::check_and_try_acquire) for idempotent
    /// entry.
    pub fn try_acquire(&self, new_owner: &'static dyn DfuOwner) -> bool {
        let granted = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            match state.ownership {
                Ownership::Held(_) => None,
                Ownership::Free => {
                    state.ownership = Ownership::Held(new_owner);
                    Some(state.previous.filter(|prev| !owner_eq(*prev, new_owner)))
                }
            }
        });

        let Some(to_notify) = granted else {
            return false;
        };

        debug!("New DFU owner locked: {}", new_owner.name());

        // The new owner is already installed, so the notified party cannot
        // observe a free lock.
        if let Some(prev) = to_notify {
            prev.owner_changed(new_owner);
        }

        true
    }

    /// Releases the lock if `owner` is the current holder.
    ///
    /// A release by anyone else is silently ignored: a dispossessed owner's
    /// late timeout and its normal completion path may both call this.
    pub fn release(&self, owner: &'static dyn DfuOwner) {
        let released = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            match state.ownership {
                Ownership::Held(current) if owner_eq(current, owner) => {
                    state.previous = Some(current);
                    state.ownership = Ownership::Free;
                    true
                }
                _ => false,
            }
        });

        if released {
            debug!("DFU lock released by {}", owner.name());
        }
    }

    /// Returns whether `owner` currently holds the lock. No side effects.
    pub fn is_owner(&self, owner: &'static dyn DfuOwner) -> bool {
        self.state.lock(|state| match state.borrow().ownership {
            Ownership::Held(current) => owner_eq(current, owner),
            Ownership::Free => false,
        })
    }

    /// Idempotent acquisition: trivially succeeds for the incumbent owner
    /// (firing no notification), otherwise delegates to
    /// [`try_acquire`](Self::try_acquire).
    ///
    /// Transports should call this before every update operation, since a
    /// session spans many operations and each one re-asserts ownership.
    pub fn check_and_try_acquire(&self, owner: &'static dyn DfuOwner) -> bool {
        if self.is_owner(owner) {
            return true;
        }

        if self.try_acquire(owner) {
            return true;
        }

        warn!(
            "DFU lock failed by {} because of {} ownership",
            owner.name(),
            self.holder_name()
        );

        false
    }

    fn holder_name(&self) -> &'static str {
        self.state.lock(|state| match state.borrow().ownership {
            Ownership::Held(current) => current.name(),
            Ownership::Free => "<none>",
        })
    }
}

impl<M: RawMutex> Default for DfuLock<M> {
    fn default() -> Self {
        Self::new()
    }
}
