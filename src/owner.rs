//! DFU Owner Identity
//!
//! Each subsystem that implements a firmware-update transport (Bluetooth SMP
//! service, MCUmgr management glue, ...) registers one static descriptor
//! implementing [`DfuOwner`] and presents it on every lock operation.

/// Identity of one competing firmware-update transport.
///
/// Identity is the descriptor *address*: two descriptors with the same name
/// are distinct owners. The descriptor's lifetime is managed by the
/// registering subsystem; the lock only ever stores the reference.
pub trait DfuOwner: Sync {
    /// Short label used in log messages. Never part of identity comparison.
    fn name(&self) -> &'static str;

    /// Called on the previous lock holder when a different owner acquires
    /// the lock.
    ///
    /// The expected reaction is to drop any partially received image state
    /// so the new owner starts from a clean slate. Runs synchronously inside
    /// the new owner's acquire call; it must not call back into the lock.
    fn owner_changed(&self, new_owner: &'static dyn DfuOwner) {
        let _ = new_owner;
    }
}

/// Compares descriptor addresses, ignoring vtables so the same object seen
/// through different trait objects still compares equal.
pub(crate) fn owner_eq(a: &dyn DfuOwner, b: &dyn DfuOwner) -> bool {
    core::ptr::eq(
        a as *const dyn DfuOwner as *const (),
        b as *const dyn DfuOwner as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(&'static str);

    impl DfuOwner for Plain {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn identity_is_address_not_name() {
        let a = Plain("dfu");
        let b = Plain("dfu");

        assert!(owner_eq(&a, &a));
        assert!(!owner_eq(&a, &b));
    }

    #[test]
    fn default_callback_is_a_no_op() {
        static TARGET: Plain = Plain("target");
        let a = Plain("caller");

        // Nothing to observe, just must not panic.
        a.owner_changed(&TARGET);
    }
}
