//! Common test utilities for the arbitration tests
//!
//! Provides a recording owner implementation shared by all integration
//! tests: it counts preemption notifications and remembers which owner
//! displaced it.

use std::sync::Mutex;

use dfu_lock::DfuOwner;

/// Owner that records every `owner_changed` notification it receives.
pub struct RecordingOwner {
    name: &'static str,
    preempted_by: Mutex<Vec<&'static str>>,
}

impl RecordingOwner {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            preempted_by: Mutex::new(Vec::new()),
        }
    }

    /// Names of the owners this one was notified about, in order.
    pub fn preemptions(&self) -> Vec<&'static str> {
        self.preempted_by.lock().unwrap().clone()
    }
}

impl DfuOwner for RecordingOwner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn owner_changed(&self, new_owner: &'static dyn DfuOwner) {
        self.preempted_by.lock().unwrap().push(new_owner.name());
    }
}

/// Leaks a fresh owner so each test gets isolated `'static` descriptors.
#[allow(unused)]
pub fn recording_owner(name: &'static str) -> &'static RecordingOwner {
    Box::leak(Box::new(RecordingOwner::new(name)))
}
