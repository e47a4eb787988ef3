#![cfg_attr(not(test), no_std)]

//! DFU ownership arbitration for competing firmware-update transports.
//!
//! Several independent subsystems may implement a firmware-update transport
//! on the same device (a Bluetooth SMP service, MCUmgr management commands,
//! a USB DFU endpoint). This crate provides the one shared primitive between
//! them:
//!
//! - [`DfuLock`]: single-writer lock over the "DFU in progress" resource
//! - [`DfuOwner`]: identity descriptor each transport registers, with a
//!   preemption callback so the displaced transport can reset its progress
//!   state
//!
//! # Example
//!
//! ```
//! use dfu_lock::{DfuLock, DfuOwner};
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//!
//! struct Transport(&'static str);
//!
//! impl DfuOwner for Transport {
//!     fn name(&self) -> &'static str {
//!         self.0
//!     }
//! }
//!
//! static SMP: Transport = Transport("ble-smp");
//! static MCUMGR: Transport = Transport("mcumgr");
//!
//! let lock: DfuLock<NoopRawMutex> = DfuLock::new();
//!
//! assert!(lock.check_and_try_acquire(&MCUMGR));
//! assert!(!lock.check_and_try_acquire(&SMP));
//!
//! lock.release(&MCUMGR);
//! assert!(lock.check_and_try_acquire(&SMP));
//! ```
//!
//! On firmware targets the lock lives in a `static` with
//! `CriticalSectionRawMutex` so BLE stack callbacks, management-protocol
//! handlers, and timeout handlers can all call it. The lock never waits:
//! acquisition fails immediately under contention, and bounding how long a
//! transport may sit on the lock is the caller's job (the usual pattern is a
//! delayable work item rescheduled on every operation that releases the lock
//! when it fires).

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod lock;
pub mod owner;

pub use lock::DfuLock;
pub use owner::DfuOwner;
