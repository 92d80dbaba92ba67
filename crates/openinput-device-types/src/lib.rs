//! Device identification for the OpenInput decoders.
//!
//! Maps USB vendor/product IDs to the protocol family a device speaks, so
//! a host stack can route reports to the right decoder before it has seen
//! a single byte of traffic.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod gamepad;
pub mod tablet;

pub use gamepad::{GAMEPAD_PRODUCTS, GamepadKind, GamepadProduct, lookup_gamepad};
pub use tablet::{TABLET_PRODUCTS, TabletInfo, TabletKind, lookup_tablet};

use serde::{Deserialize, Serialize};

/// A USB vendor/product pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsbId {
    pub vendor: u16,
    pub product: u16,
}

impl UsbId {
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self { vendor, product }
    }
}

impl core::fmt::Display for UsbId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor, self.product)
    }
}

/// Number of axis slots a gamepad decoder may populate.
pub const AXIS_COUNT: usize = 64;

/// Decoded gamepad state, shared by every vendor decoder.
///
/// Slot meaning is per-protocol; decoders document which slots they fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadInput {
    pub buttons: u32,
    pub axes: [i32; AXIS_COUNT],
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self { buttons: 0, axes: [0; AXIS_COUNT] }
    }
}
