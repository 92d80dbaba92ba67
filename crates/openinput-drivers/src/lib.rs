//! Descriptor-driven input drivers.
//!
//! Each driver implements [`openinput_descriptor::HidReportConsumer`] and
//! accumulates decoded fields into device-appropriate state: relative
//! deltas for mice, axis slots and a button word for joysticks, pen and
//! touch coordinates for digitizers. [`gamepad::GamepadDriver`] sits in
//! front of the vendor-protocol crates for devices that bypass HID.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod digitizer;
pub mod gamepad;
pub mod joystick;
pub mod keyboard;
pub mod mouse;

pub use digitizer::DigitizerDriver;
pub use gamepad::GamepadDriver;
pub use joystick::JoystickDriver;
pub use keyboard::{KeyEvent, KeyboardExtrasDriver};
pub use mouse::MouseDriver;

use thiserror::Error;

/// Errors surfaced by the drivers, wrapping each decoding layer's own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error(transparent)]
    Descriptor(#[from] openinput_descriptor::DescriptorError),

    #[error(transparent)]
    Switch(#[from] hid_switch_protocol::SwitchError),

    #[error(transparent)]
    Sony(#[from] hid_sony_protocol::SonyError),

    #[error(transparent)]
    Xbox(#[from] hid_xbox_protocol::XboxError),

    #[error(transparent)]
    DragonRise(#[from] hid_dragonrise_protocol::DragonRiseError),

    #[error(transparent)]
    LogitechExtreme(#[from] hid_logitech_extreme_protocol::LogitechExtremeError),

    #[error(transparent)]
    Tablet(#[from] hid_tablet_protocol::TabletError),
}

/// Convenience result alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
