//! Graphics tablet report decoding.
//!
//! Wacom and Huion tablets mostly bypass their own HID descriptors once
//! switched out of mouse emulation, and send vendor reports instead. A
//! [`TabletDecoder`] is built from the model facts in
//! [`openinput_device_types::TabletInfo`] and turns those reports into
//! pen, touch and frame (express-key) events.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod usage;

pub use decoder::{TabletDecoder, TabletEvent, TabletState};
pub use usage::wacom_equivalent_usage;

use thiserror::Error;

/// Errors raised by the tablet decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabletError {
    #[error("empty report")]
    EmptyReport,

    #[error("unrecognized report id {report_id:#04x} ({len} bytes) for this tablet")]
    UnrecognizedReport { report_id: u8, len: usize },
}

/// Convenience result alias for tablet decoding.
pub type TabletResult<T> = Result<T, TabletError>;
