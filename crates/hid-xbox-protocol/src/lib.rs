//! Xbox One (GIP over USB) and Xbox 360 wireless receiver decoding.
//!
//! Neither device is HID class; both speak a fixed vendor framing on
//! bulk/interrupt endpoints. The frames needed to start input flowing are
//! exposed as constants so the transport layer can send them verbatim.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod xbox_360;
pub mod xbox_one;

use thiserror::Error;

/// Errors raised by the Xbox decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XboxError {
    #[error("unexpected frame type {actual:#04x}, expected {expected:#04x}")]
    UnexpectedFrameType { expected: u8, actual: u8 },

    #[error("frame too short: {len} byte(s), need at least {needed}")]
    FrameTooShort { len: usize, needed: usize },
}

/// Convenience result alias for Xbox decoding.
pub type XboxResult<T> = Result<T, XboxError>;
