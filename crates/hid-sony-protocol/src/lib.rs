//! DualShock 3 and DualShock 4 input-report decoding.
//!
//! Both pads also enumerate as plain HID gamepads; these decoders exist
//! because the descriptor-driven path leaves the button bytes in vendor
//! order. Decoding repacks them into one `buttons` word with the D-pad
//! folded in, and mirrors the raw report bytes into axis slots.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ps3;
pub mod ps4;

use thiserror::Error;

/// Errors raised by the DualShock decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SonyError {
    #[error("unexpected report id {actual:#04x}, expected {expected:#04x}")]
    UnexpectedReportId { expected: u8, actual: u8 },

    #[error("report too short: {len} byte(s), need at least {needed}")]
    ReportTooShort { len: usize, needed: usize },
}

/// Convenience result alias for DualShock decoding.
pub type SonyResult<T> = Result<T, SonyError>;

pub(crate) fn check_report(data: &[u8], expected_id: u8, min_len: usize) -> SonyResult<()> {
    if data.len() < min_len {
        return Err(SonyError::ReportTooShort { len: data.len(), needed: min_len });
    }
    if data[0] != expected_id {
        return Err(SonyError::UnexpectedReportId { expected: expected_id, actual: data[0] });
    }
    Ok(())
}
