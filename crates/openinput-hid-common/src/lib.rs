//! Common primitives for USB HID report decoding.
//!
//! Every decoder in the workspace reads device reports through the
//! bounds-checked [`ByteCursor`] or the bit-level helpers in [`bits`];
//! nothing in this crate performs I/O.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod bits;
pub mod cursor;

pub use bits::{extract_bits, sign_extend, signed_item_value};
pub use cursor::{ByteCursor, u16_be_at, u16_le_at};

use thiserror::Error;

/// Errors shared by the HID decoding crates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidCommonError {
    #[error("report truncated: needed {needed} more byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("invalid report: {0}")]
    InvalidReport(String),
}

/// Convenience result alias for HID decoding operations.
pub type HidCommonResult<T> = Result<T, HidCommonError>;
