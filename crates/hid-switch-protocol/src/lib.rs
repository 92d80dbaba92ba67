//! Switch Pro Controller protocol over USB.
//!
//! A freshly attached pad speaks a minimal report format and ignores
//! rumble and IMU until a handshake walks it through baud selection,
//! SPI calibration reads and report-format selection. [`Handshake`]
//! produces the outgoing frames and digests the acknowledgements;
//! [`SwitchCalibration`] accumulates the factory data the SPI reads
//! return; [`InputDecoder`] turns the standard `0x30` (and fallback
//! `0x3F`) reports into calibrated state.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod calibration;
pub mod handshake;
pub mod input;

pub use calibration::{ImuCalibration, SwitchCalibration};
pub use handshake::{Handshake, HandshakeFrame};
pub use input::InputDecoder;

use thiserror::Error;

/// Simple-command report type (pad to host: ack).
pub const REPORT_SIMPLE_ACK: u8 = 0x81;
/// Subcommand ack report type.
pub const REPORT_SUBCOMMAND_ACK: u8 = 0x21;
/// Standard full input report.
pub const REPORT_STANDARD_INPUT: u8 = 0x30;
/// Simple input report sent before the format switch.
pub const REPORT_SIMPLE_INPUT: u8 = 0x3F;

/// SPI flash addresses of the factory calibration blocks.
pub mod spi {
    /// Six-axis sensor calibration (24 bytes).
    pub const IMU_CALIBRATION: u16 = 0x6020;
    /// Six-axis horizontal offsets (6 bytes).
    pub const IMU_HORIZONTAL_OFFSET: u16 = 0x6080;
    /// Factory stick calibration, left then right (25 bytes).
    pub const STICK_CALIBRATION: u16 = 0x603D;
    /// Left stick parameters, dead zone included.
    pub const LEFT_STICK_PARAMETERS: u16 = 0x6086;
    /// Right stick parameters, dead zone included.
    pub const RIGHT_STICK_PARAMETERS: u16 = 0x6098;
}

/// Errors raised by the Switch decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    #[error("unexpected report type {actual:#04x}, expected {expected:#04x}")]
    UnexpectedReportType { expected: u8, actual: u8 },

    #[error("report too short: {len} byte(s), need at least {needed}")]
    ReportTooShort { len: usize, needed: usize },
}

/// Convenience result alias for Switch decoding.
pub type SwitchResult<T> = Result<T, SwitchError>;
