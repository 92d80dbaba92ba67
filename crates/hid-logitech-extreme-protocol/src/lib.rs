//! Logitech Extreme 3D Pro (046d:c215) joystick decoding.
//!
//! The stick's descriptor-driven layout interleaves hat, twist and
//! buttons; this decoder unpacks the report into stable slots instead:
//! 0/1 stick X/Y, 2 twist, 3 hat, 4 slider, then the two button-group
//! bytes mirrored in slots 5/6 and folded into the button word.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

use openinput_device_types::GamepadInput;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogitechExtremeError {
    #[error("report too short: {len} byte(s), need at least {needed}")]
    ReportTooShort { len: usize, needed: usize },
}

pub type LogitechExtremeResult<T> = Result<T, LogitechExtremeError>;

const MIN_REPORT_LEN: usize = 7;

/// Decodes one report into `state`.
pub fn decode_input_report(data: &[u8], state: &mut GamepadInput) -> LogitechExtremeResult<()> {
    if data.len() < MIN_REPORT_LEN {
        return Err(LogitechExtremeError::ReportTooShort {
            len: data.len(),
            needed: MIN_REPORT_LEN,
        });
    }

    state.axes[0] = i32::from(data[0]);
    state.axes[1] = i32::from(data[1]);
    state.axes[2] = i32::from(data[3]);
    state.axes[3] = i32::from(data[2] >> 4);
    state.axes[4] = i32::from(data[5]);
    state.axes[5] = i32::from(data[4]);
    state.axes[6] = i32::from(data[6]);
    state.buttons = u32::from(data[4]) | (u32::from(data[6]) << 8);
    Ok(())
}
