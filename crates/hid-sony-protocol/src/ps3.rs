//! DualShock 3 USB input report (ID `0x01`).
//!
//! Buttons live in bytes 2..=4 (select/start/stick clicks, D-pad, then
//! shoulders and face buttons, then PS). Sticks sit in bytes 6..=9;
//! bytes from 14 on carry the per-button pressure values.

use openinput_device_types::{AXIS_COUNT, GamepadInput};

use crate::{SonyResult, check_report};

pub const REPORT_ID: u8 = 0x01;
const MIN_REPORT_LEN: usize = 10;

/// Decodes one report into `state`.
///
/// Axis slots 0..=3 receive the sticks, slots 4..=9 the report header
/// bytes, and slots from 10 mirror the remaining report bytes in place
/// (pressure data included).
pub fn decode_input_report(data: &[u8], state: &mut GamepadInput) -> SonyResult<()> {
    check_report(data, REPORT_ID, MIN_REPORT_LEN)?;

    state.buttons =
        u32::from(data[2]) | (u32::from(data[3]) << 8) | (u32::from(data[4]) << 16);

    for (slot, byte) in data[6..10].iter().enumerate() {
        state.axes[slot] = i32::from(*byte);
    }
    for (slot, byte) in data[0..6].iter().enumerate() {
        state.axes[4 + slot] = i32::from(*byte);
    }
    for (slot, byte) in data.iter().enumerate().skip(10).take(AXIS_COUNT - 10) {
        state.axes[slot] = i32::from(*byte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SonyError;

    #[test]
    fn test_buttons_span_three_bytes() {
        let mut data = [0u8; 49];
        data[0] = 0x01;
        data[2] = 0x01; // select
        data[3] = 0x80; // square
        data[4] = 0x01; // PS
        let mut state = GamepadInput::default();
        decode_input_report(&data, &mut state).expect("report should decode");
        assert_eq!(state.buttons, 0x0001_8001);
    }

    #[test]
    fn test_sticks_land_in_low_axis_slots() {
        let mut data = [0u8; 49];
        data[0] = 0x01;
        data[6] = 0x10;
        data[7] = 0x20;
        data[8] = 0x30;
        data[9] = 0x40;
        data[14] = 0x99;
        let mut state = GamepadInput::default();
        decode_input_report(&data, &mut state).expect("report should decode");
        assert_eq!(&state.axes[0..4], &[0x10, 0x20, 0x30, 0x40]);
        // Pressure bytes stay at their report offsets.
        assert_eq!(state.axes[14], 0x99);
    }

    #[test]
    fn test_rejects_short_report() {
        let mut state = GamepadInput::default();
        let err = decode_input_report(&[0x01, 0, 0, 0], &mut state).expect_err("short");
        assert_eq!(err, SonyError::ReportTooShort { len: 4, needed: 10 });
    }
}
