//! DualShock 4 USB input report (ID `0x01`).
//!
//! Layout: byte 1..=4 sticks (LX, LY, RX, RY), byte 5 low nibble D-pad
//! hat (8 = released) and high nibble face buttons, byte 6 shoulder and
//! meta buttons, byte 7 bit 0 PS button, bytes 8/9 analog triggers.

use openinput_device_types::{AXIS_COUNT, GamepadInput};

use crate::{SonyResult, check_report};

pub const REPORT_ID: u8 = 0x01;
const MIN_REPORT_LEN: usize = 8;

/// D-pad hat values 0..=7 folded into dedicated button bits 16..=19
/// (up, right, down, left), diagonals setting two bits.
const DPAD_TO_BUTTONS: [u32; 8] = [
    0x0001_0000,
    0x0003_0000,
    0x0002_0000,
    0x0006_0000,
    0x0004_0000,
    0x000C_0000,
    0x0008_0000,
    0x0009_0000,
];

/// Decodes one report into `state`.
///
/// Axis slot `i` receives raw report byte `i + 1`, so slots 0..=3 are the
/// sticks and slots 7/8 the trigger travel.
pub fn decode_input_report(data: &[u8], state: &mut GamepadInput) -> SonyResult<()> {
    check_report(data, REPORT_ID, MIN_REPORT_LEN)?;

    let ps = u32::from(data[7] & 0x01);
    let dpad = usize::from(data[5] & 0x0F);
    let mut buttons =
        (ps << 12) | (u32::from(data[6]) * 0x10) | u32::from(data[5] >> 4);
    if dpad < DPAD_TO_BUTTONS.len() {
        buttons |= DPAD_TO_BUTTONS[dpad];
    }
    state.buttons = buttons;

    for (slot, byte) in data[1..].iter().take(AXIS_COUNT).enumerate() {
        state.axes[slot] = i32::from(*byte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SonyError;

    fn report(bytes: &[u8]) -> GamepadInput {
        let mut state = GamepadInput::default();
        decode_input_report(bytes, &mut state).expect("report should decode");
        state
    }

    #[test]
    fn test_buttons_repacked() {
        // Square (bit 4 of byte 5), R1 (bit 1 of byte 6), PS, D-pad up.
        let data = [0x01, 0x80, 0x80, 0x80, 0x80, 0x10, 0x02, 0x01, 0x00];
        let state = report(&data);
        assert_eq!(state.buttons, 0x0001_0000 | 0x1000 | 0x20 | 0x01);
    }

    #[test]
    fn test_released_dpad_sets_no_direction() {
        let data = [0x01, 0x80, 0x80, 0x80, 0x80, 0x08, 0x00, 0x00, 0x00];
        let state = report(&data);
        assert_eq!(state.buttons & 0x000F_0000, 0);
    }

    #[test]
    fn test_axes_mirror_report_bytes() {
        let data = [0x01, 0x11, 0x22, 0x33, 0x44, 0x08, 0x00, 0x00, 0x55, 0x66];
        let state = report(&data);
        assert_eq!(&state.axes[0..4], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(state.axes[7], 0x55);
        assert_eq!(state.axes[8], 0x66);
    }

    #[test]
    fn test_rejects_wrong_report_id() {
        let data = [0x02, 0, 0, 0, 0, 0, 0, 0];
        let mut state = GamepadInput::default();
        let err = decode_input_report(&data, &mut state).expect_err("wrong id");
        assert_eq!(err, SonyError::UnexpectedReportId { expected: 0x01, actual: 0x02 });
    }

    #[test]
    fn test_rejects_short_report() {
        let mut state = GamepadInput::default();
        let err = decode_input_report(&[0x01, 0, 0], &mut state).expect_err("short");
        assert_eq!(err, SonyError::ReportTooShort { len: 3, needed: 8 });
    }
}
