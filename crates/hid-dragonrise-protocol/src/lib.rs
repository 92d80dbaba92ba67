//! DragonRise (0079:0011) NES-style pad decoding.
//!
//! The pad is a plain HID gamepad on paper, but its descriptor maps the
//! D-pad onto two saturating analog axes (0, 127 or 255) and scatters the
//! buttons over two bytes. Decoding repacks everything into one word:
//! D-pad in bits 0..=3, the byte-5 high-nibble buttons in bits 8..=11,
//! and the byte-6 buttons from bit 16.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

use openinput_device_types::GamepadInput;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragonRiseError {
    #[error("report too short: {len} byte(s), need at least {needed}")]
    ReportTooShort { len: usize, needed: usize },
}

pub type DragonRiseResult<T> = Result<T, DragonRiseError>;

const MIN_REPORT_LEN: usize = 7;

/// Decodes one report into `state`. Slots 0..=3 mirror raw bytes 3..=6.
pub fn decode_input_report(data: &[u8], state: &mut GamepadInput) -> DragonRiseResult<()> {
    if data.len() < MIN_REPORT_LEN {
        return Err(DragonRiseError::ReportTooShort { len: data.len(), needed: MIN_REPORT_LEN });
    }

    let horizontal: u32 = match data[3] {
        0x00 => 8, // left
        0xFF => 2, // right
        _ => 0,
    };
    let vertical: u32 = match data[4] {
        0x00 => 1, // up
        0xFF => 4, // down
        _ => 0,
    };
    let nibble_buttons = if data[5] != 0x0F { u32::from(data[5] >> 4) } else { 0 };
    state.buttons = horizontal | vertical | (nibble_buttons << 8) | (u32::from(data[6]) << 16);

    for (slot, byte) in data[3..7].iter().enumerate() {
        state.axes[slot] = i32::from(*byte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(b3: u8, b4: u8, b5: u8, b6: u8) -> [u8; 7] {
        [0x00, 0x7F, 0x7F, b3, b4, b5, b6]
    }

    #[test]
    fn test_dpad_from_saturated_axes() {
        let mut state = GamepadInput::default();
        decode_input_report(&report(0x00, 0xFF, 0x0F, 0x00), &mut state)
            .expect("report should decode");
        // Left plus down.
        assert_eq!(state.buttons, 8 | 4);
    }

    #[test]
    fn test_centered_axes_release_dpad() {
        let mut state = GamepadInput::default();
        decode_input_report(&report(0x7F, 0x7F, 0x0F, 0x00), &mut state)
            .expect("report should decode");
        assert_eq!(state.buttons, 0);
    }

    #[test]
    fn test_button_bytes_repacked() {
        let mut state = GamepadInput::default();
        decode_input_report(&report(0x7F, 0x7F, 0x2F, 0x05), &mut state)
            .expect("report should decode");
        assert_eq!(state.buttons, (0x2 << 8) | (0x05 << 16));
    }

    #[test]
    fn test_axes_mirror_raw_bytes() {
        let mut state = GamepadInput::default();
        decode_input_report(&report(0x10, 0x20, 0x30, 0x40), &mut state)
            .expect("report should decode");
        assert_eq!(&state.axes[0..4], &[0x10, 0x20, 0x30, 0x40]);
    }

    #[test]
    fn test_rejects_short_report() {
        let mut state = GamepadInput::default();
        let err = decode_input_report(&[0u8; 3], &mut state).expect_err("short");
        assert_eq!(err, DragonRiseError::ReportTooShort { len: 3, needed: 7 });
    }
}
