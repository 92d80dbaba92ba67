//! Xbox 360 wireless receiver decoding.
//!
//! The receiver needs [`INQUIRE_PRESENT_FRAME`] per port to start
//! reporting. Pad payloads use the XInput layout: a two-byte button word,
//! one byte per trigger, then four signed 16-bit stick axes.

use openinput_device_types::GamepadInput;
use openinput_hid_common::u16_le_at;

use crate::{XboxError, XboxResult};

/// Asks a receiver port whether a pad is bound to it.
pub const INQUIRE_PRESENT_FRAME: [u8; 12] =
    [0x08, 0x00, 0x0F, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

const MIN_PAYLOAD_LEN: usize = 14;

/// Decodes one XInput pad payload into `state`.
///
/// `data` starts at the XInput header, after the receiver's four-byte
/// wireless preamble has been stripped. Slots 0..=3 receive the sticks,
/// slots 4/5 the trigger travel.
pub fn decode_input_payload(data: &[u8], state: &mut GamepadInput) -> XboxResult<()> {
    if data.len() < MIN_PAYLOAD_LEN {
        return Err(XboxError::FrameTooShort { len: data.len(), needed: MIN_PAYLOAD_LEN });
    }

    state.buttons = u32::from(data[2]) | (u32::from(data[3]) << 8);
    state.axes[4] = i32::from(data[4]);
    state.axes[5] = i32::from(data[5]);
    for (slot, offset) in [6usize, 8, 10, 12].into_iter().enumerate() {
        let Some(raw) = u16_le_at(data, offset) else {
            return Err(XboxError::FrameTooShort { len: data.len(), needed: offset + 2 });
        };
        state.axes[slot] = i32::from(raw as i16);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_layout() {
        let mut data = [0u8; 14];
        data[2] = 0x30; // stick clicks
        data[4] = 0xFF; // left trigger
        data[6] = 0x01;
        data[7] = 0x80; // LX = -32767
        let mut state = GamepadInput::default();
        decode_input_payload(&data, &mut state).expect("payload should decode");
        assert_eq!(state.buttons, 0x30);
        assert_eq!(state.axes[4], 0xFF);
        assert_eq!(state.axes[0], -32767);
    }

    #[test]
    fn test_rejects_short_payload() {
        let mut state = GamepadInput::default();
        let err = decode_input_payload(&[0u8; 4], &mut state).expect_err("short");
        assert_eq!(err, XboxError::FrameTooShort { len: 4, needed: 14 });
    }
}
