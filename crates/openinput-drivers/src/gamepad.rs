//! Vendor-protocol gamepad dispatch.
//!
//! [`GamepadDriver`] fronts the per-family protocol crates: it picks the
//! decoder from the product table, produces whatever startup frames the
//! device needs before it will report, and routes each incoming report to
//! the right decoder. Products without a dedicated decoder stay on the
//! generic HID path.

use hid_switch_protocol::{
    Handshake, InputDecoder, REPORT_SIMPLE_ACK, REPORT_SIMPLE_INPUT, REPORT_STANDARD_INPUT,
    REPORT_SUBCOMMAND_ACK,
};
use openinput_device_types::{GamepadInput, GamepadKind, lookup_gamepad};
use tracing::debug;

use crate::DriverResult;

/// Handshake and decoding state for a Switch Pro pad.
#[derive(Debug, Default)]
struct SwitchState {
    handshake: Handshake,
    decoder: InputDecoder,
}

/// One attached gamepad with a dedicated protocol decoder.
#[derive(Debug)]
pub struct GamepadDriver {
    kind: GamepadKind,
    switch: Option<SwitchState>,
    input: GamepadInput,
    start_sent: bool,
}

impl GamepadDriver {
    /// Builds a driver for a known product, or `None` when the device
    /// has no dedicated decoder and belongs on the HID path.
    pub fn for_device(vendor: u16, product: u16) -> Option<Self> {
        let entry = lookup_gamepad(vendor, product, false)?;
        debug!(vendor, product, kind = ?entry.kind, "gamepad decoder selected");
        Some(Self::for_kind(entry.kind))
    }

    pub fn for_kind(kind: GamepadKind) -> Self {
        let switch =
            if kind == GamepadKind::SwitchPro { Some(SwitchState::default()) } else { None };
        Self { kind, switch, input: GamepadInput::default(), start_sent: false }
    }

    pub fn kind(&self) -> GamepadKind {
        self.kind
    }

    /// Latest decoded state.
    pub fn input(&self) -> &GamepadInput {
        &self.input
    }

    /// Next frame to send before the device will report, or `None` when
    /// no (further) startup traffic is needed. Switch pads produce one
    /// frame per handshake step; the Xbox families need a single frame.
    pub fn next_startup_frame(&mut self) -> Option<Vec<u8>> {
        match self.kind {
            GamepadKind::SwitchPro => {
                let switch = self.switch.as_mut()?;
                switch.handshake.next_frame().map(|frame| frame.as_bytes().to_vec())
            }
            GamepadKind::XboxOne if !self.start_sent => {
                self.start_sent = true;
                Some(hid_xbox_protocol::xbox_one::START_INPUT_FRAME.to_vec())
            }
            GamepadKind::Xbox360 if !self.start_sent => {
                self.start_sent = true;
                Some(hid_xbox_protocol::xbox_360::INQUIRE_PRESENT_FRAME.to_vec())
            }
            _ => None,
        }
    }

    /// Feeds one incoming report or frame to the decoder.
    ///
    /// Returns whether [`input`](Self::input) was refreshed. Handshake
    /// acks, foreign report IDs and status frames consume the buffer
    /// without producing input.
    pub fn handle_report(&mut self, data: &[u8]) -> DriverResult<bool> {
        match self.kind {
            GamepadKind::SwitchPro => self.handle_switch_report(data),
            GamepadKind::Ps4 => {
                if data.first() != Some(&hid_sony_protocol::ps4::REPORT_ID) {
                    return Ok(false);
                }
                hid_sony_protocol::ps4::decode_input_report(data, &mut self.input)?;
                Ok(true)
            }
            GamepadKind::Ps3 => {
                if data.first() != Some(&hid_sony_protocol::ps3::REPORT_ID) {
                    return Ok(false);
                }
                hid_sony_protocol::ps3::decode_input_report(data, &mut self.input)?;
                Ok(true)
            }
            GamepadKind::XboxOne => {
                if data.first() != Some(&hid_xbox_protocol::xbox_one::INPUT_FRAME) {
                    return Ok(false);
                }
                hid_xbox_protocol::xbox_one::decode_input_frame(data, &mut self.input)?;
                Ok(true)
            }
            GamepadKind::Xbox360 => {
                // Pad data arrives as [0x00, 0x01, ..] wireless frames
                // with the XInput payload after the four-byte preamble.
                if data.len() < 4 || data[0] != 0x00 || data[1] != 0x01 {
                    return Ok(false);
                }
                hid_xbox_protocol::xbox_360::decode_input_payload(&data[4..], &mut self.input)?;
                Ok(true)
            }
            GamepadKind::NesPad => {
                hid_dragonrise_protocol::decode_input_report(data, &mut self.input)?;
                Ok(true)
            }
            GamepadKind::LogitechExtreme3dPro => {
                hid_logitech_extreme_protocol::decode_input_report(data, &mut self.input)?;
                Ok(true)
            }
            // No dedicated report decoder; the HID path owns these.
            GamepadKind::Ps3Motion | GamepadKind::SpaceNav | GamepadKind::Unknown => Ok(false),
        }
    }

    fn handle_switch_report(&mut self, data: &[u8]) -> DriverResult<bool> {
        let Some(switch) = self.switch.as_mut() else {
            return Ok(false);
        };
        match data.first() {
            Some(&REPORT_SIMPLE_ACK) => {
                switch.handshake.handle_ack(data);
                Ok(false)
            }
            Some(&REPORT_SUBCOMMAND_ACK) => {
                switch.decoder.calibration_mut().apply_spi_ack(data);
                switch.handshake.handle_ack(data);
                Ok(false)
            }
            Some(&REPORT_STANDARD_INPUT) => {
                switch.decoder.decode_standard(data, &mut self.input)?;
                Ok(true)
            }
            Some(&REPORT_SIMPLE_INPUT) => {
                switch.decoder.decode_simple(data, &mut self.input)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
