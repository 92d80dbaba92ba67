//! Input-report decoding for the `0x30` standard and `0x3F` simple
//! formats.

use openinput_device_types::GamepadInput;
use openinput_hid_common::u16_le_at;
use tracing::debug;

use crate::calibration::SwitchCalibration;
use crate::{REPORT_SIMPLE_INPUT, REPORT_STANDARD_INPUT, SwitchError, SwitchResult};

const STANDARD_REPORT_LEN: usize = 25;
const SIMPLE_REPORT_LEN: usize = 12;

/// Stateful decoder for one pad.
///
/// Holds the calibration and the button-word baseline: some pads report
/// a phantom `0x8000` button until a real press, so the first standard
/// report's value is treated as an offset and masked from every
/// subsequent report.
#[derive(Debug, Default)]
pub struct InputDecoder {
    calibration: SwitchCalibration,
    button_offset: u32,
    seen_standard_report: bool,
}

impl InputDecoder {
    pub fn new(calibration: SwitchCalibration) -> Self {
        Self { calibration, button_offset: 0, seen_standard_report: false }
    }

    pub fn calibration(&self) -> &SwitchCalibration {
        &self.calibration
    }

    pub fn calibration_mut(&mut self) -> &mut SwitchCalibration {
        &mut self.calibration
    }

    /// Decodes a `0x30` standard report into `state`.
    ///
    /// Slots 0..=3 are the calibrated sticks (LX, LY, RX, RY), 4..=7 the
    /// digital trigger travel, 8..=13 the raw IMU samples (accelerometer
    /// then gyro), and 14 the battery level.
    pub fn decode_standard(&mut self, data: &[u8], state: &mut GamepadInput) -> SwitchResult<()> {
        check_report(data, REPORT_STANDARD_INPUT, STANDARD_REPORT_LEN)?;

        let raw_buttons =
            u32::from(data[3]) | (u32::from(data[4]) << 8) | (u32::from(data[5]) << 16);
        if !self.seen_standard_report {
            self.seen_standard_report = true;
            if raw_buttons == 0x8000 {
                debug!("masking phantom button bit 0x8000");
                self.button_offset = 0x8000;
            }
        }
        let buttons = raw_buttons & !self.button_offset;
        state.buttons = buttons;

        let left_x = i32::from(data[6]) | (i32::from(data[7] & 0x0F) << 8);
        let left_y = (i32::from(data[7]) >> 4) | (i32::from(data[8]) << 4);
        let right_x = i32::from(data[9]) | (i32::from(data[10] & 0x0F) << 8);
        let right_y = (i32::from(data[10]) >> 4) | (i32::from(data[11]) << 4);
        (state.axes[0], state.axes[1]) = self.calibration.left_stick.normalize(left_x, left_y);
        (state.axes[2], state.axes[3]) = self.calibration.right_stick.normalize(right_x, right_y);

        // ZL/ZR have no analog travel; solo presses are synthesized into
        // trigger slots. Every slot is written each report so a release
        // clears the synthesized travel.
        state.axes[4] = i32::from(buttons == 0x0040_0000);
        state.axes[5] = i32::from(buttons == 0x0000_0040);
        if buttons == 0x0040_0040 {
            state.axes[4] = 0xFF;
            state.axes[5] = 0xFF;
        }
        state.axes[6] = if buttons == 0x0080_0000 { 0xFF } else { 0 };
        state.axes[7] = if buttons == 0x0000_0080 { 0xFF } else { 0 };
        if buttons == 0x0080_0080 {
            state.axes[6] = 0xFF;
            state.axes[7] = 0xFF;
        }

        for axis in 0..6 {
            let raw = u16_le_at(data, 13 + axis * 2).unwrap_or(0) as i16;
            state.axes[8 + axis] = i32::from(raw);
        }
        state.axes[14] = i32::from(data[2] >> 4);
        Ok(())
    }

    /// Decodes a `0x3F` simple report, sent before the handshake switches
    /// the pad to the standard format. Sticks land uncalibrated in slots
    /// 0..=3; the hat goes to slot 9.
    pub fn decode_simple(&self, data: &[u8], state: &mut GamepadInput) -> SwitchResult<()> {
        check_report(data, REPORT_SIMPLE_INPUT, SIMPLE_REPORT_LEN)?;

        let buttons = u32::from(data[1]) | (u32::from(data[2]) << 8);
        state.buttons = buttons;
        state.axes[9] = i32::from(data[3]);
        for axis in 0..4 {
            let raw = u16_le_at(data, 4 + axis * 2).unwrap_or(0);
            state.axes[axis] = i32::from(raw);
        }
        // Single-Joy-Con kludge: ZL/ZR mirror the 0x8000 button, cleared
        // on release.
        let pressed = i32::from(buttons == 0x8000);
        state.axes[6] = pressed;
        state.axes[7] = pressed;
        Ok(())
    }
}

fn check_report(data: &[u8], expected_type: u8, min_len: usize) -> SwitchResult<()> {
    if data.len() < min_len {
        return Err(SwitchError::ReportTooShort { len: data.len(), needed: min_len });
    }
    if data[0] != expected_type {
        return Err(SwitchError::UnexpectedReportType { expected: expected_type, actual: data[0] });
    }
    Ok(())
}
