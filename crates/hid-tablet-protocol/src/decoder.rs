//! Per-model report decoding.

use openinput_device_types::{TabletInfo, TabletKind};
use openinput_hid_common::{u16_be_at, u16_le_at};
use tracing::{debug, trace};

use crate::{TabletError, TabletResult};

/// Maximum touch contacts any supported model reports.
pub const MAX_TOUCH: usize = 8;

/// What a decoded report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabletEvent {
    /// Pen position, pressure, tilt and barrel buttons changed.
    Pen,
    /// Finger contacts changed.
    Touch,
    /// Express keys or the side wheel changed.
    Frame,
}

/// Accumulated tablet state, updated by each decoded report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabletState {
    pub touch_count: usize,
    pub touch_x: [u32; MAX_TOUCH],
    pub touch_y: [u32; MAX_TOUCH],
    pub pen_buttons: u8,
    pub pen_pressure: u16,
    pub pen_distance: u16,
    pub pen_tilt_x: i16,
    pub pen_tilt_y: i16,
    pub frame_buttons: u8,
    pub frame_touch_buttons: u8,
    pub side_wheel: i16,
    pub side_wheel_button: u8,
}

impl TabletState {
    fn clear_pen(&mut self) {
        self.pen_buttons = 0;
        self.touch_count = 0;
        self.pen_pressure = 0;
        self.pen_distance = 0;
    }
}

/// Stateful decoder for one attached tablet.
#[derive(Debug)]
pub struct TabletDecoder {
    info: &'static TabletInfo,
    state: TabletState,
    /// Huion models emit a burst of `0x03` reports right after the mode
    /// switch; this many of them are swallowed before they count as
    /// unrecognized.
    ignore_count: u8,
}

impl TabletDecoder {
    pub fn new(info: &'static TabletInfo) -> Self {
        Self { info, state: TabletState::default(), ignore_count: 0 }
    }

    pub fn info(&self) -> &'static TabletInfo {
        self.info
    }

    pub fn state(&self) -> &TabletState {
        &self.state
    }

    /// Arms the post-mode-switch report filter (Huion).
    pub fn set_ignore_reports(&mut self, count: u8) {
        self.ignore_count = count;
    }

    /// Decodes one vendor report.
    ///
    /// `Ok(Some(event))` means [`state`](Self::state) now reflects a
    /// complete event; `Ok(None)` means the report was consumed without
    /// one (proximity headers, out-of-range pen). Reports the model does
    /// not speak return [`TabletError::UnrecognizedReport`] so the caller
    /// can fall back to descriptor-driven decoding.
    pub fn decode(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data.is_empty() {
            return Err(TabletError::EmptyReport);
        }
        match self.info.kind {
            TabletKind::BambooPt => self.decode_bamboo(data),
            TabletKind::WacomPts => self.decode_wacom_pts(data),
            TabletKind::Intuos5 => self.decode_intuos5(data),
            TabletKind::Intuos4 => self.decode_intuos4(data),
            TabletKind::Intuos4100 => self.decode_intuos4100(data),
            TabletKind::IntuosHt => self.decode_intuos_ht(data),
            TabletKind::H640P => self.decode_h640p(data),
        }
    }

    fn unrecognized(&self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        trace!("unrecognized report {:#04x} len {}", data[0], data.len());
        Err(TabletError::UnrecognizedReport { report_id: data[0], len: data.len() })
    }

    /// Bamboo Pen & Touch, report 2. A 64-byte report carries up to two
    /// touch slots; a 9-byte report the pen.
    fn decode_bamboo(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] != 2 {
            return self.unrecognized(data);
        }
        if data.len() == 64 {
            self.state.frame_buttons = data[1] & 0x0F;
            self.state.touch_count = 0;
            let mut offset = 0;
            for _ in 0..2 {
                if data[offset + 3] & 0x80 == 0 {
                    continue;
                }
                let slot = self.state.touch_count;
                self.state.touch_x[slot] =
                    ((u32::from(data[offset + 3]) << 8) | u32::from(data[offset + 4])) & 0x7FF;
                self.state.touch_y[slot] =
                    ((u32::from(data[offset + 5]) << 8) | u32::from(data[offset + 6])) & 0x7FF;
                self.state.touch_count += 1;
                offset += if data[1] & 0x80 != 0 { 8 } else { 9 };
            }
            let event =
                if self.state.touch_count > 0 { TabletEvent::Touch } else { TabletEvent::Frame };
            return Ok(Some(event));
        }
        if data.len() == 9 {
            let in_proximity = self.decode_pen_short(data);
            return Ok(in_proximity.then_some(TabletEvent::Pen));
        }
        self.unrecognized(data)
    }

    /// Intuos PT / CTH-x80 family, report 2.
    fn decode_wacom_pts(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] != 2 {
            return self.unrecognized(data);
        }
        if data.len() == 64 {
            if data[2] & 0x81 != 0x80 {
                let changed = self.decode_touch_slots(data, false);
                return Ok(changed.then_some(TabletEvent::Touch));
            }
            self.state.frame_buttons = data[3];
            return Ok(Some(TabletEvent::Frame));
        }
        if data.len() >= 9 && data.len() <= 16 {
            if data[1] == 0x01 {
                self.state.frame_buttons = data[3];
                return Ok(Some(TabletEvent::Frame));
            }
            self.decode_pen_short(data);
            return Ok(Some(TabletEvent::Pen));
        }
        self.unrecognized(data)
    }

    /// Intuos5 / Intuos Pro, reports 2 and 3.
    fn decode_intuos5(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] != 2 && data[0] != 3 {
            return self.unrecognized(data);
        }
        if data.len() == 64 {
            let changed = self.decode_touch_slots(data, true);
            return Ok(changed.then_some(TabletEvent::Touch));
        }
        if data.len() == 16 {
            self.state.clear_pen();

            if data[1] & 0xFC == 0xC0 {
                // Proximity header carrying the tool serial; position
                // follows in later reports.
                debug!("tool entered proximity");
                return Ok(None);
            }
            if data[1] & 0xFE == 0x20 {
                self.state.pen_distance = self.info.distance_max;
                return Ok(Some(TabletEvent::Pen));
            }
            if data[1] & 0xFE == 0x80 {
                // Frame data rides the report-3 variant only; report 2
                // with this header is the stylus leaving.
                if data[0] == 0x03 {
                    if data[2] > 0 {
                        self.state.side_wheel = i16::from(data[2]) - 128;
                    }
                    self.state.side_wheel_button = data[3];
                    self.state.frame_touch_buttons = data[5];
                    self.state.frame_buttons = data[4];
                    return Ok(Some(TabletEvent::Frame));
                }
                return Ok(None);
            }
            return Ok(self.decode_intuos_pen(data).then_some(TabletEvent::Pen));
        }
        self.unrecognized(data)
    }

    /// Intuos4, reports 2 (pen) and 0x0C (frame), both 10 bytes.
    fn decode_intuos4(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] != 2 && data[0] != 0x0C {
            return self.unrecognized(data);
        }
        if data.len() != 10 {
            return self.unrecognized(data);
        }
        self.state.clear_pen();

        if data[0] == 0x0C {
            if data[1] > 0 {
                self.state.side_wheel = i16::from(data[1]) - 128;
            }
            self.state.side_wheel_button = data[2];
            self.state.frame_buttons = data[3];
            return Ok(Some(TabletEvent::Frame));
        }
        if data[1] & 0xFC == 0xC0 {
            debug!("tool entered proximity");
            return Ok(None);
        }
        if data[1] & 0xFE == 0x20 {
            self.state.pen_distance = self.info.distance_max;
            return Ok(Some(TabletEvent::Pen));
        }
        if data[1] & 0xFE == 0x80 {
            debug!("stylus removed");
            return Ok(None);
        }
        Ok(self.decode_intuos_pen(data).then_some(TabletEvent::Pen))
    }

    /// Intuos 2018 line, report 16 (pen) and 17 (frame).
    fn decode_intuos4100(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        match data[0] {
            16 if data.len() >= 10 => {
                let tool_type = (data[1] >> 1) & 0x0F;
                if tool_type >= 4 {
                    trace!("unhandled tool type {tool_type:#x}");
                    return Ok(None);
                }
                self.state.touch_x[0] = u32::from(data[2])
                    | (u32::from(data[3]) << 8)
                    | (u32::from(data[4]) << 16);
                self.state.touch_y[0] = u32::from(data[5])
                    | (u32::from(data[6]) << 8)
                    | (u32::from(data[7]) << 16);
                self.state.pen_pressure = u16_le_at(data, 8).unwrap_or(0);
                self.state.pen_distance = u16::from(data[6]);
                self.state.pen_buttons = data[1] & 0x07;
                Ok(Some(TabletEvent::Pen))
            }
            17 if data.len() >= 2 => {
                self.state.frame_buttons = data[1];
                self.state.touch_count = 0;
                Ok(Some(TabletEvent::Frame))
            }
            _ => self.unrecognized(data),
        }
    }

    /// Intuos S / PT 2, report 2. The pen rides the short Bamboo layout,
    /// touch the 64-byte slot layout with express keys in slot `0x80`.
    fn decode_intuos_ht(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] != 2 {
            return self.unrecognized(data);
        }
        if data.len() == 64 {
            let changed = self.decode_touch_slots(data, true);
            return Ok(changed.then_some(TabletEvent::Touch));
        }
        if (9..=16).contains(&data.len()) {
            let in_proximity = self.decode_pen_short(data);
            return Ok(in_proximity.then_some(TabletEvent::Pen));
        }
        self.unrecognized(data)
    }

    /// Huion H640P, report 8; report 3 is post-init noise.
    fn decode_h640p(&mut self, data: &[u8]) -> TabletResult<Option<TabletEvent>> {
        if data[0] == 0x03 {
            if self.ignore_count > 0 {
                self.ignore_count -= 1;
                return Ok(None);
            }
            return self.unrecognized(data);
        }
        if data[0] != 0x08 || data.len() < 12 {
            return self.unrecognized(data);
        }
        if data[1] == 0xE0 {
            self.state.frame_buttons = data[4];
            return Ok(Some(TabletEvent::Frame));
        }

        let in_proximity = data[1] & 0x80 != 0;
        self.state.clear_pen();
        if data[1] >= 0x80 {
            self.state.pen_buttons = data[1] & 0x0F;
            self.state.pen_pressure = u16_le_at(data, 6).unwrap_or(0);
            self.state.pen_tilt_x = i16::from(data[10]);
            self.state.pen_tilt_y = i16::from(data[11]);
        }
        if in_proximity {
            self.state.touch_x[0] = u32::from(u16_le_at(data, 2).unwrap_or(0));
            self.state.touch_y[0] = u32::from(u16_le_at(data, 4).unwrap_or(0));
            if data[1] == 0x80 {
                self.state.pen_buttons = 0;
            }
            self.state.touch_count = 1;
        }
        Ok(in_proximity.then_some(TabletEvent::Pen))
    }

    /// Shared 9-byte pen layout (Bamboo and Intuos PT families).
    /// Returns whether the pen is in proximity.
    fn decode_pen_short(&mut self, data: &[u8]) -> bool {
        let in_range = data[1] & 0x80 != 0;
        let in_proximity = data[1] & 0x40 != 0;
        let ready = data[1] & 0x20 != 0;
        self.state.clear_pen();

        if ready {
            self.state.pen_buttons = data[1] & 0x0F;
            self.state.pen_pressure = u16_le_at(data, 6).unwrap_or(0);
        }
        if in_proximity {
            self.state.touch_x[0] = u32::from(u16_le_at(data, 2).unwrap_or(0));
            self.state.touch_y[0] = u32::from(u16_le_at(data, 4).unwrap_or(0));
            self.state.touch_count = 1;
        }
        if in_range && u16::from(data[8]) <= self.info.distance_max {
            self.state.pen_distance = self.info.distance_max - u16::from(data[8]);
        }
        in_proximity
    }

    /// Shared 64-byte multi-touch layout: up to `data[1] & 7` slots of 8
    /// bytes from offset 2. Slot id `0x80` carries express-key state on
    /// the models that set `buttons_in_slots`.
    fn decode_touch_slots(&mut self, data: &[u8], buttons_in_slots: bool) -> bool {
        let count = usize::from(data[1] & 0x07);
        let mut changed = false;
        self.state.touch_count = 0;
        let mut offset = 2;
        for _ in 0..count {
            if offset + 5 > data.len() {
                break;
            }
            if buttons_in_slots && data[offset] == 0x80 {
                self.state.frame_buttons = data[offset + 1];
                changed = true;
            } else if (2..=17).contains(&data[offset]) && data[offset + 1] & 0x80 != 0 {
                let slot = self.state.touch_count;
                if slot < MAX_TOUCH {
                    self.state.touch_x[slot] = (u32::from(data[offset + 2]) << 4)
                        | (u32::from(data[offset + 4]) >> 4);
                    self.state.touch_y[slot] = (u32::from(data[offset + 3]) << 4)
                        | (u32::from(data[offset + 4]) & 0x0F);
                    self.state.touch_count += 1;
                    changed = true;
                }
            }
            offset += 8;
        }
        changed
    }

    /// Shared Intuos pen message: big-endian coordinates with an extra
    /// low bit each in byte 9, 11-bit pressure, signed 7-bit tilt.
    fn decode_intuos_pen(&mut self, data: &[u8]) -> bool {
        let tool_type = (data[1] >> 1) & 0x0F;
        if tool_type >= 4 {
            trace!("unhandled tool type {tool_type:#x}");
            return false;
        }
        self.state.touch_x[0] =
            u32::from(u16_be_at(data, 2).unwrap_or(0)) | u32::from((data[9] >> 1) & 1);
        self.state.touch_y[0] =
            u32::from(u16_be_at(data, 4).unwrap_or(0)) | u32::from(data[9] & 1);
        self.state.pen_distance = u16::from(data[9] >> 2);
        self.state.pen_pressure = (u16::from(data[6]) << 3)
            | (u16::from(data[7] & 0xC0) >> 5)
            | u16::from(data[1] & 1);
        self.state.pen_tilt_x =
            i16::from(((data[7] << 1) & 0x7E) | (data[8] >> 7)) - 64;
        self.state.pen_tilt_y = i16::from(data[8] & 0x7F) - 64;
        self.state.pen_buttons = data[1] & 0x06;
        if self.state.pen_pressure > 10 {
            self.state.pen_buttons |= 1;
        }
        true
    }
}
