//! Descriptor-driven mouse driver.

use openinput_descriptor::{HidReportConsumer, ReportDescriptor};

use crate::DriverResult;

const USAGE_PAGE_DESKTOP: u32 = 0x01;
const USAGE_PAGE_BUTTON: u32 = 0x09;
const USAGE_PAGE_CONSUMER: u32 = 0x0C;

/// One report's worth of relative mouse motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub buttons: u32,
    pub x: i32,
    pub y: i32,
    pub wheel: i32,
    pub wheel_h: i32,
}

/// Accumulates mouse fields and flags a completed report.
#[derive(Debug, Default)]
pub struct MouseDriver {
    state: MouseState,
    began: bool,
    event: bool,
}

impl MouseDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one input report through the descriptor.
    pub fn process(&mut self, descriptor: &ReportDescriptor, report: &[u8]) -> DriverResult<()> {
        descriptor.parse_input_report(report, self)?;
        Ok(())
    }

    pub fn state(&self) -> &MouseState {
        &self.state
    }

    /// Whether a complete report has arrived since the last clear.
    pub fn has_event(&self) -> bool {
        self.event
    }

    /// Clears the event flag and the relative deltas.
    pub fn clear_event(&mut self) {
        self.event = false;
        self.state.x = 0;
        self.state.y = 0;
        self.state.wheel = 0;
        self.state.wheel_h = 0;
    }
}

impl HidReportConsumer for MouseDriver {
    fn input_begin(&mut self, _top_usage: u32, _report_type: u32, _min: i32, _max: i32) {
        self.began = true;
    }

    fn input_data(&mut self, usage: u32, value: i32) {
        let page = usage >> 16;
        let usage = usage & 0xFFFF;
        match page {
            USAGE_PAGE_BUTTON => {
                if (1..=8).contains(&usage) {
                    let bit = 1u32 << (usage - 1);
                    if value != 0 {
                        self.state.buttons |= bit;
                    } else {
                        self.state.buttons &= !bit;
                    }
                }
            }
            USAGE_PAGE_DESKTOP => match usage {
                0x30 => self.state.x = value,
                0x31 => self.state.y = value,
                // Apple keyboards report horizontal scroll as Z.
                0x32 => self.state.wheel_h = value,
                0x38 => self.state.wheel = value,
                _ => {}
            },
            USAGE_PAGE_CONSUMER => {
                if usage == 0x238 {
                    self.state.wheel_h = value;
                }
            }
            _ => {}
        }
    }

    fn input_end(&mut self) {
        if self.began {
            self.began = false;
            self.event = true;
        }
    }
}
