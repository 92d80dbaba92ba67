//! Descriptor-driven digitizer driver for HID-conformant tablets.
//!
//! Devices whose vendor protocol is known are decoded by
//! `hid-tablet-protocol` instead; this driver covers tablets that
//! describe themselves honestly, plus Wacom models once their vendor
//! usages are rewritten through
//! [`wacom_equivalent_usage`](hid_tablet_protocol::wacom_equivalent_usage).

use hid_tablet_protocol::wacom_equivalent_usage;
use openinput_descriptor::{HidReportConsumer, ReportDescriptor};

use crate::DriverResult;

const USAGE_PAGE_DESKTOP: u32 = 0x01;
const USAGE_PAGE_BUTTON: u32 = 0x09;
const USAGE_PAGE_DIGITIZER: u32 = 0x0D;
const USAGE_PAGE_VENDOR: u32 = 0xFF00;

/// Named digitizer-page usages and the state slot each lands in.
const DIGITIZER_SLOTS: [(u32, usize); 9] = [
    (0x30, 0), // tip pressure
    (0x32, 1), // in range
    (0x36, 2), // in-air pressure
    (0x42, 3), // tip switch
    (0x44, 4), // barrel switch
    (0x5A, 5), // secondary barrel switch
    (0x5B, 6), // transducer serial
    (0x5C, 7), // battery strength
    (0x77, 8), // function key
];

pub const DIGITIZER_AXIS_COUNT: usize = DIGITIZER_SLOTS.len();
pub const VENDOR_AXIS_COUNT: usize = 16;

/// Decoded digitizer fields from the latest report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitizerState {
    pub x: i32,
    pub y: i32,
    pub wheel: i32,
    pub wheel_h: i32,
    pub buttons: u32,
    pub digitizer: [i32; DIGITIZER_AXIS_COUNT],
    pub vendor: [i32; VENDOR_AXIS_COUNT],
}

impl Default for DigitizerState {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            wheel: 0,
            wheel_h: 0,
            buttons: 0,
            digitizer: [0; DIGITIZER_AXIS_COUNT],
            vendor: [0; VENDOR_AXIS_COUNT],
        }
    }
}

/// Accumulates digitizer fields and flags a completed report.
#[derive(Debug, Default)]
pub struct DigitizerDriver {
    state: DigitizerState,
    vendor_index: usize,
    began: bool,
    event: bool,
}

impl DigitizerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one input report through the descriptor.
    pub fn process(&mut self, descriptor: &ReportDescriptor, report: &[u8]) -> DriverResult<()> {
        descriptor.parse_input_report(report, self)?;
        Ok(())
    }

    pub fn state(&self) -> &DigitizerState {
        &self.state
    }

    pub fn has_event(&self) -> bool {
        self.event
    }

    pub fn clear_event(&mut self) {
        self.event = false;
    }
}

impl HidReportConsumer for DigitizerDriver {
    fn input_begin(&mut self, _top_usage: u32, _report_type: u32, _min: i32, _max: i32) {
        self.began = true;
    }

    fn input_data(&mut self, usage: u32, value: i32) {
        let usage = wacom_equivalent_usage(usage);
        let page = usage >> 16;
        let usage = usage & 0xFFFF;
        match page {
            USAGE_PAGE_DESKTOP => match usage {
                0x30 => self.state.x = value,
                0x31 => self.state.y = value,
                0x32 => self.state.wheel_h = value,
                0x38 => self.state.wheel = value,
                _ => {}
            },
            USAGE_PAGE_BUTTON => {
                if (1..=0x32).contains(&usage) {
                    let bit = 1u32 << (usage - 1);
                    if value != 0 {
                        self.state.buttons |= bit;
                    } else {
                        self.state.buttons &= !bit;
                    }
                }
            }
            USAGE_PAGE_DIGITIZER => {
                if let Some(&(_, slot)) =
                    DIGITIZER_SLOTS.iter().find(|&&(named, _)| named == usage)
                {
                    self.state.digitizer[slot] = value;
                }
            }
            USAGE_PAGE_VENDOR => {
                // Unnamed vendor fields fill sequential slots per report.
                if self.vendor_index < VENDOR_AXIS_COUNT {
                    self.state.vendor[self.vendor_index] = value;
                    self.vendor_index += 1;
                }
            }
            _ => {}
        }
    }

    fn input_end(&mut self) {
        self.vendor_index = 0;
        if self.began {
            self.began = false;
            self.event = true;
        }
    }
}
