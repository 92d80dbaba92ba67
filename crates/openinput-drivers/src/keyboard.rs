//! Key-press tracking for keyboard extras.
//!
//! Media keys, power keys and other non-boot usages arrive as array
//! fields scattered over several report IDs. The driver collects the
//! usages pressed in each report and diffs them against the previous
//! report to emit edge events.

use openinput_descriptor::{HidReportConsumer, ReportDescriptor};

use crate::DriverResult;

const MAX_PRESSED: usize = 4;

/// A key changed state. `usage` is `usage_page << 16 | usage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub usage: u32,
    pub pressed: bool,
}

/// Tracks which extra keys are held and emits press/release edges.
#[derive(Debug, Default)]
pub struct KeyboardExtrasDriver {
    top_usage: u32,
    pressed: [u32; MAX_PRESSED],
    pressed_count: usize,
    previous: [u32; MAX_PRESSED],
    previous_count: usize,
    events: Vec<KeyEvent>,
}

impl KeyboardExtrasDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one input report through the descriptor.
    pub fn process(&mut self, descriptor: &ReportDescriptor, report: &[u8]) -> DriverResult<()> {
        descriptor.parse_input_report(report, self)?;
        Ok(())
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Usages currently held.
    pub fn pressed(&self) -> &[u32] {
        &self.previous[..self.previous_count]
    }

    fn record(&mut self, usage: u32) {
        if self.pressed_count < MAX_PRESSED
            && !self.pressed[..self.pressed_count].contains(&usage)
        {
            self.pressed[self.pressed_count] = usage;
            self.pressed_count += 1;
        }
    }
}

impl HidReportConsumer for KeyboardExtrasDriver {
    fn input_begin(&mut self, top_usage: u32, _report_type: u32, _min: i32, _max: i32) {
        self.top_usage = top_usage;
    }

    fn input_data(&mut self, usage: u32, value: i32) {
        if value == 0 {
            return;
        }
        // Array fields on some descriptors deliver the bare usage index;
        // fold in the collection's page so events stay comparable.
        let usage = if usage >> 16 == 0 { (self.top_usage & 0xFFFF_0000) | usage } else { usage };
        self.record(usage);
    }

    fn input_end(&mut self) {
        for i in 0..self.pressed_count {
            let usage = self.pressed[i];
            if !self.previous[..self.previous_count].contains(&usage) {
                self.events.push(KeyEvent { usage, pressed: true });
            }
        }
        for i in 0..self.previous_count {
            let usage = self.previous[i];
            if !self.pressed[..self.pressed_count].contains(&usage) {
                self.events.push(KeyEvent { usage, pressed: false });
            }
        }
        self.previous = self.pressed;
        self.previous_count = self.pressed_count;
        self.pressed = [0; MAX_PRESSED];
        self.pressed_count = 0;
    }
}
