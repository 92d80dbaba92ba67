//! Descriptor-driven joystick and generic-gamepad driver.

use openinput_descriptor::{HidReportConsumer, ReportDescriptor};
use openinput_device_types::AXIS_COUNT;

use crate::DriverResult;

const USAGE_PAGE_DESKTOP: u32 = 0x01;
const USAGE_PAGE_BUTTON: u32 = 0x09;

/// Desktop-page usages `0x30..=0x39` (X through Slider and the hat) land
/// in these first slots; everything routed through an additional-axis
/// window starts after them.
pub const STANDARD_AXIS_COUNT: usize = 10;

/// Routes one run of non-standard usages into axis slots.
#[derive(Debug, Clone, Copy)]
struct AxisWindow {
    page: u32,
    start: u32,
    count: u32,
}

/// Accumulates joystick axes and buttons across reports.
///
/// Axis slots persist between reports, so devices that split their state
/// over several report IDs still present a complete view.
#[derive(Debug)]
pub struct JoystickDriver {
    axes: [i32; AXIS_COUNT],
    buttons: u32,
    window: Option<AxisWindow>,
    began: bool,
    event: bool,
}

impl Default for JoystickDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickDriver {
    pub fn new() -> Self {
        Self { axes: [0; AXIS_COUNT], buttons: 0, window: None, began: false, event: false }
    }

    /// Routes `count` consecutive usages from `start` on `page` into the
    /// slots after the standard axes. Vendor pads with wheel or pedal
    /// usages outside the desktop page need this.
    pub fn set_additional_axis_window(&mut self, page: u32, start: u32, count: u32) {
        self.window = Some(AxisWindow { page, start, count });
    }

    /// Runs one input report through the descriptor.
    pub fn process(&mut self, descriptor: &ReportDescriptor, report: &[u8]) -> DriverResult<()> {
        descriptor.parse_input_report(report, self)?;
        Ok(())
    }

    pub fn axes(&self) -> &[i32; AXIS_COUNT] {
        &self.axes
    }

    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    pub fn has_event(&self) -> bool {
        self.event
    }

    pub fn clear_event(&mut self) {
        self.event = false;
    }
}

impl HidReportConsumer for JoystickDriver {
    fn input_begin(&mut self, _top_usage: u32, _report_type: u32, _min: i32, _max: i32) {
        self.began = true;
    }

    fn input_data(&mut self, usage: u32, value: i32) {
        let page = usage >> 16;
        let usage = usage & 0xFFFF;
        match page {
            USAGE_PAGE_BUTTON => {
                if (1..=32).contains(&usage) {
                    let bit = 1u32 << (usage - 1);
                    if value != 0 {
                        self.buttons |= bit;
                    } else {
                        self.buttons &= !bit;
                    }
                }
            }
            USAGE_PAGE_DESKTOP => {
                if (0x30..0x30 + STANDARD_AXIS_COUNT as u32).contains(&usage) {
                    self.axes[(usage - 0x30) as usize] = value;
                }
            }
            _ => {
                if let Some(window) = self.window {
                    if page == window.page
                        && (window.start..window.start + window.count).contains(&usage)
                    {
                        let slot = STANDARD_AXIS_COUNT + (usage - window.start) as usize;
                        if slot < AXIS_COUNT {
                            self.axes[slot] = value;
                        }
                    }
                }
            }
        }
    }

    fn input_end(&mut self) {
        if self.began {
            self.began = false;
            self.event = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two 8-bit axes, a 4-bit hat, 4 padding bits, 8 buttons.
    #[rustfmt::skip]
    const JOYSTICK_DESCRIPTOR: &[u8] = &[
        0x05, 0x01,             // Usage Page (Generic Desktop)
        0x09, 0x04,             // Usage (Joystick)
        0xA1, 0x01,             // Collection (Application)
        0x09, 0x30,             //   Usage (X)
        0x09, 0x31,             //   Usage (Y)
        0x15, 0x00,             //   Logical Minimum (0)
        0x26, 0xFF, 0x00,       //   Logical Maximum (255)
        0x75, 0x08,             //   Report Size (8)
        0x95, 0x02,             //   Report Count (2)
        0x81, 0x02,             //   Input (Data, Variable)
        0x09, 0x39,             //   Usage (Hat Switch)
        0x25, 0x07,             //   Logical Maximum (7)
        0x75, 0x04,             //   Report Size (4)
        0x95, 0x01,             //   Report Count (1)
        0x81, 0x02,             //   Input (Data, Variable)
        0x81, 0x01,             //   Input (Constant)
        0x05, 0x09,             //   Usage Page (Button)
        0x19, 0x01,             //   Usage Minimum (1)
        0x29, 0x08,             //   Usage Maximum (8)
        0x25, 0x01,             //   Logical Maximum (1)
        0x75, 0x01,             //   Report Size (1)
        0x95, 0x08,             //   Report Count (8)
        0x81, 0x02,             //   Input (Data, Variable)
        0xC0,                   // End Collection
    ];

    #[test]
    fn test_axes_hat_and_buttons() {
        let descriptor = ReportDescriptor::new(JOYSTICK_DESCRIPTOR);
        let mut joystick = JoystickDriver::new();
        joystick
            .process(&descriptor, &[0x80, 0x40, 0x03, 0b1000_0001])
            .expect("report should decode");

        assert!(joystick.has_event());
        assert_eq!(joystick.axes()[0], 0x80);
        assert_eq!(joystick.axes()[1], 0x40);
        assert_eq!(joystick.axes()[9], 3);
        assert_eq!(joystick.buttons(), 0b1000_0001);
    }

    #[test]
    fn test_axes_persist_across_reports() {
        let descriptor = ReportDescriptor::new(JOYSTICK_DESCRIPTOR);
        let mut joystick = JoystickDriver::new();
        joystick.process(&descriptor, &[0x80, 0x40, 0, 0]).expect("first report");
        joystick.process(&descriptor, &[0x80, 0x40, 0, 0b0000_0010]).expect("second report");
        assert_eq!(joystick.axes()[0], 0x80);
        assert_eq!(joystick.buttons(), 0b0000_0010);
    }

    #[test]
    fn test_additional_axis_window() {
        // Vendor page carrying two extra axes.
        #[rustfmt::skip]
        let descriptor = ReportDescriptor::new(vec![
            0x06, 0x00, 0xFF,       // Usage Page (Vendor 0xFF00)
            0x09, 0x01,             // Usage (vendor 1)
            0xA1, 0x01,             // Collection (Application)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x19, 0x20,             //   Usage Minimum (0x20)
            0x29, 0x21,             //   Usage Maximum (0x21)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x02,             //   Report Count (2)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ]);

        let mut joystick = JoystickDriver::new();
        joystick.set_additional_axis_window(0xFF00, 0x20, 2);
        joystick.process(&descriptor, &[0x11, 0x22]).expect("report should decode");
        assert_eq!(joystick.axes()[STANDARD_AXIS_COUNT], 0x11);
        assert_eq!(joystick.axes()[STANDARD_AXIS_COUNT + 1], 0x22);
    }

    #[test]
    fn test_unrouted_pages_ignored() {
        let descriptor = ReportDescriptor::new(JOYSTICK_DESCRIPTOR);
        let mut joystick = JoystickDriver::new();
        joystick.process(&descriptor, &[0, 0, 0, 0]).expect("report should decode");
        assert_eq!(joystick.buttons(), 0);
        assert_eq!(joystick.axes(), &[0; AXIS_COUNT]);
    }
}
