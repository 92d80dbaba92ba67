//! Replays a HID report descriptor against raw input reports.
//!
//! The descriptor is walked twice. Once at construction to learn the
//! report-level facts a driver needs before the first interrupt transfer
//! (does the device prefix reports with a report ID, which top-level
//! collections exist), and then once per received report to slice the
//! payload into `(usage, value)` fields.

use openinput_hid_common::{extract_bits, sign_extend, signed_item_value};
use tracing::{debug, warn};

use crate::consumer::HidReportConsumer;
use crate::items::{
    ItemIter, MAIN_FLAG_CONSTANT, MAIN_FLAG_VARIABLE, TAG_COLLECTION, TAG_DESIGNATOR_INDEX,
    TAG_DESIGNATOR_MAX, TAG_DESIGNATOR_MIN, TAG_END_COLLECTION, TAG_FEATURE, TAG_INPUT,
    TAG_LOGICAL_MAX, TAG_LOGICAL_MIN, TAG_OUTPUT, TAG_POP, TAG_PUSH, TAG_REPORT_COUNT,
    TAG_REPORT_ID, TAG_REPORT_SIZE, TAG_STRING_INDEX, TAG_STRING_MAX, TAG_STRING_MIN, TAG_USAGE,
    TAG_USAGE_MAX, TAG_USAGE_MIN, TAG_USAGE_PAGE,
};
use crate::{DescriptorError, DescriptorResult};

/// Local usage list capacity per main item.
const USAGE_LIST_LEN: usize = 24;
/// Maximum number of stored usage min/max pairs (two list slots each).
const USAGE_PAIR_LEN: u8 = (USAGE_LIST_LEN / 2) as u8;
/// `usage_count` value marking that the list holds min/max pairs instead
/// of discrete usages.
const USAGE_MINMAX_SENTINEL: u8 = 255;

/// Decoding knobs for [`ReportDescriptor::parse_input_report_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Advance the bit cursor over Output and Feature items as if their
    /// fields occupied the input report. Off by default: interrupt-in
    /// reports carry Input fields only, so skipping them without moving
    /// the cursor matches what devices actually send.
    pub advance_output_feature: bool,
}

/// Local-item state, reset after every main item.
struct Locals {
    usages: [u16; USAGE_LIST_LEN],
    /// Number of discrete usages, or [`USAGE_MINMAX_SENTINEL`].
    usage_count: u8,
    /// Completed min/max pairs stored at `usages[n * 2]` / `usages[n * 2 + 1]`.
    pair_count: u8,
    /// Bit 0 set when the current pair has a minimum, bit 1 for a maximum.
    pair_mask: u8,
}

impl Locals {
    fn new() -> Self {
        Self { usages: [0; USAGE_LIST_LEN], usage_count: 0, pair_count: 0, pair_mask: 0 }
    }

    fn reset(&mut self) {
        self.usages[0] = 0;
        self.usages[1] = 0;
        self.usage_count = 0;
        self.pair_count = 0;
        self.pair_mask = 0;
    }

    fn push_usage(&mut self, value: u32) {
        // Values at or below 0x1F are reserved padding usages on every
        // page a field decoder cares about.
        if value <= 0x1F {
            return;
        }
        let index = usize::from(self.usage_count);
        if index < USAGE_LIST_LEN {
            self.usages[index] = value as u16;
            self.usage_count += 1;
        }
    }

    fn push_usage_bound(&mut self, value: u32, mask_bit: u8) {
        if self.pair_count >= USAGE_PAIR_LEN {
            return;
        }
        let slot = usize::from(self.pair_count) * 2 + usize::from(mask_bit >> 1);
        self.usages[slot] = value as u16;
        self.pair_mask |= mask_bit;
        if self.pair_mask == 3 {
            self.pair_count += 1;
            self.pair_mask = 0;
            self.usage_count = USAGE_MINMAX_SENTINEL;
        }
    }
}

/// Walks min/max usage pairs, handing out one usage per field.
struct UsageRange {
    next: u32,
    max: u32,
}

impl UsageRange {
    fn take(&mut self, locals: &Locals, pair: &mut usize) -> u32 {
        let usage = self.next;
        if self.next < self.max {
            self.next += 1;
        } else if *pair + 1 < usize::from(locals.pair_count) {
            *pair += 1;
            self.next = u32::from(locals.usages[*pair * 2]);
            self.max = u32::from(locals.usages[*pair * 2 + 1]);
        }
        usage
    }
}

/// A parsed HID report descriptor, ready to decode input reports.
#[derive(Debug, Clone)]
pub struct ReportDescriptor {
    bytes: Vec<u8>,
    uses_report_ids: bool,
    top_usages: Vec<u32>,
}

impl ReportDescriptor {
    /// Scans the descriptor for report IDs and top-level collections.
    ///
    /// Malformed trailing bytes end the scan early; whatever parsed up to
    /// that point is kept.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let mut usage_page: u16 = 0;
        let mut first_usage: u32 = 0;
        let mut depth: u32 = 0;
        let mut uses_report_ids = false;
        let mut top_usages = Vec::new();

        for item in ItemIter::new(&bytes) {
            match item.tag {
                TAG_USAGE_PAGE => usage_page = item.value as u16,
                TAG_USAGE => {
                    if first_usage == 0 {
                        // A 4-byte usage already carries its page in the
                        // high half.
                        first_usage = if item.size_code == 3 {
                            item.value
                        } else {
                            (u32::from(usage_page) << 16) | item.value
                        };
                    }
                }
                TAG_REPORT_ID => uses_report_ids = true,
                TAG_COLLECTION => {
                    if depth == 0 {
                        debug!("top-level collection usage {first_usage:#010x}");
                        top_usages.push(first_usage);
                    }
                    depth += 1;
                    first_usage = 0;
                }
                TAG_END_COLLECTION => {
                    depth = depth.saturating_sub(1);
                    first_usage = 0;
                }
                TAG_INPUT | TAG_OUTPUT | TAG_FEATURE => first_usage = 0,
                _ => {}
            }
        }

        Self { bytes, uses_report_ids, top_usages }
    }

    /// Raw descriptor bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether input reports are prefixed with a one-byte report ID.
    pub fn uses_report_ids(&self) -> bool {
        self.uses_report_ids
    }

    /// `usage_page << 16 | usage` of every top-level collection, in
    /// descriptor order.
    pub fn top_level_usages(&self) -> &[u32] {
        &self.top_usages
    }

    /// Decodes one input report, delivering fields to `consumer`.
    pub fn parse_input_report(
        &self,
        report: &[u8],
        consumer: &mut dyn HidReportConsumer,
    ) -> DescriptorResult<()> {
        self.parse_input_report_with(report, ParseOptions::default(), consumer)
    }

    /// Decodes one input report with explicit [`ParseOptions`].
    ///
    /// Returns `Err` when a field would read past the end of the report;
    /// fields decoded before that point have already been delivered, so a
    /// consumer must treat a missing `input_end` as an aborted report.
    pub fn parse_input_report_with(
        &self,
        report: &[u8],
        options: ParseOptions,
        consumer: &mut dyn HidReportConsumer,
    ) -> DescriptorResult<()> {
        if report.is_empty() {
            return Err(DescriptorError::EmptyReport);
        }

        let (buffer_report_id, data) = if self.uses_report_ids {
            (u32::from(report[0]), &report[1..])
        } else {
            (0, report)
        };

        let mut locals = Locals::new();
        let mut usage_page: u16 = 0;
        let mut last_usage: u32 = 0;
        let mut logical_min: i32 = 0;
        let mut logical_max: i32 = 0;
        let mut report_size: u32 = 0;
        let mut report_count: u32 = 0;
        let mut report_id: u32 = 0;
        let mut top_usage: u32 = 0;
        let mut depth: u32 = 0;
        let mut bit_index: u32 = 0;

        for item in ItemIter::new(&self.bytes) {
            match item.tag {
                TAG_USAGE_PAGE => usage_page = item.value as u16,
                TAG_LOGICAL_MIN => logical_min = signed_item_value(item.value, item.size_code),
                TAG_LOGICAL_MAX => logical_max = signed_item_value(item.value, item.size_code),
                TAG_REPORT_SIZE => report_size = item.value,
                TAG_REPORT_COUNT => report_count = item.value,
                TAG_REPORT_ID => report_id = item.value,
                TAG_USAGE => locals.push_usage(item.value),
                TAG_USAGE_MIN => locals.push_usage_bound(item.value, 1),
                TAG_USAGE_MAX => locals.push_usage_bound(item.value, 2),
                TAG_COLLECTION => {
                    if depth == 0 {
                        top_usage = (u32::from(usage_page) << 16) | u32::from(locals.usages[0]);
                    }
                    depth += 1;
                    locals.reset();
                }
                TAG_END_COLLECTION => {
                    if depth > 0 {
                        depth -= 1;
                        if depth == 0 {
                            consumer.input_end();
                        }
                    }
                    locals.reset();
                }
                TAG_INPUT => {
                    if self.uses_report_ids && report_id != buffer_report_id {
                        // A foreign report ID contributes nothing to this
                        // buffer, including cursor movement.
                        locals.reset();
                        continue;
                    }
                    if report_size == 0 || report_size > 32 {
                        warn!(report_size, "skipping input item with unusable field width");
                        locals.reset();
                        continue;
                    }
                    if item.value & MAIN_FLAG_CONSTANT != 0 {
                        bit_index =
                            bit_index.saturating_add(report_size.saturating_mul(report_count));
                        locals.reset();
                        continue;
                    }

                    consumer.input_begin(top_usage, item.value, logical_min, logical_max);
                    if item.value & MAIN_FLAG_VARIABLE != 0 {
                        last_usage = decode_variable_fields(
                            data,
                            &mut bit_index,
                            &locals,
                            usage_page,
                            last_usage,
                            logical_min,
                            report_size,
                            report_count,
                            consumer,
                        )?;
                    } else {
                        decode_array_fields(
                            data,
                            &mut bit_index,
                            &locals,
                            usage_page,
                            logical_min,
                            logical_max,
                            report_size,
                            report_count,
                            consumer,
                        )?;
                    }
                    locals.reset();
                }
                TAG_OUTPUT | TAG_FEATURE => {
                    if options.advance_output_feature
                        && (!self.uses_report_ids || report_id == buffer_report_id)
                    {
                        bit_index =
                            bit_index.saturating_add(report_size.saturating_mul(report_count));
                    }
                    locals.reset();
                }
                TAG_PUSH | TAG_POP | TAG_DESIGNATOR_INDEX | TAG_DESIGNATOR_MIN
                | TAG_DESIGNATOR_MAX | TAG_STRING_INDEX | TAG_STRING_MIN | TAG_STRING_MAX => {
                    warn!("ignoring unsupported item tag {:#04x}", item.tag);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn field_value(data: &[u8], bit_index: u32, width: u32) -> DescriptorResult<u32> {
    extract_bits(data, bit_index, width)
        .ok_or(DescriptorError::TruncatedReport { bit_offset: bit_index, width })
}

/// One usage per field. Returns the last usage delivered so later unnamed
/// items can synthesize usages above it.
#[expect(clippy::too_many_arguments)]
fn decode_variable_fields(
    data: &[u8],
    bit_index: &mut u32,
    locals: &Locals,
    usage_page: u16,
    mut last_usage: u32,
    logical_min: i32,
    report_size: u32,
    report_count: u32,
    consumer: &mut dyn HidReportConsumer,
) -> DescriptorResult<u32> {
    let mut pair: usize = 0;
    let mut range = None;
    let mut list_index: usize = 0;

    if locals.usage_count == USAGE_MINMAX_SENTINEL {
        range = Some(UsageRange {
            next: u32::from(locals.usages[0]),
            max: u32::from(locals.usages[1]),
        });
    } else if report_count > 1 && locals.usage_count <= 1 {
        // Vendor pages routinely declare multi-count fields with one usage
        // or none at all. Hand out sequential usages, starting one block
        // above the last named usage when the item is anonymous.
        let base = if locals.usage_count == 1 {
            u32::from(locals.usages[0])
        } else {
            (last_usage & 0xFF00) + 0x100
        };
        range = Some(UsageRange { next: base, max: 0xFFFF });
    }

    for _ in 0..report_count {
        let usage = match range.as_mut() {
            Some(range) => range.take(locals, &mut pair),
            None => {
                let usage = u32::from(locals.usages[list_index]);
                if list_index < USAGE_LIST_LEN - 1 {
                    list_index += 1;
                }
                usage
            }
        };
        last_usage = usage;

        let raw = field_value(data, *bit_index, report_size)?;
        let value = if logical_min < 0 { sign_extend(raw, report_size) } else { raw as i32 };
        consumer.input_data((u32::from(usage_page) << 16) | usage, value);
        *bit_index += report_size;
    }
    Ok(last_usage)
}

/// Array fields report which usages are active rather than one value per
/// usage. With a declared usage range and single-bit fields each bit maps
/// to one usage from the range; otherwise each field carries a usage index
/// directly.
#[expect(clippy::too_many_arguments)]
fn decode_array_fields(
    data: &[u8],
    bit_index: &mut u32,
    locals: &Locals,
    usage_page: u16,
    logical_min: i32,
    logical_max: i32,
    report_size: u32,
    report_count: u32,
    consumer: &mut dyn HidReportConsumer,
) -> DescriptorResult<()> {
    let page = u32::from(usage_page) << 16;

    if locals.usage_count == USAGE_MINMAX_SENTINEL && locals.pair_count > 0 && report_size == 1 {
        let mut pair: usize = 0;
        let mut range = UsageRange {
            next: u32::from(locals.usages[0]),
            max: u32::from(locals.usages[1]),
        };
        for _ in 0..report_count {
            let usage = range.take(locals, &mut pair);
            if field_value(data, *bit_index, 1)? != 0 {
                consumer.input_data(page | usage, 1);
            }
            *bit_index += 1;
        }
        return Ok(());
    }

    for _ in 0..report_count {
        let raw = field_value(data, *bit_index, report_size)?;
        let index = raw as i32;
        if index >= logical_min && index <= logical_max {
            consumer.input_data(page | raw, 1);
        }
        *bit_index += report_size;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Collecting {
        begins: Vec<(u32, u32, i32, i32)>,
        data: Vec<(u32, i32)>,
        ends: usize,
    }

    impl HidReportConsumer for Collecting {
        fn input_begin(&mut self, top_usage: u32, report_type: u32, min: i32, max: i32) {
            self.begins.push((top_usage, report_type, min, max));
        }

        fn input_data(&mut self, usage: u32, value: i32) {
            self.data.push((usage, value));
        }

        fn input_end(&mut self) {
            self.ends += 1;
        }
    }

    fn decode(descriptor: &[u8], report: &[u8]) -> Collecting {
        let parsed = ReportDescriptor::new(descriptor);
        let mut sink = Collecting::default();
        parsed
            .parse_input_report(report, &mut sink)
            .expect("report should decode");
        sink
    }

    #[test]
    fn test_button_array_reports_set_bits_only() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x09,             // Usage Page (Button)
            0xA1, 0x01,             // Collection (Application)
            0x19, 0x01,             //   Usage Minimum (1)
            0x29, 0x08,             //   Usage Maximum (8)
            0x15, 0x00,             //   Logical Minimum (0)
            0x25, 0x01,             //   Logical Maximum (1)
            0x75, 0x01,             //   Report Size (1)
            0x95, 0x08,             //   Report Count (8)
            0x81, 0x00,             //   Input (Array)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[0b0000_0101]);
        assert_eq!(sink.data, vec![(0x0009_0001, 1), (0x0009_0003, 1)]);
        assert_eq!(sink.ends, 1);
    }

    #[test]
    fn test_constant_padding_advances_cursor() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x01,             //   Report Count (1)
            0x81, 0x01,             //   Input (Constant)
            0x09, 0x31,             //   Usage (Y)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[0x11, 0x22]);
        assert_eq!(sink.data, vec![(0x0001_0031, 0x22)]);
        // The constant item produced no begin callback.
        assert_eq!(sink.begins.len(), 1);
    }

    #[test]
    fn test_report_id_filtering_without_cursor_bleed() {
        // Report 1 carries a 16-bit field; report 2 an 8-bit one. Decoding
        // report 2 must start at payload byte 0, not 16 bits in.
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0x09, 0x04,             // Usage (Joystick)
            0xA1, 0x01,             // Collection (Application)
            0x85, 0x01,             //   Report ID (1)
            0x09, 0x30,             //   Usage (X)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x7F,       //   Logical Maximum (32767)
            0x75, 0x10,             //   Report Size (16)
            0x95, 0x01,             //   Report Count (1)
            0x81, 0x02,             //   Input (Data, Variable)
            0x85, 0x02,             //   Report ID (2)
            0x09, 0x31,             //   Usage (Y)
            0x75, 0x08,             //   Report Size (8)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let parsed = ReportDescriptor::new(descriptor.as_slice());
        assert!(parsed.uses_report_ids());
        assert_eq!(parsed.top_level_usages(), &[0x0001_0004]);

        let mut sink = Collecting::default();
        parsed
            .parse_input_report(&[0x02, 0xAB], &mut sink)
            .expect("report 2 should decode");
        assert_eq!(sink.data, vec![(0x0001_0031, 0xAB)]);

        let mut sink = Collecting::default();
        parsed
            .parse_input_report(&[0x01, 0x34, 0x12], &mut sink)
            .expect("report 1 should decode");
        assert_eq!(sink.data, vec![(0x0001_0030, 0x1234)]);
    }

    #[test]
    fn test_variable_fields_walk_usage_range() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x19, 0x30,             //   Usage Minimum (X)
            0x29, 0x32,             //   Usage Maximum (Z)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x03,             //   Report Count (3)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[1, 2, 3]);
        assert_eq!(
            sink.data,
            vec![(0x0001_0030, 1), (0x0001_0031, 2), (0x0001_0032, 3)]
        );
    }

    #[test]
    fn test_negative_logical_min_sign_extends() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x09, 0x30,             //   Usage (X)
            0x15, 0x81,             //   Logical Minimum (-127)
            0x25, 0x7F,             //   Logical Maximum (127)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x01,             //   Report Count (1)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[0xFF]);
        assert_eq!(sink.data, vec![(0x0001_0030, -1)]);
        assert_eq!(sink.begins, vec![(0x0001_0000, 0x02, -127, 127)]);
    }

    #[test]
    fn test_single_usage_extends_sequentially() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x09, 0x40,             //   Usage (Vx)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x02,             //   Report Count (2)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[7, 9]);
        assert_eq!(sink.data, vec![(0x0001_0040, 7), (0x0001_0041, 9)]);
    }

    #[test]
    fn test_anonymous_fields_synthesize_usages() {
        #[rustfmt::skip]
        let descriptor = [
            0x06, 0x00, 0xFF,       // Usage Page (Vendor 0xFF00)
            0xA1, 0x01,             // Collection (Application)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x03,             //   Report Count (3)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[9, 8, 7]);
        assert_eq!(
            sink.data,
            vec![(0xFF00_0100, 9), (0xFF00_0101, 8), (0xFF00_0102, 7)]
        );
    }

    #[test]
    fn test_input_end_fires_at_outermost_collection_only() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0xA1, 0x00,             //   Collection (Physical)
            0x09, 0x30,             //     Usage (X)
            0x15, 0x00,             //     Logical Minimum (0)
            0x26, 0xFF, 0x00,       //     Logical Maximum (255)
            0x75, 0x08,             //     Report Size (8)
            0x95, 0x01,             //     Report Count (1)
            0x81, 0x02,             //     Input (Data, Variable)
            0xC0,                   //   End Collection
            0x09, 0x31,             //   Usage (Y)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let sink = decode(&descriptor, &[1, 2]);
        assert_eq!(sink.data, vec![(0x0001_0030, 1), (0x0001_0031, 2)]);
        assert_eq!(sink.ends, 1);
    }

    #[test]
    fn test_truncated_report_errors() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x09, 0x30,             //   Usage (X)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x7F,       //   Logical Maximum (32767)
            0x75, 0x10,             //   Report Size (16)
            0x95, 0x01,             //   Report Count (1)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let parsed = ReportDescriptor::new(descriptor.as_slice());
        let mut sink = Collecting::default();
        let err = parsed
            .parse_input_report(&[0x01], &mut sink)
            .expect_err("one byte cannot hold a 16-bit field");
        assert_eq!(err, DescriptorError::TruncatedReport { bit_offset: 0, width: 16 });
        assert!(sink.data.is_empty());
        // No input_end: the consumer can tell the report was aborted.
        assert_eq!(sink.ends, 0);
    }

    #[test]
    fn test_empty_report_errors() {
        let parsed = ReportDescriptor::new(vec![0xA1, 0x01, 0xC0]);
        let mut sink = Collecting::default();
        let err = parsed
            .parse_input_report(&[], &mut sink)
            .expect_err("empty report");
        assert_eq!(err, DescriptorError::EmptyReport);
    }

    #[test]
    fn test_output_items_leave_input_cursor_alone() {
        #[rustfmt::skip]
        let descriptor = [
            0x05, 0x01,             // Usage Page (Generic Desktop)
            0xA1, 0x01,             // Collection (Application)
            0x09, 0x30,             //   Usage (X)
            0x15, 0x00,             //   Logical Minimum (0)
            0x26, 0xFF, 0x00,       //   Logical Maximum (255)
            0x75, 0x08,             //   Report Size (8)
            0x95, 0x01,             //   Report Count (1)
            0x91, 0x02,             //   Output (Data, Variable)
            0x09, 0x31,             //   Usage (Y)
            0x81, 0x02,             //   Input (Data, Variable)
            0xC0,                   // End Collection
        ];

        let parsed = ReportDescriptor::new(descriptor.as_slice());

        let mut sink = Collecting::default();
        parsed
            .parse_input_report(&[0xAA], &mut sink)
            .expect("input field starts at byte 0");
        assert_eq!(sink.data, vec![(0x0001_0031, 0xAA)]);

        let options = ParseOptions { advance_output_feature: true };
        let mut sink = Collecting::default();
        parsed
            .parse_input_report_with(&[0x00, 0xBB], options, &mut sink)
            .expect("input field starts after the output field");
        assert_eq!(sink.data, vec![(0x0001_0031, 0xBB)]);
    }

    proptest! {
        #[test]
        fn prop_arbitrary_descriptors_and_reports_never_panic(
            descriptor in proptest::collection::vec(any::<u8>(), 0..64),
            report in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let parsed = ReportDescriptor::new(descriptor);
            let mut sink = Collecting::default();
            let _result = parsed.parse_input_report(&report, &mut sink);
        }

        #[test]
        fn prop_descriptor_scan_terminates(
            descriptor in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let parsed = ReportDescriptor::new(descriptor);
            prop_assert!(parsed.top_level_usages().len() <= 256);
        }
    }
}
