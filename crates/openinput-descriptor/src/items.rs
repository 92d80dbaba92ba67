//! Short-item tokenizer for HID report descriptors.
//!
//! A descriptor is a stream of short items: one prefix byte whose top six
//! bits select the tag and whose low two bits encode the payload size
//! (0, 1, 2 or 4 bytes, little-endian). The long-item prefix `0xFE` carries
//! its payload length in the following byte and is skipped whole.

/// Item tags, already masked with `0xFC`.
///
/// Global items.
pub const TAG_USAGE_PAGE: u8 = 0x04;
pub const TAG_LOGICAL_MIN: u8 = 0x14;
pub const TAG_LOGICAL_MAX: u8 = 0x24;
pub const TAG_PHYSICAL_MIN: u8 = 0x34;
pub const TAG_PHYSICAL_MAX: u8 = 0x44;
pub const TAG_UNIT_EXPONENT: u8 = 0x54;
pub const TAG_UNIT: u8 = 0x64;
pub const TAG_REPORT_SIZE: u8 = 0x74;
pub const TAG_REPORT_ID: u8 = 0x84;
pub const TAG_REPORT_COUNT: u8 = 0x94;
pub const TAG_PUSH: u8 = 0xA4;
pub const TAG_POP: u8 = 0xB4;

/// Main items.
pub const TAG_INPUT: u8 = 0x80;
pub const TAG_OUTPUT: u8 = 0x90;
pub const TAG_FEATURE: u8 = 0xB0;
pub const TAG_COLLECTION: u8 = 0xA0;
pub const TAG_END_COLLECTION: u8 = 0xC0;

/// Local items.
pub const TAG_USAGE: u8 = 0x08;
pub const TAG_USAGE_MIN: u8 = 0x18;
pub const TAG_USAGE_MAX: u8 = 0x28;
pub const TAG_DESIGNATOR_INDEX: u8 = 0x38;
pub const TAG_DESIGNATOR_MIN: u8 = 0x48;
pub const TAG_DESIGNATOR_MAX: u8 = 0x58;
pub const TAG_STRING_INDEX: u8 = 0x78;
pub const TAG_STRING_MIN: u8 = 0x88;
pub const TAG_STRING_MAX: u8 = 0x98;

/// Long-item prefix byte (never masked, matched verbatim).
pub const LONG_ITEM_PREFIX: u8 = 0xFE;

/// Main-item data bit 0: constant (padding) field.
pub const MAIN_FLAG_CONSTANT: u32 = 0x01;
/// Main-item data bit 1: variable (one usage per field) rather than array.
pub const MAIN_FLAG_VARIABLE: u32 = 0x02;

/// One decoded short item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Tag byte masked with `0xFC`.
    pub tag: u8,
    /// Payload size code (`0..=3`), kept for sign interpretation.
    pub size_code: u8,
    /// Payload assembled little-endian, zero-extended to 32 bits.
    pub value: u32,
}

/// Iterator over the short items of a descriptor.
///
/// Long items are skipped. The walk terminates (yields `None`) as soon as a
/// prefix or payload would run past the end of the buffer, so arbitrary
/// byte soup is safe to feed in.
pub struct ItemIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ItemIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Iterator for ItemIter<'_> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        loop {
            let prefix = *self.data.get(self.pos)?;
            if prefix == LONG_ITEM_PREFIX {
                let len = *self.data.get(self.pos + 1)? as usize;
                self.pos = self.pos.checked_add(len + 3)?;
                continue;
            }

            let size_code = prefix & 0x03;
            let payload_len = match size_code {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };
            let start = self.pos + 1;
            let end = start + payload_len;
            if end > self.data.len() {
                self.pos = self.data.len();
                return None;
            }

            let mut value: u32 = 0;
            for (i, byte) in self.data[start..end].iter().enumerate() {
                value |= u32::from(*byte) << (8 * i);
            }
            self.pos = end;
            return Some(Item {
                tag: prefix & 0xFC,
                size_code,
                value,
            });
        }
    }
}
