//! Bit-level field extraction for HID input reports.
//!
//! HID report descriptors describe fields by bit offset and bit width, so
//! a report is addressed here as a little-endian bit stream: the low bits
//! of the first touched byte are the low bits of the result.

/// Extracts `num_bits` (1..=32) starting at `bit_offset`.
///
/// Returns `None` when the requested range does not lie fully inside the
/// buffer, or when `num_bits` is outside 1..=32.
pub fn extract_bits(data: &[u8], bit_offset: u32, num_bits: u32) -> Option<u32> {
    if num_bits == 0 || num_bits > 32 {
        return None;
    }
    let end = bit_offset.checked_add(num_bits)?;
    if (end as usize) > data.len().saturating_mul(8) {
        return None;
    }

    let mut index = (bit_offset >> 3) as usize;
    let offset = bit_offset & 7;
    let mut output: u32 = 0;
    let mut bit_count: u32 = 0;
    if offset != 0 {
        output = u32::from(data[index]) >> offset;
        index += 1;
        bit_count = 8 - offset;
    }
    while bit_count < num_bits {
        output |= u32::from(data[index]) << bit_count;
        index += 1;
        bit_count += 8;
    }
    if bit_count > num_bits && num_bits < 32 {
        output &= (1u32 << num_bits) - 1;
    }
    Some(output)
}

/// Sign-extends an `num_bits`-wide raw field to a full `i32`.
///
/// Values whose top declared bit is clear (and any width outside 1..=31)
/// pass through unchanged.
pub fn sign_extend(value: u32, num_bits: u32) -> i32 {
    let mut value = value;
    if num_bits > 0 && num_bits < 32 && (value & (1u32 << (num_bits - 1))) != 0 {
        value |= !((1u32 << num_bits) - 1);
    }
    value as i32
}

/// Interprets a short-item payload as a signed integer according to its
/// 2-bit size code (1 = i8, 2 = i16, otherwise i32).
pub fn signed_item_value(value: u32, size_code: u8) -> i32 {
    match size_code & 3 {
        1 => i32::from(value as u8 as i8),
        2 => i32::from(value as u16 as i16),
        _ => value as i32,
    }
}
