//! Bounds-checked forward cursor over a borrowed report buffer.

use crate::{HidCommonError, HidCommonResult};

/// Sequential reader over raw report bytes.
///
/// Reads past the end of the buffer return
/// [`HidCommonError::Truncated`] instead of touching out-of-range memory.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, count: usize) -> HidCommonResult<&'a [u8]> {
        let end = self.pos.saturating_add(count);
        if end > self.data.len() {
            return Err(HidCommonError::Truncated {
                offset: self.pos,
                needed: end - self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn u8(&mut self) -> HidCommonResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn i8(&mut self) -> HidCommonResult<i8> {
        Ok(self.u8()? as i8)
    }

    pub fn u16_le(&mut self) -> HidCommonResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from(b[0]) | (u16::from(b[1]) << 8))
    }

    pub fn i16_le(&mut self) -> HidCommonResult<i16> {
        Ok(self.u16_le()? as i16)
    }

    pub fn u16_be(&mut self) -> HidCommonResult<u16> {
        let b = self.take(2)?;
        Ok((u16::from(b[0]) << 8) | u16::from(b[1]))
    }

    pub fn u24_le(&mut self) -> HidCommonResult<u32> {
        let b = self.take(3)?;
        Ok(u32::from(b[0]) | (u32::from(b[1]) << 8) | (u32::from(b[2]) << 16))
    }

    pub fn u32_le(&mut self) -> HidCommonResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from(b[0])
            | (u32::from(b[1]) << 8)
            | (u32::from(b[2]) << 16)
            | (u32::from(b[3]) << 24))
    }

    pub fn bytes(&mut self, count: usize) -> HidCommonResult<&'a [u8]> {
        self.take(count)
    }

    pub fn peek_u8(&self) -> HidCommonResult<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(HidCommonError::Truncated {
                offset: self.pos,
                needed: 1,
            })
    }

    /// Advances the cursor, clamping at the end of the buffer.
    pub fn skip(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.data.len());
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Reads a little-endian u16 at a fixed byte offset.
pub fn u16_le_at(data: &[u8], offset: usize) -> Option<u16> {
    let lo = *data.get(offset)?;
    let hi = *data.get(offset + 1)?;
    Some(u16::from(lo) | (u16::from(hi) << 8))
}

/// Reads a big-endian u16 at a fixed byte offset.
pub fn u16_be_at(data: &[u8], offset: usize) -> Option<u16> {
    let hi = *data.get(offset)?;
    let lo = *data.get(offset + 1)?;
    Some((u16::from(hi) << 8) | u16::from(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_u8_sequence() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.u8().expect("read byte"), 0x01);
        assert_eq!(cursor.u8().expect("read byte"), 0x02);
        assert_eq!(cursor.u8().expect("read byte"), 0x03);
        assert!(cursor.u8().is_err());
    }

    #[test]
    fn test_cursor_u16_le() {
        let data = [0x34, 0x12];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.u16_le().expect("read u16"), 0x1234);
    }

    #[test]
    fn test_cursor_u16_be() {
        let data = [0x12, 0x34];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.u16_be().expect("read u16"), 0x1234);
    }

    #[test]
    fn test_cursor_u32_le() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.u32_le().expect("read u32"), 0x12345678);
    }

    #[test]
    fn test_cursor_truncated_carries_offset() {
        let data = [0x01];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1);
        let err = cursor.u16_le().expect_err("should truncate");
        assert_eq!(err, HidCommonError::Truncated { offset: 1, needed: 2 });
    }

    #[test]
    fn test_cursor_skip_clamps() {
        let data = [0x01, 0x02];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(100);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.u8().is_err());
    }

    #[test]
    fn test_fixed_offset_reads() {
        let data = [0x00, 0xCD, 0xAB];
        assert_eq!(u16_le_at(&data, 1), Some(0xABCD));
        assert_eq!(u16_be_at(&data, 1), Some(0xCDAB));
        assert_eq!(u16_le_at(&data, 2), None);
    }
}
