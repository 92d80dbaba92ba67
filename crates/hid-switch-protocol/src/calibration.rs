//! Factory calibration data read from SPI flash.
//!
//! Calibration arrives inside `0x21` subcommand acks: byte 14 echoes the
//! SPI-read subcommand, bytes 15/16 the flash address, and the block data
//! starts at byte 20. Stick extents are packed as 12-bit values, three
//! per nibble-aligned 9-byte group.

use openinput_calibration::StickCalibration;
use openinput_hid_common::{ByteCursor, u16_le_at};
use tracing::debug;

use crate::{REPORT_SUBCOMMAND_ACK, spi};

/// Factory accelerometer full scale in counts per 4 g.
pub const DEFAULT_ACC_SENSITIVITY: i16 = 16384;
/// Factory gyro full scale in counts per 936 deg/s.
pub const DEFAULT_GYRO_SENSITIVITY: i16 = 15335;

const SPI_DATA_OFFSET: usize = 20;
const STICK_BLOCK_LEN: usize = 9;

/// Six-axis sensor calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImuCalibration {
    pub acc_offset: [i16; 3],
    pub acc_sensitivity: [i16; 3],
    pub gyro_offset: [i16; 3],
    pub gyro_sensitivity: [i16; 3],
    pub horizontal_offset: [i16; 3],
}

impl Default for ImuCalibration {
    fn default() -> Self {
        Self {
            acc_offset: [0; 3],
            acc_sensitivity: [DEFAULT_ACC_SENSITIVITY; 3],
            gyro_offset: [0; 3],
            gyro_sensitivity: [DEFAULT_GYRO_SENSITIVITY; 3],
            horizontal_offset: [0; 3],
        }
    }
}

impl ImuCalibration {
    /// Converts a raw accelerometer sample to g.
    pub fn accel_g(&self, axis: usize, raw: i16) -> f32 {
        let span = i32::from(self.acc_sensitivity[axis]) - i32::from(self.acc_offset[axis]);
        let span = if span == 0 { i32::from(DEFAULT_ACC_SENSITIVITY) } else { span };
        f32::from(raw) * 4.0 / span as f32
    }

    /// Converts a raw gyro sample to degrees per second.
    pub fn gyro_dps(&self, axis: usize, raw: i16) -> f32 {
        let span = i32::from(self.gyro_sensitivity[axis]) - i32::from(self.gyro_offset[axis]);
        let span = if span == 0 { i32::from(DEFAULT_GYRO_SENSITIVITY) } else { span };
        f32::from(raw) * 936.0 / span as f32
    }
}

/// Everything the SPI reads teach us about one pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchCalibration {
    pub imu: ImuCalibration,
    pub left_stick: StickCalibration,
    pub right_stick: StickCalibration,
    pub left_dead_zone: u16,
    pub right_dead_zone: u16,
}

impl Default for SwitchCalibration {
    fn default() -> Self {
        // 12-bit sticks centered until the factory block arrives.
        Self {
            imu: ImuCalibration::default(),
            left_stick: StickCalibration::symmetric(2048, 1536),
            right_stick: StickCalibration::symmetric(2048, 1536),
            left_dead_zone: 0,
            right_dead_zone: 0,
        }
    }
}

impl SwitchCalibration {
    /// Absorbs one `0x21` ack if it carries an SPI block this type knows.
    ///
    /// Returns whether the report was consumed. Unknown addresses and
    /// short blocks are left alone so the caller can log them.
    pub fn apply_spi_ack(&mut self, report: &[u8]) -> bool {
        if report.first() != Some(&REPORT_SUBCOMMAND_ACK) || report.get(14) != Some(&0x10) {
            return false;
        }
        let Some(address) = u16_le_at(report, 15) else {
            return false;
        };
        let data = &report[SPI_DATA_OFFSET.min(report.len())..];

        match address {
            spi::IMU_CALIBRATION => self.parse_imu_block(data),
            spi::IMU_HORIZONTAL_OFFSET => self.parse_horizontal_block(data),
            spi::STICK_CALIBRATION => self.parse_stick_block(data),
            spi::LEFT_STICK_PARAMETERS => {
                let Some(dead_zone) = dead_zone_value(data) else { return false };
                self.left_dead_zone = dead_zone;
                true
            }
            spi::RIGHT_STICK_PARAMETERS => {
                let Some(dead_zone) = dead_zone_value(data) else { return false };
                self.right_dead_zone = dead_zone;
                true
            }
            _ => {
                debug!("ignoring spi block at {address:#06x}");
                false
            }
        }
    }

    fn parse_imu_block(&mut self, data: &[u8]) -> bool {
        let mut cursor = ByteCursor::new(data);
        let Some(acc_offset) = read_axis_triple(&mut cursor) else { return false };
        let Some(acc_sensitivity) = read_axis_triple(&mut cursor) else { return false };
        let Some(gyro_offset) = read_axis_triple(&mut cursor) else { return false };
        let Some(gyro_sensitivity) = read_axis_triple(&mut cursor) else { return false };
        self.imu.acc_offset = acc_offset;
        self.imu.acc_sensitivity = acc_sensitivity;
        self.imu.gyro_offset = gyro_offset;
        self.imu.gyro_sensitivity = gyro_sensitivity;
        true
    }

    fn parse_horizontal_block(&mut self, data: &[u8]) -> bool {
        let mut cursor = ByteCursor::new(data);
        let Some(offsets) = read_axis_triple(&mut cursor) else { return false };
        self.imu.horizontal_offset = offsets;
        true
    }

    fn parse_stick_block(&mut self, data: &[u8]) -> bool {
        if data.len() < STICK_BLOCK_LEN * 2 {
            return false;
        }
        let left = unpack_stick_values(&data[0..STICK_BLOCK_LEN]);
        let right = unpack_stick_values(&data[STICK_BLOCK_LEN..STICK_BLOCK_LEN * 2]);

        // Left block order: travel above center, center, travel below.
        let center = [left[2], left[3]];
        self.left_stick = StickCalibration::new(
            [center[0] - left[0], center[1] - left[1]],
            center,
            [center[0] + left[4], center[1] + left[5]],
        );

        // Right block order: center first, then the two travel pairs.
        let center = [right[0], right[1]];
        self.right_stick = StickCalibration::new(
            [center[0] - right[2], center[1] - right[3]],
            center,
            [center[0] + right[4], center[1] + right[5]],
        );
        true
    }
}

fn read_axis_triple(cursor: &mut ByteCursor<'_>) -> Option<[i16; 3]> {
    let mut out = [0i16; 3];
    for slot in &mut out {
        *slot = cursor.i16_le().ok()?;
    }
    Some(out)
}

/// Unpacks a 9-byte stick block into six 12-bit values.
fn unpack_stick_values(block: &[u8]) -> [i32; 6] {
    let mut values = [0i32; 6];
    for pair in 0..3 {
        let b = &block[pair * 3..pair * 3 + 3];
        values[pair * 2] = i32::from(((u16::from(b[1]) << 8) & 0x0F00) | u16::from(b[0]));
        values[pair * 2 + 1] = i32::from((u16::from(b[2]) << 4) | (u16::from(b[1]) >> 4));
    }
    values
}

/// Dead zone sits 12-bit packed three bytes into the parameter block.
fn dead_zone_value(data: &[u8]) -> Option<u16> {
    let low = *data.get(3)?;
    let high = *data.get(4)?;
    Some(((u16::from(high) << 8) & 0x0F00) | u16::from(low))
}
