//! Analog stick calibration.
//!
//! Controllers report raw ADC counts whose center and extents drift per
//! unit. A [`StickCalibration`] carries the per-axis min/center/max learned
//! from the device (factory SPI data on some pads, first-report snapshots
//! on others) and maps raw samples onto a symmetric range with a radial
//! dead zone.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

use serde::{Deserialize, Serialize};

/// Radial dead zone below which a stick reads as centered, as a fraction
/// of full deflection.
pub const DEAD_ZONE_INNER: f32 = 0.15;

/// Output full-scale magnitude of [`StickCalibration::normalize`].
pub const STICK_OUTPUT_SCALE: f32 = 2048.0;

/// Per-axis raw extents of one analog stick. Index 0 is X, index 1 is Y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickCalibration {
    pub min: [i32; 2],
    pub center: [i32; 2],
    pub max: [i32; 2],
}

impl StickCalibration {
    pub const fn new(min: [i32; 2], center: [i32; 2], max: [i32; 2]) -> Self {
        Self { min, center, max }
    }

    /// Builds a symmetric calibration around `center` with `span` counts
    /// of travel each way.
    pub const fn symmetric(center: i32, span: i32) -> Self {
        Self {
            min: [center - span, center - span],
            center: [center, center],
            max: [center + span, center + span],
        }
    }

    fn axis_fraction(&self, axis: usize, raw: i32) -> f32 {
        let raw = raw.clamp(self.min[axis], self.max[axis]);
        let center = self.center[axis];
        if raw >= center {
            let span = self.max[axis] - center;
            if span <= 0 {
                return 0.0;
            }
            (raw - center) as f32 / span as f32
        } else {
            let span = center - self.min[axis];
            if span <= 0 {
                return 0.0;
            }
            -((center - raw) as f32 / span as f32)
        }
    }

    /// Maps a raw sample pair onto `±2048` with a radial dead zone.
    ///
    /// Samples outside the calibrated extents are clamped first, so a
    /// drifting stick can never overshoot full deflection.
    pub fn normalize(&self, raw_x: i32, raw_y: i32) -> (i32, i32) {
        let x = self.axis_fraction(0, raw_x);
        let y = self.axis_fraction(1, raw_y);

        let magnitude = (x * x + y * y).sqrt();
        if magnitude <= DEAD_ZONE_INNER {
            return (0, 0);
        }

        let legal = ((magnitude - DEAD_ZONE_INNER) / (1.0 - DEAD_ZONE_INNER)).min(1.0);
        let scale = legal / magnitude * STICK_OUTPUT_SCALE;
        ((x * scale) as i32, (y * scale) as i32)
    }
}
