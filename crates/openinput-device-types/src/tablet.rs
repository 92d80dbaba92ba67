//! Known graphics tablets and their per-model geometry.

use serde::{Deserialize, Serialize};

use crate::UsbId;

/// Report layout family of a tablet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabletKind {
    /// Wacom Bamboo Pen & Touch.
    BambooPt,
    /// Wacom Intuos PT (CTH/CTL-4xx and 6xx).
    WacomPts,
    /// Wacom Intuos5 / Intuos Pro.
    Intuos5,
    /// Wacom Intuos4.
    Intuos4,
    /// Wacom Intuos 2018 line (CTL-4100/6100).
    Intuos4100,
    /// Wacom Intuos S / PT 2 (CTH-x90).
    IntuosHt,
    /// Huion H640P.
    H640P,
}

/// Static geometry and feature facts for one tablet model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabletInfo {
    pub id: UsbId,
    pub kind: TabletKind,
    /// Pen surface extent in device units.
    pub width: u32,
    pub height: u32,
    pub pressure_max: u16,
    pub distance_max: u16,
    /// Feature report used to switch the tablet out of mouse emulation,
    /// zero when the model needs no such kick.
    pub mode_report_id: u8,
    pub mode_report_value: u8,
    /// Simultaneous touch contacts, zero for pen-only models.
    pub touch_max: u8,
    pub pen_button_count: u8,
    pub frame_button_count: u8,
    pub tilt: bool,
    /// Touch surface extent, which on several models uses a different
    /// unit grid than the pen surface.
    pub touch_width: u32,
    pub touch_height: u32,
}

/// Supported tablets.
pub const TABLET_PRODUCTS: &[TabletInfo] = &[
    TabletInfo {
        id: UsbId::new(0x056A, 0x0027),
        kind: TabletKind::Intuos5,
        width: 44704,
        height: 27940,
        pressure_max: 2047,
        distance_max: 63,
        mode_report_id: 2,
        mode_report_value: 2,
        touch_max: 7,
        pen_button_count: 4,
        frame_button_count: 8,
        tilt: true,
        touch_width: 44704,
        touch_height: 27940,
    },
    TabletInfo {
        id: UsbId::new(0x056A, 0x00D8),
        kind: TabletKind::BambooPt,
        width: 21648,
        height: 13700,
        pressure_max: 1023,
        distance_max: 31,
        mode_report_id: 2,
        mode_report_value: 2,
        touch_max: 2,
        pen_button_count: 4,
        frame_button_count: 4,
        tilt: false,
        touch_width: 740,
        touch_height: 500,
    },
    TabletInfo {
        id: UsbId::new(0x056A, 0x0302),
        kind: TabletKind::WacomPts,
        width: 4095,
        height: 4095,
        pressure_max: 1023,
        distance_max: 31,
        mode_report_id: 2,
        mode_report_value: 2,
        touch_max: 7,
        pen_button_count: 3,
        frame_button_count: 4,
        tilt: false,
        touch_width: 4095,
        touch_height: 4095,
    },
    TabletInfo {
        id: UsbId::new(0x056A, 0x00BA),
        kind: TabletKind::Intuos4,
        width: 44704,
        height: 27940,
        pressure_max: 2047,
        distance_max: 63,
        mode_report_id: 2,
        mode_report_value: 2,
        touch_max: 0,
        pen_button_count: 4,
        frame_button_count: 8,
        tilt: true,
        touch_width: 0,
        touch_height: 0,
    },
    TabletInfo {
        id: UsbId::new(0x056A, 0x0374),
        kind: TabletKind::Intuos4100,
        width: 15200,
        height: 9500,
        pressure_max: 1023,
        distance_max: 31,
        mode_report_id: 0,
        mode_report_value: 0,
        touch_max: 0,
        pen_button_count: 3,
        frame_button_count: 4,
        tilt: false,
        touch_width: 0,
        touch_height: 0,
    },
    TabletInfo {
        id: UsbId::new(0x056A, 0x033C),
        kind: TabletKind::IntuosHt,
        width: 21600,
        height: 13500,
        pressure_max: 2047,
        distance_max: 63,
        mode_report_id: 2,
        mode_report_value: 2,
        touch_max: 7,
        pen_button_count: 3,
        frame_button_count: 4,
        tilt: false,
        touch_width: 4095,
        touch_height: 4095,
    },
    TabletInfo {
        id: UsbId::new(0x256C, 0x006D),
        kind: TabletKind::H640P,
        width: 65534,
        height: 32767,
        pressure_max: 8192,
        distance_max: 10,
        mode_report_id: 0,
        mode_report_value: 0,
        touch_max: 0,
        pen_button_count: 3,
        frame_button_count: 6,
        tilt: false,
        touch_width: 0,
        touch_height: 0,
    },
];

/// Looks up tablet facts by vendor/product ID.
pub fn lookup_tablet(vendor: u16, product: u16) -> Option<&'static TabletInfo> {
    TABLET_PRODUCTS
        .iter()
        .find(|entry| entry.id.vendor == vendor && entry.id.product == product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_intuos5() {
        let info = lookup_tablet(0x056A, 0x0027).expect("known tablet");
        assert_eq!(info.kind, TabletKind::Intuos5);
        assert_eq!(info.pressure_max, 2047);
        assert!(info.tilt);
    }

    #[test]
    fn test_lookup_huion_needs_no_mode_switch() {
        let info = lookup_tablet(0x256C, 0x006D).expect("known tablet");
        assert_eq!(info.kind, TabletKind::H640P);
        assert_eq!(info.mode_report_id, 0);
        assert_eq!(info.touch_max, 0);
    }

    #[test]
    fn test_lookup_unknown_tablet() {
        assert!(lookup_tablet(0x056A, 0xFFFF).is_none());
    }
}
