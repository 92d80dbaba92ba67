//! Known gamepad products and the protocol family each one speaks.

use serde::{Deserialize, Serialize};

use crate::UsbId;

/// Protocol family of a gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadKind {
    /// Generic HID gamepad, decoded through the report descriptor.
    Unknown,
    Ps3,
    Ps3Motion,
    Ps4,
    XboxOne,
    Xbox360,
    SwitchPro,
    SpaceNav,
    LogitechExtreme3dPro,
    NesPad,
}

/// One row of the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadProduct {
    pub id: UsbId,
    pub kind: GamepadKind,
    /// Whether the device still enumerates as a plain HID gamepad. When
    /// set, a HID-level driver must stand down so the dedicated decoder
    /// can claim the interface.
    pub hid_capable: bool,
}

const fn product(vendor: u16, product: u16, kind: GamepadKind, hid_capable: bool) -> GamepadProduct {
    GamepadProduct { id: UsbId::new(vendor, product), kind, hid_capable }
}

/// Products with a dedicated decoder.
pub const GAMEPAD_PRODUCTS: &[GamepadProduct] = &[
    product(0x045E, 0x02EA, GamepadKind::XboxOne, false),
    product(0x045E, 0x0719, GamepadKind::Xbox360, false),
    product(0x057E, 0x2009, GamepadKind::SwitchPro, false),
    product(0x054C, 0x0268, GamepadKind::Ps3, true),
    product(0x054C, 0x042F, GamepadKind::Ps3, true),
    product(0x054C, 0x03D5, GamepadKind::Ps3Motion, true),
    product(0x054C, 0x05C4, GamepadKind::Ps4, true),
    product(0x054C, 0x09CC, GamepadKind::Ps4, true),
    product(0x0A5C, 0x21E8, GamepadKind::Ps4, true),
    product(0x046D, 0xC626, GamepadKind::SpaceNav, true),
    product(0x046D, 0xC628, GamepadKind::SpaceNav, true),
    product(0x046D, 0xC215, GamepadKind::LogitechExtreme3dPro, true),
    product(0x0079, 0x0011, GamepadKind::NesPad, true),
];

/// Looks up a product by vendor/product ID.
///
/// `exclude_hid_capable` drops products that also enumerate as plain HID,
/// for callers deciding whether a HID-level driver should claim the
/// device.
pub fn lookup_gamepad(vendor: u16, product: u16, exclude_hid_capable: bool) -> Option<&'static GamepadProduct> {
    GAMEPAD_PRODUCTS
        .iter()
        .find(|entry| entry.id.vendor == vendor && entry.id.product == product)
        .filter(|entry| !(exclude_hid_capable && entry.hid_capable))
}
