//! Wacom vendor-usage translation.
//!
//! Newer Wacom descriptors put everything on vendor page `0xFF0D`, with
//! the real HID page smuggled into bits 8..=15 of the usage. Known
//! sub-pages are rewritten to their standard equivalents so the generic
//! digitizer consumer can process them.

const WACOM_VENDOR_PAGE: u32 = 0xFF0D_0000;

const SP_PAD: u32 = 0x0004_0000;
const SP_MOUSE: u32 = 0x0001_0000;
const SP_BUTTON: u32 = 0x0009_0000;
const SP_DIGITIZER: u32 = 0x000D_0000;
const SP_DIGITIZER_INFO: u32 = 0x0010_0000;

/// Maps a `page << 16 | usage` value from the Wacom vendor page onto its
/// standard-page equivalent. Usages from other pages pass through.
pub fn wacom_equivalent_usage(usage: u32) -> u32 {
    if usage & 0xFFFF_0000 != WACOM_VENDOR_PAGE {
        return usage;
    }
    let subpage = (usage & 0xFF00) << 8;
    let subusage = usage & 0xFF;
    match subpage {
        SP_PAD | SP_MOUSE | SP_BUTTON | SP_DIGITIZER | SP_DIGITIZER_INFO => subpage | subusage,
        // Unknown sub-page: just strip the vendor marker.
        _ => usage & 0x00FF_FFFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subpages_rewritten() {
        // Digitizer X on the vendor page becomes plain digitizer X.
        assert_eq!(wacom_equivalent_usage(0xFF0D_0D30), 0x000D_0030);
        assert_eq!(wacom_equivalent_usage(0xFF0D_0901), 0x0009_0001);
        assert_eq!(wacom_equivalent_usage(0xFF0D_1002), 0x0010_0002);
    }

    #[test]
    fn test_unknown_subpage_strips_vendor_marker() {
        assert_eq!(wacom_equivalent_usage(0xFF0D_4242), 0x000D_4242);
        assert_eq!(wacom_equivalent_usage(0xFF0D_9911), 0x000D_9911);
    }

    #[test]
    fn test_other_pages_untouched() {
        assert_eq!(wacom_equivalent_usage(0x0001_0030), 0x0001_0030);
        assert_eq!(wacom_equivalent_usage(0xFF00_0100), 0xFF00_0100);
    }
}
