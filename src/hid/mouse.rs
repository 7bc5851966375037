//! BLE HID mouse button/wheel report (report ID 4).
//!
//! Layout (3 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Middle, Bit 2 = Right,
//!         Bit 3-4 = extra buttons, Bit 5-7 = padding
//! Byte 1: Wheel delta  (signed, -127..127)
//! Byte 2: AC Pan delta (signed, -127..127)
//! ```
//!
//! Pointer motion is carried separately by [`super::mouse_xy`].

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 3;

/// Left button bit.
pub const BUTTON_LEFT: u8 = 0x01;

/// Only the five declared button bits reach the wire.
const BUTTON_MASK: u8 = 0x1F;

/// Mouse buttons + scroll wheel report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = middle, bit 2 = right).
    pub buttons: u8,
    /// Vertical scroll delta (signed).
    pub wheel: i8,
    /// Horizontal scroll delta (signed).
    pub pan: i8,
}

impl MouseReport {
    /// Report with the left button held and nothing else.
    pub const fn left_down() -> Self {
        Self {
            buttons: BUTTON_LEFT,
            wheel: 0,
            pan: 0,
        }
    }

    /// All buttons released, no scroll.
    pub const fn released() -> Self {
        Self {
            buttons: 0,
            wheel: 0,
            pan: 0,
        }
    }

    /// Scroll-only report.
    pub const fn scroll(wheel: i8) -> Self {
        Self {
            buttons: 0,
            wheel,
            pan: 0,
        }
    }

    pub fn left_pressed(&self) -> bool {
        self.buttons & BUTTON_LEFT != 0
    }

    /// Serialise into a byte slice for BLE notification.
    /// Returns the number of bytes written (always 3), or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons & BUTTON_MASK;
        buf[1] = self.wheel as u8;
        buf[2] = self.pan as u8;
        MOUSE_REPORT_SIZE
    }

    /// Parse a report back from its wire form.
    #[cfg(test)]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < MOUSE_REPORT_SIZE {
            return None;
        }
        Some(Self {
            buttons: data[0] & BUTTON_MASK,
            wheel: data[1] as i8,
            pan: data[2] as i8,
        })
    }
}
