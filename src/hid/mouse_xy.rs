//! Relative pointer motion report (report ID 5).
//!
//! Layout (3 bytes, little-endian bit packing):
//! ```text
//! Bits  0-11: X displacement (signed 12-bit, -2047..2047)
//! Bits 12-23: Y displacement (signed 12-bit, -2047..2047)
//! ```
//!
//! iOS clamps the pointer at the screen edge, so a full-scale delta
//! parks the cursor in a known corner.

/// Pointer motion report size in bytes.
pub const MOUSE_XY_REPORT_SIZE: usize = 3;

/// Largest magnitude the report map allows on either axis.
pub const MOUSE_XY_LIMIT: i16 = 2047;

/// Relative X/Y pointer displacement.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseXyReport {
    /// Horizontal displacement (positive = right).
    pub x: i16,
    /// Vertical displacement (positive = down).
    pub y: i16,
}

impl MouseXyReport {
    /// Build a report, clamping both axes to the logical range.
    pub fn new(x: i16, y: i16) -> Self {
        Self {
            x: x.clamp(-MOUSE_XY_LIMIT, MOUSE_XY_LIMIT),
            y: y.clamp(-MOUSE_XY_LIMIT, MOUSE_XY_LIMIT),
        }
    }

    /// Serialise into a byte slice for BLE notification.
    /// Returns the number of bytes written (always 3), or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_XY_REPORT_SIZE {
            return 0;
        }
        let x = (self.x as u16 & 0x0FFF) as u32;
        let y = (self.y as u16 & 0x0FFF) as u32;
        let packed = x | (y << 12);
        buf[..MOUSE_XY_REPORT_SIZE].copy_from_slice(&packed.to_le_bytes()[..MOUSE_XY_REPORT_SIZE]);
        MOUSE_XY_REPORT_SIZE
    }

    /// Parse a report back from its wire form (sign-extends both axes).
    #[cfg(test)]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < MOUSE_XY_REPORT_SIZE {
            return None;
        }
        let packed = u32::from_le_bytes([data[0], data[1], data[2], 0]);
        let extend = |raw: u32| ((raw as u16) << 4) as i16 >> 4;
        Some(Self {
            x: extend(packed & 0x0FFF),
            y: extend((packed >> 12) & 0x0FFF),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_reset_packs_into_twelve_bit_fields() {
        let mut buf = [0u8; 3];
        assert_eq!(MouseXyReport::new(-2047, 2047).serialize(&mut buf), 3);
        // x = 0x801, y = 0x7FF -> 0x7FF801
        assert_eq!(buf, [0x01, 0xF8, 0x7F]);
    }

    #[test]
    fn negative_y_sign_extends_on_parse() {
        let mut buf = [0u8; 3];
        MouseXyReport::new(80, -120).serialize(&mut buf);
        let parsed = MouseXyReport::from_bytes(&buf).unwrap();
        assert_eq!(parsed, MouseXyReport { x: 80, y: -120 });
    }

    #[test]
    fn out_of_range_deltas_are_clamped() {
        let report = MouseXyReport::new(i16::MIN, 4000);
        assert_eq!(report.x, -2047);
        assert_eq!(report.y, 2047);
    }

    #[test]
    fn short_buffer_writes_nothing() {
        let mut buf = [0xAAu8; 2];
        assert_eq!(MouseXyReport::new(1, 1).serialize(&mut buf), 0);
        assert_eq!(buf, [0xAA, 0xAA]);
    }
}
