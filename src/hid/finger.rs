//! Digitizer single-finger report (report ID 2).
//!
//! Layout (7 bytes):
//! ```text
//! Byte 0:   Bit 0 = Tip Switch, Bit 1 = In Range, Bit 2-7 = padding
//! Byte 1:   Contact identifier
//! Byte 2-3: X (u16 little-endian, logical 0..4095)
//! Byte 4-5: Y (u16 little-endian, logical 0..4095)
//! Byte 6:   Contact count
//! ```
//!
//! Android maps the logical range onto the whole touchscreen, so the
//! coordinates are absolute.

/// Finger report size in bytes.
pub const FINGER_REPORT_SIZE: usize = 7;

/// Logical maximum on both axes.
pub const FINGER_LOGICAL_MAX: u16 = 4095;

const TIP_SWITCH: u8 = 0x01;
const IN_RANGE: u8 = 0x02;

/// One digitizer contact frame.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerReport {
    /// Finger is touching the surface.
    pub tip_switch: bool,
    /// Finger is within detection range.
    pub in_range: bool,
    /// Identifier tying the frames of one contact together.
    pub contact_id: u8,
    /// Absolute X position.
    pub x: u16,
    /// Absolute Y position.
    pub y: u16,
    /// Number of contacts present in this frame.
    pub contact_count: u8,
}

impl FingerReport {
    /// A single contact touching at `(x, y)`.
    pub const fn touching(contact_id: u8, x: u16, y: u16) -> Self {
        Self {
            tip_switch: true,
            in_range: true,
            contact_id,
            x,
            y,
            contact_count: 1,
        }
    }

    /// The same contact lifted at `(x, y)`; no contacts remain.
    pub const fn lifted(contact_id: u8, x: u16, y: u16) -> Self {
        Self {
            tip_switch: false,
            in_range: false,
            contact_id,
            x,
            y,
            contact_count: 0,
        }
    }

    /// Serialise into a byte slice for BLE notification.
    /// Returns the number of bytes written (always 7), or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < FINGER_REPORT_SIZE {
            return 0;
        }
        let mut flags = 0;
        if self.tip_switch {
            flags |= TIP_SWITCH;
        }
        if self.in_range {
            flags |= IN_RANGE;
        }
        buf[0] = flags;
        buf[1] = self.contact_id;
        buf[2..4].copy_from_slice(&self.x.min(FINGER_LOGICAL_MAX).to_le_bytes());
        buf[4..6].copy_from_slice(&self.y.min(FINGER_LOGICAL_MAX).to_le_bytes());
        buf[6] = self.contact_count;
        FINGER_REPORT_SIZE
    }

    /// Parse a report back from its wire form.
    #[cfg(test)]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < FINGER_REPORT_SIZE {
            return None;
        }
        Some(Self {
            tip_switch: data[0] & TIP_SWITCH != 0,
            in_range: data[0] & IN_RANGE != 0,
            contact_id: data[1],
            x: u16::from_le_bytes([data[2], data[3]]),
            y: u16::from_le_bytes([data[4], data[5]]),
            contact_count: data[6],
        })
    }
}
