//! Consumer Control volume report (report ID 3).
//!
//! Layout (3 bytes):
//! ```text
//! Bit 0:     Volume Decrement
//! Bit 1:     Volume Increment
//! Bit 2-10:  AL Keyboard Layout (usage repeated over 9 bits)
//! Bit 11-23: padding
//! ```
//!
//! Phones treat Volume Increment as the camera shutter, and the
//! keyboard-layout usage is what makes Android list the device as a
//! keyboard.  No gesture needs this report; it is registered so the
//! report map matches what the host enumerates.

/// Volume report size in bytes.
pub const VOLUME_REPORT_SIZE: usize = 3;

const VOLUME_DECREMENT: u8 = 0x01;
const VOLUME_INCREMENT: u8 = 0x02;
const KEYBOARD_LAYOUT: u8 = 0x04;

/// Consumer Control volume/keyboard-layout report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeReport {
    pub volume_down: bool,
    pub volume_up: bool,
    pub keyboard_layout: bool,
}

impl VolumeReport {
    /// All usages released.
    pub const fn released() -> Self {
        Self {
            volume_down: false,
            volume_up: false,
            keyboard_layout: false,
        }
    }

    /// Volume Increment held (camera shutter on most phones).
    #[cfg(test)]
    pub const fn volume_up() -> Self {
        Self {
            volume_down: false,
            volume_up: true,
            keyboard_layout: false,
        }
    }

    /// Serialise into a byte slice for BLE notification.
    /// Returns the number of bytes written (always 3), or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < VOLUME_REPORT_SIZE {
            return 0;
        }
        let mut bits = 0;
        if self.volume_down {
            bits |= VOLUME_DECREMENT;
        }
        if self.volume_up {
            bits |= VOLUME_INCREMENT;
        }
        if self.keyboard_layout {
            bits |= KEYBOARD_LAYOUT;
        }
        buf[0] = bits;
        buf[1] = 0;
        buf[2] = 0;
        VOLUME_REPORT_SIZE
    }

    /// Check if any usage is active.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        !(self.volume_down || self.volume_up || self.keyboard_layout)
    }
}
