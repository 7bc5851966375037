//! HID report map served to the phone, plus a small descriptor walker.
//!
//! The map exposes four input reports and one feature report:
//!
//! | ID | Collection              | Direction | Bytes |
//! |----|-------------------------|-----------|-------|
//! | 3  | Consumer (volume)       | Input     | 3     |
//! | 2  | Digitizer touch finger  | Input     | 7     |
//! | 8  | Digitizer contact max   | Feature   | 1     |
//! | 4  | Mouse buttons + wheel   | Input     | 3     |
//! | 5  | Mouse relative X/Y      | Input     | 3     |
//!
//! ## Walker limitations
//!
//! [`ReportLayout::parse`] only tracks what is needed to size reports:
//! - Report Size / Report Count / Report ID globals
//! - Input and Feature main items (Output is skipped)
//! - Push/Pop state is not supported

use heapless::Vec;

/// bcdHID 1.01, country 0, flags = RemoteWake | NormallyConnectable.
pub const HID_INFORMATION: [u8; 4] = [0x01, 0x01, 0x00, 0x03];

/// Value of the Contact Count Maximum feature report (ID 8).
pub const CONTACT_COUNT_MAX: u8 = 1;

/// Report ID of the Contact Count Maximum feature report.
pub const CONTACT_COUNT_MAX_REPORT_ID: u8 = 8;

/// Report Reference type code for input reports.
pub const REPORT_TYPE_INPUT: u8 = 0x01;
/// Report Reference type code for feature reports.
pub const REPORT_TYPE_FEATURE: u8 = 0x03;

/// Report map (HID Report Descriptor) served on characteristic 0x2A4B.
pub const REPORT_MAP: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x03, //   Report ID (3)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0B, //   Report Count (11)
    0x09, 0xEA, //   Usage (Volume Decrement)
    0x09, 0xE9, //   Usage (Volume Increment)
    0x0A, 0xAE, 0x01, // Usage (AL Keyboard Layout)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x0D, //   Report Size (13)
    0x81, 0x03, //   Input (Constant) - padding
    0xC0, // End Collection
    //
    0x05, 0x0D, // Usage Page (Digitizer)
    0x09, 0x04, // Usage (Touch Screen)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x02, //   Report ID (2)
    0x09, 0x22, //   Usage (Finger)
    0xA1, 0x02, //   Collection (Logical)
    0x09, 0x42, //     Usage (Tip Switch)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x01, //     Report Size (1)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x09, 0x32, //     Usage (In Range)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x06, //     Report Count (6)
    0x81, 0x03, //     Input (Constant) - padding
    0x75, 0x08, //     Report Size (8)
    0x09, 0x51, //     Usage (Contact Identifier)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x26, 0xFF, 0x0F, // Logical Maximum (4095)
    0x75, 0x10, //     Report Size (16)
    0x55, 0x0E, //     Unit Exponent (-2)
    0x65, 0x33, //     Unit (English Linear, Inch)
    0x09, 0x30, //     Usage (X)
    0x35, 0x00, //     Physical Minimum (0)
    0x46, 0xB5, 0x04, // Physical Maximum (1205)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x46, 0x8A, 0x03, // Physical Maximum (906)
    0x09, 0x31, //     Usage (Y)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //   End Collection
    0x05, 0x0D, //   Usage Page (Digitizer)
    0x09, 0x54, //   Usage (Contact Count)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x85, 0x08, //   Report ID (8)
    0x09, 0x55, //   Usage (Contact Count Maximum)
    0x25, 0x05, //   Logical Maximum (5)
    0xB1, 0x02, //   Feature (Data, Variable, Absolute)
    0xC0, // End Collection
    //
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x04, //   Report ID (4)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x95, 0x05, //     Report Count (5)
    0x75, 0x01, //     Report Size (1)
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (1)
    0x29, 0x05, //     Usage Maximum (5)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x03, //     Report Size (3)
    0x81, 0x01, //     Input (Constant) - padding
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0x05, 0x0C, //     Usage Page (Consumer)
    0x0A, 0x38, 0x02, // Usage (AC Pan)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0xC0, //   End Collection
    0x85, 0x05, //   Report ID (5)
    0x09, 0x01, //   Usage (Consumer Control)
    0xA1, 0x00, //   Collection (Physical)
    0x75, 0x0C, //     Report Size (12)
    0x95, 0x02, //     Report Count (2)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x01, 0xF8, // Logical Minimum (-2047)
    0x26, 0xFF, 0x07, // Logical Maximum (2047)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0xC0, //   End Collection
    0xC0, // End Collection
];

/// Maximum number of distinct report IDs tracked by the walker.
const MAX_REPORT_IDS: usize = 8;

/// Accumulated bit lengths for one report ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportBits {
    pub report_id: u8,
    pub input_bits: u32,
    pub feature_bits: u32,
}

impl ReportBits {
    pub fn input_bytes(&self) -> usize {
        self.input_bits.div_ceil(8) as usize
    }

    pub fn feature_bytes(&self) -> usize {
        self.feature_bits.div_ceil(8) as usize
    }
}

/// Per-report-ID sizes extracted from a report map.
#[derive(Clone, Debug, Default)]
pub struct ReportLayout {
    reports: Vec<ReportBits, MAX_REPORT_IDS>,
}

impl ReportLayout {
    /// Walk a HID Report Descriptor and total the Input/Feature bits per report ID.
    ///
    /// Returns `None` when the descriptor is truncated mid-item or declares
    /// more report IDs than we track.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut layout = ReportLayout::default();

        // Parser state.
        let mut report_id: u8 = 0;
        let mut report_size: u32 = 0;
        let mut report_count: u32 = 0;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];
            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                return None;
            }

            let value: u32 = match size {
                0 => 0,
                1 => data[i + 1] as u32,
                2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
                _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
            };

            match item_type {
                // Main items
                0 => match tag {
                    // Input
                    0x08 => layout.entry(report_id)?.input_bits += report_size * report_count,
                    // Feature
                    0x0B => layout.entry(report_id)?.feature_bits += report_size * report_count,
                    _ => {}
                },
                // Global items
                1 => match tag {
                    0x07 => report_size = value,
                    0x08 => report_id = value as u8,
                    0x09 => report_count = value,
                    _ => {}
                },
                _ => {}
            }

            i += 1 + size;
        }

        Some(layout)
    }

    /// Sizes recorded for `report_id`, if the map declares it.
    pub fn report(&self, report_id: u8) -> Option<&ReportBits> {
        self.reports.iter().find(|r| r.report_id == report_id)
    }

    /// Number of distinct report IDs found.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    fn entry(&mut self, report_id: u8) -> Option<&mut ReportBits> {
        let index = match self.reports.iter().position(|r| r.report_id == report_id) {
            Some(index) => index,
            None => {
                self.reports
                    .push(ReportBits {
                        report_id,
                        ..Default::default()
                    })
                    .ok()?;
                self.reports.len() - 1
            }
        };
        self.reports.get_mut(index)
    }
}
