//! HID input reports and the slot table they are sent through.
//!
//! Every report kind owns exactly one slot: a fixed (index, report ID,
//! length) triple registered with the GATT HID service at start-up.

pub mod consumer;
pub mod descriptor;
pub mod finger;
pub mod mouse;
pub mod mouse_xy;


pub use consumer::VolumeReport;
pub use finger::FingerReport;
pub use mouse::MouseReport;
pub use mouse_xy::MouseXyReport;

/// Largest input report we ever serialise.
pub const MAX_REPORT_SIZE: usize = finger::FINGER_REPORT_SIZE;

/// Number of input report slots registered with the HID service.
pub const INPUT_REPORT_COUNT: usize = 4;

/// Input report slots, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportSlot {
    Volume,
    Finger,
    Mouse,
    MouseXy,
}

impl ReportSlot {
    /// All slots in registration order.
    pub const ALL: [ReportSlot; INPUT_REPORT_COUNT] = [
        ReportSlot::Volume,
        ReportSlot::Finger,
        ReportSlot::Mouse,
        ReportSlot::MouseXy,
    ];

    /// Index of the input report within the HID service.
    pub const fn index(self) -> usize {
        match self {
            ReportSlot::Volume => 0,
            ReportSlot::Finger => 1,
            ReportSlot::Mouse => 2,
            ReportSlot::MouseXy => 3,
        }
    }

    /// Report ID as declared in [`descriptor::REPORT_MAP`].
    pub const fn report_id(self) -> u8 {
        match self {
            ReportSlot::Volume => 3,
            ReportSlot::Finger => 2,
            ReportSlot::Mouse => 4,
            ReportSlot::MouseXy => 5,
        }
    }

    /// Fixed payload length of the slot in bytes.
    pub const fn payload_len(self) -> usize {
        match self {
            ReportSlot::Volume => consumer::VOLUME_REPORT_SIZE,
            ReportSlot::Finger => finger::FINGER_REPORT_SIZE,
            ReportSlot::Mouse => mouse::MOUSE_REPORT_SIZE,
            ReportSlot::MouseXy => mouse_xy::MOUSE_XY_REPORT_SIZE,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A typed input report bound for one of the slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Volume(VolumeReport),
    Finger(FingerReport),
    Mouse(MouseReport),
    MouseXy(MouseXyReport),
}

impl HidReport {
    pub fn slot(&self) -> ReportSlot {
        match self {
            HidReport::Volume(_) => ReportSlot::Volume,
            HidReport::Finger(_) => ReportSlot::Finger,
            HidReport::Mouse(_) => ReportSlot::Mouse,
            HidReport::MouseXy(_) => ReportSlot::MouseXy,
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Volume(v) => v.serialize(buf),
            HidReport::Finger(f) => f.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
            HidReport::MouseXy(xy) => xy.serialize(buf),
        }
    }

    #[cfg(test)]
    pub fn is_finger(&self) -> bool {
        matches!(self, HidReport::Finger(_))
    }

    #[cfg(test)]
    pub fn is_mouse(&self) -> bool {
        matches!(self, HidReport::Mouse(_))
    }

    #[cfg(test)]
    pub fn is_mouse_xy(&self) -> bool {
        matches!(self, HidReport::MouseXy(_))
    }
}

impl From<FingerReport> for HidReport {
    fn from(r: FingerReport) -> Self {
        HidReport::Finger(r)
    }
}

impl From<MouseReport> for HidReport {
    fn from(r: MouseReport) -> Self {
        HidReport::Mouse(r)
    }
}

impl From<MouseXyReport> for HidReport {
    fn from(r: MouseXyReport) -> Self {
        HidReport::MouseXy(r)
    }
}

impl From<VolumeReport> for HidReport {
    fn from(r: VolumeReport) -> Self {
        HidReport::Volume(r)
    }
}
