//! GATT system attributes kept with a bond.
//!
//! The SoftDevice hands out a peer's CCCD values as one opaque blob:
//!
//! ```text
//! { handle: u16 LE, len: u16 LE, value: [u8; len] } *  crc16: u16
//! ```
//!
//! Restoring the blob re-arms notifications on the stack side, but a
//! bonded phone does not write its CCCDs again, so the engine has to learn
//! its subscriptions from the same blob.

use crate::event::BleEvent;
use crate::hid::{ReportSlot, INPUT_REPORT_COUNT};

const ENTRY_HEADER_LEN: usize = 4;
const CRC_LEN: usize = 2;

/// CCCD bit 0: notifications enabled.
const CCCD_NOTIFY: u8 = 0x01;

/// `true` when a CCCD value enables notifications.
pub fn notifications_enabled(cccd: &[u8]) -> bool {
    cccd.first().is_some_and(|v| v & CCCD_NOTIFY != 0)
}

/// Attribute entries of a system attribute blob, CRC trailer excluded.
///
/// Stops at the first entry that runs into the trailer.
pub fn entries(blob: &[u8]) -> Entries<'_> {
    Entries { rest: blob }
}

pub struct Entries<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u16, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let [h0, h1, l0, l1, rest @ ..] = self.rest else {
            return None;
        };
        let len = usize::from(u16::from_le_bytes([*l0, *l1]));
        if rest.len() < len + CRC_LEN {
            self.rest = &[];
            return None;
        }
        let (value, rest) = rest.split_at(len);
        self.rest = rest;
        Some((u16::from_le_bytes([*h0, *h1]), value))
    }
}

/// Stored state of the CCCD at `handle`, if the blob has it.
pub fn cccd_enabled(blob: &[u8], handle: u16) -> Option<bool> {
    entries(blob)
        .find(|(h, _)| *h == handle)
        .map(|(_, value)| notifications_enabled(value))
}

/// One [`BleEvent::Subscription`] per input slot whose CCCD is in `blob`.
///
/// `cccd_handles` is indexed by [`ReportSlot::index`].
pub fn restored_subscriptions<'a>(
    blob: &'a [u8],
    cccd_handles: &'a [u16; INPUT_REPORT_COUNT],
) -> impl Iterator<Item = BleEvent> + 'a {
    ReportSlot::ALL.into_iter().filter_map(move |slot| {
        cccd_enabled(blob, cccd_handles[slot.index()])
            .map(|enabled| BleEvent::Subscription { slot, enabled })
    })
}
