//! HID report transport.
//!
//! Wraps the stack's notify primitive behind [`ReportSink`] and enforces
//! the subscription rule: a report only reaches the link while the peer
//! has notifications enabled for its slot.  There is no queue and no
//! retry; whatever the sink refuses is gone.

use crate::error::Error;
use crate::hid::{HidReport, ReportSlot, MAX_REPORT_SIZE};
use crate::session::NotifyState;

/// Link-level notify primitive (one HID input characteristic per slot).
pub trait ReportSink {
    /// Push `data` as a notification on the characteristic behind `slot`.
    fn notify(&mut self, slot: ReportSlot, data: &[u8]) -> Result<(), Error>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn notify(&mut self, slot: ReportSlot, data: &[u8]) -> Result<(), Error> {
        (**self).notify(slot, data)
    }
}

/// Subscription-gated sender of typed HID reports.
pub struct HidTransport<S> {
    sink: S,
}

impl<S: ReportSink> HidTransport<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Send raw `bytes` on `slot`.
    ///
    /// Returns [`Error::NotSubscribed`] without touching the link when the
    /// slot is not subscribed, and [`Error::BufferOverflow`] when the
    /// payload length does not match the slot.
    pub fn send(&mut self, notify: &NotifyState, slot: ReportSlot, bytes: &[u8]) -> Result<(), Error> {
        if !notify.is_enabled(slot) {
            return Err(Error::NotSubscribed);
        }
        if bytes.len() != slot.payload_len() {
            return Err(Error::BufferOverflow);
        }
        self.sink.notify(slot, bytes)
    }

    /// Serialise `report` and send it on its own slot.
    pub fn send_report(&mut self, notify: &NotifyState, report: &HidReport) -> Result<(), Error> {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = report.serialize(&mut buf);
        self.send(notify, report.slot(), &buf[..len])
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::{FingerReport, MouseReport};

    #[derive(Default)]
    struct Link {
        sent: std::vec::Vec<(ReportSlot, std::vec::Vec<u8>)>,
        refuse: bool,
    }

    impl ReportSink for Link {
        fn notify(&mut self, slot: ReportSlot, data: &[u8]) -> Result<(), Error> {
            if self.refuse {
                return Err(Error::TransportBusy);
            }
            self.sent.push((slot, data.to_vec()));
            Ok(())
        }
    }

    fn subscribed() -> NotifyState {
        let mut notify = NotifyState::new();
        for slot in ReportSlot::ALL {
            notify.set(slot, true);
        }
        notify
    }

    #[test]
    fn unsubscribed_slot_is_a_silent_no_op() {
        let mut transport = HidTransport::new(Link::default());
        let notify = NotifyState::new();
        let report = HidReport::from(FingerReport::touching(6, 1904, 3200));

        assert_eq!(
            transport.send_report(&notify, &report),
            Err(Error::NotSubscribed)
        );
        assert!(transport.sink().sent.is_empty());
    }

    #[test]
    fn subscription_is_checked_per_slot() {
        let mut transport = HidTransport::new(Link::default());
        let mut notify = NotifyState::new();
        notify.set(ReportSlot::Mouse, true);

        assert!(transport
            .send_report(&notify, &HidReport::from(MouseReport::scroll(120)))
            .is_ok());
        assert_eq!(
            transport.send_report(&notify, &HidReport::from(FingerReport::default())),
            Err(Error::NotSubscribed)
        );
        assert_eq!(transport.sink().sent.len(), 1);
        assert_eq!(transport.sink().sent[0].0, ReportSlot::Mouse);
    }

    #[test]
    fn wrong_length_is_rejected_before_the_link() {
        let mut transport = HidTransport::new(Link::default());
        assert_eq!(
            transport.send(&subscribed(), ReportSlot::Mouse, &[0, 1]),
            Err(Error::BufferOverflow)
        );
        assert!(transport.sink().sent.is_empty());
    }

    #[test]
    fn busy_link_surfaces_synchronously() {
        let mut transport = HidTransport::new(Link {
            refuse: true,
            ..Default::default()
        });
        assert_eq!(
            transport.send(&subscribed(), ReportSlot::Mouse, &[0, 0, 0]),
            Err(Error::TransportBusy)
        );
    }

    #[test]
    fn send_report_writes_slot_sized_payload() {
        let mut transport = HidTransport::new(Link::default());
        let report = HidReport::from(FingerReport::touching(6, 1904, 3200));
        transport.send_report(&subscribed(), &report).unwrap();

        let (slot, bytes) = &transport.sink().sent[0];
        assert_eq!(*slot, ReportSlot::Finger);
        assert_eq!(bytes.len(), 7);
    }
}
