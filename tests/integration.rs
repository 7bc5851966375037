//! Integration tests for ble-swipe host-testable logic.
//!
//! Drives the engine the way the connection loop does: events in through
//! `handle_event`, clicks through the trigger dispatcher, one
//! `Sequencer::tick` per connection interval, reports out into a
//! recording sink.

use ble_swipe::hid::{FingerReport, HidReport, MouseReport, MouseXyReport, ReportSlot};
use ble_swipe::sys_attrs;
use ble_swipe::trigger::{self, ButtonId, ClickType};
use ble_swipe::{
    handle_event, BleEvent, Error, GestureKind, HidTransport, LinkAction, PeerClassification,
    ReportSink, Sequencer, Session, TickOutcome,
};

/// Every notification that reached the link, with the tick it went out on.
#[derive(Default)]
struct Air {
    tick: usize,
    frames: Vec<(usize, ReportSlot, Vec<u8>)>,
}

impl ReportSink for Air {
    fn notify(&mut self, slot: ReportSlot, data: &[u8]) -> Result<(), Error> {
        self.frames.push((self.tick, slot, data.to_vec()));
        Ok(())
    }
}

struct Rig {
    session: Session,
    sequencer: Sequencer,
    air: Air,
}

impl Rig {
    fn connected() -> Self {
        let mut session = Session::new();
        handle_event(&mut session, BleEvent::Connected);
        for slot in ReportSlot::ALL {
            handle_event(&mut session, BleEvent::Subscription { slot, enabled: true });
        }
        Self {
            session,
            sequencer: Sequencer::new(),
            air: Air::default(),
        }
    }

    fn classify(&mut self, found: bool) {
        handle_event(&mut self.session, BleEvent::LinkEncrypted { success: true });
        handle_event(&mut self.session, BleEvent::DiscoveryResult { found });
    }

    fn click(&mut self, id: ButtonId, click: ClickType) {
        trigger::on_button_event(&mut self.session, id, click);
    }

    /// One scheduler pass.
    fn step(&mut self) -> TickOutcome {
        trigger::tick(&mut self.session, &mut self.sequencer);
        let mut transport = HidTransport::new(&mut self.air);
        let outcome = self.sequencer.tick(&mut transport, self.session.notify());
        self.air.tick += 1;
        outcome
    }

    /// The same session after the link dropped and the bonded phone came
    /// back: no CCCD writes, only what the bond restores.
    fn reconnect(mut self, restored: Option<&[u8]>) -> Self {
        handle_event(&mut self.session, BleEvent::Disconnected { reason: 0x13 });
        handle_event(&mut self.session, BleEvent::Connected);
        if let Some(blob) = restored {
            for event in sys_attrs::restored_subscriptions(blob, &CCCD_HANDLES) {
                handle_event(&mut self.session, event);
            }
        }
        Self {
            session: self.session,
            sequencer: Sequencer::new(),
            air: Air::default(),
        }
    }

    /// Run until nothing is pending and the sequencer is idle.
    fn settle(&mut self) {
        self.step();
        while self.sequencer.is_busy() || self.session.pending().is_some() {
            self.step();
        }
    }

    fn frames(&self) -> &[(usize, ReportSlot, Vec<u8>)] {
        &self.air.frames
    }
}

/// CCCD handles as the HID service registers them, one per slot.
const CCCD_HANDLES: [u16; 4] = [0x0011, 0x0015, 0x0019, 0x001d];

/// System attribute blob with notifications on for `slots`.
fn stored_cccds(slots: &[ReportSlot]) -> Vec<u8> {
    let mut blob = Vec::new();
    for slot in ReportSlot::ALL {
        let value: u16 = if slots.contains(&slot) { 0x0001 } else { 0x0000 };
        blob.extend_from_slice(&CCCD_HANDLES[slot.index()].to_le_bytes());
        blob.extend_from_slice(&2u16.to_le_bytes());
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob.extend_from_slice(&[0x5A, 0xA5]);
    blob
}

fn bytes(report: impl Into<HidReport>) -> Vec<u8> {
    let report = report.into();
    let mut buf = [0u8; 8];
    let n = report.serialize(&mut buf);
    buf[..n].to_vec()
}

fn finger_y(frame: &[u8]) -> u16 {
    u16::from_le_bytes([frame[4], frame[5]])
}

// ═══════════════════════════════════════════════════════════════════════════
// Android dialect
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn android_swipe_up_draws_an_upward_drag() {
    let mut rig = Rig::connected();
    rig.classify(false);
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();

    let frames = rig.frames();
    assert_eq!(frames.len(), 10);
    assert!(frames.iter().all(|(_, slot, _)| *slot == ReportSlot::Finger));

    assert_eq!(frames[0].2, bytes(FingerReport::touching(6, 1904, 3200)));
    let ys: Vec<u16> = frames[1..9].iter().map(|(_, _, b)| finger_y(b)).collect();
    assert_eq!(ys, [2900, 2600, 2300, 2000, 1700, 1400, 1100, 800]);
    for (_, _, frame) in &frames[1..9] {
        // tip + in-range, contact 6, x = 1904, one contact
        assert_eq!(frame[0], 0x03);
        assert_eq!(frame[1], 6);
        assert_eq!(&frame[2..4], &1904u16.to_le_bytes());
        assert_eq!(frame[6], 1);
    }
    assert_eq!(frames[9].2, bytes(FingerReport::lifted(6, 1904, 3200)));
}

#[test]
fn android_frames_go_out_on_consecutive_intervals() {
    let mut rig = Rig::connected();
    rig.click(ButtonId::Down, ClickType::Single);
    rig.settle();

    let ticks: Vec<usize> = rig.frames().iter().map(|(t, _, _)| *t).collect();
    assert_eq!(ticks, (0..10).collect::<Vec<_>>());
}

#[test]
fn android_double_tap_pauses_between_taps() {
    let mut rig = Rig::connected();
    rig.classify(false);
    rig.click(ButtonId::Down, ClickType::Double);
    rig.settle();

    let frames = rig.frames();
    let ticks: Vec<usize> = frames.iter().map(|(t, _, _)| *t).collect();
    assert_eq!(ticks, [0, 1, 5, 6]);
    assert_eq!(frames[0].2, bytes(FingerReport::touching(6, 1904, 2024)));
    assert_eq!(frames[1].2, bytes(FingerReport::lifted(6, 1904, 2024)));
    assert_eq!(frames[2].2, frames[0].2);
    assert_eq!(frames[3].2, frames[1].2);
}

// ═══════════════════════════════════════════════════════════════════════════
// iOS dialect
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ios_double_click_is_bracketed_by_corner_resets() {
    let mut rig = Rig::connected();
    rig.classify(true);
    rig.click(ButtonId::Up, ClickType::Double);
    rig.settle();

    let corner = bytes(MouseXyReport::new(-2047, 2047));
    let down = bytes(MouseReport::left_down());
    let up = bytes(MouseReport::released());

    let frames = rig.frames();
    let seen: Vec<(usize, ReportSlot, Vec<u8>)> = frames.to_vec();
    assert_eq!(
        seen,
        [
            (0, ReportSlot::MouseXy, corner.clone()),
            (1, ReportSlot::MouseXy, bytes(MouseXyReport::new(120, -360))),
            (7, ReportSlot::Mouse, down.clone()),
            (8, ReportSlot::Mouse, up.clone()),
            (12, ReportSlot::Mouse, down),
            (13, ReportSlot::Mouse, up),
            (19, ReportSlot::MouseXy, corner),
        ]
    );
}

#[test]
fn ios_swipe_down_scrolls_negative() {
    let mut rig = Rig::connected();
    rig.classify(true);
    rig.click(ButtonId::Down, ClickType::Single);
    rig.settle();

    let frames = rig.frames();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[1].2, bytes(MouseXyReport::new(80, 120)));
    for (_, slot, frame) in &frames[2..5] {
        assert_eq!(*slot, ReportSlot::Mouse);
        assert_eq!(*frame, bytes(MouseReport::scroll(-120)));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Dispatch rules
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn last_trigger_before_the_tick_wins() {
    let mut rig = Rig::connected();
    rig.click(ButtonId::Up, ClickType::Single);
    rig.click(ButtonId::Down, ClickType::Single);
    rig.settle();

    let frames = rig.frames();
    assert_eq!(frames.len(), 10);
    assert_eq!(finger_y(&frames[0].2), 1012);
}

#[test]
fn trigger_mid_gesture_runs_after_completion() {
    let mut rig = Rig::connected();
    rig.click(ButtonId::Up, ClickType::Single);
    rig.step();
    rig.step();
    rig.click(ButtonId::Down, ClickType::Single);
    rig.settle();

    let frames = rig.frames();
    assert_eq!(frames.len(), 20);
    assert_eq!(finger_y(&frames[0].2), 3200);
    assert_eq!(finger_y(&frames[9].2), 3200);
    assert_eq!(finger_y(&frames[10].2), 1012);
    // The second gesture starts on the tick after the first one's lift.
    assert_eq!(frames[10].0, frames[9].0 + 1);
}

#[test]
fn unsubscribed_peer_sees_nothing_and_engine_stays_up() {
    let mut session = Session::new();
    handle_event(&mut session, BleEvent::Connected);
    let mut rig = Rig {
        session,
        sequencer: Sequencer::new(),
        air: Air::default(),
    };
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();
    assert!(rig.frames().is_empty());

    handle_event(
        &mut rig.session,
        BleEvent::Subscription {
            slot: ReportSlot::Finger,
            enabled: true,
        },
    );
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();
    assert_eq!(rig.frames().len(), 10);
}

#[test]
fn back_to_back_android_swipes_are_identical() {
    let mut rig = Rig::connected();
    rig.classify(false);
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();

    let frames: Vec<(ReportSlot, Vec<u8>)> = rig
        .frames()
        .iter()
        .map(|(_, slot, data)| (*slot, data.clone()))
        .collect();
    assert_eq!(frames.len(), 20);
    assert_eq!(frames[..10], frames[10..]);
}

#[test]
fn same_gesture_twice_is_identical() {
    let run = || {
        let mut rig = Rig::connected();
        rig.classify(true);
        rig.click(ButtonId::Up, ClickType::Single);
        rig.settle();
        rig.air.frames
    };
    assert_eq!(run(), run());
}

// ═══════════════════════════════════════════════════════════════════════════
// Classification lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn disconnect_returns_to_android_dialect() {
    let mut rig = Rig::connected();
    rig.classify(true);
    assert_eq!(rig.session.classification(), PeerClassification::Ios);

    assert_eq!(
        handle_event(&mut rig.session, BleEvent::Disconnected { reason: 0x13 }),
        Some(LinkAction::RestartAdvertising)
    );
    assert_eq!(rig.session.classification(), PeerClassification::Unknown);

    let mut rig = Rig {
        air: Air::default(),
        sequencer: Sequencer::new(),
        ..Rig::connected()
    };
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();
    assert!(rig.frames().iter().all(|(_, slot, _)| *slot == ReportSlot::Finger));
}

#[test]
fn probe_miss_is_android() {
    let mut rig = Rig::connected();
    rig.classify(false);
    assert_eq!(rig.session.classification(), PeerClassification::Android);
    assert!(!rig.session.classification().is_ios());
}

#[test]
fn gesture_kinds_cover_both_buttons() {
    assert_eq!(
        trigger::gesture_for(ButtonId::Up, ClickType::Single),
        GestureKind::SwipeUp
    );
    assert_eq!(
        trigger::gesture_for(ButtonId::Down, ClickType::Single),
        GestureKind::SwipeDown
    );
    assert_eq!(
        trigger::gesture_for(ButtonId::Down, ClickType::Double),
        GestureKind::DoubleTap
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Bonded reconnect
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn bonded_reconnect_keeps_reports_flowing() {
    let mut rig = Rig::connected();
    rig.classify(false);
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();
    assert_eq!(rig.frames().len(), 10);

    let blob = stored_cccds(&ReportSlot::ALL);
    let mut rig = rig.reconnect(Some(&blob));
    rig.classify(false);
    rig.click(ButtonId::Up, ClickType::Single);
    rig.settle();

    let frames = rig.frames();
    assert_eq!(frames.len(), 10);
    assert!(frames.iter().all(|(_, slot, _)| *slot == ReportSlot::Finger));
    assert_eq!(frames[0].2, bytes(FingerReport::touching(6, 1904, 3200)));
}

#[test]
fn bonded_ios_reconnect_restores_only_stored_slots() {
    let mut rig = Rig::connected();
    rig.classify(true);

    let blob = stored_cccds(&[ReportSlot::Mouse, ReportSlot::MouseXy]);
    let mut rig = rig.reconnect(Some(&blob));
    assert!(!rig.session.notify().is_enabled(ReportSlot::Finger));
    assert!(rig.session.notify().is_enabled(ReportSlot::Mouse));

    rig.classify(true);
    rig.click(ButtonId::Down, ClickType::Single);
    rig.settle();
    assert_eq!(rig.frames().len(), 6);
}

#[test]
fn reconnect_without_stored_cccds_stays_silent() {
    let mut rig = Rig::connected().reconnect(None);
    rig.classify(false);
    rig.click(ButtonId::Up, ClickType::Single);
    let outcome = rig.step();
    assert_eq!(
        outcome,
        TickOutcome::Dropped(ReportSlot::Finger, Error::NotSubscribed)
    );
    rig.settle();
    assert!(rig.frames().is_empty());
}
