//! Per-connection state shared by the gesture engine components.
//!
//! One `Session` is owned by the BLE task and lent by reference to the
//! classifier, the transport and the trigger dispatcher.  Everything in
//! it is reset when the link drops.

use crate::gesture::GestureKind;
use crate::hid::{ReportSlot, INPUT_REPORT_COUNT};

/// Best guess of the connected phone's operating system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerClassification {
    /// No probe result yet (driven with the Android dialect).
    #[default]
    Unknown,
    Android,
    Ios,
}

impl PeerClassification {
    /// `true` only once the probe has positively identified iOS.
    pub fn is_ios(self) -> bool {
        self == PeerClassification::Ios
    }
}

/// Where the platform probe stands on the current link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeState {
    #[default]
    Idle,
    InFlight,
    Done,
}

/// Notification subscriptions (CCCD state), one flag per input slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotifyState {
    enabled: [bool; INPUT_REPORT_COUNT],
}

impl NotifyState {
    pub const fn new() -> Self {
        Self {
            enabled: [false; INPUT_REPORT_COUNT],
        }
    }

    pub fn is_enabled(&self, slot: ReportSlot) -> bool {
        self.enabled[slot.index()]
    }

    pub fn set(&mut self, slot: ReportSlot, enabled: bool) {
        self.enabled[slot.index()] = enabled;
    }

    /// `true` when at least one slot can reach the peer.
    pub fn any(&self) -> bool {
        self.enabled.iter().any(|&e| e)
    }

    pub fn clear(&mut self) {
        self.enabled = [false; INPUT_REPORT_COUNT];
    }
}

/// Explicitly owned connection context.
#[derive(Clone, Debug, Default)]
pub struct Session {
    connected: bool,
    classification: PeerClassification,
    probe: ProbeState,
    notify: NotifyState,
    pending: Option<GestureKind>,
}

impl Session {
    pub const fn new() -> Self {
        Self {
            connected: false,
            classification: PeerClassification::Unknown,
            probe: ProbeState::Idle,
            notify: NotifyState::new(),
            pending: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn classification(&self) -> PeerClassification {
        self.classification
    }

    pub fn probe_state(&self) -> ProbeState {
        self.probe
    }

    pub fn notify(&self) -> &NotifyState {
        &self.notify
    }

    pub fn notify_mut(&mut self) -> &mut NotifyState {
        &mut self.notify
    }

    /// Gesture waiting for the next tick, if any.
    pub fn pending(&self) -> Option<GestureKind> {
        self.pending
    }

    pub(crate) fn set_classification(&mut self, classification: PeerClassification) {
        self.classification = classification;
    }

    pub(crate) fn set_probe_state(&mut self, probe: ProbeState) {
        self.probe = probe;
    }

    /// Store a request, replacing any that has not been drained yet.
    pub(crate) fn set_pending(&mut self, gesture: GestureKind) -> Option<GestureKind> {
        self.pending.replace(gesture)
    }

    pub(crate) fn take_pending(&mut self) -> Option<GestureKind> {
        self.pending.take()
    }

    /// Fresh link: nothing is known about the peer yet.
    pub(crate) fn on_connected(&mut self) {
        self.reset();
        self.connected = true;
    }

    /// Link gone: drop everything learned about the peer.
    pub(crate) fn reset(&mut self) {
        *self = Session::new();
    }
}
