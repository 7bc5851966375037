//! Link event dispatch.
//!
//! Every stack callback the engine cares about is folded into one
//! [`BleEvent`] and applied to the [`Session`] in order.  Whatever the
//! stack glue has to do in response comes back as a [`LinkAction`].

use crate::classifier::{self, DiscoveryProbe};
use crate::hid::ReportSlot;
use crate::session::Session;

/// Stack notifications consumed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleEvent {
    Connected,
    Disconnected { reason: u8 },
    /// Security procedure finished.
    LinkEncrypted { success: bool },
    /// Outcome of the platform probe; `found` when the service exists.
    DiscoveryResult { found: bool },
    /// CCCD write on an input report.
    Subscription { slot: ReportSlot, enabled: bool },
}

/// Work for the stack glue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkAction {
    /// Ask the central for the gesture-pacing connection parameters.
    RequestConnParams,
    /// Run a primary-service discovery.
    ProbePeerServices(DiscoveryProbe),
    /// Go back to advertising.
    RestartAdvertising,
}

/// Apply `event` to `session`.
pub fn handle_event(session: &mut Session, event: BleEvent) -> Option<LinkAction> {
    match event {
        BleEvent::Connected => {
            session.on_connected();
            Some(LinkAction::RequestConnParams)
        }
        BleEvent::Disconnected { reason: _reason } => {
            #[cfg(feature = "defmt")]
            defmt::info!("disconnected (reason {=u8:#x})", _reason);
            classifier::on_disconnected(session);
            Some(LinkAction::RestartAdvertising)
        }
        BleEvent::LinkEncrypted { success: true } => {
            classifier::on_link_encrypted(session).map(LinkAction::ProbePeerServices)
        }
        BleEvent::LinkEncrypted { success: false } => {
            #[cfg(feature = "defmt")]
            defmt::warn!("link encryption failed");
            None
        }
        BleEvent::DiscoveryResult { found } => {
            classifier::on_discovery_result(session, found);
            None
        }
        BleEvent::Subscription { slot, enabled } => {
            if session.is_connected() {
                session.notify_mut().set(slot, enabled);
            }
            None
        }
    }
}
