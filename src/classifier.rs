//! Peer platform classifier.
//!
//! iOS publishes the Apple Notification Center Service (ANCS) in its
//! GATT table, visible only once the link is encrypted.  Android has no
//! such service, so a successful primary-service discovery for the ANCS
//! UUID after encryption identifies an iPhone.  Anything else (no
//! result, error, no probe at all) is driven with the Android dialect.

use crate::session::{PeerClassification, ProbeState, Session};

/// ANCS service UUID `7905F431-B5CE-4E99-A40F-4B1E122D00D0`, little-endian
/// as it appears on the air.
pub const PROBE_SERVICE_UUID: [u8; 16] = [
    0xD0, 0x00, 0x2D, 0x12, 0x1E, 0x4B, 0x0F, 0xA4, 0x99, 0x4E, 0xCE, 0xB5, 0x31, 0xF4, 0x05, 0x79,
];

/// Request to run a primary-service discovery for `uuid` on the link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiscoveryProbe {
    pub uuid: [u8; 16],
}

/// The link reached an encrypted state; ask for the platform probe.
///
/// Only one probe runs per connection.  Returns `None` when one is
/// already in flight or finished.
pub fn on_link_encrypted(session: &mut Session) -> Option<DiscoveryProbe> {
    if !session.is_connected() || session.probe_state() != ProbeState::Idle {
        return None;
    }
    session.set_probe_state(ProbeState::InFlight);
    Some(DiscoveryProbe {
        uuid: PROBE_SERVICE_UUID,
    })
}

/// Apply the probe outcome.  `found` means the service was discovered.
///
/// Results with no probe outstanding (late answers from a previous
/// link) are ignored and `None` is returned.
pub fn on_discovery_result(session: &mut Session, found: bool) -> Option<PeerClassification> {
    if session.probe_state() != ProbeState::InFlight {
        return None;
    }
    let classification = if found {
        PeerClassification::Ios
    } else {
        PeerClassification::Android
    };
    session.set_probe_state(ProbeState::Done);
    session.set_classification(classification);

    #[cfg(feature = "defmt")]
    defmt::info!("peer classified as {}", classification);

    Some(classification)
}

/// The link dropped: forget the peer.
pub fn on_disconnected(session: &mut Session) {
    session.reset();
}
