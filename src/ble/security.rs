//! Just Works pairing with RAM-only bonds.
//!
//! Bonds survive reconnects but not a reset; phones re-pair silently.
//! Each bond also keeps the peer's CCCD values, so a bonded phone that
//! reconnects without re-subscribing still receives reports.

use core::cell::RefCell;

use crate::EVENTS;
use ble_swipe::config::{MAX_BONDED_PEERS, SYS_ATTRS_MAX};
use ble_swipe::event::BleEvent;
use ble_swipe::hid::INPUT_REPORT_COUNT;
use ble_swipe::sys_attrs;
use defmt::{debug, info, warn};
use heapless::Vec;
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode};
use static_cell::StaticCell;

struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
    sys_attrs: Vec<u8, SYS_ATTRS_MAX>,
}

pub struct Bonder {
    peers: RefCell<Vec<PeerBond, MAX_BONDED_PEERS>>,
    input_cccd: [u16; INPUT_REPORT_COUNT],
}

impl Bonder {
    fn new(input_cccd: [u16; INPUT_REPORT_COUNT]) -> Self {
        Self {
            peers: RefCell::new(Vec::new()),
            input_cccd,
        }
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        _conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        let mut peers = self.peers.borrow_mut();
        if let Some(existing) = peers.iter_mut().find(|p| p.master_id == master_id) {
            existing.key = key;
            existing.peer_id = peer_id;
            existing.sys_attrs.clear();
            return;
        }

        // Oldest bond goes first.
        if peers.is_full() {
            peers.remove(0);
        }

        let _ = peers.push(PeerBond {
            master_id,
            key,
            peer_id,
            sys_attrs: Vec::new(),
        });
        info!("bonded ({} stored)", peers.len());
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peers
            .borrow()
            .iter()
            .find_map(|p| (p.master_id == master_id).then_some(p.key))
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
        let success = !matches!(mode, SecurityMode::NoAccess | SecurityMode::Open);
        if EVENTS
            .try_send(BleEvent::LinkEncrypted { success })
            .is_err()
        {
            warn!("event queue full, encryption update lost");
        }
    }

    fn save_sys_attrs(&self, conn: &Connection) {
        let addr = conn.peer_address();
        let mut peers = self.peers.borrow_mut();
        let Some(peer) = peers.iter_mut().find(|p| p.peer_id.is_match(addr)) else {
            return;
        };

        let mut buf = [0u8; SYS_ATTRS_MAX];
        match gatt_server::get_sys_attrs(conn, &mut buf) {
            Ok(len) => {
                peer.sys_attrs.clear();
                if peer.sys_attrs.extend_from_slice(&buf[..len]).is_err() {
                    warn!("system attributes do not fit the bond");
                    peer.sys_attrs.clear();
                    return;
                }
                debug!("saved {} bytes of system attributes", len);
            }
            Err(_) => warn!("could not read system attributes"),
        }
    }

    fn load_sys_attrs(&self, conn: &Connection) {
        let addr = conn.peer_address();
        let peers = self.peers.borrow();
        let stored = peers
            .iter()
            .find(|p| p.peer_id.is_match(addr))
            .map(|p| p.sys_attrs.as_slice())
            .filter(|attrs| !attrs.is_empty());

        if gatt_server::set_sys_attrs(conn, stored).is_err() {
            warn!("stored system attributes rejected, starting unsubscribed");
            if gatt_server::set_sys_attrs(conn, None).is_err() {
                warn!("could not reset system attributes");
            }
            return;
        }

        // The phone will not rewrite these CCCDs; hand them to the engine.
        let Some(blob) = stored else {
            return;
        };
        for event in sys_attrs::restored_subscriptions(blob, &self.input_cccd) {
            if EVENTS.try_send(event).is_err() {
                warn!("event queue full, restored subscription lost");
            }
        }
    }
}

pub fn bonder(input_cccd: [u16; INPUT_REPORT_COUNT]) -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new(input_cccd))
}
