//! Platform probe: look for ANCS on the connected phone.
//!
//! iOS only exposes ANCS to an encrypted link, so the probe waits for
//! the engine to request it (after `LinkEncrypted`) and reports back with
//! a `DiscoveryResult`.

use crate::{EVENTS, PROBE};
use ble_swipe::error::Error;
use ble_swipe::event::BleEvent;
use defmt::{info, warn};
use nrf_softdevice::ble::gatt_client::{self, DiscoverError};
use nrf_softdevice::ble::Connection;

/// Apple Notification Center Service.  Only its presence matters.
#[nrf_softdevice::gatt_client(uuid = "7905f431-b5ce-4e99-a40f-4b1e122d00d0")]
pub struct AncsClient {
    /// Notification Source.
    #[characteristic(uuid = "9fbf120d-6301-42d9-8c58-25e699a21dbd", notify)]
    pub notification_source: [u8; 8],
}

async fn ancs_present(conn: &Connection) -> Result<bool, Error> {
    match gatt_client::discover::<AncsClient>(conn).await {
        Ok(_) => Ok(true),
        Err(DiscoverError::ServiceNotFound) => Ok(false),
        Err(e) => {
            warn!("ANCS discovery error: {}", e);
            Err(Error::DiscoveryFailed)
        }
    }
}

/// Serve probe requests for the lifetime of `conn`.
pub async fn run(conn: &Connection) -> ! {
    loop {
        let _probe = PROBE.wait().await;
        info!("probing peer for ANCS");

        // A failed discovery reads as "not iOS".
        let found = ancs_present(conn).await.unwrap_or_else(|e| {
            warn!("{}, driving the Android dialect", e);
            false
        });

        if EVENTS.try_send(BleEvent::DiscoveryResult { found }).is_err() {
            warn!("event queue full, probe result lost");
        }
    }
}
