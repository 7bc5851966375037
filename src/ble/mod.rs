//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - connectable advertising as a HID keyboard so both
//!    Android and iOS list the remote in their Bluetooth settings.
//! 2. **HID Server** - the HID-over-GATT service the phone subscribes to
//!    (see [`hid_server`]).
//! 3. **Probe** - ANCS discovery that tells iOS from Android.
//! 4. **Connection loop** - feeds stack events, clicks and the step ticker
//!    into the gesture engine until the link drops, then re-advertises.
//!
//! Communication with other tasks is done via the channels defined in
//! the crate root.

pub mod hid_server;
pub mod probe;
pub mod security;

pub use hid_server::{Server, SoftdeviceLink};

use crate::{CLICKS, EVENTS, PROBE};
use ble_swipe::config::{
    ADV_INTERVAL, APPEARANCE_HID_KEYBOARD, BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN,
    BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT, DEVICE_NAME, STEP_INTERVAL_MS,
};
use ble_swipe::error::{BleError, Error};
use ble_swipe::event::{handle_event, BleEvent, LinkAction};
use ble_swipe::gesture::{Sequencer, TickOutcome};
use ble_swipe::session::Session;
use ble_swipe::transport::{HidTransport, ReportSink};
use ble_swipe::trigger;
use defmt::{debug, info, warn};
use embassy_futures::select::select3;
use embassy_time::{Duration, Ticker, Timer};
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::{raw, Softdevice};

const APPEARANCE: [u8; 2] = APPEARANCE_HID_KEYBOARD.to_le_bytes();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Incomplete, &[ServiceUuid16::HUMAN_INTERFACE_DEVICE])
    .full_name(DEVICE_NAME)
    .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE)
    .build();

// Everything fits the advertising packet.
static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

/// HCI reason reported when the stack gives none.
const REASON_UNKNOWN: u8 = 0;

async fn advertise(
    sd: &'static Softdevice,
    bonder: &'static security::Bonder,
) -> Result<Connection, Error> {
    let config = peripheral::Config {
        interval: ADV_INTERVAL,
        ..Default::default()
    };
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    peripheral::advertise_pairable(sd, adv, &config, bonder)
        .await
        .map_err(|_| BleError::AdvertiseFailed.into())
}

fn request_conn_params(conn: &Connection) {
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: BLE_CONN_INTERVAL_MIN,
        max_conn_interval: BLE_CONN_INTERVAL_MAX,
        slave_latency: BLE_SLAVE_LATENCY,
        conn_sup_timeout: BLE_SUP_TIMEOUT,
    };
    if conn.set_conn_params(params).is_err() {
        warn!("connection parameter update rejected");
    }
}

/// Feed one event to the engine and carry out what it asks for.
fn apply(conn: Option<&Connection>, session: &mut Session, event: BleEvent) {
    debug!("event {}", event);
    match handle_event(session, event) {
        Some(LinkAction::RequestConnParams) => {
            if let Some(conn) = conn {
                request_conn_params(conn);
            }
        }
        Some(LinkAction::ProbePeerServices(probe)) => PROBE.signal(probe),
        // The connection loop re-advertises on its own once the link is gone.
        Some(LinkAction::RestartAdvertising) | None => {}
    }
}

/// One gesture step per connection interval.
async fn engine_loop<S: ReportSink>(
    conn: &Connection,
    session: &mut Session,
    sequencer: &mut Sequencer,
    transport: &mut HidTransport<S>,
) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(STEP_INTERVAL_MS));
    loop {
        ticker.next().await;

        while let Ok(event) = EVENTS.try_receive() {
            apply(Some(conn), session, event);
        }
        while let Ok((id, click)) = CLICKS.try_receive() {
            info!("click {} {}", id, click);
            trigger::on_button_event(session, id, click);
        }

        trigger::tick(session, sequencer);
        if let TickOutcome::Dropped(slot, err) = sequencer.tick(transport, session.notify()) {
            if err.is_transient() {
                debug!("{} step dropped: {}", slot, err);
            } else {
                warn!("{} step dropped: {}", slot, err);
            }
        }
    }
}

/// Advertise, serve one connection, repeat.
pub async fn run(sd: &'static Softdevice, server: &Server) -> ! {
    let bonder = security::bonder(server.hid.input_cccd());
    let mut session = Session::new();

    loop {
        // Leftovers belong to the previous link.  Whatever the stack raises
        // from here on (encryption, restored subscriptions) is for the next
        // one and is applied after `Connected`.
        while EVENTS.try_receive().is_ok() {}

        let conn = match advertise(sd, bonder).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertising failed: {}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };
        info!("peer connected");

        // Presses while disconnected are dropped.
        while CLICKS.try_receive().is_ok() {}
        PROBE.reset();

        apply(Some(&conn), &mut session, BleEvent::Connected);

        let mut sequencer = Sequencer::new();
        let mut transport = HidTransport::new(SoftdeviceLink::new(&conn, &server.hid));

        let gatt = gatt_server::run(&conn, server, |event| {
            if EVENTS.try_send(event).is_err() {
                warn!("event queue full, subscription update lost");
            }
        });
        let engine = engine_loop(&conn, &mut session, &mut sequencer, &mut transport);
        let probe = probe::run(&conn);

        select3(gatt, engine, probe).await;

        apply(
            None,
            &mut session,
            BleEvent::Disconnected {
                reason: REASON_UNKNOWN,
            },
        );
    }
}
