//! ble-swipe - BLE HID gesture remote for nRF52840.
//!
//! The board advertises as a HID device.  Once a phone pairs, two buttons
//! swipe up, swipe down or double-tap on the phone's screen using the
//! report dialect the phone understands (relative mouse on iOS, touch
//! digitizer on Android).
//!
//! ## Task layout
//!
//! - `softdevice_task` - runs the SoftDevice event loop.
//! - `button_task` (x2) - debounced clicks into [`CLICKS`].
//! - `main` - advertising and the per-connection gesture engine.

#![no_std]
#![no_main]

mod ble;
#[path = "ui/buttons.rs"]
mod buttons;

use core::mem;

use ble_swipe::classifier::DiscoveryProbe;
use ble_swipe::config::{BUTTON_QUEUE_DEPTH, DEVICE_NAME, EVENT_QUEUE_DEPTH};
use ble_swipe::event::BleEvent;
use ble_swipe::trigger::{ButtonId, ClickType};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::Priority;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use nrf_softdevice::{raw, Softdevice};
use {defmt_rtt as _, panic_probe as _};

/// Stack events raised outside the connection loop (security handler,
/// GATT server, probe).
pub static EVENTS: Channel<CriticalSectionRawMutex, BleEvent, EVENT_QUEUE_DEPTH> = Channel::new();

/// Debounced clicks from the button tasks.
pub static CLICKS: Channel<CriticalSectionRawMutex, (ButtonId, ClickType), BUTTON_QUEUE_DEPTH> =
    Channel::new();

/// Platform probe request for the current connection.
pub static PROBE: Signal<CriticalSectionRawMutex, DiscoveryProbe> = Signal::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ble-swipe starting");

    // SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    let sd_config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    };

    let sd = Softdevice::enable(&sd_config);
    // Static identity address; the bonds do not outlive a reset, so a
    // rotating resolvable address would leave paired phones unable to
    // find the remote again.
    info!("local address {}", nrf_softdevice::ble::get_address(sd));
    let server = unwrap!(ble::Server::new(sd));
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // nRF52840-DK: Button 1 / Button 2.
    unwrap!(spawner.spawn(buttons::button_task(
        p.P0_11.degrade(),
        ButtonId::Up,
        CLICKS.sender()
    )));
    unwrap!(spawner.spawn(buttons::button_task(
        p.P0_12.degrade(),
        ButtonId::Down,
        CLICKS.sender()
    )));

    info!("advertising as {}", DEVICE_NAME);
    ble::run(sd, &server).await
}
