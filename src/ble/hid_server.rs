//! HID-over-GATT server.
//!
//! Registers the HID service (0x1812) with one input report
//! characteristic per [`ReportSlot`], plus the contact-count-max feature
//! report the digitizer collection needs.  CCCD writes come back out of
//! [`Server::on_write`] as [`BleEvent::Subscription`].

use ble_swipe::error::{BleError, Error};
use ble_swipe::event::BleEvent;
use ble_swipe::hid::descriptor::{
    CONTACT_COUNT_MAX, CONTACT_COUNT_MAX_REPORT_ID, HID_INFORMATION, REPORT_MAP,
    REPORT_TYPE_FEATURE, REPORT_TYPE_INPUT,
};
use ble_swipe::hid::{ReportSlot, INPUT_REPORT_COUNT, MAX_REPORT_SIZE};
use ble_swipe::sys_attrs;
use ble_swipe::transport::ReportSink;
use defmt::{debug, warn};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

const HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const HID_INFO: Uuid = Uuid::new_16(0x2a4a);
const HID_REPORT_MAP: Uuid = Uuid::new_16(0x2a4b);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2a4c);
const HID_REPORT: Uuid = Uuid::new_16(0x2a4d);
const PROTOCOL_MODE: Uuid = Uuid::new_16(0x2a4e);
const HID_REPORT_REF: Uuid = Uuid::new_16(0x2908);

/// Report protocol (no boot mode).
const PROTOCOL_MODE_REPORT: u8 = 0x01;

static EMPTY_REPORT: [u8; MAX_REPORT_SIZE] = [0; MAX_REPORT_SIZE];

fn registration(_: RegisterError) -> Error {
    warn!("HID service registration failed");
    BleError::ServiceRegistration.into()
}

/// Attribute handles of the registered HID service.
pub struct HidService {
    input: [u16; INPUT_REPORT_COUNT],
    input_cccd: [u16; INPUT_REPORT_COUNT],
}

impl HidService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, Error> {
        let mut service = ServiceBuilder::new(sd, HID_SERVICE).map_err(registration)?;

        service
            .add_characteristic(
                HID_INFO,
                Attribute::new(HID_INFORMATION).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )
            .map_err(registration)?
            .build();

        service
            .add_characteristic(
                HID_REPORT_MAP,
                Attribute::new(REPORT_MAP).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )
            .map_err(registration)?
            .build();

        service
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().write_without_response()),
            )
            .map_err(registration)?
            .build();

        service
            .add_characteristic(
                PROTOCOL_MODE,
                Attribute::new([PROTOCOL_MODE_REPORT]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read().write_without_response()),
            )
            .map_err(registration)?
            .build();

        let mut input = [0u16; INPUT_REPORT_COUNT];
        let mut input_cccd = [0u16; INPUT_REPORT_COUNT];
        for slot in ReportSlot::ALL {
            let mut report = service
                .add_characteristic(
                    HID_REPORT,
                    Attribute::new(&EMPTY_REPORT[..slot.payload_len()])
                        .security(SecurityMode::JustWorks),
                    Metadata::new(Properties::new().read().notify()),
                )
                .map_err(registration)?;
            report
                .add_descriptor(
                    HID_REPORT_REF,
                    Attribute::new([slot.report_id(), REPORT_TYPE_INPUT])
                        .security(SecurityMode::JustWorks),
                )
                .map_err(registration)?;
            let handles = report.build();
            input[slot.index()] = handles.value_handle;
            input_cccd[slot.index()] = handles.cccd_handle;
        }

        let mut feature = service
            .add_characteristic(
                HID_REPORT,
                Attribute::new([CONTACT_COUNT_MAX]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )
            .map_err(registration)?;
        feature
            .add_descriptor(
                HID_REPORT_REF,
                Attribute::new([CONTACT_COUNT_MAX_REPORT_ID, REPORT_TYPE_FEATURE])
                    .security(SecurityMode::JustWorks),
            )
            .map_err(registration)?;
        feature.build();

        service.build();

        Ok(Self { input, input_cccd })
    }

    fn input_handle(&self, slot: ReportSlot) -> u16 {
        self.input[slot.index()]
    }

    /// CCCD handles, indexed by [`ReportSlot::index`].
    pub fn input_cccd(&self) -> [u16; INPUT_REPORT_COUNT] {
        self.input_cccd
    }

    /// Map a CCCD write onto the slot it belongs to.
    fn on_write(&self, handle: u16, data: &[u8]) -> Option<BleEvent> {
        let index = self.input_cccd.iter().position(|&h| h == handle)?;
        let slot = ReportSlot::from_index(index)?;
        let enabled = sys_attrs::notifications_enabled(data);
        debug!("notify {} on {}", enabled, slot);
        Some(BleEvent::Subscription { slot, enabled })
    }
}

/// GATT server: the HID service is the only one we expose.
pub struct Server {
    pub hid: HidService,
}

impl Server {
    pub fn new(sd: &mut Softdevice) -> Result<Self, Error> {
        Ok(Self {
            hid: HidService::new(sd)?,
        })
    }
}

impl gatt_server::Server for Server {
    type Event = BleEvent;

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        self.hid.on_write(handle, data)
    }
}

/// [`ReportSink`] over SoftDevice notifications on one connection.
pub struct SoftdeviceLink<'a> {
    conn: &'a Connection,
    hid: &'a HidService,
}

impl<'a> SoftdeviceLink<'a> {
    pub fn new(conn: &'a Connection, hid: &'a HidService) -> Self {
        Self { conn, hid }
    }
}

impl ReportSink for SoftdeviceLink<'_> {
    fn notify(&mut self, slot: ReportSlot, data: &[u8]) -> Result<(), Error> {
        gatt_server::notify_value(self.conn, self.hid.input_handle(slot), data).map_err(|e| {
            match e {
                NotifyValueError::Disconnected => Error::Disconnected,
                // NRF_ERROR_RESOURCES: TX queue full for this connection event.
                NotifyValueError::Raw(_) => Error::TransportBusy,
            }
        })
    }
}
