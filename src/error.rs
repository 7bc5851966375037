//! Unified error type for ble-swipe.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Nothing in here is fatal: every variant ends up as a dropped report
//! or a missed classification, never a reset.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // HID transport
    /// The peer has not enabled notifications for the report slot.
    NotSubscribed,

    /// The stack refused the notification (TX queue full, radio busy).
    TransportBusy,

    /// The link dropped while a report was in flight.
    Disconnected,

    // Classification
    /// The platform probe returned no result or failed.
    DiscoveryFailed,

    // Generic
    /// Payload does not fit the slot it was addressed to.
    BufferOverflow,

    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// Advertising could not start or ended without a connection.
    AdvertiseFailed,
    /// A GATT service or characteristic could not be registered.
    ServiceRegistration,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl Error {
    /// `true` for errors the transport produces while the link is still usable.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::NotSubscribed | Error::TransportBusy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_level_failures_are_not_transient() {
        assert!(Error::NotSubscribed.is_transient());
        assert!(Error::TransportBusy.is_transient());
        assert!(!Error::Disconnected.is_transient());
        assert!(!Error::from(BleError::Raw(8)).is_transient());
    }
}
