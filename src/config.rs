//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, BLE link settings and button behaviour live
//! here so they can be tuned in one place.  Gesture geometry lives with
//! the gesture tables in `gesture::plan`.

// BLE advertising

/// GAP device name (also used in the advertisement payload).
pub const DEVICE_NAME: &str = "BLE Swipe";

/// GAP appearance: HID keyboard.  Android lists the device in its
/// keyboard picker, iOS shows the name from the HID UUID list.
pub const APPEARANCE_HID_KEYBOARD: u16 = 0x03C1;

/// Advertising interval (in 0.625 ms units). 40 = 25 ms.
pub const ADV_INTERVAL: u32 = 40;

// BLE connection

/// Connection interval range requested after connect (in 1.25 ms units).
/// 12 = 15 ms, one gesture step per connection event.
pub const BLE_CONN_INTERVAL_MIN: u16 = 12;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Bonds kept in RAM; the oldest is evicted when full.
pub const MAX_BONDED_PEERS: usize = 4;

/// Room for one bond's GATT system attributes (CCCD values + CRC).
pub const SYS_ATTRS_MAX: usize = 62;

// Gesture pacing

/// Time between two gesture steps (ms).  Must match the negotiated
/// connection interval so each notification lands in its own event.
pub const STEP_INTERVAL_MS: u64 = BLE_CONN_INTERVAL_MAX as u64 * 5 / 4;

// Buttons
//
// nRF52840-DK defaults (adjust for a custom PCB in `main.rs`):
//
//   Button UP    → P0.11  (swipe up / double-tap)
//   Button DOWN  → P0.12  (swipe down / double-tap)

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Window after a press in which a second press counts as a double click (ms).
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 300;

// Channels

/// Depth of the BLE event channel feeding the gesture engine.
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Depth of the button click channel.
pub const BUTTON_QUEUE_DEPTH: usize = 4;
