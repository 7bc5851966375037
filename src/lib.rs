//! Gesture engine for ble-swipe.
//!
//! Everything that decides *what* goes over the air lives here and builds
//! for the host: report layouts, the peer classifier, the gesture tables
//! and their sequencer, and the trigger dispatcher.  The SoftDevice glue
//! in `main.rs` only feeds stack events in and pushes reports out.
//!
//! Usage: `cargo test --lib` (host), `cargo test --test integration`.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod event;
pub mod gesture;
pub mod hid;
pub mod session;
pub mod sys_attrs;
pub mod transport;
pub mod trigger;

pub mod ui {
    pub mod click;
}

pub use error::{BleError, Error};
pub use event::{handle_event, BleEvent, LinkAction};
pub use gesture::{GestureKind, Sequencer, TickOutcome};
pub use session::{PeerClassification, Session};
pub use transport::{HidTransport, ReportSink};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - engine wiring across modules
// ═══════════════════════════════════════════════════════════════════════════
