//! Button-to-gesture dispatch.
//!
//! Button handlers only record what was asked for; the connection tick
//! decides when it runs.  One request can be outstanding and a newer one
//! replaces it.

use crate::gesture::{GestureKind, Sequencer};
use crate::session::Session;

/// Physical trigger buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A: next video.
    Up,
    /// Button B: previous video.
    Down,
}

/// Click classification produced by the button driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickType {
    Single,
    Double,
}

/// Gesture bound to a click.  A double click likes the video whichever
/// button produced it.
pub fn gesture_for(id: ButtonId, click: ClickType) -> GestureKind {
    match (id, click) {
        (_, ClickType::Double) => GestureKind::DoubleTap,
        (ButtonId::Up, ClickType::Single) => GestureKind::SwipeUp,
        (ButtonId::Down, ClickType::Single) => GestureKind::SwipeDown,
    }
}

/// Record a button event as the pending request (last wins).
pub fn on_button_event(session: &mut Session, id: ButtonId, click: ClickType) {
    let gesture = gesture_for(id, click);
    if let Some(_replaced) = session.set_pending(gesture) {
        #[cfg(feature = "defmt")]
        defmt::debug!("pending {} replaced by {}", _replaced, gesture);
    }
}

/// Scheduler pass: start the pending gesture if the sequencer is free.
///
/// The platform is read here, once; a reclassification arriving while the
/// gesture plays does not affect it.  Returns the gesture that started.
pub fn tick(session: &mut Session, sequencer: &mut Sequencer) -> Option<GestureKind> {
    if sequencer.is_busy() {
        return None;
    }
    let gesture = session.take_pending()?;
    let platform = session.classification();
    sequencer.run(gesture, platform);

    #[cfg(feature = "defmt")]
    defmt::info!("start {} ({})", gesture, platform);

    Some(gesture)
}
