//! Gesture emulation engine.
//!
//! A gesture is compiled into a [`GesturePlan`]: an ordered list of
//! `(report, hold)` steps where `hold` is the number of connection
//! intervals to wait before the next step.  The [`Sequencer`] replays a
//! plan one step per due tick, so pacing never blocks the executor.
//!
//! Two dialects exist:
//!
//! - **iOS** has no absolute touch path for accessories, so gestures are
//!   driven with a relative mouse: park the cursor in a corner, nudge it
//!   onto the content, then scroll or click.
//! - **Android** accepts a digitizer, so gestures are drawn directly with
//!   absolute single-finger frames.

pub mod plan;
pub mod sequencer;

pub use plan::plan_for;
pub use sequencer::{Sequencer, TickOutcome};

use crate::hid::HidReport;
use heapless::Vec;

/// Longest plan any gesture compiles to.
pub const MAX_STEPS: usize = 16;

/// Gestures the remote can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureKind {
    /// Next video.
    SwipeUp,
    /// Previous video.
    SwipeDown,
    /// Like.
    DoubleTap,
}

/// One report and how long to hold before the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub report: HidReport,
    /// Connection intervals to wait after this report (0 on the last step).
    pub hold: u8,
}

/// Ordered step list for one gesture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GesturePlan {
    steps: Vec<Step, MAX_STEPS>,
}

impl GesturePlan {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.  Plans are built from fixed tables that fit
    /// [`MAX_STEPS`]; overflow is a table bug and drops the step.
    pub fn push(&mut self, report: impl Into<HidReport>, hold: u8) -> &mut Self {
        let pushed = self.steps.push(Step {
            report: report.into(),
            hold,
        });
        debug_assert!(pushed.is_ok(), "gesture plan exceeds {} steps", MAX_STEPS);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Intervals from the first report to the last one.
    pub fn duration_intervals(&self) -> u32 {
        let n = self.steps.len();
        self.steps
            .iter()
            .take(n.saturating_sub(1))
            .map(|s| s.hold.max(1) as u32)
            .sum()
    }
}
