//! Tick-driven gesture replay.
//!
//! The connection task calls [`Sequencer::tick`] once per connection
//! interval.  The first tick after [`Sequencer::run`] sends step 0; a step
//! holding `h` intervals is followed by `h - 1` silent ticks before the
//! next step goes out, so consecutive reports always land in distinct
//! connection events.

use super::{plan_for, GestureKind, GesturePlan};
use crate::error::Error;
use crate::hid::ReportSlot;
use crate::session::{NotifyState, PeerClassification};
use crate::transport::{HidTransport, ReportSink};

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// No gesture in progress.
    Idle,
    /// Holding between two steps.
    Waiting,
    /// A report went out on `slot`.
    Sent(ReportSlot),
    /// The step for `slot` was refused and skipped.
    Dropped(ReportSlot, Error),
}

/// Replays one [`GesturePlan`] at a time.
#[derive(Debug, Default)]
pub struct Sequencer {
    plan: GesturePlan,
    cursor: usize,
    wait: u8,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the plan for `gesture` on `platform`.
    ///
    /// A running gesture is never interrupted: returns `false` and leaves
    /// the current plan alone while busy.
    pub fn run(&mut self, gesture: GestureKind, platform: PeerClassification) -> bool {
        if self.is_busy() {
            return false;
        }
        self.plan = plan_for(gesture, platform);
        self.cursor = 0;
        self.wait = 0;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "gesture {} on {} ({} steps)",
            gesture,
            platform,
            self.plan.len()
        );

        true
    }

    pub fn is_busy(&self) -> bool {
        self.cursor < self.plan.len()
    }

    /// Advance by one connection interval.
    ///
    /// Send failures are not retried; the step is skipped and the next one
    /// keeps its schedule.
    pub fn tick<S: ReportSink>(
        &mut self,
        transport: &mut HidTransport<S>,
        notify: &NotifyState,
    ) -> TickOutcome {
        if !self.is_busy() {
            return TickOutcome::Idle;
        }
        if self.wait > 0 {
            self.wait -= 1;
            if self.wait > 0 {
                return TickOutcome::Waiting;
            }
        }

        let step = self.plan.steps()[self.cursor];
        self.cursor += 1;
        self.wait = step.hold;

        let slot = step.report.slot();
        match transport.send_report(notify, &step.report) {
            Ok(()) => TickOutcome::Sent(slot),
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("step {} dropped: {}", self.cursor - 1, err);
                TickOutcome::Dropped(slot, err)
            }
        }
    }
}
