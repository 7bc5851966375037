//! Per-platform gesture tables.
//!
//! Coordinates are fixed for the target app's layout on a portrait
//! phone; there is no negotiation of the touch region.

use super::{GestureKind, GesturePlan};
use crate::hid::{FingerReport, MouseReport, MouseXyReport};
use crate::session::PeerClassification;

// iOS (relative mouse)

/// Full-scale delta that pins the pointer in the bottom-left corner.
const CORNER_X: i16 = -2047;
const CORNER_Y: i16 = 2047;

/// Nudge from the corner onto the video before scrolling.
const SWIPE_NUDGE_X: i16 = 80;
const SWIPE_NUDGE_Y: i16 = 120;

/// Nudge from the corner onto the video before double-clicking.
const TAP_NUDGE_X: i16 = 120;
const TAP_NUDGE_Y: i16 = -360;

/// Wheel delta per scroll report, and how many scroll reports per swipe.
const WHEEL_DELTA: i8 = 120;
const WHEEL_REPORTS: usize = 3;

/// Settle time around the click pulses (intervals).
const TAP_SETTLE: u8 = 6;
/// Gap between the two click pulses (intervals).
const TAP_GAP: u8 = 4;

// Android (absolute digitizer)

/// Contact identifier used for every synthetic finger.
pub const CONTACT_ID: u8 = 6;

/// Horizontal position of every touch (centre column).
pub const TOUCH_X: u16 = 1904;

/// Swipe-up touch-down row (lower part of the screen).
pub const SWIPE_UP_START_Y: u16 = 3200;
/// Swipe-down touch-down row (upper part of the screen).
pub const SWIPE_DOWN_START_Y: u16 = 1012;
/// Vertical travel per drag frame.
pub const DRAG_STEP: u16 = 300;
/// Drag frames between touch-down and lift.
pub const DRAG_FRAMES: u16 = 8;

/// Double-tap row (screen centre).
pub const TAP_Y: u16 = 2024;

/// Compile `gesture` for the platform the peer was classified as.
///
/// `Unknown` is driven like Android: a digitizer report an iPhone ignores
/// costs nothing, a mouse report on Android moves a visible cursor.
pub fn plan_for(gesture: GestureKind, platform: PeerClassification) -> GesturePlan {
    match (platform.is_ios(), gesture) {
        (true, GestureKind::SwipeUp) => ios_scroll(-SWIPE_NUDGE_Y, WHEEL_DELTA),
        (true, GestureKind::SwipeDown) => ios_scroll(SWIPE_NUDGE_Y, -WHEEL_DELTA),
        (true, GestureKind::DoubleTap) => ios_double_click(),
        (false, GestureKind::SwipeUp) => android_drag(SWIPE_UP_START_Y, Direction::Up),
        (false, GestureKind::SwipeDown) => android_drag(SWIPE_DOWN_START_Y, Direction::Down),
        (false, GestureKind::DoubleTap) => android_double_tap(),
    }
}

fn corner() -> MouseXyReport {
    MouseXyReport::new(CORNER_X, CORNER_Y)
}

fn ios_scroll(nudge_y: i16, wheel: i8) -> GesturePlan {
    let mut plan = GesturePlan::new();
    plan.push(corner(), 1)
        .push(MouseXyReport::new(SWIPE_NUDGE_X, nudge_y), 1);
    for _ in 0..WHEEL_REPORTS {
        plan.push(MouseReport::scroll(wheel), 1);
    }
    // Park again so the next gesture starts from a known origin.
    plan.push(corner(), 0);
    plan
}

fn ios_double_click() -> GesturePlan {
    let mut plan = GesturePlan::new();
    plan.push(corner(), 1)
        .push(MouseXyReport::new(TAP_NUDGE_X, TAP_NUDGE_Y), TAP_SETTLE)
        .push(MouseReport::left_down(), 1)
        .push(MouseReport::released(), TAP_GAP)
        .push(MouseReport::left_down(), 1)
        .push(MouseReport::released(), TAP_SETTLE)
        .push(corner(), 0);
    plan
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn android_drag(start_y: u16, direction: Direction) -> GesturePlan {
    let mut plan = GesturePlan::new();
    plan.push(FingerReport::touching(CONTACT_ID, TOUCH_X, start_y), 1);
    for frame in 1..=DRAG_FRAMES {
        let travel = DRAG_STEP * frame;
        let y = match direction {
            Direction::Up => start_y.saturating_sub(travel),
            Direction::Down => start_y.saturating_add(travel),
        };
        plan.push(FingerReport::touching(CONTACT_ID, TOUCH_X, y), 1);
    }
    plan.push(FingerReport::lifted(CONTACT_ID, TOUCH_X, start_y), 0);
    plan
}

fn android_double_tap() -> GesturePlan {
    let mut plan = GesturePlan::new();
    plan.push(FingerReport::touching(CONTACT_ID, TOUCH_X, TAP_Y), 1)
        .push(FingerReport::lifted(CONTACT_ID, TOUCH_X, TAP_Y), TAP_GAP)
        .push(FingerReport::touching(CONTACT_ID, TOUCH_X, TAP_Y), 1)
        .push(FingerReport::lifted(CONTACT_ID, TOUCH_X, TAP_Y), 0);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::MAX_STEPS;
    use crate::hid::HidReport;

    const ALL: [GestureKind; 3] = [
        GestureKind::SwipeUp,
        GestureKind::SwipeDown,
        GestureKind::DoubleTap,
    ];

    fn finger_ys(plan: &GesturePlan) -> std::vec::Vec<u16> {
        plan.steps()
            .iter()
            .map(|s| match s.report {
                HidReport::Finger(f) => f.y,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn android_swipe_up_is_ten_finger_frames() {
        let plan = plan_for(GestureKind::SwipeUp, PeerClassification::Android);
        assert_eq!(plan.len(), 10);
        assert!(plan.steps().iter().all(|s| s.report.is_finger()));
        assert_eq!(
            finger_ys(&plan),
            [3200, 2900, 2600, 2300, 2000, 1700, 1400, 1100, 800, 3200]
        );
    }

    #[test]
    fn android_swipe_down_mirrors_swipe_up() {
        let plan = plan_for(GestureKind::SwipeDown, PeerClassification::Android);
        assert_eq!(plan.len(), 10);
        let ys = finger_ys(&plan);
        assert_eq!(ys[0], 1012);
        for pair in ys[..9].windows(2) {
            assert_eq!(pair[1], pair[0] + 300);
        }
        assert_eq!(ys[9], 1012);
    }

    #[test]
    fn android_frames_frame_the_contact() {
        let plan = plan_for(GestureKind::SwipeUp, PeerClassification::Android);
        let steps = plan.steps();
        for step in &steps[..9] {
            let HidReport::Finger(f) = step.report else {
                panic!("not a finger frame");
            };
            assert_eq!(f, FingerReport::touching(6, 1904, f.y));
        }
        assert_eq!(
            steps[9].report,
            HidReport::Finger(FingerReport::lifted(6, 1904, 3200))
        );
    }

    #[test]
    fn unknown_platform_uses_android_dialect() {
        for gesture in ALL {
            assert_eq!(
                plan_for(gesture, PeerClassification::Unknown),
                plan_for(gesture, PeerClassification::Android)
            );
        }
    }

    #[test]
    fn ios_swipes_scroll_in_opposite_directions() {
        let up = plan_for(GestureKind::SwipeUp, PeerClassification::Ios);
        let down = plan_for(GestureKind::SwipeDown, PeerClassification::Ios);
        assert_eq!(up.len(), 6);
        assert_eq!(down.len(), 6);

        assert_eq!(
            up.steps()[1].report,
            HidReport::MouseXy(MouseXyReport::new(80, -120))
        );
        assert_eq!(
            down.steps()[1].report,
            HidReport::MouseXy(MouseXyReport::new(80, 120))
        );
        for i in 2..5 {
            assert_eq!(up.steps()[i].report, HidReport::Mouse(MouseReport::scroll(120)));
            assert_eq!(
                down.steps()[i].report,
                HidReport::Mouse(MouseReport::scroll(-120))
            );
        }
    }

    #[test]
    fn ios_gestures_start_and_end_in_the_corner() {
        for gesture in ALL {
            let plan = plan_for(gesture, PeerClassification::Ios);
            let corner = HidReport::MouseXy(MouseXyReport::new(-2047, 2047));
            assert_eq!(plan.steps().first().unwrap().report, corner);
            assert_eq!(plan.steps().last().unwrap().report, corner);
        }
    }

    #[test]
    fn ios_double_click_timing() {
        let plan = plan_for(GestureKind::DoubleTap, PeerClassification::Ios);
        let holds: std::vec::Vec<u8> = plan.steps().iter().map(|s| s.hold).collect();
        assert_eq!(holds, [1, 6, 1, 4, 1, 6, 0]);
        assert_eq!(plan.duration_intervals(), 19);
    }

    #[test]
    fn android_double_tap_timing() {
        let plan = plan_for(GestureKind::DoubleTap, PeerClassification::Android);
        let holds: std::vec::Vec<u8> = plan.steps().iter().map(|s| s.hold).collect();
        assert_eq!(holds, [1, 4, 1, 0]);
        assert!(plan
            .steps()
            .iter()
            .all(|s| matches!(s.report, HidReport::Finger(f) if f.x == 1904 && f.y == 2024)));
    }

    #[test]
    fn every_plan_fits_and_ends_without_hold() {
        for platform in [PeerClassification::Android, PeerClassification::Ios] {
            for gesture in ALL {
                let plan = plan_for(gesture, platform);
                assert!(!plan.is_empty());
                assert!(plan.len() < MAX_STEPS);
                assert_eq!(plan.steps().last().unwrap().hold, 0);
            }
        }
    }
}
