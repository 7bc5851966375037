//! GPIO button input with async debouncing.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - UP   - single click swipes up, double click likes
//!   - DOWN - single click swipes down, double click likes
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, runs it through a [`ClickDetector`] and sends the
//! resulting click to the BLE task.

use ble_swipe::config::{BUTTON_DEBOUNCE_MS, BUTTON_QUEUE_DEPTH, DOUBLE_CLICK_WINDOW_MS};
use ble_swipe::trigger::{ButtonId, ClickType};
use ble_swipe::ui::click::ClickDetector;
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{with_deadline, Duration, Instant, Timer};

pub type ClickSender = Sender<'static, CriticalSectionRawMutex, (ButtonId, ClickType), BUTTON_QUEUE_DEPTH>;

/// Wait for a debounced press.
async fn pressed(btn: &mut Input<'static>) {
    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if btn.is_low() {
            return;
        }
    }
}

/// Wait for release to avoid repeat triggers.
async fn released(btn: &mut Input<'static>) {
    btn.wait_for_high().await;
    Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
}

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(pin: AnyPin, id: ButtonId, tx: ClickSender) -> ! {
    let mut btn = Input::new(pin, Pull::Up);
    let mut clicks = ClickDetector::new(DOUBLE_CLICK_WINDOW_MS);

    loop {
        let press = match clicks.deadline() {
            Some(deadline) => with_deadline(Instant::from_millis(deadline), pressed(&mut btn))
                .await
                .is_ok(),
            None => {
                pressed(&mut btn).await;
                true
            }
        };

        let now = Instant::now().as_millis();
        let click = if press {
            clicks.press(now)
        } else {
            clicks.poll(now)
        };

        if let Some(click) = click {
            info!("Button {}: {}", id, click);
            tx.send((id, click)).await;
        }

        if press {
            released(&mut btn).await;
        }
    }
}
