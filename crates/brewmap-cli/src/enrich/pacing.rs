use std::time::Duration;

use tokio::sync::Mutex;

/// Spaces out entry starts by a fixed delay.
///
/// The first caller proceeds immediately; every later caller waits
/// `delay` after acquiring the gate. The lock is held across the sleep, so
/// concurrent entries still start one delay apart.
pub(super) struct Pacer {
    delay: Duration,
    started: Mutex<bool>,
}

impl Pacer {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: Mutex::new(false),
        }
    }

    pub(super) async fn wait_turn(&self) {
        let mut started = self.started.lock().await;
        if *started {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        } else {
            *started = true;
        }
    }
}
