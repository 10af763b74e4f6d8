use std::{thread, time::Duration};

/// Waits between commit attempts.
pub trait Pause: Send + Sync {
    fn pause(&self, delay: Duration);
}

/// Blocks the calling thread for the delay, or yields it when the delay is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(delay);
        }
    }
}
