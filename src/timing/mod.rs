mod clock;
mod frame_limiter;

use std::time::Duration;

pub use self::clock::SystemClock;

/// Frames per delay adjustment.
const ADJUSTMENT_WINDOW: u32 = 4;

/// The time source used for frame pacing.
///
/// Abstracted so pacing can be driven by a simulated clock in tests.
pub trait FrameClock {
    /// Monotonic time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Block the calling thread for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// An application will generally run as fast as it possibly can. When the
/// workload is low this causes unreasonably high frame rates and therefore
/// unexpectedly high CPU utilization. The frame limiter sleeps a little each
/// frame and tunes that delay so the loop tracks a target frame rate.
///
/// Every 4 frames the average frame time is compared against the target.
/// The delay moves by 1ms when the average is at least 1ms away from the
/// target and is left alone otherwise.
pub struct FrameLimiter<C: FrameClock = SystemClock> {
    clock: C,
    target_frame_time_ms: f32,
    delay_ms: u32,
    average_frame_time_ms: f32,
    countdown: u32,
    last_sample: Option<Duration>,
}
