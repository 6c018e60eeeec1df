use std::time::Duration;

use super::{FrameClock, FrameLimiter, SystemClock, ADJUSTMENT_WINDOW};

impl FrameLimiter<SystemClock> {
    /// Create a limiter for the given target fps using the wall clock.
    pub fn new(target_fps: u32) -> Self {
        Self::with_clock(target_fps, SystemClock::new())
    }
}

impl<C: FrameClock> FrameLimiter<C> {
    /// Create a limiter which reads time from `clock`.
    ///
    /// The initial delay is 60% of the target frame time, so a light
    /// workload starts close to the target instead of ramping up from zero.
    pub fn with_clock(target_fps: u32, clock: C) -> Self {
        let target_frame_time_ms = 1000.0 / target_fps.max(1) as f32;
        Self {
            clock,
            target_frame_time_ms,
            delay_ms: (target_frame_time_ms * 0.6) as u32,
            average_frame_time_ms: 0.0,
            countdown: ADJUSTMENT_WINDOW,
            last_sample: None,
        }
    }

    /// Call once per frame. Sleeps for the current delay, then retunes the
    /// delay every 4th call.
    pub fn regulate(&mut self) {
        if self.delay_ms != 0 {
            self.clock
                .sleep(Duration::from_millis(self.delay_ms as u64));
        }

        self.countdown -= 1;
        if self.countdown > 0 {
            return;
        }
        self.countdown = ADJUSTMENT_WINDOW;

        let now = self.clock.now();
        if let Some(last_sample) = self.last_sample {
            let elapsed_ms = (now - last_sample).as_secs_f32() * 1000.0;
            self.average_frame_time_ms = elapsed_ms / ADJUSTMENT_WINDOW as f32;
            self.adjust_delay();
        }
        self.last_sample = Some(now);
    }

    fn adjust_delay(&mut self) {
        let headroom = self.target_frame_time_ms - self.average_frame_time_ms;
        if headroom >= 1.0 {
            self.delay_ms += 1;
        } else if headroom <= -1.0 {
            self.delay_ms = self.delay_ms.saturating_sub(1);
        } else {
            return;
        }
        log::debug!(
            "average frame time {:.2}ms vs target {:.2}ms, delay is now {}ms",
            self.average_frame_time_ms,
            self.target_frame_time_ms,
            self.delay_ms
        );
    }

    /// The sleep applied on each call to [Self::regulate].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms as u64)
    }

    pub fn target_frame_time(&self) -> Duration {
        Duration::from_secs_f32(self.target_frame_time_ms / 1000.0)
    }

    /// The average frame time measured over the last sampling window, zero
    /// until the first window completes.
    pub fn average_frame_time(&self) -> Duration {
        Duration::from_secs_f32(self.average_frame_time_ms / 1000.0)
    }

    /// Frames per second implied by the last measurement, zero until the
    /// first window completes.
    pub fn average_fps(&self) -> f32 {
        if self.average_frame_time_ms > 0.0 {
            1000.0 / self.average_frame_time_ms
        } else {
            0.0
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
