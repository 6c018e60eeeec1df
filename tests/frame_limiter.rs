use std::time::Duration;

use fluidsim2d::timing::{FrameClock, FrameLimiter};

/// Simulated time: frames advance it by their workload, the limiter by its
/// sleeps.
#[derive(Default)]
struct SimulatedClock {
    now: Duration,
}

impl FrameClock for SimulatedClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}

fn run_frames(
    limiter: &mut FrameLimiter<SimulatedClock>,
    workloads_ms: &[u64],
    frames: usize,
) -> Vec<Duration> {
    let mut delays = Vec::with_capacity(frames);
    for frame in 0..frames {
        let work = workloads_ms[frame % workloads_ms.len()];
        limiter.clock_mut().now += Duration::from_millis(work);
        limiter.regulate();
        delays.push(limiter.delay());
    }
    delays
}

#[test]
fn alternating_fast_and_slow_frames_settle_inside_the_dead_band() {
    let mut limiter = FrameLimiter::with_clock(60, SimulatedClock::default());

    // 10ms is faster than the 16.7ms target, 20ms is slower
    let delays = run_frames(&mut limiter, &[10, 20], 400);

    // never more than 1ms of change per window of 4 calls
    for pair in delays.windows(5) {
        let step = pair[4].as_millis() as i64 - pair[0].as_millis() as i64;
        assert!(step.abs() <= 1, "delay jumped by {}ms", step);
    }

    // the second half never moves
    let settled = &delays[200..];
    assert!(settled.iter().all(|delay| *delay == settled[0]));

    let target_ms = limiter.target_frame_time().as_secs_f32() * 1000.0;
    let average_ms = limiter.average_frame_time().as_secs_f32() * 1000.0;
    assert!(
        (target_ms - average_ms).abs() < 1.0,
        "average {}ms vs target {}ms",
        average_ms,
        target_ms
    );
}

#[test]
fn an_idle_loop_converges_towards_the_target() {
    let mut limiter = FrameLimiter::with_clock(30, SimulatedClock::default());
    run_frames(&mut limiter, &[0], 400);

    let average_ms = limiter.average_frame_time().as_secs_f32() * 1000.0;
    assert!((average_ms - 1000.0 / 30.0).abs() < 1.0);
    assert!((limiter.average_fps() - 30.0).abs() < 1.0);
}
