use core::time::Duration;
use std::time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`std::time::Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A countdown over an owned [`Clock`].
///
/// [`wait_while`](Self::wait_while) restarts the countdown from now, while
/// [`wait_next`](Self::wait_next) extends the previous deadline. Chaining
/// `wait_next` calls keeps a fixed schedule even if a callback overruns, so
/// timing errors do not accumulate across trials.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use experiment_tools::presentation::CountdownTimer;
///
/// let mut timer = CountdownTimer::monotonic();
/// let mut frames = 0;
/// timer.wait_while(Duration::from_millis(5), || frames += 1);
/// assert!(frames > 0);
/// assert!(timer.expired());
/// ```
#[derive(Debug)]
pub struct CountdownTimer<C = MonotonicClock> {
    clock: C,
    deadline: Duration,
}

impl CountdownTimer<MonotonicClock> {
    /// Creates a timer over a fresh [`MonotonicClock`].
    #[must_use]
    pub fn monotonic() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<C: Clock> CountdownTimer<C> {
    /// Creates an already-expired timer over `clock`.
    pub fn new(clock: C) -> Self {
        let deadline = clock.now();
        Self { clock, deadline }
    }

    /// The underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the timer and return the clock.
    pub fn into_inner(self) -> C {
        self.clock
    }

    /// Set the deadline to `duration` from now.
    pub fn reset(&mut self, duration: Duration) {
        self.deadline = self.clock.now().saturating_add(duration);
    }

    /// Push the current deadline back by `duration`.
    pub fn add(&mut self, duration: Duration) {
        self.deadline = self.deadline.saturating_add(duration);
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.clock.now())
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.clock.now() >= self.deadline
    }

    /// Busy-wait for `duration` from now.
    pub fn wait(&mut self, duration: Duration) {
        self.wait_while(duration, core::hint::spin_loop);
    }

    /// Run `f` repeatedly for `duration` from now.
    pub fn wait_while(&mut self, duration: Duration, f: impl FnMut()) {
        self.reset(duration);
        self.run_until_deadline(f);
    }

    /// Run `f` repeatedly until `duration` past the previous deadline.
    pub fn wait_next(&mut self, duration: Duration, f: impl FnMut()) {
        self.add(duration);
        self.run_until_deadline(f);
    }

    fn run_until_deadline(&mut self, mut f: impl FnMut()) {
        while !self.expired() {
            f();
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    /// Advances by a fixed step every time it is read.
    struct StepClock {
        t: Cell<Duration>,
        step: Duration,
    }

    impl StepClock {
        fn new(step_ms: u64) -> Self {
            Self {
                t: Cell::new(Duration::ZERO),
                step: Duration::from_millis(step_ms),
            }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> Duration {
            let t = self.t.get();
            self.t.set(t + self.step);
            t
        }
    }

    #[test]
    fn test_new_timer_is_expired() {
        let timer = CountdownTimer::new(StepClock::new(1));
        assert!(timer.expired());
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_wait_while_runs_callback_until_deadline() {
        let mut timer = CountdownTimer::new(StepClock::new(10));
        let mut calls = 0;
        timer.wait_while(Duration::from_millis(100), || calls += 1);
        assert!(calls > 0);
        assert!(timer.expired());
        assert!(timer.clock().t.get() >= Duration::from_millis(100));
    }

    #[test]
    fn test_wait_next_keeps_schedule() {
        let mut timer = CountdownTimer::new(StepClock::new(10));
        timer.reset(Duration::from_millis(50));
        timer.wait_next(Duration::from_millis(50), || {});
        // deadline is 100ms after the reset, not 50ms after the last read
        let clock = timer.into_inner();
        let elapsed = clock.t.get();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed <= Duration::from_millis(130));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let mut timer = CountdownTimer::new(StepClock::new(1));
        timer.reset(Duration::MAX);
        timer.add(Duration::MAX);
        assert!(!timer.expired());
        assert!(timer.remaining() > Duration::from_secs(1 << 40));
    }

    #[test]
    fn test_monotonic_wait() {
        let mut timer = CountdownTimer::monotonic();
        let start = Instant::now();
        timer.wait(Duration::from_millis(2));
        assert!(start.elapsed() >= Duration::from_millis(2));
    }
}
