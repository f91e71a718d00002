/// Remaining seconds at or below which the presentation layer may
/// signal urgency.
pub const LOW_TIME_SECS: u32 = 10;

/// One step of a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The countdown is not running; the tick was ignored.
    Idle,
    /// One second elapsed; this many remain.
    Running { remaining_secs: u32 },
    /// The budget is exhausted. The countdown stops itself.
    Expired,
}

/// Per-question countdown over a fixed budget of whole seconds.
///
/// The countdown does no scheduling of its own: the host delivers one
/// `tick()` per elapsed second. Ticks while stopped are ignored, which
/// is what makes a stale timer callback from an already-closed question
/// harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    budget_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(budget_secs: u32) -> Self {
        Self {
            budget_secs,
            remaining_secs: budget_secs,
            running: false,
        }
    }

    /// Refill to the full budget and start running.
    pub fn start(&mut self) {
        self.remaining_secs = self.budget_secs;
        self.running = true;
    }

    /// Stop the countdown, keeping the remaining time readable.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Remaining time as a fraction of the budget, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.budget_secs == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.remaining_secs as f32 / self.budget_secs as f32
        }
    }

    /// True when the remaining time is at or below the urgency threshold.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining_secs <= LOW_TIME_SECS
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return CountdownTick::Expired;
        }

        CountdownTick::Running {
            remaining_secs: self.remaining_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry_and_stops() {
        let mut countdown = Countdown::new(3);
        countdown.start();

        assert_eq!(
            countdown.tick(),
            CountdownTick::Running { remaining_secs: 2 }
        );
        assert_eq!(
            countdown.tick(),
            CountdownTick::Running { remaining_secs: 1 }
        );
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), CountdownTick::Idle);
    }

    #[test]
    fn ticks_are_ignored_after_cancel() {
        let mut countdown = Countdown::new(30);
        countdown.start();
        countdown.tick();
        countdown.cancel();

        assert_eq!(countdown.tick(), CountdownTick::Idle);
        assert_eq!(countdown.remaining_secs(), 29);
    }

    #[test]
    fn start_refills_the_budget() {
        let mut countdown = Countdown::new(30);
        countdown.start();
        for _ in 0..12 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining_secs(), 18);

        countdown.start();
        assert_eq!(countdown.remaining_secs(), 30);
        assert!(countdown.is_running());
    }

    #[test]
    fn low_time_flag_trips_at_the_threshold() {
        let mut countdown = Countdown::new(30);
        countdown.start();
        for _ in 0..19 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining_secs(), 11);
        assert!(!countdown.is_low());

        countdown.tick();
        assert!(countdown.is_low());
    }

    #[test]
    fn fraction_tracks_remaining_over_budget() {
        let mut countdown = Countdown::new(30);
        countdown.start();
        assert!((countdown.fraction() - 1.0).abs() < f32::EPSILON);
        for _ in 0..15 {
            countdown.tick();
        }
        assert!((countdown.fraction() - 0.5).abs() < f32::EPSILON);
    }
}
