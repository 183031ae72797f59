use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Shortest interval a [`Ticker`] accepts. Smaller values are raised to this.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// When redraw ticks fire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickSchedule {
    /// Every `interval`, counted from the moment the ticker starts.
    Interval(Duration),
    /// On multiples of `interval` since the UNIX epoch, so a one-second
    /// schedule fires as the wall-clock second changes.
    WallClock(Duration),
}

impl TickSchedule {
    #[inline]
    pub fn interval(self) -> Duration {
        match self {
            TickSchedule::Interval(d) | TickSchedule::WallClock(d) => d.max(MIN_INTERVAL),
        }
    }
}

/// One fired tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tick {
    /// Monotonic tick counter; skipped ticks are not counted.
    pub index: u64,
    /// Deadlines that passed unobserved before this one (stalls, suspended loop).
    pub missed: u64,
}

/// Deadline-based tick source.
///
/// Missed deadlines are coalesced into a single tick; they are never replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
    index: u64,
}

impl Ticker {
    /// Creates a ticker whose first deadline is `first`.
    pub fn new(interval: Duration, first: Instant) -> Self {
        Self { interval: interval.max(MIN_INTERVAL), next: first, index: 0 }
    }

    /// Creates a ticker for `schedule` given the current monotonic time and
    /// the current wall-clock offset from the UNIX epoch.
    pub fn from_schedule(schedule: TickSchedule, now: Instant, since_epoch: Duration) -> Self {
        let interval = schedule.interval();
        let first = match schedule {
            TickSchedule::Interval(_) => now + interval,
            TickSchedule::WallClock(_) => now + phase_delay(since_epoch, interval),
        };
        Self::new(interval, first)
    }

    /// Starts `schedule` from the system clocks.
    pub fn start(schedule: TickSchedule) -> Self {
        // A clock set before 1970 only loses alignment, not ticking.
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self::from_schedule(schedule, Instant::now(), since_epoch)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant at which the next tick is due.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Fires if the deadline has passed and moves it strictly past `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        if now < self.next {
            return None;
        }

        let behind = now.duration_since(self.next);
        let missed = (behind.as_nanos() / self.interval.as_nanos()) as u64;
        let steps = u32::try_from(missed.saturating_add(1)).unwrap_or(u32::MAX);

        self.next += self.interval * steps;
        while self.next <= now {
            self.next += self.interval;
        }

        if missed > 0 {
            log::debug!("ticker coalesced {missed} missed tick(s)");
        }

        let tick = Tick { index: self.index, missed };
        self.index = self.index.wrapping_add(1);
        Some(tick)
    }
}

/// Time from `since_epoch` to the next multiple of `interval`.
///
/// Exactly on a boundary, the next boundary is a full interval away.
pub fn phase_delay(since_epoch: Duration, interval: Duration) -> Duration {
    let interval = interval.max(MIN_INTERVAL);
    let period = interval.as_nanos();
    let into = since_epoch.as_nanos() % period;
    // `period - into` is at most `interval`, which fits in u64 nanoseconds.
    Duration::from_nanos((period - into) as u64)
}
