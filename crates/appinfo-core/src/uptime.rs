//! Process uptime: clock sources and human-readable formatting.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Source of "now" for uptime accounting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock pinned to a monotonic anchor.
///
/// The wall time is sampled once; later readings add monotonic elapsed time
/// to it, so NTP steps or manual clock changes never make uptime go backwards.
#[derive(Debug, Clone)]
pub struct SystemClock {
    wall_anchor: DateTime<Utc>,
    mono_anchor: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            wall_anchor: Utc::now(),
            mono_anchor: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.mono_anchor.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.wall_anchor + elapsed
    }
}

/// Settable clock for simulated time. Millisecond resolution.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        self.millis.store(t.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .unwrap_or_default()
    }
}

/// Elapsed time since a fixed start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    started_at: DateTime<Utc>,
    elapsed: Duration,
}

impl Uptime {
    /// A `now` earlier than `started_at` clamps to zero.
    pub fn between(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - started_at).to_std().unwrap_or(Duration::ZERO);
        Self { started_at, elapsed }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whole seconds, truncated.
    pub fn seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn formatted(&self) -> String {
        format_duration(self.elapsed)
    }
}

/// Render from the largest non-zero unit down to seconds: `"5s"`,
/// `"1m 5s"`, `"2h 0m 0s"`, `"1d 1h 1m 1s"`. Sub-second time is dropped.
pub fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = total % SECS_PER_DAY / SECS_PER_HOUR;
    let minutes = total % SECS_PER_HOUR / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn formats_from_largest_nonzero_unit() {
        assert_eq!(format_duration(secs(0)), "0s");
        assert_eq!(format_duration(secs(5)), "5s");
        assert_eq!(format_duration(secs(65)), "1m 5s");
        assert_eq!(format_duration(secs(3661)), "1h 1m 1s");
        assert_eq!(format_duration(secs(90061)), "1d 1h 1m 1s");
    }

    #[test]
    fn zero_inner_units_are_kept() {
        assert_eq!(format_duration(secs(7200)), "2h 0m 0s");
        assert_eq!(format_duration(secs(60)), "1m 0s");
        assert_eq!(format_duration(secs(86_400)), "1d 0h 0m 0s");
        assert_eq!(format_duration(secs(86_405)), "1d 0h 0m 5s");
    }

    #[test]
    fn days_do_not_roll_over() {
        assert_eq!(format_duration(secs(400 * 86_400 + 59)), "400d 0h 0m 59s");
    }

    #[test]
    fn sub_second_time_is_dropped() {
        assert_eq!(format_duration(Duration::from_millis(999)), "0s");
        assert_eq!(format_duration(Duration::from_millis(61_999)), "1m 1s");
    }

    #[test]
    fn uptime_clamps_when_clock_is_behind_start() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let uptime = Uptime::between(start, earlier);
        assert_eq!(uptime.seconds(), 0);
        assert_eq!(uptime.formatted(), "0s");
    }

    #[test]
    fn manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        clock.advance(Duration::from_millis(1500));
        assert_eq!(Uptime::between(start, clock.now()).seconds(), 1);
        clock.set(Utc.with_ymd_and_hms(2024, 1, 1, 1, 1, 1).unwrap());
        assert_eq!(Uptime::between(start, clock.now()).seconds(), 3661);
    }

    #[test]
    fn system_clock_never_goes_backwards() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
