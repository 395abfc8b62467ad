use crate::collectors::VolumeInfoProvider;
use crate::watchlist::{WatchList, WatchStore};
use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3_000);
const MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Fixed-cadence refresh of every watched volume, driven by the event loop.
#[derive(Debug)]
pub struct Poller {
    interval:  Duration,
    last_tick: Instant,
    ticks:     u64,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval:  interval.max(MIN_INTERVAL),
            last_tick: Instant::now(),
            ticks:     0,
        }
    }

    pub fn interval(&self) -> Duration { self.interval }

    pub fn due(&self) -> bool {
        self.last_tick.elapsed() >= self.interval
    }

    /// Time left before the next tick is due; zero once overdue.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.last_tick.elapsed())
    }

    /// Re-poll every member. Never fails: unreadable volumes only change state.
    pub fn tick<S: WatchStore>(&mut self, list: &mut WatchList<S>, provider: &dyn VolumeInfoProvider) {
        list.refresh(provider);
        self.last_tick = Instant::now();
        self.ticks += 1;
        log::trace!("tick {}: refreshed {} volume(s)", self.ticks, list.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::tests::{FakeProvider, MemStore};

    #[test]
    fn interval_has_a_floor() {
        assert_eq!(Poller::new(Duration::from_millis(10)).interval(), MIN_INTERVAL);
        assert_eq!(Poller::new(DEFAULT_INTERVAL).interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn not_due_right_after_creation() {
        let p = Poller::new(DEFAULT_INTERVAL);
        assert!(!p.due());
        assert!(p.until_next() <= DEFAULT_INTERVAL);
        assert!(p.until_next() > Duration::ZERO);
    }

    #[test]
    fn due_after_interval_elapses() {
        let mut p = Poller::new(MIN_INTERVAL);
        p.last_tick = Instant::now() - MIN_INTERVAL;
        assert!(p.due());
        assert_eq!(p.until_next(), Duration::ZERO);
    }

    #[test]
    fn tick_isolates_failing_volume_and_resets_timer() {
        let good = FakeProvider::default()
            .with("/a", 10, 5)
            .with("/b", 10, 5)
            .with("/c", 10, 1);
        let mut list = WatchList::load(MemStore::default(), &good).unwrap();
        for id in ["/a", "/b", "/c"] {
            list.add(id, &good).unwrap();
        }

        let flaky = FakeProvider::default()
            .with("/a", 10, 5)
            .with("/b", 10, 5)
            .with("/c", 10, 1)
            .failing("/b");

        let mut p = Poller::new(MIN_INTERVAL);
        p.last_tick = Instant::now() - MIN_INTERVAL;
        p.tick(&mut list, &flaky);

        assert!(!p.due());
        let vols = list.volumes();
        assert!(vols[0].state.is_readable());
        assert!(!vols[1].state.is_readable());
        assert!(vols[1].state.usage().is_none());
        assert!((vols[2].state.usage().unwrap().used_pct - 90.0).abs() < 1e-9);
    }
}
