//! Shared tick source
//!
//! One scheduler drives every widget timer on the board. It owns the clock
//! and the random source, so a seeded scheduler over a `ManualClock`
//! replays exactly the same board.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::clock::Clock;

/// A recurring timer registered for one subscriber
#[derive(Debug, Clone)]
struct Timer<K> {
    id: K,
    period: Duration,
    next_due: Duration,
}

/// Recurring-timer scheduler over an injected clock.
///
/// Missed periods are skipped rather than replayed: a timer that is polled
/// late fires once and is rescheduled to its next future slot, the same
/// way a browser interval or `MissedTickBehavior::Skip` behaves.
pub struct Scheduler<K, C: Clock> {
    clock: C,
    rng: StdRng,
    seed: Option<u64>,
    timers: Vec<Timer<K>>,
    fired: u64,
}

impl<K, C> Scheduler<K, C>
where
    K: Copy + Eq + std::fmt::Debug,
    C: Clock,
{
    /// Create a scheduler; `None` seeds the generator from OS entropy
    pub fn new(clock: C, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            clock,
            rng,
            seed,
            timers: Vec::new(),
            fired: 0,
        }
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Seed in use, if one was given
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Total number of ticks delivered so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Random source shared by all subscribers
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Register a recurring timer. Re-subscribing an id replaces its timer.
    ///
    /// A zero period is treated as one millisecond so polling always
    /// terminates.
    pub fn subscribe(&mut self, id: K, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        self.timers.retain(|t| t.id != id);
        self.timers.push(Timer {
            id,
            period,
            next_due: self.clock.now() + period,
        });
        debug!("Timer subscribed: {:?} every {:?}", id, period);
    }

    /// Cancel a timer. Returns whether one was registered.
    pub fn cancel(&mut self, id: K) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() != before;
        if removed {
            debug!("Timer cancelled: {:?}", id);
        }
        removed
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, id: K) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Collect every timer that is due at the current clock reading.
    ///
    /// Results are ordered by due time, then by subscription order.
    pub fn poll(&mut self) -> Vec<K> {
        let now = self.clock.now();
        let mut due: Vec<(Duration, usize, K)> = Vec::new();

        for (order, timer) in self.timers.iter_mut().enumerate() {
            if timer.next_due > now {
                continue;
            }
            due.push((timer.next_due, order, timer.id));

            let periods_late = (now - timer.next_due).as_nanos() / timer.period.as_nanos();
            let skip = u32::try_from(periods_late + 1).unwrap_or(u32::MAX);
            timer.next_due += timer.period * skip;
        }

        due.sort_by_key(|(at, order, _)| (*at, *order));
        self.fired += due.len() as u64;
        due.into_iter().map(|(_, _, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::clock::ManualClock;
    use rand::Rng;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Id {
        Fast,
        Slow,
    }

    fn scheduler(clock: &ManualClock) -> Scheduler<Id, ManualClock> {
        Scheduler::new(clock.clone(), Some(1))
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Fast, Duration::from_secs(2));
        clock.advance(Duration::from_millis(1999));
        assert!(s.poll().is_empty());
        clock.advance(Duration::from_millis(1));
        assert_eq!(s.poll(), vec![Id::Fast]);
        assert!(s.poll().is_empty());
    }

    #[test]
    fn test_independent_periods() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Slow, Duration::from_secs(3));
        s.subscribe(Id::Fast, Duration::from_secs(2));

        let mut fast = 0;
        let mut slow = 0;
        for _ in 0..12 {
            clock.advance(Duration::from_secs(1));
            for id in s.poll() {
                match id {
                    Id::Fast => fast += 1,
                    Id::Slow => slow += 1,
                }
            }
        }
        assert_eq!(fast, 6);
        assert_eq!(slow, 4);
        assert_eq!(s.fired(), 10);
    }

    #[test]
    fn test_due_order_follows_due_time() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Slow, Duration::from_secs(3));
        s.subscribe(Id::Fast, Duration::from_secs(2));
        clock.advance(Duration::from_secs(6));
        // Fast was due at 2s, Slow at 3s
        assert_eq!(s.poll(), vec![Id::Fast, Id::Slow]);
    }

    #[test]
    fn test_late_poll_skips_missed_periods() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Fast, Duration::from_secs(2));
        clock.advance(Duration::from_secs(9));
        assert_eq!(s.poll(), vec![Id::Fast]);
        // Next slot is 10s, not 4s
        clock.advance(Duration::from_millis(900));
        assert!(s.poll().is_empty());
        clock.advance(Duration::from_millis(100));
        assert_eq!(s.poll(), vec![Id::Fast]);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Fast, Duration::from_secs(1));
        assert!(s.is_subscribed(Id::Fast));
        assert!(s.cancel(Id::Fast));
        assert!(!s.cancel(Id::Fast));
        clock.advance(Duration::from_secs(5));
        assert!(s.poll().is_empty());
    }

    #[test]
    fn test_resubscribe_replaces_timer() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Fast, Duration::from_secs(1));
        s.subscribe(Id::Fast, Duration::from_secs(4));
        clock.advance(Duration::from_secs(3));
        assert!(s.poll().is_empty());
        clock.advance(Duration::from_secs(1));
        assert_eq!(s.poll(), vec![Id::Fast]);
    }

    #[test]
    fn test_zero_period_clamped() {
        let clock = ManualClock::new();
        let mut s = scheduler(&clock);
        s.subscribe(Id::Fast, Duration::ZERO);
        clock.advance(Duration::from_millis(1));
        assert_eq!(s.poll(), vec![Id::Fast]);
    }

    #[test]
    fn test_seeded_rng_replays() {
        let clock = ManualClock::new();
        let mut a: Scheduler<Id, _> = Scheduler::new(clock.clone(), Some(99));
        let mut b: Scheduler<Id, _> = Scheduler::new(clock, Some(99));
        let xs: Vec<u32> = (0..8).map(|_| a.rng().gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng().gen()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), Some(99));
    }
}
