use std::time::{Duration, Instant};

/// Two taps on the same card within this window count as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// One tap followed by silence: the host flips the card.
    Single(String),
    /// Two taps inside the window: the host toggles the like.
    Double(String),
}

#[derive(Debug)]
struct PendingTap {
    target: String,
    deadline: Instant,
}

/// Per-card tap classifier. One instance per displayed card; the owner
/// must call [`TapDisambiguator::cancel`] when the card goes away so a
/// pending tap never resolves against a disposed card.
///
/// Time is passed in rather than read, so classification is
/// deterministic under test. The host feeds taps through
/// [`TapDisambiguator::on_tap`] and drains expirations with
/// [`TapDisambiguator::poll`] from its event-loop tick.
#[derive(Debug)]
pub struct TapDisambiguator {
    window: Duration,
    pending: Option<PendingTap>,
}

impl Default for TapDisambiguator {
    fn default() -> Self {
        Self::new()
    }
}

impl TapDisambiguator {
    pub fn new() -> Self {
        Self::with_window(DOUBLE_TAP_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one tap. A second tap on the same target inside the window
    /// resolves to [`TapOutcome::Double`]; otherwise the tap is armed
    /// and resolves later via [`TapDisambiguator::poll`]. Taps are
    /// consumed pairwise: the tap after a double starts a fresh cycle.
    pub fn on_tap(&mut self, target: &str, now: Instant) -> Option<TapOutcome> {
        match self.pending.take() {
            Some(pending) if now < pending.deadline && pending.target == target => {
                Some(TapOutcome::Double(pending.target))
            }
            Some(pending) if now >= pending.deadline => {
                // The window lapsed without a poll; flush the single
                // tap the timer would have produced, then re-arm.
                self.arm(target, now);
                Some(TapOutcome::Single(pending.target))
            }
            Some(_) | None => {
                self.arm(target, now);
                None
            }
        }
    }

    /// Resolve an armed tap whose window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<TapOutcome> {
        match self.pending.take() {
            Some(pending) if now >= pending.deadline => Some(TapOutcome::Single(pending.target)),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop any pending tap. Called when the owning card unmounts.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn arm(&mut self, target: &str, now: Instant) {
        self.pending = Some(PendingTap {
            target: target.to_string(),
            deadline: now + self.window,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = DOUBLE_TAP_WINDOW;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn lone_tap_resolves_to_single_after_window() {
        let mut taps = TapDisambiguator::new();
        let t0 = Instant::now();

        assert_eq!(taps.on_tap("card-1", t0), None);
        assert!(taps.is_pending());
        assert_eq!(taps.poll(t0 + ms(100)), None);
        assert_eq!(
            taps.poll(t0 + T),
            Some(TapOutcome::Single("card-1".to_string()))
        );
        assert!(!taps.is_pending());
        assert_eq!(taps.poll(t0 + T + ms(500)), None);
    }

    #[test]
    fn two_taps_inside_window_resolve_to_one_double() {
        let mut taps = TapDisambiguator::new();
        let t0 = Instant::now();

        assert_eq!(taps.on_tap("card-1", t0), None);
        assert_eq!(
            taps.on_tap("card-1", t0 + ms(120)),
            Some(TapOutcome::Double("card-1".to_string()))
        );
        // Pair consumed; nothing left to expire.
        assert_eq!(taps.poll(t0 + ms(900)), None);
    }

    #[test]
    fn triple_tap_consumes_pairwise_then_restarts_timing() {
        let mut taps = TapDisambiguator::new();
        let t0 = Instant::now();

        assert_eq!(taps.on_tap("card-1", t0), None);
        assert_eq!(
            taps.on_tap("card-1", t0 + ms(100)),
            Some(TapOutcome::Double("card-1".to_string()))
        );
        // Third tap opens a fresh cycle rather than being debounced.
        assert_eq!(taps.on_tap("card-1", t0 + ms(200)), None);
        assert!(taps.is_pending());
        assert_eq!(
            taps.poll(t0 + ms(200) + T),
            Some(TapOutcome::Single("card-1".to_string()))
        );
    }

    #[test]
    fn late_second_tap_flushes_single_and_rearms() {
        let mut taps = TapDisambiguator::new();
        let t0 = Instant::now();

        assert_eq!(taps.on_tap("card-1", t0), None);
        // No poll ran before the next tap arrived past the deadline.
        assert_eq!(
            taps.on_tap("card-1", t0 + T + ms(50)),
            Some(TapOutcome::Single("card-1".to_string()))
        );
        assert!(taps.is_pending());
        assert_eq!(
            taps.poll(t0 + T + ms(50) + T),
            Some(TapOutcome::Single("card-1".to_string()))
        );
    }

    #[test]
    fn cancel_discards_pending_tap() {
        let mut taps = TapDisambiguator::new();
        let t0 = Instant::now();

        taps.on_tap("card-1", t0);
        taps.cancel();
        assert!(!taps.is_pending());
        assert_eq!(taps.poll(t0 + T), None);
    }

    #[test]
    fn tap_on_a_new_target_rearms_without_cross_card_double() {
        let mut taps = TapDisambiguator::with_window(T);
        let t0 = Instant::now();

        taps.on_tap("card-1", t0);
        assert_eq!(taps.on_tap("card-2", t0 + ms(100)), None);
        assert_eq!(
            taps.poll(t0 + ms(100) + T),
            Some(TapOutcome::Single("card-2".to_string()))
        );
    }
}
