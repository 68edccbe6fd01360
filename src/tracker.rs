//! Live-position tracking: a two-state timer that periodically replaces the
//! selected shipment's position with one supplied by a position feed.
//!
//! The feed is an injected strategy so the simulated jitter source can be
//! swapped for a real telemetry adapter without touching the state machine.

use crate::geo::GeoPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the next vessel position. The default implementation simulates
/// movement; a production feed adapter implements the same contract.
pub trait PositionFeed {
    fn next_position(&mut self, previous: GeoPoint) -> GeoPoint;
}

/// Simulated feed: perturbs each axis by a uniform offset within
/// `max_offset_deg`, so consecutive positions never teleport.
pub struct JitterFeed {
    rng: StdRng,
    max_offset_deg: f64,
}

impl JitterFeed {
    pub fn new(max_offset_deg: f64) -> Self {
        JitterFeed {
            rng: StdRng::from_entropy(),
            max_offset_deg,
        }
    }

    pub fn seeded(max_offset_deg: f64, seed: u64) -> Self {
        JitterFeed {
            rng: StdRng::seed_from_u64(seed),
            max_offset_deg,
        }
    }
}

impl PositionFeed for JitterFeed {
    fn next_position(&mut self, previous: GeoPoint) -> GeoPoint {
        let d = self.max_offset_deg;
        GeoPoint::new(
            previous.lat + self.rng.gen_range(-d..=d),
            previous.lng + self.rng.gen_range(-d..=d),
        )
    }
}

enum TrackerState {
    Idle,
    Tracking { shipment_id: String, elapsed: f64 },
}

/// Idle/Tracking state machine for live tracking. The timer is only a
/// counter advanced from the frame loop; once `disable` (or a retarget to a
/// different shipment) has run, no further tick can fire because `advance`
/// is a no-op in Idle. Dropping the owning view drops the tracker with it.
pub struct LiveTracker {
    state: TrackerState,
    period_secs: f64,
}

impl LiveTracker {
    pub fn new(period_secs: f64) -> Self {
        LiveTracker {
            state: TrackerState::Idle,
            period_secs,
        }
    }

    /// Changes the tick period. Takes effect from the next tick; an armed
    /// timer keeps its elapsed time.
    pub fn set_period(&mut self, period_secs: f64) {
        self.period_secs = period_secs.max(1.0);
    }

    pub fn period(&self) -> f64 {
        self.period_secs
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackerState::Tracking { .. })
    }

    pub fn tracked_shipment(&self) -> Option<&str> {
        match &self.state {
            TrackerState::Tracking { shipment_id, .. } => Some(shipment_id),
            TrackerState::Idle => None,
        }
    }

    /// Arms the tick timer for the given shipment. Any previously armed
    /// timer is cancelled first so two shipments are never tracked at once.
    pub fn enable(&mut self, shipment_id: &str) {
        self.state = TrackerState::Tracking {
            shipment_id: shipment_id.to_string(),
            elapsed: 0.0,
        };
        log::debug!("live tracking enabled for {}", shipment_id);
    }

    /// Cancels the armed timer. Synchronous: after this returns, `advance`
    /// cannot emit a tick until `enable` is called again.
    pub fn disable(&mut self) {
        if self.is_tracking() {
            log::debug!("live tracking disabled");
        }
        self.state = TrackerState::Idle;
    }

    /// Called when the selected shipment identity changes. Tracking does not
    /// carry over to the new selection.
    pub fn on_shipment_changed(&mut self, new_id: Option<&str>) {
        match (&self.state, new_id) {
            (TrackerState::Tracking { shipment_id, .. }, Some(id)) if shipment_id == id => {}
            (TrackerState::Idle, _) => {}
            _ => self.disable(),
        }
    }

    /// Advances the timer by `dt` seconds. Returns the new position when a
    /// tick fires, at most one per call; returns None while Idle or between
    /// ticks.
    pub fn advance(
        &mut self,
        dt: f64,
        current: GeoPoint,
        feed: &mut dyn PositionFeed,
    ) -> Option<GeoPoint> {
        let TrackerState::Tracking { elapsed, .. } = &mut self.state else {
            return None;
        };
        *elapsed += dt;
        if *elapsed < self.period_secs {
            return None;
        }
        *elapsed -= self.period_secs;
        Some(feed.next_position(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFeed(GeoPoint);

    impl PositionFeed for FixedFeed {
        fn next_position(&mut self, _previous: GeoPoint) -> GeoPoint {
            self.0
        }
    }

    #[test]
    fn jitter_stays_within_bound_over_many_ticks() {
        let mut feed = JitterFeed::seeded(0.005, 42);
        let mut pos = GeoPoint::new(40.0, -60.0);
        for _ in 0..10_000 {
            let next = feed.next_position(pos);
            assert!((next.lat - pos.lat).abs() <= 0.005);
            assert!((next.lng - pos.lng).abs() <= 0.005);
            pos = next;
        }
    }

    #[test]
    fn idle_tracker_never_ticks() {
        let mut tracker = LiveTracker::new(15.0);
        let mut feed = FixedFeed(GeoPoint::new(1.0, 1.0));
        for _ in 0..100 {
            assert!(tracker.advance(60.0, GeoPoint::new(0.0, 0.0), &mut feed).is_none());
        }
    }

    #[test]
    fn tick_fires_once_per_period() {
        let mut tracker = LiveTracker::new(15.0);
        let mut feed = FixedFeed(GeoPoint::new(1.0, 1.0));
        tracker.enable("PRD001");
        let here = GeoPoint::new(0.0, 0.0);
        assert!(tracker.advance(14.9, here, &mut feed).is_none());
        assert_eq!(tracker.advance(0.2, here, &mut feed), Some(GeoPoint::new(1.0, 1.0)));
        // Timer restarts after the tick.
        assert!(tracker.advance(14.0, here, &mut feed).is_none());
    }

    #[test]
    fn disable_before_first_tick_cancels_cleanly() {
        let mut tracker = LiveTracker::new(15.0);
        let mut feed = FixedFeed(GeoPoint::new(1.0, 1.0));
        tracker.enable("PRD001");
        assert!(tracker.advance(1.0, GeoPoint::new(0.0, 0.0), &mut feed).is_none());
        tracker.disable();
        // Even a long idle stretch after cancellation produces no tick.
        for _ in 0..100 {
            assert!(tracker.advance(60.0, GeoPoint::new(0.0, 0.0), &mut feed).is_none());
        }
    }

    #[test]
    fn changing_shipment_identity_cancels_tracking() {
        let mut tracker = LiveTracker::new(15.0);
        tracker.enable("PRD001");
        tracker.on_shipment_changed(Some("PRD002"));
        assert!(!tracker.is_tracking());

        tracker.enable("PRD002");
        tracker.on_shipment_changed(Some("PRD002"));
        assert!(tracker.is_tracking(), "same identity keeps tracking");

        tracker.on_shipment_changed(None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn re_enabling_rearms_from_zero() {
        let mut tracker = LiveTracker::new(15.0);
        let mut feed = FixedFeed(GeoPoint::new(1.0, 1.0));
        tracker.enable("PRD001");
        assert!(tracker.advance(14.0, GeoPoint::new(0.0, 0.0), &mut feed).is_none());
        tracker.enable("PRD001");
        // The old accumulation is gone after re-arming.
        assert!(tracker.advance(14.0, GeoPoint::new(0.0, 0.0), &mut feed).is_none());
        assert!(tracker.advance(1.5, GeoPoint::new(0.0, 0.0), &mut feed).is_some());
    }
}
