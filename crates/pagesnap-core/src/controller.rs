//! The snap decision state machine.
//!
//! For each wheel or arrow-key input the controller decides whether the
//! host must suppress its default scroll and whether to issue a smooth
//! scroll to the next part boundary. Parts are measured once at
//! construction; [`SnapController::refresh`] re-measures on demand.

use std::time::Instant;

use tracing::debug;

use crate::config::SnapConfig;
use crate::input::{normalize_delta, NavKey, WheelEvent};
use crate::part::{Part, PartSource};
use crate::viewport::{SmoothScroll, ViewportMetrics};

/// Decides, per input event, whether default scrolling is suppressed and
/// where the viewport animates next.
///
/// Both timing windows (wheel throttle and post-snap settle) are deadline
/// fields owned by the controller, so they are dropped with it and never
/// outlive their instance.
pub struct SnapController {
    config: SnapConfig,
    parts: Vec<Part>,
    /// Timestamp of the last gated wheel input. Updated on every wheel
    /// event that passes the width/ctrl gates, whatever the outcome.
    last_wheel: Option<Instant>,
    /// While `now` is before this deadline, a snap animation issued by
    /// this controller is presumed in flight and further snap decisions
    /// are suppressed.
    settle_until: Option<Instant>,
}

impl SnapController {
    /// Query `source` once with the configured selector and track the
    /// resulting parts. Zero matches is valid: the controller becomes a
    /// pass-through for all scroll input.
    pub fn new(config: SnapConfig, source: &impl PartSource) -> Self {
        let parts = source.query(&config.part);
        debug!(selector = %config.part, parts = parts.len(), "snap controller ready");
        Self {
            config,
            parts,
            last_wheel: None,
            settle_until: None,
        }
    }

    /// The tracked parts, in document order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Re-query and re-measure the tracked parts. Never called
    /// implicitly: without it, measurements stay frozen at construction
    /// time even across layout changes.
    pub fn refresh(&mut self, source: &impl PartSource) {
        self.parts = source.query(&self.config.part);
        debug!(parts = self.parts.len(), "parts re-measured");
    }

    /// True while a snap issued by this controller is presumed in flight.
    pub fn is_settling(&self) -> bool {
        self.settling(Instant::now())
    }

    /// Entry point for every wheel-class event. Returns whether the host
    /// must suppress its default scroll for this event.
    pub fn on_wheel(
        &mut self,
        event: &WheelEvent,
        view: &impl ViewportMetrics,
        scroller: &mut impl SmoothScroll,
    ) -> bool {
        self.on_wheel_at(Instant::now(), event, view, scroller)
    }

    /// Arrow keys behave as unit wheel steps and always consume the key.
    ///
    /// The width/ctrl gates and the throttle bookkeeping apply to wheel
    /// input only; keyboard input reaches the snap decision directly.
    pub fn on_key(
        &mut self,
        key: NavKey,
        view: &impl ViewportMetrics,
        scroller: &mut impl SmoothScroll,
    ) -> bool {
        self.on_key_at(Instant::now(), key, view, scroller)
    }

    fn on_wheel_at(
        &mut self,
        now: Instant,
        event: &WheelEvent,
        view: &impl ViewportMetrics,
        scroller: &mut impl SmoothScroll,
    ) -> bool {
        if view.width() <= self.config.min_viewport_width {
            return false;
        }
        if event.ctrl {
            return false;
        }

        self.evaluate(now, normalize_delta(event), view, scroller);

        // Record-then-check runs on every event that reaches this point,
        // even when the settle window alone already decides suppression.
        let throttled = self.record_wheel(now);
        self.settling(now) || throttled
    }

    fn on_key_at(
        &mut self,
        now: Instant,
        key: NavKey,
        view: &impl ViewportMetrics,
        scroller: &mut impl SmoothScroll,
    ) -> bool {
        let delta = match key {
            NavKey::ArrowDown => -1.0,
            NavKey::ArrowUp => 1.0,
        };
        self.evaluate(now, delta, view, scroller);
        true
    }

    fn settling(&self, now: Instant) -> bool {
        self.settle_until.is_some_and(|deadline| now < deadline)
    }

    /// Record `now` as the latest wheel input and report whether the
    /// previous one fell inside the throttle window.
    fn record_wheel(&mut self, now: Instant) -> bool {
        let prev = self.last_wheel.replace(now);
        prev.is_some_and(|prev| now.duration_since(prev) < self.config.wheel_throttle())
    }

    /// The snapping decision: scan parts in document order and act on the
    /// first one whose bottom edge is still below the near-top threshold.
    /// Later parts are never considered.
    fn evaluate(
        &mut self,
        now: Instant,
        delta: f64,
        view: &impl ViewportMetrics,
        scroller: &mut impl SmoothScroll,
    ) {
        if self.settling(now) {
            return;
        }
        if delta == 0.0 {
            return;
        }

        let s = view.scroll_offset();
        let h = view.height();
        // The bias relaxes the boundary tests in the scroll direction so
        // a boundary the user just crossed does not re-trigger.
        let bias = self.config.edge_bias * delta;

        let Some(part) = self.parts.iter().copied().find(|p| p.bottom() > s - bias) else {
            return;
        };

        if part.bottom() < s + h - bias {
            // The part's bottom edge sits inside the viewport: it is the
            // next snap target.
            self.snap_to(now, part.bottom(), delta, h, scroller);
        } else {
            self.prevent_overscroll(now, part, delta, s, h, scroller);
        }
    }

    /// The first-matching part's bottom edge is already past the
    /// viewport. Snap only when one more full wheel step would overshoot
    /// the part boundary; otherwise let the plain scroll proceed.
    fn prevent_overscroll(
        &mut self,
        now: Instant,
        part: Part,
        delta: f64,
        s: f64,
        h: f64,
        scroller: &mut impl SmoothScroll,
    ) {
        if delta < 0.0 && part.bottom() < s + h + self.config.wheel_step {
            self.snap_to(now, part.bottom() - h, 0.0, h, scroller);
        } else if delta > 0.0 && part.offset > s - self.config.wheel_step {
            self.snap_to(now, part.offset, delta, h, scroller);
        }
    }

    /// Issue the snap animation and open the settle window.
    ///
    /// Moving toward earlier content aligns against the viewport bottom,
    /// so a raw top offset shifts up by one viewport height first. The
    /// resulting target may be negative; the scroll surface clamps it.
    fn snap_to(
        &mut self,
        now: Instant,
        mut target: f64,
        delta: f64,
        viewport_height: f64,
        scroller: &mut impl SmoothScroll,
    ) {
        if delta > 0.0 {
            target -= viewport_height;
        }
        debug!(snap_target = target, "snap issued");
        scroller.scroll_to(target);
        self.settle_until = Some(now + self.config.settle());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedView {
        s: f64,
        h: f64,
        w: f64,
    }

    impl ViewportMetrics for FixedView {
        fn scroll_offset(&self) -> f64 {
            self.s
        }
        fn height(&self) -> f64 {
            self.h
        }
        fn width(&self) -> f64 {
            self.w
        }
    }

    #[derive(Default)]
    struct RecordingScroller {
        targets: Vec<f64>,
    }

    impl SmoothScroll for RecordingScroller {
        fn scroll_to(&mut self, target: f64) {
            self.targets.push(target);
        }
    }

    struct FixedParts(Vec<Part>);

    impl PartSource for FixedParts {
        fn query(&self, _selector: &str) -> Vec<Part> {
            self.0.clone()
        }
    }

    fn controller(parts: &[(f64, f64)]) -> SnapController {
        let source = FixedParts(parts.iter().map(|&(o, h)| Part::new(o, h)).collect());
        SnapController::new(SnapConfig::default(), &source)
    }

    fn view(s: f64, h: f64, w: f64) -> FixedView {
        FixedView { s, h, w }
    }

    fn wheel_down() -> WheelEvent {
        WheelEvent::new(-120.0)
    }

    fn wheel_up() -> WheelEvent {
        WheelEvent::new(120.0)
    }

    #[test]
    fn test_snaps_to_part_bottom_inside_viewport() {
        let mut ctrl = controller(&[(0.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let suppress = ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 1200.0), &mut scroller);

        assert_eq!(scroller.targets, vec![400.0]);
        assert!(suppress);
    }

    #[test]
    fn test_overscroll_down_aligns_part_bottom_to_viewport_bottom() {
        // Part bottom (800) is below the viewport bottom threshold, but a
        // 300px wheel step would overshoot it: snap to 800 - 600 = 200.
        let mut ctrl = controller(&[(0.0, 800.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let suppress = ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 1200.0), &mut scroller);

        assert_eq!(scroller.targets, vec![200.0]);
        assert!(suppress);
    }

    #[test]
    fn test_overscroll_up_shifts_target_by_viewport_height() {
        // Scrolling up from the top: the part top (0) would end up below
        // the viewport top within one wheel step, so the raw target is
        // the part top shifted up by one viewport height. Negative
        // targets are the scroll surface's problem to clamp.
        let mut ctrl = controller(&[(0.0, 800.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let suppress = ctrl.on_wheel_at(t0, &wheel_up(), &view(0.0, 600.0, 1200.0), &mut scroller);

        assert_eq!(scroller.targets, vec![-600.0]);
        assert!(suppress);
    }

    #[test]
    fn test_first_matching_part_wins() {
        // Both parts pass the near-top test; only the first may act.
        let mut ctrl = controller(&[(0.0, 400.0), (400.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 1200.0), &mut scroller);

        assert_eq!(scroller.targets, vec![400.0]);
    }

    #[test]
    fn test_no_action_when_part_far_from_boundary() {
        // Part bottom is more than a wheel step below the viewport
        // bottom: plain scrolling proceeds, nothing is issued.
        let mut ctrl = controller(&[(0.0, 2000.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let suppress = ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 1200.0), &mut scroller);

        assert!(scroller.targets.is_empty());
        assert!(!suppress);
    }

    #[test]
    fn test_viewport_width_gate_is_inclusive() {
        // Exactly 900 is disabled, and a disabled event must not touch
        // the throttle state: a wide event right after it sees no
        // previous timestamp and is not suppressed.
        let mut ctrl = controller(&[]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let narrow = ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 900.0), &mut scroller);
        let wide = ctrl.on_wheel_at(
            t0 + Duration::from_millis(10),
            &wheel_down(),
            &view(0.0, 600.0, 1200.0),
            &mut scroller,
        );

        assert!(!narrow);
        assert!(!wide);
        assert!(scroller.targets.is_empty());
    }

    #[test]
    fn test_ctrl_wheel_passes_through_untouched() {
        let mut ctrl = controller(&[(0.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let first = ctrl.on_wheel_at(
            t0,
            &wheel_down().with_ctrl(),
            &view(0.0, 600.0, 1200.0),
            &mut scroller,
        );
        // No snap, no settle, no throttle timestamp recorded.
        let second = ctrl.on_wheel_at(
            t0 + Duration::from_millis(10),
            &WheelEvent::new(0.0),
            &view(0.0, 600.0, 1200.0),
            &mut scroller,
        );

        assert!(!first);
        assert!(!second);
        assert!(scroller.targets.is_empty());
    }

    #[test]
    fn test_throttle_window() {
        let mut ctrl = controller(&[]);
        let mut scroller = RecordingScroller::default();
        let view = view(0.0, 600.0, 1200.0);
        let t0 = Instant::now();

        assert!(!ctrl.on_wheel_at(t0, &wheel_down(), &view, &mut scroller));
        assert!(ctrl.on_wheel_at(t0 + Duration::from_millis(50), &wheel_down(), &view, &mut scroller));
        assert!(!ctrl.on_wheel_at(t0 + Duration::from_millis(200), &wheel_down(), &view, &mut scroller));
    }

    #[test]
    fn test_throttle_timestamp_updates_even_when_throttled() {
        let mut ctrl = controller(&[]);
        let mut scroller = RecordingScroller::default();
        let view = view(0.0, 600.0, 1200.0);
        let t0 = Instant::now();

        ctrl.on_wheel_at(t0, &wheel_down(), &view, &mut scroller);
        // 90ms later: throttled, but the timestamp moves to t0+90.
        assert!(ctrl.on_wheel_at(t0 + Duration::from_millis(90), &wheel_down(), &view, &mut scroller));
        // 180ms is 90ms after the *second* event, so still throttled.
        assert!(ctrl.on_wheel_at(t0 + Duration::from_millis(180), &wheel_down(), &view, &mut scroller));
    }

    #[test]
    fn test_settle_window_suppresses_further_snaps() {
        let mut ctrl = controller(&[(0.0, 400.0), (400.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let view = view(0.0, 600.0, 1200.0);
        let t0 = Instant::now();

        assert!(ctrl.on_wheel_at(t0, &wheel_down(), &view, &mut scroller));
        assert_eq!(scroller.targets.len(), 1);

        // Mid-settle: the decision is skipped entirely, but the event is
        // still suppressed.
        assert!(ctrl.on_wheel_at(t0 + Duration::from_millis(250), &wheel_down(), &view, &mut scroller));
        assert_eq!(scroller.targets.len(), 1);

        // After the settle window a new snap may be issued.
        assert!(ctrl.on_wheel_at(t0 + Duration::from_millis(600), &wheel_down(), &view, &mut scroller));
        assert_eq!(scroller.targets.len(), 2);
    }

    #[test]
    fn test_settling_flips_synchronously_and_expires_at_deadline() {
        let mut ctrl = controller(&[(0.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        assert!(!ctrl.settling(t0));
        ctrl.on_wheel_at(t0, &wheel_down(), &view(0.0, 600.0, 1200.0), &mut scroller);
        assert!(ctrl.settling(t0));
        assert!(ctrl.settling(t0 + Duration::from_millis(499)));
        assert!(!ctrl.settling(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_empty_parts_never_snap() {
        let mut ctrl = controller(&[]);
        let mut scroller = RecordingScroller::default();
        let view = view(500.0, 600.0, 1200.0);
        let t0 = Instant::now();

        for i in 0..5 {
            ctrl.on_wheel_at(t0 + Duration::from_millis(i * 200), &wheel_down(), &view, &mut scroller);
        }

        assert!(scroller.targets.is_empty());
        assert!(!ctrl.is_settling());
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let mut ctrl = controller(&[(0.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let suppress = ctrl.on_wheel_at(
            t0,
            &WheelEvent::new(0.0),
            &view(0.0, 600.0, 1200.0),
            &mut scroller,
        );

        assert!(scroller.targets.is_empty());
        assert!(!suppress);
    }

    #[test]
    fn test_arrow_down_behaves_as_wheel_down() {
        let mut ctrl = controller(&[(0.0, 800.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let consumed = ctrl.on_key_at(t0, NavKey::ArrowDown, &view(0.0, 600.0, 1200.0), &mut scroller);

        assert!(consumed);
        assert_eq!(scroller.targets, vec![200.0]);
    }

    #[test]
    fn test_arrow_up_behaves_as_wheel_up() {
        let mut ctrl = controller(&[(0.0, 800.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let consumed = ctrl.on_key_at(t0, NavKey::ArrowUp, &view(0.0, 600.0, 1200.0), &mut scroller);

        assert!(consumed);
        assert_eq!(scroller.targets, vec![-600.0]);
    }

    #[test]
    fn test_arrow_keys_bypass_viewport_width_gate() {
        // The width/ctrl gates apply to wheel input only: arrow keys
        // snap even on a narrow viewport. Kept deliberately; this test
        // documents the asymmetry.
        let mut ctrl = controller(&[(0.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        let consumed = ctrl.on_key_at(t0, NavKey::ArrowDown, &view(0.0, 600.0, 640.0), &mut scroller);

        assert!(consumed);
        assert_eq!(scroller.targets, vec![400.0]);
    }

    #[test]
    fn test_refresh_remeasures_parts() {
        let before = FixedParts(vec![Part::new(0.0, 400.0)]);
        let after = FixedParts(vec![Part::new(0.0, 400.0), Part::new(400.0, 300.0)]);

        let mut ctrl = SnapController::new(SnapConfig::default(), &before);
        assert_eq!(ctrl.parts().len(), 1);

        ctrl.refresh(&after);
        assert_eq!(ctrl.parts().len(), 2);
        assert_eq!(ctrl.parts()[1], Part::new(400.0, 300.0));
    }

    #[test]
    fn test_measurements_frozen_without_refresh() {
        let source = FixedParts(vec![Part::new(0.0, 400.0)]);
        let ctrl = SnapController::new(SnapConfig::default(), &source);

        // The source is consulted at construction only.
        assert_eq!(ctrl.parts(), &[Part::new(0.0, 400.0)]);
    }

    #[test]
    fn test_edge_bias_skips_boundary_just_crossed() {
        // Sitting exactly on a part boundary (s = part bottom = 400):
        // scrolling down biases the near-top test by 10px past the
        // boundary, so the first part no longer matches and the second
        // part is the one evaluated.
        let mut ctrl = controller(&[(0.0, 400.0), (400.0, 400.0)]);
        let mut scroller = RecordingScroller::default();
        let t0 = Instant::now();

        ctrl.on_wheel_at(t0, &wheel_down(), &view(400.0, 600.0, 1200.0), &mut scroller);

        // Second part bottom (800) is inside [410, 1010): snap to it.
        assert_eq!(scroller.targets, vec![800.0]);
    }
}
