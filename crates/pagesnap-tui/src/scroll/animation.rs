//! Scroll animation controller.
//!
//! Combines easing functions and timing utilities into the smooth-scroll
//! primitive the snap controller drives. Offsets are pixels; the animator
//! owns the viewport's current scroll position.

use std::time::{Duration, Instant};

use pagesnap_core::SmoothScroll;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting scroll position
    from: f64,
    /// Target scroll position
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Scroll animation controller.
///
/// Call [`ScrollAnimator::scroll_to`] to begin an animation toward an
/// absolute offset, [`ScrollAnimator::scroll_by`] for relative free
/// scrolling, then [`ScrollAnimator::update`] each frame to advance the
/// interpolated position. Targets are clamped to `[0, max_scroll]`, so a
/// negative snap target lands at the document top.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: f64,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: f64,
    /// Largest reachable scroll offset (content height - viewport height)
    max_scroll: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    /// Create a new scroll animator with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0.0,
            pending_delta: 0.0,
            max_scroll: 0.0,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta).
    /// Use this to determine if the host needs a high frame rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    /// Get the current interpolated scroll position
    #[inline]
    pub fn current_scroll(&self) -> f64 {
        self.current_scroll
    }

    /// Set the scrollable range; the current position is re-clamped so a
    /// shrinking document cannot leave the viewport past the end.
    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.current_scroll = self.current_scroll.clamp(0.0, self.max_scroll);
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: f64) {
        self.animation = None;
        self.current_scroll = scroll.clamp(0.0, self.max_scroll);
        self.pending_delta = 0.0;
    }

    /// Start a scroll animation to an absolute target position.
    ///
    /// Out-of-range targets clamp to `[0, max_scroll]`. If smooth
    /// scrolling is disabled, jumps immediately.
    pub fn scroll_to(&mut self, target: f64) {
        let target = target.clamp(0.0, self.max_scroll);

        if !self.config.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        // Start from the current visible position
        let from = self.current_scroll;

        // Skip animation if already at target
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta amount (positive = toward later content).
    ///
    /// Multiple scroll events within the same frame are batched together
    /// for smoother handling of rapid input.
    pub fn scroll_by(&mut self, delta: f64) {
        if !self.config.is_smooth() {
            self.current_scroll = (self.current_scroll + delta).clamp(0.0, self.max_scroll);
            self.animation = None;
            return;
        }

        // Accumulate delta for batching
        self.pending_delta += delta;
    }

    /// Update animation state and return the current scroll position.
    ///
    /// Call this every frame to advance the animation.
    pub fn update(&mut self) -> f64 {
        // Process any pending scroll delta
        if self.pending_delta != 0.0 {
            let target = self.target_scroll();
            let new_target = (target + self.pending_delta).clamp(0.0, self.max_scroll);
            self.pending_delta = 0.0;

            // Start or update animation to the new target
            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: Instant::now(),
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        // Update active animation
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current_scroll = anim.to.clamp(0.0, self.max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration);
                let eased_t = anim.easing.apply(t);
                self.current_scroll =
                    lerp(anim.from, anim.to, eased_t).clamp(0.0, self.max_scroll);
            }
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }
}

impl SmoothScroll for ScrollAnimator {
    fn scroll_to(&mut self, target: f64) {
        ScrollAnimator::scroll_to(self, target);
    }
}
