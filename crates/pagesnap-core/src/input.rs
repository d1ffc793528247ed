//! Wheel and keyboard input, freed from the platform envelope.

/// A wheel-class input event.
///
/// Modern wheel events carry `wheel_delta`; legacy scroll events carry
/// only `detail`, with the opposite sign convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelEvent {
    /// Primary wheel delta; positive scrolls toward earlier content.
    pub wheel_delta: Option<f64>,
    /// Legacy fallback delta; positive scrolls toward later content.
    pub detail: f64,
    /// Whether ctrl was held. Ctrl+wheel is a zoom chord and is never
    /// hijacked.
    pub ctrl: bool,
}

impl WheelEvent {
    /// A modern wheel event with the given delta.
    pub fn new(wheel_delta: f64) -> Self {
        Self {
            wheel_delta: Some(wheel_delta),
            detail: 0.0,
            ctrl: false,
        }
    }

    /// A legacy scroll event carrying only `detail`.
    pub fn legacy(detail: f64) -> Self {
        Self {
            wheel_delta: None,
            detail,
            ctrl: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// Navigation keys the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Scroll toward later content, as a wheel step of -1
    ArrowDown,
    /// Scroll toward earlier content, as a wheel step of +1
    ArrowUp,
}

/// Clamp a raw wheel delta to a unit direction.
///
/// Reads `wheel_delta`, falling back to `-detail` when absent. Returns
/// exactly -1.0, 0.0 or +1.0; zero and non-finite raw values normalize
/// to 0.0.
pub fn normalize_delta(event: &WheelEvent) -> f64 {
    let raw = event.wheel_delta.unwrap_or(-event.detail);
    if raw > 0.0 {
        1.0
    } else if raw < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_for_nonzero_deltas() {
        assert_eq!(normalize_delta(&WheelEvent::new(120.0)), 1.0);
        assert_eq!(normalize_delta(&WheelEvent::new(-120.0)), -1.0);
        assert_eq!(normalize_delta(&WheelEvent::new(0.4)), 1.0);
        assert_eq!(normalize_delta(&WheelEvent::new(-0.4)), -1.0);
    }

    #[test]
    fn test_legacy_detail_fallback_flips_sign() {
        assert_eq!(normalize_delta(&WheelEvent::legacy(3.0)), -1.0);
        assert_eq!(normalize_delta(&WheelEvent::legacy(-3.0)), 1.0);
    }

    #[test]
    fn test_present_wheel_delta_wins_over_detail() {
        let event = WheelEvent {
            wheel_delta: Some(120.0),
            detail: 3.0,
            ctrl: false,
        };
        assert_eq!(normalize_delta(&event), 1.0);
    }

    #[test]
    fn test_zero_and_non_finite_normalize_to_zero() {
        assert_eq!(normalize_delta(&WheelEvent::new(0.0)), 0.0);
        assert_eq!(normalize_delta(&WheelEvent::legacy(0.0)), 0.0);
        assert_eq!(normalize_delta(&WheelEvent::new(f64::NAN)), 0.0);
    }
}
