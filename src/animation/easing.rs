use serde::{Deserialize, Serialize};

use crate::shared::PickerError;

const BEZIER_ITERATIONS: usize = 48;

/// Progress curves for spin animations.
///
/// Every curve maps `[0, 1]` onto `[0, 1]`, is non-decreasing, and for the
/// ease-out variants arrives at the end with zero velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseOutCubic,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Curve used by the wheel
    pub const WHEEL: Easing = Easing::CubicBezier {
        x1: 0.15,
        y1: 0.25,
        x2: 0.25,
        y2: 1.0,
    };

    /// Curve used by the reel
    pub const REEL: Easing = Easing::CubicBezier {
        x1: 0.1,
        y1: 0.3,
        x2: 0.2,
        y2: 1.0,
    };

    /// Rejects curves that could overshoot, reverse, or finish with
    /// non-zero velocity.
    pub fn validate(&self) -> Result<(), PickerError> {
        match *self {
            Easing::Linear => Err(PickerError::InvalidEasing(
                "linear easing arrives at the target at full speed".to_string(),
            )),
            Easing::EaseOutCubic => Ok(()),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                let unit = |v: f64| (0.0..=1.0).contains(&v);
                if !(unit(x1) && unit(x2)) {
                    return Err(PickerError::InvalidEasing(format!(
                        "x control points must lie in [0, 1], got {} and {}",
                        x1, x2
                    )));
                }
                if !(unit(y1) && unit(y2) && y1 <= y2) {
                    return Err(PickerError::InvalidEasing(format!(
                        "y control points must satisfy 0 <= y1 <= y2 <= 1, got {} and {}",
                        y1, y2
                    )));
                }
                if y2 != 1.0 || x2 >= 1.0 {
                    return Err(PickerError::InvalidEasing(
                        "ease-out curves need y2 = 1 and x2 < 1".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Eased progress for linear progress `t`
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_parameter(t, x1, x2);
                bezier(s, y1, y2).clamp(0.0, 1.0)
            }
        }
    }
}

/// One coordinate of a cubic bezier with end points 0 and 1
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Finds the curve parameter whose x coordinate is `x`.
///
/// x(s) is monotonic when both x control points lie in [0, 1], so bisection
/// always converges.
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..BEZIER_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn samples(easing: Easing) -> Vec<f64> {
        (0..=1000).map(|i| easing.apply(i as f64 / 1000.0)).collect()
    }

    #[rstest]
    #[case(Easing::Linear)]
    #[case(Easing::EaseOutCubic)]
    #[case(Easing::WHEEL)]
    #[case(Easing::REEL)]
    fn test_curve_is_monotonic_and_bounded(#[case] easing: Easing) {
        let values = samples(easing);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1000], 1.0);
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0], "curve reversed: {:?}", pair);
            assert!(pair[1] <= 1.0, "curve overshot: {}", pair[1]);
        }
    }

    #[rstest]
    #[case(Easing::EaseOutCubic)]
    #[case(Easing::WHEEL)]
    #[case(Easing::REEL)]
    fn test_ease_out_decelerates_to_rest(#[case] easing: Easing) {
        let h = 1e-4;
        let early = (easing.apply(0.1 + h) - easing.apply(0.1)) / h;
        let late = (easing.apply(1.0) - easing.apply(1.0 - h)) / h;
        assert!(late < early, "late velocity {} >= early {}", late, early);
        assert!(late < 0.05, "terminal velocity {} not near zero", late);
    }

    #[test]
    fn test_builtin_curves_validate() {
        assert!(Easing::WHEEL.validate().is_ok());
        assert!(Easing::REEL.validate().is_ok());
        assert!(Easing::EaseOutCubic.validate().is_ok());
    }

    #[rstest]
    #[case(Easing::CubicBezier { x1: 0.2, y1: 1.4, x2: 0.3, y2: 1.0 })]
    #[case(Easing::CubicBezier { x1: -0.1, y1: 0.2, x2: 0.3, y2: 1.0 })]
    #[case(Easing::CubicBezier { x1: 0.2, y1: 0.5, x2: 0.3, y2: 0.4 })]
    #[case(Easing::CubicBezier { x1: 0.2, y1: 0.5, x2: 0.3, y2: 0.9 })]
    #[case(Easing::Linear)]
    fn test_overshooting_curves_are_rejected(#[case] easing: Easing) {
        assert!(matches!(easing.validate(), Err(PickerError::InvalidEasing(_))));
    }

    #[test]
    fn test_easing_deserializes_from_json() {
        let easing: Easing =
            serde_json::from_str(r#"{"kind":"cubicBezier","x1":0.1,"y1":0.3,"x2":0.2,"y2":1.0}"#)
                .unwrap();
        assert_eq!(easing, Easing::REEL);
    }
}
