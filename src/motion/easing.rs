/// Timing curve applied to a normalised progress value.
///
/// Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0` exactly, so an animation
/// that runs to completion always lands on its target values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^n`. Scroll-trigger libraries call exponent `n` "power(n-1)".
    PowerOut(i32),
    /// CSS style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Default for Easing {
    fn default() -> Self {
        Self::PowerOut(2)
    }
}

impl Easing {
    pub const EASE_OUT: Self = Self::PowerOut(2);
    pub const SMOOTH: Self = Self::CubicBezier(0.25, 0.4, 0.25, 1.0);
    pub const IN_OUT: Self = Self::CubicBezier(0.65, 0.0, 0.35, 1.0);
    /// "power2.out"
    pub const POWER2_OUT: Self = Self::PowerOut(3);
    /// "power3.out"
    pub const POWER3_OUT: Self = Self::PowerOut(4);

    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Self::Linear => t,
            Self::PowerOut(n) => 1.0 - (1.0 - t).powi(n.max(1)),
            Self::CubicBezier(x1, y1, x2, y2) => {
                let s = solve_bezier_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }

    /// CSS `transition-timing-function` value for the same curve.
    pub fn to_css(&self) -> String {
        match *self {
            Self::Linear => "linear".to_string(),
            Self::PowerOut(2) => "cubic-bezier(0.5, 1, 0.89, 1)".to_string(),
            Self::PowerOut(3) => "cubic-bezier(0.33, 1, 0.68, 1)".to_string(),
            Self::PowerOut(4) => "cubic-bezier(0.25, 1, 0.5, 1)".to_string(),
            Self::PowerOut(_) => "ease-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

// one dimension of a bezier with P0 = 0 and P3 = 1
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn solve_bezier_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-7 {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }
    // newton stalled, fall back to bisection
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..40 {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::PowerOut(2),
            Easing::PowerOut(3),
            Easing::POWER3_OUT,
            Easing::SMOOTH,
            Easing::IN_OUT,
        ]
    }

    #[test]
    fn test_endpoints_are_exact() {
        for curve in curves() {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?}");
            assert_eq!(curve.apply(-0.5), 0.0);
            assert_eq!(curve.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in curves() {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = curve.apply(i as f64 / 100.0);
                assert!(v + 1e-9 >= prev, "{curve:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        // fast start: more than half the distance covered at the midpoint
        assert!(Easing::PowerOut(2).apply(0.5) > 0.5);
        assert!(Easing::PowerOut(3).apply(0.5) > Easing::PowerOut(2).apply(0.5));
        assert!(Easing::POWER3_OUT.apply(0.5) > Easing::POWER2_OUT.apply(0.5));
        assert!(Easing::SMOOTH.apply(0.5) > 0.5);
        assert!((Easing::Linear.apply(0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bezier_matches_known_value() {
        // symmetric in-out curve passes through the centre
        let mid = Easing::IN_OUT.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-4, "got {mid}");
    }
}
