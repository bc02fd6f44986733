//! Timing curves mapping linear progress to eased progress.
//!
//! Named curves are cubic-bezier presets; evaluation inverts the x polynomial
//! by bisection and reads y at the recovered parameter.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::leaf::{check_finite, check_unit};

const EASE_IN: [f32; 4] = [0.42, 0.0, 1.0, 1.0];
const EASE_OUT: [f32; 4] = [0.0, 0.0, 0.58, 1.0];
const EASE_IN_OUT: [f32; 4] = [0.42, 0.0, 0.58, 1.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInEaseOut,
    /// Control points (x1, y1, x2, y2). x1 and x2 must lie in [0,1] for the
    /// curve to be a function of time; build it with
    /// [`TimingCurve::cubic_bezier`] to have that checked.
    CubicBezier([f32; 4]),
}

impl TimingCurve {
    /// Checked bezier curve: x1 and x2 within [0,1], y1 and y2 finite.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<TimingCurve> {
        TimingCurve::CubicBezier([x1, y1, x2, y2]).check()
    }

    /// Returns the curve unchanged if its control points are usable.
    pub(crate) fn check(self) -> Result<TimingCurve> {
        if let TimingCurve::CubicBezier([x1, y1, x2, y2]) = self {
            check_unit("curve", "x1", x1)?;
            check_unit("curve", "x2", x2)?;
            check_finite("curve", "y1", y1)?;
            check_finite("curve", "y2", y2)?;
        }
        Ok(self)
    }

    /// Eased progress for linear progress `t` (clamped to [0,1]).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingCurve::Linear => t,
            other => {
                let [x1, y1, x2, y2] = other.control_points();
                bezier_ease_t(t, x1, y1, x2, y2)
            }
        }
    }

    /// The curve that plays this one backwards: g(t) = 1 - f(1 - t).
    pub fn mirrored(&self) -> TimingCurve {
        match *self {
            TimingCurve::Linear => TimingCurve::Linear,
            TimingCurve::EaseIn => TimingCurve::EaseOut,
            TimingCurve::EaseOut => TimingCurve::EaseIn,
            TimingCurve::EaseInEaseOut => TimingCurve::EaseInEaseOut,
            TimingCurve::CubicBezier([x1, y1, x2, y2]) => {
                TimingCurve::CubicBezier([1.0 - x2, 1.0 - y2, 1.0 - x1, 1.0 - y1])
            }
        }
    }

    pub fn control_points(&self) -> [f32; 4] {
        match *self {
            TimingCurve::Linear => [0.0, 0.0, 1.0, 1.0],
            TimingCurve::EaseIn => EASE_IN,
            TimingCurve::EaseOut => EASE_OUT,
            TimingCurve::EaseInEaseOut => EASE_IN_OUT,
            TimingCurve::CubicBezier(ctrl) => ctrl,
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // x is monotonic for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
