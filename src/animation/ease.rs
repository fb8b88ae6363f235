/// Normalized-time remapping used by phase formulas.
///
/// Inputs are expected in `[0, 1]`; clamping is the caller's job (see
/// [`crate::animation::timeline::FrameCursor::progress`], which is already clamped).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// Cubic smoothstep `t²(3 − 2t)`.
    Smoothstep,
    /// Quintic smootherstep `t³(6t² − 15t + 10)`.
    Smootherstep,
}

impl Ease {
    /// Apply the curve to `t`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Smoothstep => smoothstep(t),
            Self::Smootherstep => smootherstep(t),
        }
    }
}

/// Cubic ease-in-out: `t²(3 − 2t)`.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic ease-in-out: `t³(t(6t − 15) + 10)`.
pub fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (6.0 * t - 15.0) + 10.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
