/// A percentage strictly inside (0, 100).
///
/// Derived margins at exactly 0% (no markdown) or 100% (free product) are
/// degenerate and rejected; callers keep the previous value instead. Raw
/// snapshot fields are plain `f64` and may carry anything the user typed;
/// only *calculated* values pass through this guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(f64);

impl Percentage {
    /// Accept only values strictly between 0 and 100. NaN is rejected.
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value < 100.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Fraction form, e.g. 18% -> 0.18.
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}
