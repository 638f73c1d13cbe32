/// Round a monetary amount to 2 decimal places, half-up.
///
/// Works on `value * 100` so that `f64::round` (half away from zero) gives
/// half-up behaviour over the non-negative monetary domain. Every monetary
/// output in the workspace goes through this, so totals agree bit-for-bit
/// with the backend's recompute.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
