//! Float/integer conversions between true positions and the pixel grid.

/// Round a finite `f64` to the nearest `i32`, halves away from zero.
///
/// Values outside the `i32` domain saturate; NaN maps to zero.
///
/// # Examples
/// ```
/// use flipside::numeric::round_to_i32;
/// assert_eq!(round_to_i32(2.5), 3);
/// assert_eq!(round_to_i32(-2.5), -3);
/// assert_eq!(round_to_i32(7.49), 7);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "Rounded and clamped to the i32 range first."
)]
#[must_use]
pub fn round_to_i32(value: f64) -> i32 {
    debug_assert!(value.is_finite(), "expected finite f64 for i32 rounding");
    let rounded = value.round();
    let clamped = rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Convert a tick count into `f64` for progress ratios.
#[must_use]
pub fn ticks_to_f64(ticks: u32) -> f64 {
    f64::from(ticks)
}
