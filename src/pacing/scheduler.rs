// SPDX-License-Identifier: MPL-2.0
//! Per-input step computation.

/// Computes how far one advance input moves playback, in seconds.
///
/// The span between the checkpoint and the end is shared evenly between the
/// required inputs, never going below `minimum_step`. When the duration is
/// unknown, or the media ends within `degenerate_span` of the checkpoint,
/// there is nothing sensible to divide and `minimum_step` is returned as is.
///
/// `required_inputs` must be positive; callers validate it beforehand.
///
/// # Example
///
/// ```
/// use checkpace::pacing::compute_step;
///
/// let step = compute_step(Some(30.0), 3.0, 25, 0.08, 0.2);
/// assert!((step - 1.08).abs() < 1e-9);
///
/// // Too short to pace: fall back to the floor.
/// assert_eq!(compute_step(Some(2.0), 3.0, 25, 0.08, 0.2), 0.08);
/// ```
#[must_use]
pub fn compute_step(
    duration_secs: Option<f64>,
    checkpoint_secs: f64,
    required_inputs: u32,
    minimum_step: f64,
    degenerate_span: f64,
) -> f64 {
    let Some(duration) = duration_secs.filter(|d| d.is_finite()) else {
        return minimum_step;
    };
    if duration <= checkpoint_secs + degenerate_span {
        return minimum_step;
    }

    let step = (duration - checkpoint_secs) / f64::from(required_inputs.max(1));
    step.max(minimum_step)
}

/// Clamps a seek target so it stays `epsilon` below the end of the media.
///
/// Without a known duration the target is only kept non-negative.
#[must_use]
pub fn clamp_target(target_secs: f64, duration_secs: Option<f64>, epsilon: f64) -> f64 {
    let clamped = match duration_secs {
        Some(duration) => target_secs.min(duration - epsilon),
        None => target_secs,
    };
    clamped.max(0.0)
}
