//! Bounce profile generation.

use crate::error::AnimationError;

/// Generate a sampled bounce curve for profile-driven playback.
///
/// The curve starts at phase `-0.5 + start` (0 starts at the bounce,
/// 0.5 at the top), folds the phase every time it passes 1, and decays
/// the bounce extent by `1 - decay` on each fold while stretching the
/// sampling step so later, smaller bounces keep their shape. Sampling
/// stops after `bounces` folds and a final sentinel sample of exactly
/// `1.0` is appended, so playback always lands at the destination.
///
/// `decay` must be in `[0, 1)`; a decay of 1 would collapse the step
/// scaling.
///
/// # Example
///
/// ```
/// use marmot::widget::animation::generate_bounce_profile;
///
/// let profile = generate_bounce_profile(3, 0.5, 0.0).unwrap();
/// assert_eq!(*profile.last().unwrap(), 1.0);
/// ```
pub fn generate_bounce_profile(
    bounces: usize,
    decay: f32,
    start: f32,
) -> Result<Vec<f32>, AnimationError> {
    if !(0.0..1.0).contains(&decay) {
        return Err(AnimationError::DecayOutOfRange { decay });
    }

    let mut output = Vec::new();
    let mut x = -0.5 + start;
    let mut extent = 1.0_f32;
    let mut bounce_count = 0;
    let mut step = 0.02_f32;

    while bounce_count < bounces {
        let adjusted_delta = 1.0 - (1.0 - x * x) * extent;
        output.push(adjusted_delta);
        x += step;
        while x > 1.0 {
            x -= 2.0;
            extent *= 1.0 - decay;
            bounce_count += 1;
            step /= 1.0 - decay * decay;
        }
    }

    output.push(1.0);
    Ok(output)
}
