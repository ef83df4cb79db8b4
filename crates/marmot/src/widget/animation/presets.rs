//! Factories for the built-in animation kinds.
//!
//! Each factory validates its parameters and returns a ready-to-attach
//! [`Animation`]. Misconfiguration (a non-positive duration, an absurd
//! bounce rate, a negative scale factor) is rejected at construction; the
//! closures themselves never fail, they simply stop mutating if their
//! target disappears.

use marmot_render::{Color, Point, Size};

use crate::error::AnimationError;

use super::easing::{Easing, ease};
use super::Animation;

fn finite_duration(duration_seconds: f32) -> Result<f32, AnimationError> {
    if duration_seconds <= 0.0 {
        return Err(AnimationError::NonPositiveDuration {
            duration: duration_seconds,
        });
    }
    Ok(duration_seconds)
}

impl Animation {
    /// Fade the foreground color from one value to another.
    ///
    /// Interpolates linearly in four-channel RGBA vector space.
    pub fn foreground_color_fade(
        duration_seconds: f32,
        start_color: Color,
        end_color: Color,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let delta_vector = (end_color.to_vec4() - start_color.to_vec4()) * delta;
            let color = Color::from_vec4(start_color.to_vec4() + delta_vector);
            if let Some(node) = tree.get_mut(id) {
                node.set_foreground_color(Some(color));
            }
        }))
    }

    /// Rotate by `rotation_amount` radians at a consistent speed.
    pub fn rotate_linear(
        duration_seconds: f32,
        rotation_amount: f32,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            if let Some(node) = tree.get_mut(id) {
                node.set_rotate(rotation_amount * delta);
            }
        }))
    }

    /// Rotate from one angle to another with linear velocity.
    pub fn rotate_between(
        duration_seconds: f32,
        start_rotation: f32,
        end_rotation: f32,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            if let Some(node) = tree.get_mut(id) {
                node.set_rotate(start_rotation + (end_rotation - start_rotation) * delta);
            }
        }))
    }

    /// Scale relative to the authored size at a consistent speed.
    ///
    /// At progress zero the size is exactly `original_size` for any
    /// factor. The size writes bypass the local-override bookkeeping, so
    /// the authored size survives the animation.
    pub fn scale_linear(
        original_size: Size,
        duration_seconds: f32,
        scale_factor: f32,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        if scale_factor < 0.0 {
            return Err(AnimationError::NegativeScale {
                factor: scale_factor,
            });
        }
        let change_factor = if scale_factor < 1.0 {
            -scale_factor
        } else {
            1.0 - scale_factor
        };
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let _ = tree.set_size_animated(id, original_size * (1.0 + change_factor * delta));
        }))
    }

    /// Move the offset from one value to another in a straight line.
    pub fn move_offset_linear(
        duration_seconds: f32,
        start_position: Point,
        end_position: Point,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(start_position + (end_position - start_position) * delta);
            }
        }))
    }

    /// Straight-line offset with acceleration and deceleration.
    pub fn move_offset_natural(
        duration_seconds: f32,
        start_position: Point,
        end_position: Point,
    ) -> Result<Self, AnimationError> {
        Self::move_offset_eased(duration_seconds, start_position, end_position, Easing::Natural)
    }

    /// Straight-line offset shaped by an easing curve.
    pub fn move_offset_eased(
        duration_seconds: f32,
        start_position: Point,
        end_position: Point,
        easing: Easing,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let eased = ease(easing, delta);
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(start_position + (end_position - start_position) * eased);
            }
        }))
    }

    /// Curved offset: blend two straight trajectories.
    ///
    /// Follows the trajectory toward `end_position_start` early on and the
    /// trajectory toward `end_position_final` late, weighting them by
    /// `(1 - delta)` and `delta`.
    pub fn move_offset_averaged_bilinear(
        duration_seconds: f32,
        start_position: Point,
        end_position_start: Point,
        end_position_final: Point,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let toward_start = start_position + (end_position_start - start_position) * delta;
            let toward_final = start_position + (end_position_final - start_position) * delta;
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(toward_start * (1.0 - delta) + toward_final * delta);
            }
        }))
    }

    /// Spiral the offset into `end_position`.
    ///
    /// The radius starts at the distance between the two points and
    /// collapses to zero while the angle advances by `angular_speed`
    /// radians over the full duration.
    pub fn move_offset_spiral(
        duration_seconds: f32,
        start_position: Point,
        end_position: Point,
        angular_speed: f32,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        let delta_vector = end_position - start_position;
        let radius = delta_vector.length();
        let start_angle = delta_vector.y.atan2(delta_vector.x);

        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let theta = start_angle + delta * angular_speed;
            let r = (1.0 - delta) * radius;
            let x = end_position.x - r * theta.cos();
            let y = end_position.y - r * theta.sin();
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(Point::new(x, y));
            }
        }))
    }

    /// Bounce the offset between two positions forever.
    ///
    /// Unbounded: the closure folds cumulative elapsed time into a phase
    /// in `[-1, 1]` and renders a parabolic bounce (`phase²`) along the
    /// travel vector. `rate` sets the period; `phase_offset` shifts where
    /// in the bounce the animation starts (0 = at the bounce, 0.5 = at
    /// the top).
    pub fn move_offset_bounce(
        start_position: Point,
        end_position: Point,
        rate: f32,
        phase_offset: f32,
    ) -> Result<Self, AnimationError> {
        if !(0.0..=1000.0).contains(&rate) {
            return Err(AnimationError::RateOutOfRange { rate });
        }
        let travel_vector = end_position - start_position;
        let mut x = -0.5 + phase_offset;
        let mut last_delta = 0.0_f32;

        Ok(Self::from_fn(0.0, move |tree, id, delta| {
            let step = delta - last_delta;
            last_delta = delta;
            x += step * rate * 2.0;
            while x > 1.0 {
                x -= 2.0;
            }
            let adjusted_delta = x * x;
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(start_position + travel_vector * adjusted_delta);
            }
        }))
    }

    /// Play back a precomputed curve along the travel vector.
    ///
    /// At each progress value a fractional index into `profile` is
    /// computed and the two bracketing samples are blended linearly. Use
    /// [`generate_bounce_profile`](super::generate_bounce_profile) to
    /// build bounce curves.
    pub fn move_offset_by_profile(
        duration_seconds: f32,
        start_position: Point,
        end_position: Point,
        profile: Vec<f32>,
    ) -> Result<Self, AnimationError> {
        let duration = finite_duration(duration_seconds)?;
        if profile.is_empty() {
            return Err(AnimationError::EmptyProfile);
        }
        let travel_vector = end_position - start_position;

        Ok(Self::from_fn(duration, move |tree, id, delta| {
            let len = profile.len();
            let mut index = (delta * (len - 1) as f32) as usize;
            let mut ratio = delta * len as f32 - index as f32;
            if index >= len {
                ratio = 0.0;
                index = len - 1;
            }
            let left = profile[index];
            let right = if index < len - 1 {
                profile[index + 1]
            } else {
                profile[index]
            };

            let travel = travel_vector * (left * (1.0 - ratio) + right * ratio);
            if let Some(node) = tree.get_mut(id) {
                node.set_offset(start_position + travel);
            }
        }))
    }
}
