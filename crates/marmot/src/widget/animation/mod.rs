//! Time-driven animation of widget state.
//!
//! An [`Animation`] is a mutation recipe: a duration plus a closure that
//! writes one property of its target widget for a given normalized
//! progress. Animations attach to a widget and are advanced every tick by
//! the elapsed frame time; finite animations retire when they complete
//! (unless marked looping), unbounded ones run until cleared or until
//! their widget is destroyed.
//!
//! Factories for the built-in animation kinds live in [`presets`] (re-
//! exported as associated constructors on `Animation`); easing curves in
//! [`easing`]; the bounce profile generator in [`profile`].

mod easing;
mod presets;
mod profile;

pub use easing::{Easing, ease};
pub use profile::generate_bounce_profile;

use crate::error::TreeError;

use super::node::WidgetId;
use super::tree::WidgetTree;

/// The per-frame mutation closure of an animation.
///
/// Receives the tree, the target widget, and the progress value: in
/// `[0, 1]` for finite animations, cumulative elapsed seconds for
/// unbounded ones. Closures own their per-animation state (phase
/// accumulators, previous progress) and must tolerate the target having
/// been destroyed mid-frame.
pub type AnimationFn = Box<dyn FnMut(&mut WidgetTree, WidgetId, f32)>;

/// One time-bounded (or unbounded) widget mutation recipe.
pub struct Animation {
    duration: f32,
    elapsed: f32,
    looping: bool,
    finished: bool,
    apply: AnimationFn,
}

impl Animation {
    /// Wrap a mutation closure into an animation.
    ///
    /// A `duration` of zero (or less) makes the animation unbounded: it
    /// never retires on its own and the closure receives cumulative
    /// elapsed seconds instead of normalized progress. Prefer the preset
    /// factories, which validate their parameters.
    pub fn from_fn(
        duration_seconds: f32,
        apply: impl FnMut(&mut WidgetTree, WidgetId, f32) + 'static,
    ) -> Self {
        Self {
            duration: duration_seconds,
            elapsed: 0.0,
            looping: false,
            finished: false,
            apply: Box::new(apply),
        }
    }

    /// Restart this finite animation from the beginning each time it
    /// completes, instead of retiring.
    pub fn with_looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// The configured duration in seconds; zero or less means unbounded.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether the animation runs until explicitly removed.
    pub fn is_unbounded(&self) -> bool {
        self.duration <= 0.0
    }

    /// Whether the animation restarts on completion.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether the animation has completed and awaits retirement.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by a frame's elapsed time and apply the mutation.
    pub(crate) fn advance(&mut self, tree: &mut WidgetTree, target: WidgetId, elapsed_seconds: f32) {
        self.elapsed += elapsed_seconds;
        let delta = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            self.elapsed
        };
        (self.apply)(tree, target, delta);
        if self.duration > 0.0 && delta >= 1.0 {
            if self.looping {
                while self.elapsed >= self.duration {
                    self.elapsed -= self.duration;
                }
            } else {
                self.finished = true;
            }
        }
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("looping", &self.looping)
            .field("finished", &self.finished)
            .finish()
    }
}

impl WidgetTree {
    /// Attach an animation to a widget's active set.
    pub fn add_animation(&mut self, id: WidgetId, animation: Animation) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        node.animations.push(animation);
        Ok(())
    }

    /// Remove every animation attached to a widget.
    pub fn clear_animations(&mut self, id: WidgetId) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        node.animations.clear();
        Ok(())
    }

    /// Advance every active animation in the tree by `elapsed_seconds`.
    pub fn tick(&mut self, elapsed_seconds: f32) {
        let animated: Vec<WidgetId> = self
            .nodes
            .iter()
            .filter(|(_, node)| !node.animations.is_empty())
            .map(|(id, _)| id)
            .collect();
        for id in animated {
            self.tick_widget(id, elapsed_seconds);
        }
    }

    /// Advance active animations on the subtree rooted at `root` only.
    pub fn tick_subtree(&mut self, root: WidgetId, elapsed_seconds: f32) {
        for id in self.collect_subtree(root) {
            self.tick_widget(id, elapsed_seconds);
        }
    }

    /// Advance the animations attached to a single widget.
    ///
    /// The active list is detached while the closures run, so an animation
    /// may itself add or remove animations (or destroy widgets) without
    /// aliasing the list being iterated. Finished animations retire;
    /// animations attached during the tick survive into the next one.
    pub(crate) fn tick_widget(&mut self, id: WidgetId, elapsed_seconds: f32) {
        let mut active = match self.nodes.get_mut(id) {
            Some(node) if !node.animations.is_empty() => std::mem::take(&mut node.animations),
            _ => return,
        };

        for animation in active.iter_mut() {
            animation.advance(self, id, elapsed_seconds);
            if !self.nodes.contains_key(id) {
                // The target was destroyed by an animation; the rest of
                // its animations die with it.
                return;
            }
        }

        active.retain(|a| !a.is_finished());
        if let Some(node) = self.nodes.get_mut(id) {
            let added = std::mem::take(&mut node.animations);
            node.animations = active;
            node.animations.extend(added);
        }
    }
}
