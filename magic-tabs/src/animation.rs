//! Time-driven interpolation of scalar values.
//!
//! A [`Tween`] is sampled against a monotonic [`Instant`] on every frame tick
//! instead of pushing values through callbacks. [`AnimatedValue`] pairs the
//! sampled value with the tween that drives it and the frame subscription that
//! keeps the host's frame clock running.

use std::time::{Duration, Instant};

use crate::frame::{FrameSubscription, FrameTicker};

/// Maps linear progress in `[0.0, 1.0]` to eased progress in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cosine curve that starts and ends slowly. The usual default for
    /// platform value animators.
    #[default]
    AccelerateDecelerate,
    /// Cubic ease-in-out.
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Either nothing is running, or an interpolation from `from` to `to` that
/// began at `started_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tween {
    Idle,
    Running {
        from: f32,
        to: f32,
        started_at: Instant,
        duration: Duration,
        easing: Easing,
    },
}

impl Tween {
    /// Linear progress of the tween at `now`, or `None` when idle.
    pub fn progress_at(&self, now: Instant) -> Option<f32> {
        match *self {
            Tween::Idle => None,
            Tween::Running {
                started_at,
                duration,
                ..
            } => {
                if duration.is_zero() {
                    return Some(1.0);
                }
                let elapsed = now.saturating_duration_since(started_at).as_secs_f32();
                Some((elapsed / duration.as_secs_f32()).min(1.0))
            }
        }
    }

    /// Samples the tween. Returns exactly `to` once the duration has elapsed.
    pub fn value_at(&self, now: Instant) -> Option<f32> {
        let progress = self.progress_at(now)?;
        match *self {
            Tween::Idle => None,
            Tween::Running {
                from, to, easing, ..
            } => {
                if progress >= 1.0 {
                    Some(to)
                } else {
                    Some(from + (to - from) * easing.apply(progress))
                }
            }
        }
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.progress_at(now).is_none_or(|p| p >= 1.0)
    }
}

/// A scalar plus the tween currently driving it.
#[derive(Debug)]
pub struct AnimatedValue {
    value: f32,
    tween: Tween,
    subscription: Option<FrameSubscription>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            tween: Tween::Idle,
            subscription: None,
        }
    }

    /// Value as of the last tick.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn is_running(&self) -> bool {
        matches!(self.tween, Tween::Running { .. })
    }

    /// Current value sampled at `now` without advancing state.
    pub fn sample(&self, now: Instant) -> f32 {
        self.tween.value_at(now).unwrap_or(self.value)
    }

    /// Retargets from the value sampled at `now`, cancelling any running tween.
    pub fn animate_to(
        &mut self,
        to: f32,
        now: Instant,
        duration: Duration,
        easing: Easing,
        ticker: &FrameTicker,
    ) {
        let from = self.sample(now);
        self.animate(from, to, now, duration, easing, ticker);
    }

    /// Starts a tween from an explicit value, cancelling any running tween.
    pub fn animate(
        &mut self,
        from: f32,
        to: f32,
        now: Instant,
        duration: Duration,
        easing: Easing,
        ticker: &FrameTicker,
    ) {
        self.release();
        if duration.is_zero() {
            self.value = to;
            return;
        }
        self.value = from;
        self.tween = Tween::Running {
            from,
            to,
            started_at: now,
            duration,
            easing,
        };
        self.subscription = Some(ticker.subscribe());
    }

    /// Jumps to `value` and stops animating.
    pub fn snap_to(&mut self, value: f32) {
        self.release();
        self.value = value;
    }

    /// Advances to `now`. Returns whether the tween is still running afterwards.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(value) = self.tween.value_at(now) else {
            return false;
        };
        self.value = value;
        if self.tween.is_finished_at(now) {
            self.release();
            return false;
        }
        true
    }

    /// Stops the tween and gives its frame subscription back. Completion,
    /// cancellation and teardown all end up here.
    pub fn release(&mut self) {
        self.tween = Tween::Idle;
        self.subscription = None;
    }
}
