//! Frame scheduling handshake between the engines and the host's frame clock.
//!
//! The host owns a [`FrameTicker`] and hands clones of it to the widgets. A
//! widget acquires a [`FrameSubscription`] whenever it starts an animation and
//! drops it when the animation completes, is cancelled, or the widget is torn
//! down. While [`FrameTicker::is_active`] reports `true` the host should keep
//! calling `tick(now)` on its widgets once per frame.

use std::{cell::Cell, rc::Rc};

/// Counts the animations that currently need frames.
///
/// Cloning yields another handle to the same counter.
#[derive(Debug, Clone, Default)]
pub struct FrameTicker {
    active: Rc<Cell<usize>>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more running animation.
    pub fn subscribe(&self) -> FrameSubscription {
        self.active.set(self.active.get() + 1);
        FrameSubscription {
            active: Rc::clone(&self.active),
        }
    }

    /// Whether any animation still needs frames.
    pub fn is_active(&self) -> bool {
        self.active.get() > 0
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.active.get()
    }
}

/// A live frame registration. Dropping it releases the registration.
#[derive(Debug)]
pub struct FrameSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}
