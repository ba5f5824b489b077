#![forbid(unsafe_code)]

//! Factor drivers: the clock behind a list transition.
//!
//! A [`FactorDriver`] moves one float factor toward a target over time. It
//! never calls back into its owner. Instead, each [`tick`](FactorDriver::tick)
//! queues [`FactorEvent`]s that the owner drains and applies, the same
//! poll-don't-callback shape used for animation milestones elsewhere.
//!
//! # Invariants
//!
//! 1. A run starts with [`animate_to`](FactorDriver::animate_to) and queues
//!    exactly one [`FactorEvent::Finished`], either when it reaches its target
//!    or when [`force_factor`](FactorDriver::force_factor) ends it early.
//! 2. [`cancel`](FactorDriver::cancel) ends a run without queueing anything.
//! 3. The factor lands exactly on the target when a run completes.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to one nanosecond, so the first tick completes.
//! - `animate_to` with the current factor while idle: no run is started.

use std::time::Duration;

use super::{EasingFn, linear};

/// Something that happened to the factor during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorEvent {
    /// The factor moved to this value.
    Changed(f32),
    /// The run ended at this value.
    Finished(f32),
}

/// Clock interface the engine drives its transitions with.
pub trait FactorDriver {
    /// Start (or redirect) a run toward `target`.
    fn animate_to(&mut self, target: f32);

    /// Stop the running run in place. Queues nothing.
    fn cancel(&mut self);

    /// Jump to `value`, ending any running run with a `Finished` event.
    fn force_factor(&mut self, value: f32);

    /// Current factor.
    fn factor(&self) -> f32;

    /// Whether a run is in progress.
    fn is_running(&self) -> bool;

    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Take all queued events, oldest first.
    fn drain_events(&mut self) -> Vec<FactorEvent>;
}

/// Time-based [`FactorDriver`] with a fixed duration and easing curve.
///
/// Tracks elapsed time as a [`Duration`] so accumulation does not drift.
#[derive(Debug, Clone)]
pub struct FactorAnimator {
    duration: Duration,
    easing: EasingFn,
    elapsed: Duration,
    from: f32,
    to: f32,
    factor: f32,
    running: bool,
    events: Vec<FactorEvent>,
}

impl FactorAnimator {
    /// Create an idle driver at factor 0.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
            elapsed: Duration::ZERO,
            from: 0.0,
            to: 0.0,
            factor: 0.0,
            running: false,
            events: Vec::new(),
        }
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Configured run length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw time progress of the running leg, before easing.
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Number of queued events.
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }
}

impl FactorDriver for FactorAnimator {
    fn animate_to(&mut self, target: f32) {
        if !self.running && self.factor == target {
            return;
        }
        self.from = self.factor;
        self.to = target;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    fn cancel(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    fn force_factor(&mut self, value: f32) {
        let was_running = self.running;
        self.running = false;
        self.elapsed = Duration::ZERO;
        self.factor = value;
        self.from = value;
        self.to = value;
        if was_running {
            self.events.push(FactorEvent::Finished(value));
        }
    }

    fn factor(&self) -> f32 {
        self.factor
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn tick(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.factor = self.to;
            self.running = false;
            self.events.push(FactorEvent::Changed(self.factor));
            self.events.push(FactorEvent::Finished(self.factor));
        } else {
            let eased = (self.easing)(self.raw_progress());
            let next = self.from + (self.to - self.from) * eased;
            if next != self.factor {
                self.factor = next;
                self.events.push(FactorEvent::Changed(next));
            }
        }
    }

    fn drain_events(&mut self) -> Vec<FactorEvent> {
        std::mem::take(&mut self.events)
    }
}
