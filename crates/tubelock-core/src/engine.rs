//! The blocking policy engine.
//!
//! Wall-clock driven, no internal thread: the caller invokes
//! [`PolicyEngine::tick`] once per second and pushes settings changes in
//! via [`PolicyEngine::apply_settings_change`] as they arrive. A change
//! triggers an out-of-cycle re-evaluation so flipping the master switch
//! takes effect immediately rather than on the next tick.
//!
//! The engine owns its settings snapshot; nothing else mutates it. It
//! never writes back to the settings store -- expired temporary blocks
//! stay in storage and simply evaluate as inactive.

use chrono::Utc;

use crate::events::Event;
use crate::overlay::{OverlayController, OverlayOutcome, Surface};
use crate::policy::{
    evaluate, format_remaining, remaining_ms, BlockState, Clock, PolicyInputs,
};
use crate::settings::{Settings, SettingsDelta};

/// Ties the rule evaluator, the overlay controller, and the cached
/// settings snapshot together.
#[derive(Debug)]
pub struct PolicyEngine<S: Surface> {
    settings: Settings,
    inputs: PolicyInputs,
    state: BlockState,
    overlay: OverlayController<S>,
}

impl<S: Surface> PolicyEngine<S> {
    /// Create an engine from a loaded settings snapshot. Callers that
    /// cannot read their store should pass `Settings::default()`, which
    /// never blocks.
    pub fn new(settings: Settings, surface: S) -> Self {
        let inputs = PolicyInputs::from(&settings);
        Self {
            settings,
            inputs,
            state: BlockState::Unblocked,
            overlay: OverlayController::new(surface),
        }
    }

    pub fn block_state(&self) -> BlockState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        self.overlay.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.overlay.surface_mut()
    }

    /// One evaluation pass: recompute the block state from the cached
    /// snapshot and the clock, reconcile the overlay, and report what
    /// changed. Run this once per second.
    pub fn tick(&mut self, clock: &Clock) -> Vec<Event> {
        let next = evaluate(&self.inputs, clock);
        let outcome = self.overlay.ensure_presented(&next, clock);
        self.state = next;

        let mut events = Vec::new();
        match outcome {
            OverlayOutcome::Mounted => {
                if let (Some(reason), Some(ends_at_ms)) = (next.reason(), next.ends_at_ms()) {
                    events.push(Event::BlockStarted {
                        reason,
                        ends_at_ms,
                        at: Utc::now(),
                    });
                }
            }
            OverlayOutcome::Dismissed => {
                events.push(Event::BlockEnded { at: Utc::now() });
            }
            OverlayOutcome::Reasserted => {
                events.push(Event::OverlayReasserted { at: Utc::now() });
            }
            OverlayOutcome::Updated | OverlayOutcome::Unchanged => {}
        }
        events
    }

    /// Apply a settings change and re-evaluate immediately.
    ///
    /// An empty delta (the store notified about keys this engine does
    /// not consume) is a no-op and produces no events.
    pub fn apply_settings_change(&mut self, delta: &SettingsDelta, clock: &Clock) -> Vec<Event> {
        if delta.is_empty() {
            return Vec::new();
        }
        self.settings.apply(delta);
        self.inputs = PolicyInputs::from(&self.settings);
        self.tick(clock)
    }

    /// Display-ready snapshot of the current state.
    pub fn snapshot(&self, clock: &Clock) -> Event {
        let left = self
            .state
            .ends_at_ms()
            .map(|end| remaining_ms(end, clock.epoch_ms))
            .unwrap_or(0);
        Event::StateSnapshot {
            state: self.state,
            remaining_ms: left.max(0) as u64,
            countdown: format_remaining(left),
            at: Utc::now(),
        }
    }
}
