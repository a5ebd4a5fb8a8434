//! Overlay lifecycle and tamper resistance.
//!
//! The overlay is a singleton, full-viewport element owned by this
//! module. The host page is adversarial about it: YouTube re-renders
//! aggressively and may detach the element or insert content above it
//! at any time. All triggers (the 1 Hz tick, a settings change, a
//! watchdog pass) therefore funnel into one idempotent reconciliation,
//! [`OverlayController::ensure_presented`], instead of each call site
//! duplicating mount logic.
//!
//! What "the overlay" physically is lives behind [`Surface`]: the
//! browser content script supplies a DOM implementation, the CLI a
//! console one, tests an instrumented fake.

use thiserror::Error;

use crate::policy::{format_remaining, remaining_ms, BlockReason, BlockState, Clock};

/// Errors a host surface can report.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The overlay element could not be created or attached.
    #[error("Overlay mount failed: {0}")]
    MountFailed(String),
}

/// Host-side rendering seam for the block overlay.
///
/// Implementations own the actual element/output. `suppress_page` must
/// stop playing media and disable the page's interactive chrome and
/// scrolling; `restore_page` must reverse all of that. `unmount` on an
/// already-absent overlay is a no-op.
pub trait Surface {
    /// Create the full-viewport overlay with a headline and body text.
    fn mount(&mut self, title: &str, message: &str) -> Result<(), SurfaceError>;

    /// Rewrite the countdown line in place, without remounting.
    fn set_countdown(&mut self, text: &str);

    /// Remove the overlay element.
    fn unmount(&mut self);

    /// Whether the overlay element is still attached to the host.
    fn is_mounted(&self) -> bool;

    /// Whether the overlay is still the topmost element. Hosts that
    /// cannot be tampered with (console, tests) may always return true.
    fn is_topmost(&self) -> bool;

    /// Re-assert topmost position without a remount.
    fn raise(&mut self);

    /// Pause media and lock out the page behind the overlay.
    fn suppress_page(&mut self);

    /// Reverse everything `suppress_page` did.
    fn restore_page(&mut self);
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Overlay newly mounted (block started, or reason changed).
    Mounted,
    /// Overlay already present; only the countdown text changed.
    Updated,
    /// Host had removed or buried the overlay; it was re-asserted.
    Reasserted,
    /// Overlay removed (block ended).
    Dismissed,
    /// Nothing to do, or a mount failure absorbed for this pass.
    Unchanged,
}

#[derive(Debug, Clone, Copy)]
struct Shown {
    reason: BlockReason,
    ends_at_ms: u64,
}

/// Reflects a [`BlockState`] into a [`Surface`] and keeps it there.
#[derive(Debug)]
pub struct OverlayController<S: Surface> {
    surface: S,
    shown: Option<Shown>,
}

impl<S: Surface> OverlayController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            shown: None,
        }
    }

    pub fn is_presenting(&self) -> bool {
        self.shown.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Reconcile the surface with `state`. Idempotent; callable from
    /// any trigger at any frequency.
    pub fn ensure_presented(&mut self, state: &BlockState, clock: &Clock) -> OverlayOutcome {
        let (Some(reason), Some(ends_at_ms)) = (state.reason(), state.ends_at_ms()) else {
            return if self.dismiss() {
                OverlayOutcome::Dismissed
            } else {
                OverlayOutcome::Unchanged
            };
        };

        let countdown = countdown_line(ends_at_ms, clock.epoch_ms);

        match self.shown {
            None => {
                self.surface.suppress_page();
                if let Err(e) = self.surface.mount(reason.title(), reason.message()) {
                    // Absorbed: the next tick retries via the same path.
                    log::warn!("overlay mount failed, will retry: {e}");
                    self.surface.restore_page();
                    return OverlayOutcome::Unchanged;
                }
                self.surface.set_countdown(&countdown);
                self.shown = Some(Shown { reason, ends_at_ms });
                OverlayOutcome::Mounted
            }
            Some(shown) if shown.reason != reason => {
                // Reason flipped while blocked (temporary expired into a
                // schedule window, or vice versa): swap the text via a
                // remount so the headline matches.
                self.surface.unmount();
                if let Err(e) = self.surface.mount(reason.title(), reason.message()) {
                    log::warn!("overlay remount failed, will retry: {e}");
                    self.surface.restore_page();
                    self.shown = None;
                    return OverlayOutcome::Unchanged;
                }
                self.surface.set_countdown(&countdown);
                self.shown = Some(Shown { reason, ends_at_ms });
                OverlayOutcome::Mounted
            }
            Some(_) => {
                self.shown = Some(Shown { reason, ends_at_ms });
                if !self.surface.is_mounted() {
                    // Host page detached our element.
                    if let Err(e) = self.surface.mount(reason.title(), reason.message()) {
                        log::warn!("overlay re-assert failed, will retry: {e}");
                        return OverlayOutcome::Unchanged;
                    }
                    self.surface.set_countdown(&countdown);
                    OverlayOutcome::Reasserted
                } else if !self.surface.is_topmost() {
                    // Host page stacked content above us.
                    self.surface.raise();
                    self.surface.set_countdown(&countdown);
                    OverlayOutcome::Reasserted
                } else {
                    self.surface.set_countdown(&countdown);
                    OverlayOutcome::Updated
                }
            }
        }
    }

    /// Remove the overlay and reverse all page side effects. Returns
    /// whether an overlay was actually present. Idempotent.
    pub fn dismiss(&mut self) -> bool {
        if self.shown.take().is_some() {
            self.surface.unmount();
            self.surface.restore_page();
            true
        } else {
            false
        }
    }
}

fn countdown_line(ends_at_ms: u64, now_ms: u64) -> String {
    format!(
        "{} remaining",
        format_remaining(remaining_ms(ends_at_ms, now_ms))
    )
}
