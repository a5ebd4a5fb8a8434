//! # Tubelock Core Library
//!
//! Core business logic for Tubelock, a time-based lockout for YouTube.
//! The library decides whether access should currently be blocked and
//! keeps a full-page overlay in sync with that decision, while the host
//! surface (a browser page, a terminal, a test double) stays behind the
//! [`Surface`] trait.
//!
//! ## Architecture
//!
//! - **Policy**: a pure rule evaluator over a settings snapshot plus the
//!   wall clock -- master switch, one-shot countdown block, recurring
//!   daily window
//! - **Overlay**: idempotent reconciliation of the block overlay against
//!   a host surface that may remove or bury it at any time
//! - **Engine**: wall-clock driven loop; no internal thread, the caller
//!   invokes `tick()` once per second
//! - **Settings**: TOML-persisted key-value settings with snapshot
//!   diffing for change propagation
//!
//! ## Key Components
//!
//! - [`PolicyEngine`]: ties evaluator, overlay, and settings together
//! - [`evaluate`]: the rule evaluator itself
//! - [`OverlayController`]: overlay lifecycle and watchdog
//! - [`FileStore`]: settings persistence

pub mod engine;
pub mod error;
pub mod events;
pub mod overlay;
pub mod policy;
pub mod settings;

pub use engine::PolicyEngine;
pub use error::{CoreError, SettingsError};
pub use events::Event;
pub use overlay::{OverlayController, Surface, SurfaceError};
pub use policy::{
    evaluate, format_remaining, BlockReason, BlockState, Clock, PolicyInputs, ScheduleWindow,
};
pub use settings::{FileStore, MemoryStore, Settings, SettingsDelta, SettingsStore};
