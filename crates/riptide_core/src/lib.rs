//! Riptide Core
//!
//! Edge-triggered pull-to-refresh and load-more machinery for scrollable
//! hosts. The crate is renderer-agnostic: it owns indicator state,
//! overscroll physics, and task coordination, and leaves painting,
//! theming, and widget composition to the embedding toolkit.
//!
//! # Architecture
//!
//! - [`mode`] — the per-edge indicator state machine and its events
//! - [`indicator`] — one edge's state: offset, mode, task lifecycle
//! - [`physics`] — routes gesture deltas into overscroll and drives the
//!   spring-back / settle animations
//! - [`coordination`] — the signal shared by both edges (drag flag,
//!   processing slots, simultaneous-task policy)
//! - [`notifier`] — snapshot subscriptions for skins
//! - [`controller`] — weak-handle programmatic API (`call_refresh`,
//!   `finish_load`, resets)
//! - [`area`] — composition root wiring one scroll view's worth of the
//!   above together
//!
//! # Quick start
//!
//! ```
//! use riptide_core::{PullArea, PullAreaConfig, ScrollLayout};
//!
//! let mut area = PullArea::with_defaults(PullAreaConfig::default())?;
//! area.on_refresh(|handle| {
//!     // kick off the reload, then resolve the handle
//!     handle.succeed();
//! });
//! area.set_layout(ScrollLayout::vertical(400.0, 1000.0));
//!
//! // host gesture stream
//! area.gesture_start();
//! area.gesture_update(-100.0); // pull down past the trigger
//! area.gesture_end();
//! while area.tick(1.0 / 60.0) {}
//! # Ok::<(), riptide_core::ConfigError>(())
//! ```

pub mod area;
pub mod config;
pub mod controller;
pub mod coordination;
pub mod geometry;
pub mod indicator;
pub mod mode;
pub mod notifier;
pub mod physics;

pub use area::{PullArea, PullAreaConfig};
pub use config::{default_friction, ConfigError, FrictionFn, IndicatorConfig, IndicatorPosition};
pub use controller::{ControllerError, PullController};
pub use coordination::SharedSignal;
pub use geometry::{Axis, AxisDirection, ScrollLayout};
pub use indicator::{Indicator, ReleaseAction, TaskHandle};
pub use mode::{Edge, IndicatorMode, ModeTransitions, TaskResult};
pub use notifier::{IndicatorSnapshot, ListenerId, StateNotifier};
pub use physics::{PullPhysics, SharedPullPhysics};

pub use riptide_animation::{AnimationDriver, NoopDriver, SpringConfig};
