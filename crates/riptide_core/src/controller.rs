//! Programmatic control surface
//!
//! A [`PullController`] lets application code trigger, finish, and reset
//! the edge indicators without going through the gesture stream. It holds
//! only weak references, so a controller kept in application state never
//! prolongs the life of a disposed pull area.

use crate::config::ConfigError;
use crate::mode::{Edge, TaskResult};
use crate::notifier::IndicatorSnapshot;
use crate::physics::{PullPhysics, SharedPullPhysics};
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;

/// Errors surfaced by controller operations
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    /// The pull area this controller pointed at has been dropped
    #[error("pull area no longer exists")]
    Detached,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Weak handle for driving a pull area from application code.
///
/// Operations lock the area's physics state; task callbacks and state
/// listeners must not call back into a controller synchronously.
#[derive(Clone)]
pub struct PullController {
    physics: Weak<Mutex<PullPhysics>>,
}

impl PullController {
    pub(crate) fn new(physics: &SharedPullPhysics) -> Self {
        Self {
            physics: Arc::downgrade(physics),
        }
    }

    fn with_physics<R>(
        &self,
        f: impl FnOnce(&mut PullPhysics) -> R,
    ) -> Result<R, ControllerError> {
        let physics = self.physics.upgrade().ok_or(ControllerError::Detached)?;
        let mut physics = physics.lock().unwrap();
        Ok(f(&mut physics))
    }

    /// Start a header refresh as if the user pulled past the trigger.
    ///
    /// `over_offset` overrides the configured synthetic overshoot.
    /// Returns `Ok(true)` when a task run started.
    pub fn call_refresh(&self, over_offset: Option<f32>) -> Result<bool, ControllerError> {
        Ok(self.with_physics(|p| p.trigger(Edge::Header, over_offset))??)
    }

    /// Start a footer load as if the user pulled past the trigger
    pub fn call_load(&self, over_offset: Option<f32>) -> Result<bool, ControllerError> {
        Ok(self.with_physics(|p| p.trigger(Edge::Footer, over_offset))??)
    }

    /// Resolve a running header refresh. Required when the header is
    /// configured not to wait for the task's own result.
    pub fn finish_refresh(&self, result: TaskResult) -> Result<(), ControllerError> {
        self.with_physics(|p| p.finish(Edge::Header, result))
    }

    /// Resolve a running footer load
    pub fn finish_load(&self, result: TaskResult) -> Result<(), ControllerError> {
        self.with_physics(|p| p.finish(Edge::Footer, result))
    }

    /// Force the header back to Inactive (ignored mid-task)
    pub fn reset_header(&self) -> Result<(), ControllerError> {
        self.with_physics(|p| p.reset(Edge::Header))
    }

    /// Force the footer back to Inactive, clearing a no-more verdict
    pub fn reset_footer(&self) -> Result<(), ControllerError> {
        self.with_physics(|p| p.reset(Edge::Footer))
    }

    /// Latest snapshot of an edge, if the area and the edge exist
    pub fn snapshot(&self, edge: Edge) -> Result<Option<IndicatorSnapshot>, ControllerError> {
        self.with_physics(|p| p.indicator(edge).map(|i| i.snapshot()))
    }

    /// Whether the controller still points at a live pull area
    pub fn is_attached(&self) -> bool {
        self.physics.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorConfig;
    use crate::coordination::SharedSignal;
    use crate::geometry::ScrollLayout;
    use crate::indicator::Indicator;
    use riptide_animation::NoopDriver;

    fn area_physics() -> SharedPullPhysics {
        let shared = Arc::new(SharedSignal::new(false));
        let header = Indicator::new(
            Edge::Header,
            IndicatorConfig::default(),
            shared.clone(),
        )
        .unwrap();
        header.set_task(|handle| handle.succeed());
        let mut physics =
            PullPhysics::new(Some(header), None, shared, Box::new(NoopDriver));
        physics.set_layout(ScrollLayout::vertical(400.0, 1000.0));
        Arc::new(Mutex::new(physics))
    }

    #[test]
    fn test_call_refresh_starts_task() {
        let physics = area_physics();
        let controller = PullController::new(&physics);

        assert_eq!(controller.call_refresh(None), Ok(true));
        // Busy edge: second call is a no-op, not an error
        assert_eq!(controller.call_refresh(None), Ok(false));
    }

    #[test]
    fn test_call_load_without_footer_is_noop() {
        let physics = area_physics();
        let controller = PullController::new(&physics);
        assert_eq!(controller.call_load(None), Ok(false));
    }

    #[test]
    fn test_invalid_over_offset_is_config_error() {
        let physics = area_physics();
        let controller = PullController::new(&physics);
        assert_eq!(
            controller.call_refresh(Some(-1.0)),
            Err(ControllerError::Config(
                ConfigError::NonPositiveOverOffset(-1.0)
            ))
        );
    }

    #[test]
    fn test_detached_controller_errors() {
        let physics = area_physics();
        let controller = PullController::new(&physics);
        assert!(controller.is_attached());

        drop(physics);
        assert!(!controller.is_attached());
        assert_eq!(controller.call_refresh(None), Err(ControllerError::Detached));
        assert_eq!(
            controller.finish_refresh(TaskResult::Succeeded),
            Err(ControllerError::Detached)
        );
        assert_eq!(controller.reset_header(), Err(ControllerError::Detached));
    }
}
