//! Per-edge indicator configuration
//!
//! Immutable, validated at construction. Invalid values are rejected with
//! a [`ConfigError`] rather than silently clamped.

use riptide_animation::SpringConfig;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Friction factor as a function of the overscroll fraction (0.0 to 1.0).
///
/// Must be monotonically decreasing so larger raw deltas always produce
/// larger adjusted deltas at the same offset.
pub type FrictionFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Default rubber-band friction: quadratic decay from 1.0 toward 0.125.
///
/// Never reaches zero, so the indicator keeps creeping under a sustained
/// pull instead of freezing.
pub fn default_friction(fraction: f32) -> f32 {
    let f = fraction.clamp(0.0, 1.0);
    0.875 * (1.0 - f) * (1.0 - f) + 0.125
}

/// Where the indicator sits relative to the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorPosition {
    /// Indicator rendered above the content, content shifts with the pull
    #[default]
    Above,
    /// Indicator rendered behind the content, content reveals it
    Behind,
}

/// Errors raised by configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("trigger offset must be positive, got {0}")]
    NonPositiveTriggerOffset(f32),
    #[error("max offset {max} is below trigger offset {trigger}")]
    MaxBelowTrigger { max: f32, trigger: f32 },
    #[error("programmatic over-offset must be positive, got {0}")]
    NonPositiveOverOffset(f32),
}

/// Configuration for one edge's indicator
#[derive(Clone)]
pub struct IndicatorConfig {
    /// Minimum pull distance required to arm the task
    pub trigger_offset: f32,
    /// Maximum indicator offset; `f32::INFINITY` for no cap
    pub max_offset: f32,
    /// Hard-cap the offset at `max_offset` and drop further overscroll
    pub clamp_overscroll: bool,
    /// Rubber-band friction applied past the trigger offset
    pub friction: FrictionFn,
    /// Spring used for spring-back and settle animations
    pub spring: SpringConfig,
    /// Indicator placement relative to content
    pub position: IndicatorPosition,
    /// Whether this indicator may operate on a horizontal axis
    pub allow_horizontal: bool,
    /// Permit re-arming by overscroll after a no-more result
    pub no_more_retrigger: bool,
    /// Advance on the task's own completion; when false, only the
    /// controller's explicit finish signal leaves Processing
    pub wait_result: bool,
    /// Default synthetic overshoot for programmatic triggers
    pub call_over_offset: f32,
    /// Seconds to hold Processed before Done (0 = immediate)
    pub processed_grace: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            trigger_offset: 70.0,
            max_offset: f32::INFINITY,
            clamp_overscroll: false,
            friction: Arc::new(default_friction),
            spring: SpringConfig::stiff(),
            position: IndicatorPosition::default(),
            allow_horizontal: false,
            no_more_retrigger: false,
            wait_result: true,
            call_over_offset: 20.0,
            processed_grace: 0.2,
        }
    }
}

impl IndicatorConfig {
    /// Config with the given trigger offset, everything else default
    pub fn with_trigger_offset(trigger_offset: f32) -> Self {
        Self {
            trigger_offset,
            ..Default::default()
        }
    }

    /// Config hard-capped at `max_offset`
    pub fn clamped(trigger_offset: f32, max_offset: f32) -> Self {
        Self {
            trigger_offset,
            max_offset,
            clamp_overscroll: true,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.trigger_offset > 0.0) {
            return Err(ConfigError::NonPositiveTriggerOffset(self.trigger_offset));
        }
        if self.max_offset.is_finite() && self.max_offset < self.trigger_offset {
            return Err(ConfigError::MaxBelowTrigger {
                max: self.max_offset,
                trigger: self.trigger_offset,
            });
        }
        if !(self.call_over_offset > 0.0) {
            return Err(ConfigError::NonPositiveOverOffset(self.call_over_offset));
        }
        Ok(())
    }

    /// Reference distance the overscroll fraction is measured against.
    ///
    /// The configured cap when finite, otherwise the viewport extent.
    pub fn overscroll_reference(&self, viewport_extent: f32) -> f32 {
        if self.max_offset.is_finite() {
            self.max_offset
        } else {
            viewport_extent.max(1.0)
        }
    }
}

impl fmt::Debug for IndicatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorConfig")
            .field("trigger_offset", &self.trigger_offset)
            .field("max_offset", &self.max_offset)
            .field("clamp_overscroll", &self.clamp_overscroll)
            .field("spring", &self.spring)
            .field("position", &self.position)
            .field("allow_horizontal", &self.allow_horizontal)
            .field("no_more_retrigger", &self.no_more_retrigger)
            .field("wait_result", &self.wait_result)
            .field("call_over_offset", &self.call_over_offset)
            .field("processed_grace", &self.processed_grace)
            .finish_non_exhaustive()
    }
}
