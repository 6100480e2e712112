//! Pull area composition root
//!
//! A [`PullArea`] wires the pieces together for one host scroll view: a
//! shared coordination signal, up to two edge indicators, and the physics
//! adapter. The host forwards its gesture stream and frame ticks; skins
//! subscribe to the indicators; application code drives it through a
//! [`PullController`].

use crate::config::{ConfigError, IndicatorConfig};
use crate::controller::PullController;
use crate::coordination::SharedSignal;
use crate::geometry::ScrollLayout;
use crate::indicator::{Indicator, TaskHandle};
use crate::mode::{Edge, TaskResult};
use crate::physics::{PullPhysics, SharedPullPhysics};
use riptide_animation::{AnimationDriver, NoopDriver};
use std::sync::{Arc, Mutex};

/// Area-wide configuration
#[derive(Debug, Clone)]
pub struct PullAreaConfig {
    /// Header (refresh) indicator; `None` disables the edge
    pub header: Option<IndicatorConfig>,
    /// Footer (load-more) indicator; `None` disables the edge
    pub footer: Option<IndicatorConfig>,
    /// Allow header and footer tasks to run at the same time
    pub simultaneously: bool,
    /// Trigger a header refresh when the first layout arrives
    pub refresh_on_start: bool,
    /// A successful header refresh clears the footer's no-more verdict
    pub reset_after_refresh: bool,
}

impl Default for PullAreaConfig {
    fn default() -> Self {
        Self {
            header: Some(IndicatorConfig::default()),
            footer: Some(IndicatorConfig::default()),
            simultaneously: false,
            refresh_on_start: false,
            reset_after_refresh: true,
        }
    }
}

/// One pull-to-refresh / load-more area attached to a scroll view
pub struct PullArea {
    physics: SharedPullPhysics,
    header: Option<Indicator>,
    footer: Option<Indicator>,
    refresh_on_start: bool,
    saw_layout: bool,
}

impl PullArea {
    /// Build an area with the platform's frame driver
    pub fn new(
        config: PullAreaConfig,
        driver: Box<dyn AnimationDriver>,
    ) -> Result<Self, ConfigError> {
        let shared = Arc::new(SharedSignal::new(config.simultaneously));

        let header = config
            .header
            .map(|c| Indicator::new(Edge::Header, c, shared.clone()))
            .transpose()?;
        let footer = config
            .footer
            .map(|c| Indicator::new(Edge::Footer, c, shared.clone()))
            .transpose()?;

        if config.reset_after_refresh {
            if let (Some(header), Some(footer)) = (&header, &footer) {
                let footer = footer.clone();
                header.subscribe(move |snapshot| {
                    if snapshot.mode.is_confirming()
                        && snapshot.result == TaskResult::Succeeded
                    {
                        footer.clear_no_more();
                    }
                });
            }
        }

        let physics = Arc::new(Mutex::new(PullPhysics::new(
            header.clone(),
            footer.clone(),
            shared,
            driver,
        )));

        Ok(Self {
            physics,
            header,
            footer,
            refresh_on_start: config.refresh_on_start,
            saw_layout: false,
        })
    }

    /// Build an area that polls via `tick` with no frame driver
    pub fn with_defaults(config: PullAreaConfig) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(NoopDriver))
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Install the header refresh task
    pub fn on_refresh<F>(&self, task: F)
    where
        F: FnMut(TaskHandle) + Send + 'static,
    {
        if let Some(header) = &self.header {
            header.set_task(task);
        }
    }

    /// Install the footer load task
    pub fn on_load<F>(&self, task: F)
    where
        F: FnMut(TaskHandle) + Send + 'static,
    {
        if let Some(footer) = &self.footer {
            footer.set_task(task);
        }
    }

    /// Handle to an edge's indicator (for subscriptions and inspection)
    pub fn indicator(&self, edge: Edge) -> Option<&Indicator> {
        match edge {
            Edge::Header => self.header.as_ref(),
            Edge::Footer => self.footer.as_ref(),
        }
    }

    /// Controller for programmatic triggers and finishes
    pub fn controller(&self) -> PullController {
        PullController::new(&self.physics)
    }

    // =========================================================================
    // Host integration
    // =========================================================================

    /// Report layout; the first layout may kick off a startup refresh
    pub fn set_layout(&mut self, layout: ScrollLayout) {
        let mut physics = self.physics.lock().unwrap();
        physics.set_layout(layout);
        if !self.saw_layout {
            self.saw_layout = true;
            if self.refresh_on_start {
                // Ignores the result: a missing task or busy edge means no
                // startup refresh, never an error
                let _ = physics.trigger(Edge::Header, None);
            }
        }
    }

    /// Pointer down
    pub fn gesture_start(&self) {
        self.physics.lock().unwrap().gesture_start();
    }

    /// Pointer moved by a logical scroll delta (positive toward the footer)
    pub fn gesture_update(&self, delta: f32) {
        self.physics.lock().unwrap().apply_user_delta(delta);
    }

    /// Pointer up
    pub fn gesture_end(&self) {
        self.physics.lock().unwrap().gesture_end();
    }

    /// Advance animations by `dt` seconds; true while frames are needed
    pub fn tick(&self, dt: f32) -> bool {
        self.physics.lock().unwrap().tick(dt)
    }

    /// Current in-bounds scroll position
    pub fn position(&self) -> f32 {
        self.physics.lock().unwrap().position()
    }

    /// Tear down both indicators; pending task completions become no-ops
    pub fn dispose(&self) {
        if let Some(header) = &self.header {
            header.dispose();
        }
        if let Some(footer) = &self.footer {
            footer.dispose();
        }
    }
}

impl Drop for PullArea {
    fn drop(&mut self) {
        self.dispose();
    }
}
