//! Scroll physics adapter
//!
//! Sits between the host scroll view's gesture stream and the two edge
//! machines. Owns the in-bounds scroll position, routes drag deltas into
//! edge overscroll, decides what to animate on release, and drives the
//! spring-back / settle springs frame by frame.
//!
//! Deltas are logical: positive moves toward the footer edge regardless
//! of axis direction. Hosts with reversed axes flip pointer deltas before
//! feeding them in.

use crate::geometry::{Axis, ScrollLayout};
use crate::indicator::{Indicator, ReleaseAction};
use crate::mode::{Edge, IndicatorMode};
use crate::config::ConfigError;
use crate::coordination::SharedSignal;
use riptide_animation::{AnimationDriver, AnimationScheduler, Spring, SpringId};
use std::sync::{Arc, Mutex};

const SETTLE_EPSILON: f32 = 0.5;

/// What a spring's arrival means for the indicator it animates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpringPurpose {
    /// Returning to the rest baseline; the indicator is told it settled
    Rest,
    /// Holding at the trigger offset while a task runs
    Settle,
}

struct EdgeSpring {
    id: SpringId,
    purpose: SpringPurpose,
}

/// Physics state for one pull area
pub struct PullPhysics {
    layout: Option<ScrollLayout>,
    /// In-bounds scroll position, 0..=max_scroll
    position: f32,
    header: Option<Indicator>,
    footer: Option<Indicator>,
    shared: Arc<SharedSignal>,
    scheduler: AnimationScheduler,
    springs: [Option<EdgeSpring>; 2],
    driver: Box<dyn AnimationDriver>,
    driver_active: bool,
}

/// Shared handle used by the area and by frame callbacks
pub type SharedPullPhysics = Arc<Mutex<PullPhysics>>;

fn edge_index(edge: Edge) -> usize {
    match edge {
        Edge::Header => 0,
        Edge::Footer => 1,
    }
}

impl PullPhysics {
    pub fn new(
        header: Option<Indicator>,
        footer: Option<Indicator>,
        shared: Arc<SharedSignal>,
        driver: Box<dyn AnimationDriver>,
    ) -> Self {
        Self {
            layout: None,
            position: 0.0,
            header,
            footer,
            shared,
            scheduler: AnimationScheduler::new(),
            springs: [None, None],
            driver,
            driver_active: false,
        }
    }

    // =========================================================================
    // Layout and accessors
    // =========================================================================

    /// Record the host layout; pushes axis and safe insets into the edge
    /// machines and clamps the position to the new bounds
    pub fn set_layout(&mut self, layout: ScrollLayout) {
        if let Some(header) = &self.header {
            header.set_layout(layout.axis_direction, layout.leading_inset);
        }
        if let Some(footer) = &self.footer {
            footer.set_layout(layout.axis_direction, layout.trailing_inset);
        }
        self.position = self.position.clamp(0.0, layout.max_scroll());
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<ScrollLayout> {
        self.layout
    }

    /// Current in-bounds scroll position
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn indicator(&self, edge: Edge) -> Option<&Indicator> {
        match edge {
            Edge::Header => self.header.as_ref(),
            Edge::Footer => self.footer.as_ref(),
        }
    }

    /// Indicator for an edge, gated on axis compatibility: horizontal
    /// layouts only reach indicators that opted in
    fn active_indicator(&self, edge: Edge) -> Option<&Indicator> {
        let indicator = self.indicator(edge)?;
        if let Some(layout) = &self.layout {
            if layout.axis() == Axis::Horizontal && !indicator.allows_horizontal() {
                return None;
            }
        }
        Some(indicator)
    }

    /// True while any spring or confirmation countdown still needs frames
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(Option::is_some)
    }

    // =========================================================================
    // Gesture stream
    // =========================================================================

    /// Pointer down: user input overrides any running animation
    pub fn gesture_start(&mut self) {
        self.shared.set_user_dragging(true);
        for slot in &mut self.springs {
            if let Some(spring) = slot.take() {
                self.scheduler.remove_spring(spring.id);
            }
        }
    }

    /// Route a drag delta: collapse opposing overscroll first, then move
    /// the in-bounds position, then grow edge overscroll with whatever
    /// remains. Edges without an (axis-compatible) indicator clamp.
    pub fn apply_user_delta(&mut self, delta: f32) {
        let Some(layout) = self.layout else {
            return;
        };
        let viewport = layout.viewport_extent;
        let max_scroll = layout.max_scroll();

        if delta > 0.0 {
            // Toward the footer: shrink header overscroll, scroll, then
            // pull the footer out
            let mut remaining = delta;
            if let Some(header) = self.active_indicator(Edge::Header) {
                if header.offset() > 0.0 {
                    remaining = header.collapse_by(remaining);
                }
            }
            let step = remaining.min(max_scroll - self.position);
            self.position += step;
            remaining -= step;
            if remaining > 0.0 {
                if let Some(footer) = self.active_indicator(Edge::Footer) {
                    footer.apply_pull(remaining, viewport);
                }
            }
        } else if delta < 0.0 {
            let mut remaining = -delta;
            if let Some(footer) = self.active_indicator(Edge::Footer) {
                if footer.offset() > 0.0 {
                    remaining = footer.collapse_by(remaining);
                }
            }
            let step = remaining.min(self.position);
            self.position -= step;
            remaining -= step;
            if remaining > 0.0 {
                if let Some(header) = self.active_indicator(Edge::Header) {
                    header.apply_pull(remaining, viewport);
                }
            }
        }
    }

    /// Pointer up: ask each edge what happens and start the springs
    pub fn gesture_end(&mut self) {
        self.shared.set_user_dragging(false);
        for edge in [Edge::Header, Edge::Footer] {
            let Some(indicator) = self.active_indicator(edge) else {
                continue;
            };
            let indicator = indicator.clone();
            match indicator.release() {
                ReleaseAction::SpringBack { from, to } => {
                    self.start_spring(edge, &indicator, from, to, SpringPurpose::Rest);
                }
                ReleaseAction::Settle { from, to } => {
                    self.start_spring(edge, &indicator, from, to, SpringPurpose::Settle);
                }
                ReleaseAction::None => {}
            }
        }
        self.kick();
    }

    // =========================================================================
    // Programmatic entry points
    // =========================================================================

    /// Start an edge's task without a gesture: the offset jumps to the
    /// synthetic overshoot, then a spring settles it at the trigger.
    ///
    /// Returns `Ok(true)` when a task run started.
    pub fn trigger(&mut self, edge: Edge, over_offset: Option<f32>) -> Result<bool, ConfigError> {
        let Some(indicator) = self.indicator(edge) else {
            return Ok(false);
        };
        let indicator = indicator.clone();
        if !indicator.call_task(over_offset)? {
            return Ok(false);
        }
        let from = indicator.offset();
        let to = indicator.settle_offset();
        self.start_spring(edge, &indicator, from, to, SpringPurpose::Settle);
        self.kick();
        Ok(true)
    }

    /// Controller finish signal; frames keep running for the grace
    /// countdown and the spring-back
    pub fn finish(&mut self, edge: Edge, result: crate::mode::TaskResult) {
        if let Some(indicator) = self.indicator(edge) {
            indicator.finish(result);
            self.kick();
        }
    }

    /// Controller reset; springs the offset home if the machine let go
    pub fn reset(&mut self, edge: Edge) {
        let Some(indicator) = self.indicator(edge) else {
            return;
        };
        let indicator = indicator.clone();
        indicator.reset();
        self.kick();
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance all animations by `dt` seconds.
    ///
    /// Returns true while more frames are needed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.scheduler.advance(dt);
        let mut active = false;

        for edge in [Edge::Header, Edge::Footer] {
            let Some(indicator) = self.indicator(edge) else {
                continue;
            };
            let indicator = indicator.clone();

            // Processed -> Done confirmation countdown
            if indicator.advance(dt) {
                active = true;
            }

            let index = edge_index(edge);
            if let Some(edge_spring) = &self.springs[index] {
                let (value, settled) = match self.scheduler.get_spring(edge_spring.id) {
                    Some(spring) => (spring.value(), spring.is_settled()),
                    None => (indicator.offset(), true),
                };
                indicator.update_offset(value, false);
                if settled {
                    let purpose = edge_spring.purpose;
                    if let Some(spring) = self.springs[index].take() {
                        self.scheduler.remove_spring(spring.id);
                    }
                    if purpose == SpringPurpose::Rest {
                        indicator.settle_finished();
                    }
                    // Hand off to the follow-up spring in this same frame
                    // (a settle at the trigger chains into the spring-back
                    // once the mode reaches Done); returning idle here
                    // would strand the indicator mid-sequence
                    if !self.shared.is_user_dragging()
                        && self.start_pending_spring(edge, &indicator)
                    {
                        active = true;
                    }
                } else {
                    active = true;
                }
            } else if !self.shared.is_user_dragging() {
                if self.start_pending_spring(edge, &indicator) {
                    active = true;
                }
            }
        }

        if !active && self.driver_active {
            self.driver.frames_idle();
            self.driver_active = false;
        }
        active
    }

    /// Launch whichever spring the indicator's mode calls for, if any
    fn start_pending_spring(&mut self, edge: Edge, indicator: &Indicator) -> bool {
        let offset = indicator.offset();
        let rest = indicator.rest_offset();
        let settle = indicator.settle_offset();
        match indicator.mode() {
            IndicatorMode::Done | IndicatorMode::Inactive | IndicatorMode::NoMore
                if offset > rest + SETTLE_EPSILON =>
            {
                self.start_spring(edge, indicator, offset, rest, SpringPurpose::Rest);
                true
            }
            IndicatorMode::Done | IndicatorMode::NoMore if offset <= rest + SETTLE_EPSILON => {
                // Already home; confirm without animating
                indicator.update_offset(rest, false);
                indicator.settle_finished();
                false
            }
            IndicatorMode::Ready | IndicatorMode::Processing | IndicatorMode::Processed
                if (offset - settle).abs() > SETTLE_EPSILON =>
            {
                self.start_spring(edge, indicator, offset, settle, SpringPurpose::Settle);
                true
            }
            _ => false,
        }
    }

    fn start_spring(
        &mut self,
        edge: Edge,
        indicator: &Indicator,
        from: f32,
        to: f32,
        purpose: SpringPurpose,
    ) {
        let index = edge_index(edge);
        if let Some(old) = self.springs[index].take() {
            self.scheduler.remove_spring(old.id);
        }
        let mut spring = Spring::new(indicator.spring_config(), from);
        spring.set_target(to);
        tracing::trace!(
            "{:?} spring: {:.1} -> {:.1} ({:?})",
            edge,
            from,
            to,
            purpose
        );
        let id = self.scheduler.add_spring(spring);
        self.springs[index] = Some(EdgeSpring { id, purpose });
    }

    /// Wake the frame driver if it is idle
    fn kick(&mut self) {
        if !self.driver_active {
            self.driver.frames_needed();
            self.driver_active = true;
        }
    }
}
