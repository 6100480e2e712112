//! Per-edge indicator state machine
//!
//! Owns `mode`, `offset`, and `result` for one edge, decides transitions,
//! and owns the task lifecycle. The physics adapter and the controller
//! never mutate fields directly; they request transitions through the
//! public operations here.
//!
//! State lives behind `Arc<Mutex<..>>` so a [`TaskHandle`] completing on
//! an executor thread serializes through the same lock as frame updates.
//! Listener notification happens after the state lock is released, so a
//! completion arriving mid-frame cannot deadlock against the notifier.

use crate::config::{ConfigError, IndicatorConfig};
use crate::coordination::SharedSignal;
use crate::geometry::{Axis, AxisDirection};
use crate::mode::{pull_events, Edge, IndicatorMode, ModeTransitions, TaskResult};
use crate::notifier::{IndicatorSnapshot, ListenerId, StateNotifier};
use std::sync::{Arc, Mutex, Weak};

/// Task callback: invoked at most once per processing entry, receives the
/// handle that reports the asynchronous outcome
pub type TaskFn = Box<dyn FnMut(TaskHandle) + Send>;

/// What the physics adapter should animate after a release decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseAction {
    /// Nothing to animate
    None,
    /// Spring the offset back to its rest baseline; the indicator must be
    /// told via `settle_finished` when the spring arrives
    SpringBack { from: f32, to: f32 },
    /// Spring the offset to the task holding position (trigger offset)
    Settle { from: f32, to: f32 },
}

/// Handle that resolves one task invocation.
///
/// Consuming methods enforce at-most-once completion; a handle that
/// outlives the indicator (disposal) or its processing entry (reset,
/// next cycle) is silently ignored.
pub struct TaskHandle {
    inner: Weak<Mutex<IndicatorInner>>,
    notifier: Weak<Mutex<StateNotifier>>,
    generation: u64,
}

impl TaskHandle {
    /// Report success
    pub fn succeed(self) {
        self.finish_with(TaskResult::Succeeded);
    }

    /// Report failure; the indicator still advances (UI never freezes)
    pub fn fail(self) {
        self.finish_with(TaskResult::Failed);
    }

    /// Report that no further data exists for this edge
    pub fn no_more(self) {
        self.finish_with(TaskResult::NoMore);
    }

    /// Resolve with an explicit result; `TaskResult::None` reads as success
    pub fn complete(self, result: TaskResult) {
        let result = match result {
            TaskResult::None => TaskResult::Succeeded,
            other => other,
        };
        self.finish_with(result);
    }

    fn finish_with(self, result: TaskResult) {
        let Some(inner_arc) = self.inner.upgrade() else {
            tracing::trace!("task completion after disposal, ignored");
            return;
        };
        let snapshot = {
            let mut inner = inner_arc.lock().unwrap();
            if inner.disposed
                || inner.generation != self.generation
                || inner.mode != IndicatorMode::Processing
                || !inner.config.wait_result
            {
                return;
            }
            inner.complete_locked(result)
        };
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.lock().unwrap().publish(snapshot);
        }
    }
}

struct IndicatorInner {
    edge: Edge,
    config: IndicatorConfig,
    mode: IndicatorMode,
    offset: f32,
    result: TaskResult,
    axis: Option<Axis>,
    axis_direction: Option<AxisDirection>,
    safe_offset: f32,
    shared: Arc<SharedSignal>,
    task: Option<TaskFn>,
    /// Processing entry counter; stale task handles are ignored
    generation: u64,
    /// Remaining Processed -> Done confirmation time in seconds
    grace_remaining: f32,
    disposed: bool,
}

impl IndicatorInner {
    fn send(&mut self, event: u32) -> bool {
        if let Some(next) = self.mode.on_event(event) {
            tracing::trace!(
                "{:?} indicator: {:?} -> {:?} (event {})",
                self.edge,
                self.mode,
                next,
                event
            );
            self.mode = next;
            true
        } else {
            false
        }
    }

    fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            edge: self.edge,
            mode: self.mode,
            offset: self.offset,
            trigger_offset: self.config.trigger_offset,
            result: self.result,
            axis: self.axis,
            axis_direction: self.axis_direction,
        }
    }

    /// Apply a new offset and run the user-driven transition rules
    fn update_offset_locked(&mut self, new_offset: f32, by_user: bool) {
        let mut offset = new_offset.max(0.0);
        if self.config.clamp_overscroll {
            offset = offset.min(self.config.max_offset);
        }
        self.offset = offset;

        if by_user && offset > 0.0 {
            match self.mode {
                IndicatorMode::Inactive => {
                    self.send(pull_events::DRAG_START);
                }
                IndicatorMode::NoMore if self.config.no_more_retrigger => {
                    self.send(pull_events::RETRIGGER);
                }
                _ => {}
            }
        }

        if by_user {
            match self.mode {
                IndicatorMode::Drag
                    if offset >= self.config.trigger_offset
                        && self.task.is_some()
                        && self.shared.can_task(self.edge) =>
                {
                    self.send(pull_events::REACH_TRIGGER);
                }
                IndicatorMode::Armed if offset < self.config.trigger_offset => {
                    self.send(pull_events::FALL_BACK);
                }
                _ => {}
            }
        }
    }

    /// Claim the processing slot and move Armed -> Ready -> Processing.
    /// Caller must fire the task after releasing the lock.
    fn commit_locked(&mut self) {
        self.send(pull_events::COMMIT);
        self.shared.begin_processing(self.edge);
        self.result = TaskResult::None;
        self.generation = self.generation.wrapping_add(1);
        self.send(pull_events::TASK_START);
    }

    /// Record a completion and release the processing slot
    fn complete_locked(&mut self, result: TaskResult) -> IndicatorSnapshot {
        self.result = result;
        self.send(pull_events::TASK_COMPLETE);
        self.shared.end_processing(self.edge);
        self.grace_remaining = self.config.processed_grace;
        if self.grace_remaining <= 0.0 {
            self.send(pull_events::GRACE_ELAPSED);
        }
        self.snapshot()
    }
}

/// Cloneable handle to one edge's state machine
#[derive(Clone)]
pub struct Indicator {
    inner: Arc<Mutex<IndicatorInner>>,
    notifier: Arc<Mutex<StateNotifier>>,
}

impl Indicator {
    /// Create the machine for one edge; the configuration is validated
    pub fn new(
        edge: Edge,
        config: IndicatorConfig,
        shared: Arc<SharedSignal>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Mutex::new(IndicatorInner {
                edge,
                config,
                mode: IndicatorMode::Inactive,
                offset: 0.0,
                result: TaskResult::None,
                axis: None,
                axis_direction: None,
                safe_offset: 0.0,
                shared,
                task: None,
                generation: 0,
                grace_remaining: 0.0,
                disposed: false,
            })),
            notifier: Arc::new(Mutex::new(StateNotifier::new())),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn edge(&self) -> Edge {
        self.inner.lock().unwrap().edge
    }

    pub fn mode(&self) -> IndicatorMode {
        self.inner.lock().unwrap().mode
    }

    pub fn offset(&self) -> f32 {
        self.inner.lock().unwrap().offset
    }

    pub fn result(&self) -> TaskResult {
        self.inner.lock().unwrap().result
    }

    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.inner.lock().unwrap().snapshot()
    }

    /// Rest baseline the offset returns to (safe-area inset)
    pub fn rest_offset(&self) -> f32 {
        self.inner.lock().unwrap().safe_offset
    }

    /// Holding position while a task runs (trigger offset above rest)
    pub fn settle_offset(&self) -> f32 {
        let inner = self.inner.lock().unwrap();
        inner.safe_offset + inner.config.trigger_offset
    }

    /// Spring description for this edge's animations
    pub fn spring_config(&self) -> riptide_animation::SpringConfig {
        self.inner.lock().unwrap().config.spring
    }

    /// Whether this indicator may operate on a horizontal axis
    pub fn allows_horizontal(&self) -> bool {
        self.inner.lock().unwrap().config.allow_horizontal
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Install the task callback for this edge
    pub fn set_task<F>(&self, task: F)
    where
        F: FnMut(TaskHandle) + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        if inner.disposed {
            return;
        }
        inner.task = Some(Box::new(task));
    }

    /// Subscribe a skin/listener to state changes
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&IndicatorSnapshot) + Send + 'static,
    {
        self.notifier.lock().unwrap().subscribe(listener)
    }

    /// Remove a subscription
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.lock().unwrap().unsubscribe(id)
    }

    /// Record the host layout once it is known
    pub fn set_layout(&self, axis_direction: AxisDirection, safe_offset: f32) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            inner.axis = Some(axis_direction.axis());
            inner.axis_direction = Some(axis_direction);
            inner.safe_offset = safe_offset;
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    // =========================================================================
    // Offset updates
    // =========================================================================

    /// Report a new offset. `by_user` distinguishes live gesture input
    /// (which may arm the machine) from animation frames (visual only).
    pub fn update_offset(&self, new_offset: f32, by_user: bool) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            inner.update_offset_locked(new_offset, by_user);
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    /// Grow the offset by a raw user drag delta, applying rubber-band
    /// friction to the portion past the trigger offset.
    ///
    /// The sub-trigger portion passes 1:1; the rest is scaled by the
    /// friction factor evaluated at the current overscroll fraction
    /// (against `max_offset` when finite, else the viewport extent).
    pub fn apply_pull(&self, raw_delta: f32, viewport_extent: f32) {
        if raw_delta <= 0.0 {
            return;
        }
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            let current = inner.offset;
            let below = (inner.config.trigger_offset - current).max(0.0);
            let pass = raw_delta.min(below);
            let over = raw_delta - pass;
            let reference = inner.config.overscroll_reference(viewport_extent);
            let fraction = (current / reference).clamp(0.0, 1.0);
            let adjusted = pass + over * (inner.config.friction)(fraction);
            inner.update_offset_locked(current + adjusted, true);
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    /// Shrink the offset by up to `amount` (1:1, no friction on the way
    /// back). Returns the unconsumed remainder for the scroll position.
    pub fn collapse_by(&self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return amount.max(0.0);
        }
        let (snapshot, leftover) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return amount;
            }
            let current = inner.offset;
            let consumed = amount.min(current);
            inner.update_offset_locked(current - consumed, true);
            (inner.snapshot(), amount - consumed)
        };
        self.publish(snapshot);
        leftover
    }

    // =========================================================================
    // Release / commit
    // =========================================================================

    /// Decide what happens when the user releases.
    ///
    /// While armed (and the guards pass) this commits: the mode moves
    /// through Ready into Processing, the task fires, and the caller is
    /// told to settle the offset at the holding position. Otherwise the
    /// offset springs back to rest.
    pub fn release(&self) -> ReleaseAction {
        let (action, snapshot, fire) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return ReleaseAction::None;
            }
            let rest = inner.safe_offset;
            let settle = rest + inner.config.trigger_offset;
            let from = inner.offset;
            let (action, fire) = match inner.mode {
                IndicatorMode::Armed => {
                    if inner.task.is_some() && inner.shared.can_task(inner.edge) {
                        inner.commit_locked();
                        (ReleaseAction::Settle { from, to: settle }, true)
                    } else {
                        inner.send(pull_events::RELEASE);
                        (ReleaseAction::SpringBack { from, to: rest }, false)
                    }
                }
                IndicatorMode::Drag => {
                    inner.send(pull_events::RELEASE);
                    (ReleaseAction::SpringBack { from, to: rest }, false)
                }
                IndicatorMode::Ready | IndicatorMode::Processing | IndicatorMode::Processed
                    if from != settle =>
                {
                    (ReleaseAction::Settle { from, to: settle }, false)
                }
                _ if from > rest => (ReleaseAction::SpringBack { from, to: rest }, false),
                _ => (ReleaseAction::None, false),
            };
            (action, inner.snapshot(), fire)
        };
        self.publish(snapshot);
        if fire {
            self.fire_task();
        }
        action
    }

    /// Programmatic trigger: synthesize a pull to `trigger + over_offset`
    /// and commit as if released while armed, bypassing the gesture.
    ///
    /// Returns `Ok(true)` when a task run started.
    pub fn call_task(&self, over_offset: Option<f32>) -> Result<bool, ConfigError> {
        let (snapshot, fire) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return Ok(false);
            }
            let over = over_offset.unwrap_or(inner.config.call_over_offset);
            if !(over > 0.0) {
                return Err(ConfigError::NonPositiveOverOffset(over));
            }
            match inner.mode {
                IndicatorMode::Inactive => {}
                IndicatorMode::NoMore if inner.config.no_more_retrigger => {}
                _ => return Ok(false),
            }
            if inner.task.is_none() || !inner.shared.can_task(inner.edge) {
                return Ok(false);
            }

            let target = inner.config.trigger_offset + over;
            inner.update_offset_locked(target, false);
            match inner.mode {
                IndicatorMode::Inactive => {
                    inner.send(pull_events::DRAG_START);
                }
                IndicatorMode::NoMore => {
                    inner.send(pull_events::RETRIGGER);
                }
                _ => {}
            }
            inner.send(pull_events::REACH_TRIGGER);
            inner.commit_locked();
            (inner.snapshot(), true)
        };
        self.publish(snapshot);
        if fire {
            self.fire_task();
        }
        Ok(true)
    }

    /// Invoke the task callback outside the state lock, so a callback
    /// that completes its handle synchronously cannot deadlock.
    fn fire_task(&self) {
        let (task, handle) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            let handle = TaskHandle {
                inner: Arc::downgrade(&self.inner),
                notifier: Arc::downgrade(&self.notifier),
                generation: inner.generation,
            };
            (inner.task.take(), handle)
        };
        let Some(mut task) = task else { return };
        task(handle);
        let mut inner = self.inner.lock().unwrap();
        if inner.task.is_none() {
            inner.task = Some(task);
        }
    }

    // =========================================================================
    // Completion, confirmation, settling
    // =========================================================================

    /// Explicit finish signal from the controller. This is the only way
    /// to leave Processing when `wait_result` is false; it also works as
    /// an override when waiting. `TaskResult::None` reads as success.
    pub fn finish(&self, result: TaskResult) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed || inner.mode != IndicatorMode::Processing {
                return;
            }
            let result = match result {
                TaskResult::None => TaskResult::Succeeded,
                other => other,
            };
            inner.complete_locked(result)
        };
        self.publish(snapshot);
    }

    /// Advance the Processed -> Done confirmation countdown.
    ///
    /// Returns true while the indicator still needs frames for it.
    pub fn advance(&self, dt: f32) -> bool {
        let (snapshot, needs_frames) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return false;
            }
            if inner.mode == IndicatorMode::Processed {
                inner.grace_remaining -= dt;
                if inner.grace_remaining <= 0.0 {
                    inner.send(pull_events::GRACE_ELAPSED);
                }
            }
            (
                inner.snapshot(),
                inner.mode == IndicatorMode::Processed,
            )
        };
        self.publish(snapshot);
        needs_frames
    }

    /// The spring-back to rest arrived; leave Done for Inactive, or for
    /// NoMore when the task reported no further data.
    pub fn settle_finished(&self) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            let event = if inner.result == TaskResult::NoMore {
                pull_events::SETTLED_NO_MORE
            } else {
                pull_events::SETTLED
            };
            inner.send(event);
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    // =========================================================================
    // Reset / disposal
    // =========================================================================

    /// Force the mode back to Inactive and clear no-more. Ignored while a
    /// task holds the processing slot.
    pub fn reset(&self) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            if inner.mode.is_task_active() {
                tracing::trace!("{:?} indicator: reset ignored while processing", inner.edge);
                return;
            }
            inner.send(pull_events::RESET);
            inner.result = TaskResult::None;
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    /// Clear a no-more verdict without touching other state (used when a
    /// successful refresh invalidates the footer's no-more).
    pub fn clear_no_more(&self) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            let mut changed = false;
            if inner.mode == IndicatorMode::NoMore {
                changed |= inner.send(pull_events::RESET);
            }
            if inner.result == TaskResult::NoMore {
                inner.result = TaskResult::None;
                changed = true;
            }
            if !changed {
                return;
            }
            inner.snapshot()
        };
        self.publish(snapshot);
    }

    /// Tear down: pending completions and all further operations are
    /// ignored, listeners are dropped.
    pub fn dispose(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.task = None;
            if inner.mode.is_task_active() {
                inner.shared.end_processing(inner.edge);
            }
        }
        self.notifier.lock().unwrap().clear();
    }

    fn publish(&self, snapshot: IndicatorSnapshot) {
        self.notifier.lock().unwrap().publish(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn indicator(config: IndicatorConfig) -> Indicator {
        Indicator::new(Edge::Header, config, Arc::new(SharedSignal::new(false))).unwrap()
    }

    fn armed_indicator() -> (Indicator, Arc<Mutex<Option<TaskHandle>>>) {
        let ind = indicator(IndicatorConfig::with_trigger_offset(70.0));
        let slot: Arc<Mutex<Option<TaskHandle>>> = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();
        ind.set_task(move |handle| {
            *slot_clone.lock().unwrap() = Some(handle);
        });
        ind.apply_pull(80.0, 400.0);
        (ind, slot)
    }

    #[test]
    fn test_drag_arm_fall_back() {
        let (ind, _slot) = armed_indicator();
        assert_eq!(ind.mode(), IndicatorMode::Armed);

        // Pull back below the trigger before release
        let leftover = ind.collapse_by(30.0);
        assert_eq!(leftover, 0.0);
        assert_eq!(ind.mode(), IndicatorMode::Drag);
    }

    #[test]
    fn test_without_task_never_arms() {
        let ind = indicator(IndicatorConfig::with_trigger_offset(70.0));
        ind.apply_pull(100.0, 400.0);
        assert_eq!(ind.mode(), IndicatorMode::Drag);
    }

    #[test]
    fn test_release_while_armed_commits_and_fires_once() {
        let (ind, slot) = armed_indicator();
        let action = ind.release();
        assert_eq!(ind.mode(), IndicatorMode::Processing);
        assert!(matches!(action, ReleaseAction::Settle { to, .. } if to == 70.0));
        assert!(slot.lock().unwrap().is_some());

        // Completion drives Processed; zero grace is configured off, so
        // the confirmation countdown runs
        let handle = slot.lock().unwrap().take().unwrap();
        handle.succeed();
        assert_eq!(ind.mode(), IndicatorMode::Processed);
        assert_eq!(ind.result(), TaskResult::Succeeded);

        assert!(ind.advance(0.1)); // still confirming
        assert!(!ind.advance(0.2)); // grace elapsed
        assert_eq!(ind.mode(), IndicatorMode::Done);

        ind.settle_finished();
        assert_eq!(ind.mode(), IndicatorMode::Inactive);
    }

    #[test]
    fn test_release_below_trigger_springs_back() {
        let ind = indicator(IndicatorConfig::with_trigger_offset(70.0));
        ind.set_task(|handle| handle.succeed());
        ind.apply_pull(40.0, 400.0);
        assert_eq!(ind.mode(), IndicatorMode::Drag);

        let action = ind.release();
        assert_eq!(ind.mode(), IndicatorMode::Inactive);
        assert!(matches!(action, ReleaseAction::SpringBack { to, .. } if to == 0.0));
    }

    #[test]
    fn test_stale_handle_ignored() {
        let (ind, slot) = armed_indicator();
        ind.release();
        let stale = slot.lock().unwrap().take().unwrap();

        // Explicit finish resolves the run first
        ind.finish(TaskResult::Succeeded);
        assert_eq!(ind.mode(), IndicatorMode::Processed);
        let mode_before = ind.mode();

        // The task's own (now stale) handle must not double-complete
        stale.fail();
        assert_eq!(ind.mode(), mode_before);
        assert_eq!(ind.result(), TaskResult::Succeeded);
    }

    #[test]
    fn test_completion_after_dispose_is_ignored() {
        let (ind, slot) = armed_indicator();
        ind.release();
        let handle = slot.lock().unwrap().take().unwrap();

        ind.dispose();
        handle.succeed(); // must not panic or mutate

        assert_eq!(ind.mode(), IndicatorMode::Processing);
    }

    #[test]
    fn test_wait_result_false_requires_finish() {
        let config = IndicatorConfig {
            wait_result: false,
            processed_grace: 0.0,
            ..IndicatorConfig::with_trigger_offset(70.0)
        };
        let ind = indicator(config);
        let slot: Arc<Mutex<Option<TaskHandle>>> = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();
        ind.set_task(move |handle| {
            *slot_clone.lock().unwrap() = Some(handle);
        });
        ind.apply_pull(80.0, 400.0);
        ind.release();
        assert_eq!(ind.mode(), IndicatorMode::Processing);

        // The task's handle is inert when not waiting for the result
        slot.lock().unwrap().take().unwrap().succeed();
        assert_eq!(ind.mode(), IndicatorMode::Processing);

        // Only the explicit finish signal advances
        ind.finish(TaskResult::NoMore);
        assert_eq!(ind.mode(), IndicatorMode::Done); // zero grace
        assert_eq!(ind.result(), TaskResult::NoMore);
        ind.settle_finished();
        assert_eq!(ind.mode(), IndicatorMode::NoMore);
    }

    #[test]
    fn test_call_task_synthesizes_commit() {
        let ind = indicator(IndicatorConfig::with_trigger_offset(60.0));
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        ind.set_task(move |handle| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
            handle.succeed();
        });

        let started = ind.call_task(Some(20.0)).unwrap();
        assert!(started);
        assert_eq!(ind.offset(), 80.0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        // Synchronous completion already advanced past Processing
        assert_eq!(ind.mode(), IndicatorMode::Processed);

        // A second trigger while the slot is held is ignored
        assert_eq!(ind.call_task(None).unwrap(), false);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_call_task_rejects_non_positive_over_offset() {
        let ind = indicator(IndicatorConfig::default());
        ind.set_task(|handle| handle.succeed());
        assert_eq!(
            ind.call_task(Some(0.0)),
            Err(ConfigError::NonPositiveOverOffset(0.0))
        );
    }

    #[test]
    fn test_no_more_blocks_arming_without_retrigger() {
        let (ind, slot) = armed_indicator();
        ind.release();
        slot.lock().unwrap().take().unwrap().no_more();
        while ind.advance(0.1) {}
        ind.settle_finished();
        assert_eq!(ind.mode(), IndicatorMode::NoMore);

        // Overscroll moves the offset but never leaves NoMore
        ind.apply_pull(120.0, 400.0);
        assert!(ind.offset() > 0.0);
        assert_eq!(ind.mode(), IndicatorMode::NoMore);

        let action = ind.release();
        assert!(matches!(action, ReleaseAction::SpringBack { .. }));
        assert_eq!(ind.mode(), IndicatorMode::NoMore);
    }

    #[test]
    fn test_clear_no_more() {
        let (ind, slot) = armed_indicator();
        ind.release();
        slot.lock().unwrap().take().unwrap().no_more();
        while ind.advance(0.1) {}
        ind.settle_finished();
        assert_eq!(ind.mode(), IndicatorMode::NoMore);

        ind.clear_no_more();
        assert_eq!(ind.mode(), IndicatorMode::Inactive);
        assert_eq!(ind.result(), TaskResult::None);
    }

    #[test]
    fn test_offset_clamped_at_max() {
        let ind = indicator(IndicatorConfig::clamped(70.0, 120.0));
        ind.set_task(|handle| handle.succeed());
        ind.apply_pull(10_000.0, 400.0);
        assert!(ind.offset() <= 120.0);
    }

    #[test]
    fn test_forcing_offset_zero_keeps_processing() {
        let (ind, _slot) = armed_indicator();
        ind.release();
        assert_eq!(ind.mode(), IndicatorMode::Processing);

        ind.update_offset(0.0, false);
        assert_eq!(ind.offset(), 0.0);
        assert_eq!(ind.mode(), IndicatorMode::Processing);
    }
}
