//! Animation scheduler
//!
//! Registry of active springs. The host advances the scheduler with an
//! explicit elapsed time each frame (`advance`), or lets it read the wall
//! clock (`tick`) when it has no frame timestamps of its own.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct SpringId;
}

/// Holds all active springs and steps them per frame
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        let id = self.springs.insert(spring);
        tracing::trace!(
            "spring registered: {:.1} -> {:.1} ({} active)",
            spring.value(),
            spring.target(),
            self.springs.len()
        );
        id
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Mutate a spring in place, if it exists
    pub fn with_spring_mut<R>(
        &mut self,
        id: SpringId,
        f: impl FnOnce(&mut Spring) -> R,
    ) -> Option<R> {
        self.springs.get_mut(id).map(f)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Step all springs by an explicit elapsed time in seconds
    pub fn advance(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Step all springs by the wall-clock time since the last tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt);
    }

    /// Check if any spring is still in flight
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Number of registered springs
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    #[test]
    fn test_add_remove_spring() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_spring(Spring::new(SpringConfig::default(), 0.0));
        assert_eq!(scheduler.spring_count(), 1);
        assert!(scheduler.get_spring(id).is_some());

        scheduler.remove_spring(id);
        assert_eq!(scheduler.spring_count(), 0);
        assert!(scheduler.get_spring(id).is_none());
    }

    #[test]
    fn test_advance_steps_all_springs() {
        let mut scheduler = AnimationScheduler::new();
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(50.0);
        let id = scheduler.add_spring(spring);

        assert!(scheduler.has_active_animations());

        for _ in 0..600 {
            scheduler.advance(1.0 / 60.0);
        }

        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.get_spring(id).unwrap().value(), 50.0);
    }

    #[test]
    fn test_with_spring_mut() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_spring(Spring::new(SpringConfig::default(), 0.0));

        let retargeted = scheduler.with_spring_mut(id, |s| {
            s.set_target(10.0);
            s.target()
        });
        assert_eq!(retargeted, Some(10.0));

        scheduler.remove_spring(id);
        assert_eq!(scheduler.with_spring_mut(id, |_| ()), None);
    }
}
