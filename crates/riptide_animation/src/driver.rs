//! Animation driver seam
//!
//! Decouples animation from any particular render loop: instead of a
//! ticker mixin, the host injects an [`AnimationDriver`] and is told when
//! frames are required. The host then calls back into the animating
//! component with elapsed time (`tick(dt)`) until it reports settled.

/// Host hook for starting and stopping frame delivery.
///
/// `frames_needed` fires when an animation begins while everything was at
/// rest; `frames_idle` fires when the last animation settles. Between the
/// two, the host is expected to keep delivering frames.
pub trait AnimationDriver: Send {
    /// An animation started; begin delivering frames
    fn frames_needed(&mut self);

    /// All animations settled; frame delivery may stop
    fn frames_idle(&mut self);
}

/// Driver for hosts that deliver frames unconditionally
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDriver;

impl AnimationDriver for NoopDriver {
    fn frames_needed(&mut self) {}
    fn frames_idle(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDriver {
        started: usize,
        idled: usize,
    }

    impl AnimationDriver for CountingDriver {
        fn frames_needed(&mut self) {
            self.started += 1;
        }
        fn frames_idle(&mut self) {
            self.idled += 1;
        }
    }

    #[test]
    fn test_driver_object_safety() {
        let mut driver: Box<dyn AnimationDriver> = Box::<CountingDriver>::default();
        driver.frames_needed();
        driver.frames_idle();
    }

    #[test]
    fn test_noop_driver() {
        let mut driver = NoopDriver;
        driver.frames_needed();
        driver.frames_idle();
    }
}
