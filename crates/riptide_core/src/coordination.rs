//! Cross-edge coordination
//!
//! One [`SharedSignal`] per pull area, constructed once and passed by
//! reference to both edge machines and the physics adapter. It carries
//! the only state both edges read: whether the user is actively driving
//! offset, and which edges currently hold a processing slot.

use crate::mode::Edge;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flags shared between the header and footer machines
pub struct SharedSignal {
    /// True while a pointer is actively driving offset (false once
    /// released, even if the offset is still animating)
    user_dragging: AtomicBool,
    header_processing: AtomicBool,
    footer_processing: AtomicBool,
    /// Allow concurrent header + footer tasks
    simultaneously: bool,
}

impl SharedSignal {
    pub fn new(simultaneously: bool) -> Self {
        Self {
            user_dragging: AtomicBool::new(false),
            header_processing: AtomicBool::new(false),
            footer_processing: AtomicBool::new(false),
            simultaneously,
        }
    }

    pub fn set_user_dragging(&self, dragging: bool) {
        self.user_dragging.store(dragging, Ordering::SeqCst);
    }

    pub fn is_user_dragging(&self) -> bool {
        self.user_dragging.load(Ordering::SeqCst)
    }

    fn processing_flag(&self, edge: Edge) -> &AtomicBool {
        match edge {
            Edge::Header => &self.header_processing,
            Edge::Footer => &self.footer_processing,
        }
    }

    /// Claim the processing slot for an edge
    pub fn begin_processing(&self, edge: Edge) {
        self.processing_flag(edge).store(true, Ordering::SeqCst);
    }

    /// Release the processing slot for an edge
    pub fn end_processing(&self, edge: Edge) {
        self.processing_flag(edge).store(false, Ordering::SeqCst);
    }

    pub fn is_processing(&self, edge: Edge) -> bool {
        self.processing_flag(edge).load(Ordering::SeqCst)
    }

    /// Whether `edge` may start a task now.
    ///
    /// Unconditionally true when simultaneous execution is configured;
    /// otherwise true only while the opposite edge is not processing.
    pub fn can_task(&self, edge: Edge) -> bool {
        self.simultaneously || !self.is_processing(edge.other())
    }

    pub fn can_header_task(&self) -> bool {
        self.can_task(Edge::Header)
    }

    pub fn can_footer_task(&self) -> bool {
        self.can_task(Edge::Footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_processing() {
        let shared = SharedSignal::new(false);
        assert!(shared.can_header_task());
        assert!(shared.can_footer_task());

        shared.begin_processing(Edge::Footer);
        assert!(!shared.can_header_task());
        // An edge's own slot does not block itself; the mode machine does
        assert!(shared.can_footer_task());

        shared.end_processing(Edge::Footer);
        assert!(shared.can_header_task());
    }

    #[test]
    fn test_simultaneous_processing_allowed() {
        let shared = SharedSignal::new(true);
        shared.begin_processing(Edge::Footer);
        shared.begin_processing(Edge::Header);
        assert!(shared.can_header_task());
        assert!(shared.can_footer_task());
    }

    #[test]
    fn test_user_dragging_flag() {
        let shared = SharedSignal::new(false);
        assert!(!shared.is_user_dragging());
        shared.set_user_dragging(true);
        assert!(shared.is_user_dragging());
        shared.set_user_dragging(false);
        assert!(!shared.is_user_dragging());
    }
}
