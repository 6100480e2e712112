//! Riptide Animation System
//!
//! Spring physics and frame scheduling for overscroll indicators.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Scheduler**: slotmap-backed registry of active springs, stepped with
//!   explicit elapsed time so hosts and tests control the clock
//! - **Driver Seam**: an injected [`AnimationDriver`] tells the host when
//!   frames are required instead of tying animation to a render loop

pub mod driver;
pub mod scheduler;
pub mod spring;

pub use driver::{AnimationDriver, NoopDriver};
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
