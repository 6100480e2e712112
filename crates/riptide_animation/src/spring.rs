//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs animate a
//! scalar value toward a target; interrupting an animation keeps the
//! current velocity, so retargeting mid-flight stays smooth.

/// Maximum internal integration step in seconds.
///
/// RK4 diverges for stiff springs when `dt * sqrt(stiffness / mass)`
/// grows past its stability region, so large frame deltas are split into
/// substeps no longer than this.
const MAX_STEP: f32 = 1.0 / 120.0;

/// Spring parameters: stiffness, damping, and mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant k (restoring force per unit displacement)
    pub stiffness: f32,
    /// Damping coefficient c (force per unit velocity)
    pub damping: f32,
    /// Mass m of the animated value
    pub mass: f32,
}

impl SpringConfig {
    /// Create a config from raw physical constants
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Stiff spring: fast settle, no visible wobble
    pub fn stiff() -> Self {
        Self::new(400.0, 28.0, 1.0)
    }

    /// Gentle spring: slower settle with a soft approach
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Snappy spring: quick settle with a slight overshoot
    pub fn snappy() -> Self {
        Self::new(300.0, 24.0, 1.0)
    }

    /// Critical damping coefficient for this stiffness and mass
    ///
    /// `2 * sqrt(k * m)` — the boundary between oscillating and
    /// non-oscillating response.
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        // Critically damped mid-stiffness spring; settles in ~300ms
        Self::new(170.0, 26.0, 1.0)
    }
}

/// A scalar spring animating `value` toward `target`.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Current animated value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity (units per second)
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Current target
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The spring's configuration
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring, keeping current value and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Whether the spring has effectively reached its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < 0.05 && self.velocity.abs() < 0.05
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.rk4(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Acceleration at a given displacement and velocity
    fn accel(&self, value: f32, velocity: f32) -> f32 {
        let displacement = value - self.target;
        (-self.config.stiffness * displacement - self.config.damping * velocity)
            / self.config.mass
    }

    /// One classic RK4 step of the (value, velocity) system
    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1v = self.accel(x, v);
        let k1x = v;

        let k2v = self.accel(x + k1x * h * 0.5, v + k1v * h * 0.5);
        let k2x = v + k1v * h * 0.5;

        let k3v = self.accel(x + k2x * h * 0.5, v + k2v * h * 0.5);
        let k3x = v + k2v * h * 0.5;

        let k4v = self.accel(x + k3x * h, v + k3v * h);
        let k4x = v + k3v * h;

        self.value = x + (k1x + 2.0 * k2x + 2.0 * k3x + k4x) * h / 6.0;
        self.velocity = v + (k1v + 2.0 * k2v + 2.0 * k3v + k4v) * h / 6.0;
    }
}
