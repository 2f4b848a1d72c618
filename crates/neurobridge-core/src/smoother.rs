//! Spring-damper filter that turns jittery scroll progress into smooth motion.
//!
//! State is an explicit (position, velocity) pair advanced with semi-implicit
//! Euler in short fixed sub-steps, so results only depend on the tick
//! durations fed in.

use std::time::Duration;

/// Longest integration step; longer ticks are split.
const MAX_STEP_SECS: f32 = 1.0 / 240.0;
/// Ticks longer than this (e.g. after the window was hidden) are truncated.
const MAX_TICK_SECS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub rest_delta: f32,
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Replace non-positive or non-finite constants with defaults.
    pub fn sanitized(self) -> Self {
        let fallback = SpringConfig::default();
        let pick = |value: f32, default: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        };
        SpringConfig {
            stiffness: pick(self.stiffness, fallback.stiffness),
            damping: pick(self.damping, fallback.damping),
            mass: pick(self.mass, fallback.mass),
            rest_delta: pick(self.rest_delta, fallback.rest_delta),
            rest_speed: pick(self.rest_speed, fallback.rest_speed),
        }
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Debug, Clone)]
pub struct SpringSmoother {
    config: SpringConfig,
    position: f32,
    velocity: f32,
    target: f32,
    initialized: bool,
    resting: bool,
}

impl SpringSmoother {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config: config.sanitized(),
            position: 0.0,
            velocity: 0.0,
            target: 0.0,
            initialized: false,
            resting: true,
        }
    }

    /// Feed a new raw value. The first value initializes the output directly.
    pub fn update(&mut self, raw: f32) {
        if !raw.is_finite() {
            return;
        }
        if !self.initialized {
            self.position = raw;
            self.target = raw;
            self.velocity = 0.0;
            self.initialized = true;
            self.resting = true;
            return;
        }
        if raw != self.target {
            self.target = raw;
            self.resting = false;
        }
    }

    /// Jump straight to `value` with no motion.
    pub fn reset(&mut self, value: f32) {
        self.initialized = false;
        self.update(value);
    }

    /// Advance by `dt`. Returns the new output, or `None` while idle.
    pub fn tick(&mut self, dt: Duration) -> Option<f32> {
        if self.is_idle() {
            return None;
        }
        let mut remaining = dt.as_secs_f32().min(MAX_TICK_SECS);
        if !(remaining > 0.0) {
            return None;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            let displacement = self.position - self.target;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * step;
            self.position += self.velocity * step;
            remaining -= step;

            if self.at_rest() {
                self.position = self.target;
                self.velocity = 0.0;
                self.resting = true;
                break;
            }
        }
        Some(self.position)
    }

    fn at_rest(&self) -> bool {
        (self.position - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    pub fn value(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True once the output has converged and the input is stationary.
    pub fn is_idle(&self) -> bool {
        !self.initialized || self.resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn settle(smoother: &mut SpringSmoother, max_ticks: usize) -> (usize, f32) {
        let mut peak = smoother.value();
        for tick in 0..max_ticks {
            match smoother.tick(FRAME) {
                Some(value) => peak = peak.max(value),
                None => return (tick, peak),
            }
        }
        (max_ticks, peak)
    }

    #[test]
    fn first_update_initializes_without_motion() {
        let mut smoother = SpringSmoother::new(SpringConfig::default());
        assert!(smoother.is_idle());
        smoother.update(0.4);
        assert_eq!(smoother.value(), 0.4);
        assert!(smoother.is_idle());
        assert_eq!(smoother.tick(FRAME), None);
    }

    #[test]
    fn step_response_converges_without_large_overshoot() {
        let mut smoother = SpringSmoother::new(SpringConfig::default());
        smoother.update(0.0);
        smoother.update(1.0);

        let (ticks, peak) = settle(&mut smoother, 600);

        assert!(ticks < 600, "spring should come to rest");
        assert!(peak <= 1.0 + 0.01, "overshoot too large: {peak}");
        assert_eq!(smoother.value(), 1.0);
        assert!(smoother.is_idle());
    }

    #[test]
    fn small_input_changes_produce_small_output_steps() {
        let mut smoother = SpringSmoother::new(SpringConfig::default());
        smoother.update(0.5);
        smoother.update(0.501);

        let before = smoother.value();
        let after = smoother.tick(FRAME).expect("spring should move");
        assert!((after - before).abs() <= 0.001);
    }

    #[test]
    fn tracks_a_moving_target() {
        let mut smoother = SpringSmoother::new(SpringConfig::default());
        smoother.update(0.0);
        let mut previous = 0.0;
        for step in 1..=60 {
            smoother.update(step as f32 / 60.0);
            let value = smoother.tick(FRAME).expect("moving target keeps spring active");
            assert!(value >= previous - 1e-6);
            previous = value;
        }
        let (ticks, _) = settle(&mut smoother, 600);
        assert!(ticks < 600);
        assert_eq!(smoother.value(), 1.0);
    }

    #[test]
    fn ignores_invalid_input_and_ticks() {
        let mut smoother = SpringSmoother::new(SpringConfig::default());
        smoother.update(f32::NAN);
        assert!(!smoother.is_initialized());

        smoother.update(0.2);
        smoother.update(0.8);
        assert_eq!(smoother.tick(Duration::ZERO), None);
        smoother.update(f32::INFINITY);
        assert_eq!(smoother.target(), 0.8);
    }

    #[test]
    fn sanitizes_bad_constants() {
        let config = SpringConfig {
            stiffness: -1.0,
            damping: f32::NAN,
            mass: 0.0,
            rest_delta: 0.002,
            rest_speed: 0.01,
        }
        .sanitized();
        assert_eq!(config.stiffness, 100.0);
        assert_eq!(config.damping, 30.0);
        assert_eq!(config.mass, 1.0);
        assert_eq!(config.rest_delta, 0.002);
        assert!(SpringConfig::default().damping_ratio() >= 1.0);
    }
}
