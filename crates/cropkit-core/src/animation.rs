//! Spring-animated scalar values.
//!
//! A [`SpringValue`] is a current value chasing a target value. Hosts that
//! animate call [`SpringValue::step`] once per frame; hosts that only need the
//! final result call [`SpringValue::settle`]. Geometry that gets committed
//! (sticker placement on submit) always reads the settled target.
//!
//! Integration is semi-implicit Euler with fixed substeps, which stays stable
//! for the stiffness/mass ranges used by the editor.

use serde::{Deserialize, Serialize};

/// Largest integration substep, in seconds.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
    /// Distance from the target below which the spring may come to rest
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

impl SpringConfig {
    /// Light spring used for sticker translation.
    pub fn position() -> Self {
        Self {
            mass: 0.5,
            ..Self::default()
        }
    }

    /// Spring used for pinch scaling.
    pub fn scale() -> Self {
        Self {
            mass: 0.5,
            damping: 10.0,
            rest_displacement: 0.001,
            rest_speed: 0.01,
            ..Self::default()
        }
    }
}

/// A scalar animated towards a target by a spring.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringValue {
    current: f64,
    target: f64,
    velocity: f64,
    config: SpringConfig,
    moving: bool,
}

impl SpringValue {
    /// A spring at rest at `value`.
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            current: value,
            target: value,
            velocity: 0.0,
            config,
            moving: false,
        }
    }

    /// Current (possibly in-flight) value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Value the spring is heading to.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// True while the spring has not yet arrived at its target.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Retarget the spring, keeping the current value and velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.moving = !self.at_rest();
    }

    /// Teleport to `value` with no animation.
    pub fn jump_to(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        self.moving = false;
    }

    /// Snap to the target and return it.
    pub fn settle(&mut self) -> f64 {
        self.jump_to(self.target);
        self.target
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns `true` on the step during which the spring arrives at its
    /// target; `false` while still moving or when already at rest. Steps that
    /// are not finite and positive are ignored.
    pub fn step(&mut self, dt: f64) -> bool {
        if !self.moving || !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f64;
        for _ in 0..substeps {
            let displacement = self.current - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += force / self.config.mass * h;
            self.current += self.velocity * h;

            if self.at_rest() {
                self.jump_to(self.target);
                return true;
            }
        }
        false
    }

    /// [`step`](Self::step), invoking `on_arrival` with the settled value when
    /// the spring arrives.
    pub fn step_with(&mut self, dt: f64, on_arrival: impl FnOnce(f64)) {
        if self.step(dt) {
            on_arrival(self.current);
        }
    }

    fn at_rest(&self) -> bool {
        (self.current - self.target).abs() <= self.config.rest_displacement
            && self.velocity.abs() <= self.config.rest_speed
    }
}
