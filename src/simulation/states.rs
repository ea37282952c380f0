//! Core state types for the particle simulation.
//!
//! Defines the 2D `Body` (a real particle with position, velocity, force
//! accumulator, mass, radius and display tag) and the `System` that owns the
//! ordered list of bodies plus the elapsed time.
//!
//! Gravity and integration live here; collision queries and responses are in
//! [`crate::simulation::collision`].

use nalgebra::Vector2;

use crate::simulation::forces::NewtonianGravity;

pub type NVec2 = Vector2<f64>;

/// Stable handle of a real body: its index in `System::bodies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Display color carried through the simulation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayTag {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub f: NVec2, // accumulated force
    pub m: f64, // mass
    pub radius: f64, // collision radius
    pub tag: DisplayTag, // color, only the renderer reads it
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // ordered collection of real bodies
    pub t: f64, // elapsed time
    pub step: u64, // number of completed steps
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64, tag: DisplayTag) -> Self {
        Self {
            x,
            v,
            f: NVec2::zeros(),
            m,
            radius,
            tag,
        }
    }

    /// Zero the force accumulator. Called once per step before any
    /// contribution is added.
    pub fn reset_force(&mut self) {
        self.f = NVec2::zeros();
    }

    /// Accumulate the pull of `other` onto this body.
    ///
    /// `other` cannot alias `self`, so self-interaction is ruled out by the
    /// borrow checker rather than by an identity test.
    pub fn add_force(&mut self, other: &Body, gravity: &NewtonianGravity) {
        self.add_force_from(other.m, other.x, gravity);
    }

    /// Accumulate the pull of a point mass `m` located at `at`.
    ///
    /// Used both for real bodies and for the tree's aggregates. Coincident
    /// positions have no direction and contribute nothing.
    pub fn add_force_from(&mut self, m: f64, at: NVec2, gravity: &NewtonianGravity) {
        let r = at - self.x;
        let dist2 = r.dot(&r);
        if dist2 == 0.0 {
            return;
        }
        let dist = dist2.sqrt();

        // F = G m1 m2 / (d^2 + eps^2), along r / |r|
        let magnitude = gravity.G * self.m * m / (dist2 + gravity.eps2);
        self.f += magnitude * r / dist;
    }

    /// Semi-implicit Euler: kick the velocity with the accumulated force,
    /// then drift the position with the new velocity.
    pub fn integrate(&mut self, dt: f64) {
        self.v += dt * self.f / self.m;
        self.x += dt * self.v;
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.x - other.x).norm()
    }

    pub fn relative_speed_to(&self, other: &Body) -> f64 {
        (other.v - self.v).norm()
    }

    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            t: 0.0,
            step: 0,
        }
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
