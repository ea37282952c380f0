//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – Barnes–Hut options and the tree's root region
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BoundaryConfig`]   – the square the bodies bounce around in
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   theta: 0.5              # opening angle, optional
//!   max_depth: 64           # tree depth cap, optional
//!   root:                   # tree region, optional (defaults to the boundary)
//!     center: [ 300.0, 300.0 ]
//!     length: 600.0
//!
//! parameters:
//!   t_end: 100.0            # total simulation time
//!   h0: 0.1                 # fixed step size
//!   G: 6.67e-11             # gravitational constant, optional
//!   eps: 3.0e4              # softening length, optional
//!
//! boundary:
//!   length: 600.0
//!   center: [ 300.0, 300.0 ] # optional, defaults to [length/2, length/2]
//!
//! bodies:
//!   - x: [ 100.0, 300.0 ]
//!     v: [   1.0,   0.0 ]
//!     m: 1.0e6
//!     radius: 10.0
//!     color: [ 255, 0, 0 ]
//!   - x: [ 500.0, 300.0 ]
//!     v: [  -1.0,   0.0 ]
//!     m: 1.0e6
//!     radius: 10.0
//! ```
//!
//! [`ScenarioConfig::validate`] rejects physically meaningless input
//! (non-positive masses, negative radii, ...) before anything is built.

use anyhow::{ensure, Result};
use serde::Deserialize;

use crate::simulation::barnes_hut::DEFAULT_MAX_DEPTH;

pub const DEFAULT_THETA: f64 = 0.5;
pub const DEFAULT_G: f64 = 6.67e-11;
pub const DEFAULT_EPS: f64 = 3.0e4;
pub const DEFAULT_H0: f64 = 0.1;
pub const DEFAULT_T_END: f64 = 10_000.0;

/// A square given by its center and side length
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RegionConfig {
    pub center: [f64; 2],
    pub length: f64,
}

/// High-level engine configuration
/// Controls the Barnes–Hut tree
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    pub theta: Option<f64>, // Determine if a node will be pruned and com is taken instead of going deeper in to tree
    pub max_depth: Option<usize>, // Nodes this deep hold merged bodies instead of subdividing
    pub root: Option<RegionConfig>, // Region the tree covers, the boundary if absent
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_t_end")]
    pub t_end: f64, // time end
    #[serde(default = "default_h0")]
    pub h0: f64, // time step size
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_eps")]
    pub eps: f64, // softening length - prevent singular forces at very small separations
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: DEFAULT_T_END,
            h0: DEFAULT_H0,
            G: DEFAULT_G,
            eps: DEFAULT_EPS,
        }
    }
}

/// The square container
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BoundaryConfig {
    pub length: f64, // side length
    pub center: Option<[f64; 2]>, // defaults to [length/2, length/2], the square starting at the origin
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position
    pub v: [f64; 2], // Initial velocity
    pub m: f64,      // Mass of the body
    pub radius: f64, // Radius of the body, used for collisions
    #[serde(default)]
    pub color: [u8; 3], // RGB display color, black if absent
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub boundary: BoundaryConfig, // Container square
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
}

impl ScenarioConfig {
    /// Reject input the simulation cannot run on.
    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        ensure!(p.h0 > 0.0 && p.h0.is_finite(), "step size h0 must be positive, got {}", p.h0);
        ensure!(p.t_end >= 0.0 && p.t_end.is_finite(), "t_end must be finite and not negative, got {}", p.t_end);
        ensure!(p.G >= 0.0 && p.G.is_finite(), "gravitational constant must be finite and not negative, got {}", p.G);
        ensure!(p.eps >= 0.0 && p.eps.is_finite(), "softening must be finite and not negative, got {}", p.eps);

        if let Some(theta) = self.engine.theta {
            ensure!(theta > 0.0 && theta.is_finite(), "theta must be positive, got {}", theta);
        }
        if let Some(root) = &self.engine.root {
            ensure!(
                root.length > 0.0 && root.length.is_finite(),
                "tree root length must be positive, got {}",
                root.length
            );
            ensure!(root.center.iter().all(|c| c.is_finite()), "tree root center must be finite");
        }

        ensure!(
            self.boundary.length > 0.0 && self.boundary.length.is_finite(),
            "boundary length must be positive, got {}",
            self.boundary.length
        );
        if let Some(center) = self.boundary.center {
            ensure!(center.iter().all(|c| c.is_finite()), "boundary center must be finite");
        }

        for (i, b) in self.bodies.iter().enumerate() {
            ensure!(b.m > 0.0 && b.m.is_finite(), "body {}: mass must be positive, got {}", i, b.m);
            ensure!(
                b.radius >= 0.0 && b.radius.is_finite(),
                "body {}: radius must not be negative, got {}",
                i,
                b.radius
            );
            ensure!(
                b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()),
                "body {}: position and velocity must be finite",
                i
            );
        }

        Ok(())
    }

    pub fn theta(&self) -> f64 {
        self.engine.theta.unwrap_or(DEFAULT_THETA)
    }

    pub fn max_depth(&self) -> usize {
        self.engine.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

fn default_t_end() -> f64 {
    DEFAULT_T_END
}

fn default_h0() -> f64 {
    DEFAULT_H0
}

fn default_g() -> f64 {
    DEFAULT_G
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}
