//! Build fully-initialized simulation scenarios from configuration and drive
//! them step by step
//!
//! Takes a `ScenarioConfig` (YAML- or text-facing) and produces the runtime
//! bundle `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the boundary the bodies bounce off
//! - system state (`System` with bodies at t = 0)
//! - the Barnes–Hut force model and its reusable tree
//!
//! One call to [`Scenario::advance`] is one time step:
//! 1. resolve collisions between bodies and against the boundary
//! 2. rebuild the quadtree over the bodies inside the root region
//! 3. accumulate forces from the tree
//! 4. integrate velocities and positions

use anyhow::{ensure, Result};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::collision::resolve_collisions;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, NewtonianGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::observer::{NullObserver, Observer};
use crate::simulation::params::Parameters;
use crate::simulation::region::Region;
use crate::simulation::states::{Body, DisplayTag, NVec2, System};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub collisions: usize, // events resolved in the collision pass
    pub in_tree: usize, // bodies inside the tree root this step
}

/// Totals over a call to [`Scenario::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub t: f64,
    pub collisions: usize,
}

/// A fully-initialized simulation
///
/// Owns the bodies, the boundary and the quadtree arena. The tree is
/// rebuilt inside every step and reuses its allocation.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub boundary: Region,
    pub system: System,
    pub forces: BarnesHutGravity,
    tree: QuadTree,
}

impl Scenario {
    pub fn new(engine: Engine, parameters: Parameters, boundary: Region, bodies: Vec<Body>) -> Self {
        let forces = BarnesHutGravity {
            gravity: NewtonianGravity {
                G: parameters.G,
                eps2: parameters.eps2,
            },
            theta: engine.theta,
        };
        let tree = QuadTree::with_max_depth(engine.root, engine.max_depth);

        Self {
            engine,
            parameters,
            boundary,
            system: System::new(bodies),
            forces,
            tree,
        }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        cfg.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| {
            let [r, g, b] = bc.color;
            Body::new(
                NVec2::new(bc.x[0], bc.x[1]),
                NVec2::new(bc.v[0], bc.v[1]),
                bc.m,
                bc.radius,
                DisplayTag::new(r, g, b),
            )
        }).collect();

        let length = cfg.boundary.length;
        let boundary = match cfg.boundary.center {
            Some([cx, cy]) => Region::new(cx, cy, length),
            None => Region::from_origin(length),
        };

        let root = cfg
            .engine
            .root
            .map(|r| Region::new(r.center[0], r.center[1], r.length))
            .unwrap_or(boundary);

        let engine = Engine {
            theta: cfg.theta(),
            max_depth: cfg.max_depth(),
            root,
        };

        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            eps2: p_cfg.eps * p_cfg.eps,
            G: p_cfg.G,
        };

        Ok(Self::new(engine, parameters, boundary, bodies))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    /// The tree as built during the last step.
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Perform one full time step of length `dt`.
    pub fn advance(&mut self, dt: f64) -> Result<StepReport> {
        ensure!(dt > 0.0 && dt.is_finite(), "time step must be positive, got {}", dt);

        let collisions = resolve_collisions(&mut self.system.bodies, &self.boundary);
        let in_tree = self.forces.apply(&mut self.system, &mut self.tree)?;
        euler_integrator(&mut self.system, dt);

        log::debug!(
            "step {} t={:.4}: {} collisions, {}/{} bodies in tree, {} nodes",
            self.system.step,
            self.system.t,
            collisions,
            in_tree,
            self.system.bodies.len(),
            self.tree.node_count()
        );

        Ok(StepReport { collisions, in_tree })
    }

    /// Advance until `total_time` has elapsed, without observing.
    pub fn run(&mut self, dt: f64, total_time: f64) -> Result<RunSummary> {
        self.run_with(dt, total_time, &mut NullObserver)
    }

    /// Advance until `total_time` has elapsed, handing the system to
    /// `observer` after every step.
    pub fn run_with(&mut self, dt: f64, total_time: f64, observer: &mut dyn Observer) -> Result<RunSummary> {
        ensure!(dt > 0.0 && dt.is_finite(), "time step must be positive, got {}", dt);
        ensure!(
            total_time >= 0.0 && total_time.is_finite(),
            "total time must be finite and not negative, got {}",
            total_time
        );

        // tolerate total_time / dt landing a hair above an integer
        let steps = (total_time / dt - 1e-9).ceil().max(0.0) as u64;
        self.run_steps(dt, steps, observer)
    }

    /// Advance exactly `steps` times, handing the system to `observer` after
    /// every step.
    pub fn run_steps(&mut self, dt: f64, steps: u64, observer: &mut dyn Observer) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for _ in 0..steps {
            let report = self.advance(dt)?;
            observer.observe(&self.system)?;
            summary.steps += 1;
            summary.collisions += report.collisions;
        }
        observer.finish()?;

        summary.t = self.system.t;
        log::info!(
            "ran {} steps to t={:.4}, {} collisions resolved",
            summary.steps,
            summary.t,
            summary.collisions
        );
        Ok(summary)
    }
}
