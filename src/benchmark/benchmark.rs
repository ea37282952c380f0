use std::time::Instant;

use anyhow::Result;

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::region::Region;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, DisplayTag, NVec2, System};

const BOX: f64 = 1000.0;

/// Time one tree build + force evaluation for growing `n`
pub fn bench_tree() -> Result<()> {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400, 12800, 25600];

    let forces = BarnesHutGravity {
        gravity: NewtonianGravity { G: 1.0, eps2: 1e-2 },
        theta: 0.5,
    };

    for n in ns {
        let mut sys = make_system(n);
        let mut tree = QuadTree::new(Region::from_origin(BOX));

        // Warm up
        forces.apply(&mut sys, &mut tree)?;

        let t0 = Instant::now();
        forces.apply(&mut sys, &mut tree)?;
        let dt_bh = t0.elapsed().as_secs_f64();

        println!(
            "N = {n:6}, BH forces = {:8.6} s, nodes = {:7}, depth = {:2}",
            dt_bh,
            tree.node_count(),
            tree.depth()
        );
    }

    Ok(())
}

/// Time full steps (collisions + tree + integration) for growing `n`
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() -> Result<()> {
    println!("N,step_ms");

    // Steps of 800 to give smoother graph
    for n in (800..=25600).step_by(800) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 6400 { 5 } else { 1 };

        let mut scenario = make_scenario(n);
        scenario.advance(0.01)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            scenario.advance(0.01)?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }

    Ok(())
}

/// Helper to build a manual System of size `n`
/// deterministic positions, no rand needed
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            (0.5 + 0.45 * (i_f * 0.37).sin()) * BOX,
            (0.5 + 0.45 * (i_f * 0.13).cos()) * BOX,
        );
        let v = NVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());

        bodies.push(Body::new(x, v, 1.0, 0.05, DisplayTag::default()));
    }

    System::new(bodies)
}

fn make_scenario(n: usize) -> Scenario {
    let boundary = Region::from_origin(BOX);
    let engine = Engine {
        theta: 0.5,
        max_depth: 64,
        root: boundary,
    };
    let parameters = Parameters {
        t_end: 1.0,
        h0: 0.01,
        eps2: 1e-2,
        G: 1.0,
    };

    Scenario::new(engine, parameters, boundary, make_system(n).bodies)
}
