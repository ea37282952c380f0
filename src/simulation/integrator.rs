//! Fixed-step time integrator for the particle system
//!
//! Semi-implicit (symplectic) Euler: every body's velocity is kicked with
//! the force already accumulated for this step, then its position drifts
//! with the new velocity.

use super::states::System;

/// Advance every body of `sys` by `dt` and bump the clock.
/// Forces must already be accumulated for this step.
pub fn euler_integrator(sys: &mut System, dt: f64) {
    for b in sys.bodies.iter_mut() {
        b.integrate(dt);
    }

    sys.t += dt;
    sys.step += 1;
}
