//! Read-only hook for whatever displays or records the simulation.

use anyhow::Result;

use crate::simulation::states::System;

/// Receives the system once after every completed step.
pub trait Observer {
    fn observe(&mut self, sys: &System) -> Result<()>;

    /// Called once after the last step.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every frame.
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _sys: &System) -> Result<()> {
        Ok(())
    }
}
