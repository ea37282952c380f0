//! Text renderer: streams body states as CSV frames.
//!
//! One row per body per recorded step:
//!
//! ```text
//! step,t,index,x,y,vx,vy,r,g,b
//! ```

use std::io::Write;

use anyhow::{ensure, Result};

use crate::simulation::observer::Observer;
use crate::simulation::states::System;

pub struct CsvTrace<W: Write> {
    out: W,
    every: u64, // record every `every`-th step
    header_written: bool,
}

impl<W: Write> CsvTrace<W> {
    pub fn new(out: W, every: u64) -> Result<Self> {
        ensure!(every > 0, "frame interval must be at least 1");
        Ok(Self {
            out,
            every,
            header_written: false,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one frame unconditionally.
    pub fn write_frame(&mut self, sys: &System) -> Result<()> {
        if !self.header_written {
            writeln!(self.out, "step,t,index,x,y,vx,vy,r,g,b")?;
            self.header_written = true;
        }

        for (i, b) in sys.bodies.iter().enumerate() {
            writeln!(
                self.out,
                "{},{},{},{},{},{},{},{},{},{}",
                sys.step, sys.t, i, b.x.x, b.x.y, b.v.x, b.v.y, b.tag.r, b.tag.g, b.tag.b
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Observer for CsvTrace<W> {
    fn observe(&mut self, sys: &System) -> Result<()> {
        if sys.step % self.every == 0 {
            self.write_frame(sys)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
