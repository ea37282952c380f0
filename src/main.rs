use bhcollide::{load_scenario, Scenario, CsvTrace};
use bhcollide::{bench_tree, bench_step_curve};

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and stream CSV frames
    Run {
        /// Scenario file (.yaml/.yml, otherwise the plain text format)
        #[arg(default_value = "two_body.yaml")]
        scenario: PathBuf,

        /// Number of steps, overrides the scenario's t_end
        #[arg(short, long)]
        steps: Option<u64>,

        /// Record every N-th step
        #[arg(short, long, default_value_t = 1)]
        every: u64,

        /// Write frames here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Time the tree and full steps for growing body counts
    Bench {
        /// Also print the per-step curve
        #[arg(long)]
        curve: bool,
    },
}

// fall back to the bundled scenarios directory for bare names
fn resolve_scenario_path(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
}

fn run(scenario_path: &Path, steps: Option<u64>, every: u64, output: Option<&Path>) -> Result<()> {
    let cfg = load_scenario(&resolve_scenario_path(scenario_path))?;
    let mut scenario = Scenario::build_scenario(cfg)?;

    let out: Box<dyn Write> = match output {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("failed to create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut trace = CsvTrace::new(out, every)?;
    trace.write_frame(&scenario.system)?;

    let dt = scenario.parameters.h0;
    let summary = match steps {
        Some(n) => scenario.run_steps(dt, n, &mut trace)?,
        None => {
            let t_end = scenario.parameters.t_end;
            scenario.run_with(dt, t_end, &mut trace)?
        }
    };

    log::info!("finished at t={:.4} after {} steps", summary.t, summary.steps);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Run { scenario, steps, every, output } => {
            run(&scenario, steps, every, output.as_deref())?;
        }
        Command::Bench { curve } => {
            bench_tree()?;
            if curve {
                bench_step_curve()?;
            }
        }
    }

    Ok(())
}
