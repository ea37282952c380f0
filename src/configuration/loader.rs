//! Scenario loading from disk.
//!
//! Two formats are understood:
//!
//! - YAML (`.yaml` / `.yml`), see [`crate::configuration::config`]
//! - plain whitespace-separated text, anything else:
//!
//! ```text
//! <label> <square> <n>
//! rx ry vx vy radius mass r g b     (n times)
//! ```
//!
//! The label is ignored. Plain files carry no engine or parameter section,
//! so defaults apply. Whichever loader runs, the result is validated.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::configuration::config::{
    BodyConfig, BoundaryConfig, EngineConfig, ParametersConfig, ScenarioConfig,
};

/// Load and validate a scenario, picking the format from the extension.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let cfg: ScenarioConfig = if is_yaml {
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        parse_plain(&text).with_context(|| format!("failed to parse {}", path.display()))?
    };

    cfg.validate()
        .with_context(|| format!("invalid scenario {}", path.display()))?;

    log::info!(
        "loaded {} bodies from {} (boundary {})",
        cfg.bodies.len(),
        path.display(),
        cfg.boundary.length
    );
    Ok(cfg)
}

/// Parse a YAML scenario held in memory. Does not validate.
pub fn parse_yaml(text: &str) -> Result<ScenarioConfig> {
    Ok(serde_yaml::from_str(text)?)
}

/// Parse the plain text format. Does not validate.
pub fn parse_plain(text: &str) -> Result<ScenarioConfig> {
    let mut tokens = text.split_whitespace();

    let _label = tokens.next().ok_or_else(|| anyhow!("empty input"))?;
    let square: f64 = next_value(&mut tokens, "boundary size")?;
    let n: usize = next_value(&mut tokens, "particle count")?;

    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let field = |name: &str| format!("particle {} {}", i, name);

        let rx = next_value(&mut tokens, &field("rx"))?;
        let ry = next_value(&mut tokens, &field("ry"))?;
        let vx = next_value(&mut tokens, &field("vx"))?;
        let vy = next_value(&mut tokens, &field("vy"))?;
        let radius = next_value(&mut tokens, &field("radius"))?;
        let m = next_value(&mut tokens, &field("mass"))?;
        let r = next_value(&mut tokens, &field("red"))?;
        let g = next_value(&mut tokens, &field("green"))?;
        let b = next_value(&mut tokens, &field("blue"))?;

        bodies.push(BodyConfig {
            x: [rx, ry],
            v: [vx, vy],
            m,
            radius,
            color: [r, g, b],
        });
    }

    Ok(ScenarioConfig {
        engine: EngineConfig::default(),
        parameters: ParametersConfig::default(),
        boundary: BoundaryConfig {
            length: square,
            center: None,
        },
        bodies,
    })
}

fn next_value<'a, T>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = tokens
        .next()
        .ok_or_else(|| anyhow!("unexpected end of input, expected {}", what))?;
    token
        .parse()
        .with_context(|| format!("invalid {}: {:?}", what, token))
}
