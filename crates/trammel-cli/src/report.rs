//! JSON report of a fitted sketch.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use trammel_core::TrammelConfig;
use trammel_geometry::{
    sample_branches, Branches, ConicModel, ControlPoints, StringAnimation, StringFrame,
    WeightBranch,
};

#[derive(Debug, Serialize)]
pub struct Report {
    pub points: ControlPoints,
    pub shape_constant: f64,
    pub weights: [f64; 2],
    pub branch: WeightBranch,
    pub branches: Branches,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Vec<StringFrame>>,
}

/// Read a sketch file: `apex`, `p1`, `p2` and `extra` as `[x, y]` arrays.
pub fn load_sketch(path: &Path) -> anyhow::Result<ControlPoints> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading sketch {}", path.display()))?;
    parse_sketch(&content).with_context(|| format!("parsing sketch {}", path.display()))
}

pub fn parse_sketch(content: &str) -> anyhow::Result<ControlPoints> {
    Ok(toml::from_str(content)?)
}

pub fn build_report(
    points: ControlPoints,
    config: &TrammelConfig,
    animate: bool,
) -> anyhow::Result<Report> {
    let model = ConicModel::fit(points, config.tolerance)?;
    let branches = sample_branches(&model, &config.sampling)?;
    let animation = if animate {
        Some(run_animation(&model, config)?)
    } else {
        None
    };

    let (w1, w2) = model.weights();
    Ok(Report {
        points,
        shape_constant: model.shape_constant(),
        weights: [w1, w2],
        branch: model.branch(),
        branches,
        animation,
    })
}

/// Play one full string animation on a simulated clock.
fn run_animation(model: &ConicModel, config: &TrammelConfig) -> anyhow::Result<Vec<StringFrame>> {
    let mut anim = StringAnimation::new(config.animation);
    let mut frames = Vec::with_capacity(config.animation.total_steps as usize + 2);
    let mut now = 0.0;
    frames.extend(anim.start(model, now)?);
    while anim.is_running() {
        now += config.animation.step_interval;
        frames.extend(anim.advance(model, now)?);
    }
    Ok(frames)
}
