use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    charts::{render_comparison, render_distribution},
    dataset::load_dataset,
    diagram::{CVCP_TOPOLOGY, render_topology},
    foundation::error::BenchfigResult,
    raster::{Rasterizer, RenderSettings},
};

pub const DEFAULT_INPUT: &str = "benchmark_results.json";
pub const DEFAULT_OUT_DIR: &str = "figures";

pub const COMPARISON_FILE: &str = "latency_comparison.png";
pub const DISTRIBUTION_FILE: &str = "latency_distribution.png";
pub const DIAGRAM_FILE: &str = "architecture_diagram.png";

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub render: RenderSettings,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            render: RenderSettings::default(),
        }
    }
}

/// Paths of the written figures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportAssets {
    pub comparison: PathBuf,
    pub distribution: PathBuf,
    pub diagram: PathBuf,
}

impl ReportAssets {
    pub fn under(out_dir: &Path) -> Self {
        Self {
            comparison: out_dir.join(COMPARISON_FILE),
            distribution: out_dir.join(DISTRIBUTION_FILE),
            diagram: out_dir.join(DIAGRAM_FILE),
        }
    }

    pub fn paths(&self) -> [&Path; 3] {
        [&self.comparison, &self.distribution, &self.diagram]
    }
}

/// Load the dataset, then render the comparison chart, the distribution chart and the
/// architecture diagram, in that order. The first failure aborts the remaining steps.
///
/// Input errors are raised before the output directory is touched.
pub fn generate_report_assets(config: &ReportConfig) -> BenchfigResult<ReportAssets> {
    let ds = load_dataset(&config.input)?;

    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("create output dir '{}'", config.out_dir.display()))?;

    let assets = ReportAssets::under(&config.out_dir);
    let rasterizer = Rasterizer::new(config.render.clone());

    render_comparison(&rasterizer, &ds.cvcp, &ds.http, &assets.comparison)?;
    render_distribution(&rasterizer, &ds.cvcp, &ds.http, &assets.distribution)?;
    render_topology(&rasterizer, &CVCP_TOPOLOGY, &assets.diagram)?;

    tracing::info!(out_dir = %config.out_dir.display(), "report assets complete");
    Ok(assets)
}
