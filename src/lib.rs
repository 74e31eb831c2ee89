//! Report figures for the CVCP latency benchmark.
//!
//! Given a JSON file with two latency series (`cvcp` and `http`), [`generate_report_assets`]
//! writes three PNG files into an output directory:
//!
//! - `latency_comparison.png`: both series as lines against sample index
//! - `latency_distribution.png`: box-and-whisker summaries side by side
//! - `architecture_diagram.png`: the fixed system architecture
//!
//! Charts are laid out with `plotters` into SVG, the diagram is assembled as SVG on a
//! [`Surface`]; both are rasterized with `resvg` and encoded with `image`. Output is
//! deterministic for a given input and font set.
#![forbid(unsafe_code)]

mod foundation;

pub mod charts;
pub mod dataset;
pub mod diagram;
pub mod pipeline;
pub mod raster;
pub mod stats;
pub mod svg;

pub use crate::foundation::core::{BezPath, Canvas, Color, DPI, Point, Rect, Vec2, pt};
pub use crate::foundation::error::{BenchfigError, BenchfigResult, EmptyReason};

pub use crate::dataset::{Dataset, SampleSeries, load_dataset, parse_dataset};
pub use crate::diagram::{Anchors, BoxSpec, CVCP_TOPOLOGY, Topology, draw_box, render_topology};
pub use crate::pipeline::{ReportAssets, ReportConfig, generate_report_assets};
pub use crate::raster::{ChartArea, FrameRGBA, Rasterizer, RenderSettings};
pub use crate::stats::BoxStats;
pub use crate::svg::Surface;
