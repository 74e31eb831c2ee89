//! Static architecture diagram.
//!
//! [`render_topology`] is data-driven: it draws whatever [`Topology`] it is given. The literal
//! picture for the report lives in [`topology::CVCP_TOPOLOGY`].

pub mod axes;
pub mod shapes;
pub mod topology;

use std::path::Path;

pub use shapes::{
    AnchorKind, Anchors, BoxSpec, CloudSpec, Direction, LinkLabel, LinkStyle, draw_box,
};
pub use topology::{CVCP_TOPOLOGY, Endpoint, LinkSpec, NodeSpec, Topology};

use self::axes::Axes;
use crate::{
    foundation::core::Point,
    foundation::error::{BenchfigError, BenchfigResult},
    raster::Rasterizer,
    svg::Surface,
};

fn resolve(endpoint: &Endpoint, placed: &[(&str, Anchors)]) -> BenchfigResult<Point> {
    match *endpoint {
        Endpoint::Fixed(p) => Ok(p),
        Endpoint::Anchor {
            node,
            anchor,
            offset,
        } => placed
            .iter()
            .find(|(id, _)| *id == node)
            .map(|(_, a)| a.get(anchor) + offset)
            .ok_or_else(|| BenchfigError::render(format!("link references unknown node '{node}'"))),
    }
}

/// Draw `topology` with hidden axes: clouds first, then boxes, then connectors on top.
pub fn draw_topology(surface: &mut Surface, topology: &Topology<'_>) -> BenchfigResult<()> {
    let axes = Axes::new(surface.canvas(), topology.xlim, topology.ylim);

    for cloud in topology.clouds {
        shapes::draw_cloud(surface, &axes, cloud);
    }

    let placed: Vec<(&str, Anchors)> = topology
        .nodes
        .iter()
        .map(|n| (n.id, shapes::draw_box(surface, &axes, &n.shape)))
        .collect();

    for link in topology.links {
        let from = resolve(&link.from, &placed)?;
        let to = resolve(&link.to, &placed)?;
        shapes::draw_connector(
            surface,
            &axes,
            from,
            to,
            &link.style,
            link.direction,
            link.label.as_ref(),
        );
    }

    axes.draw_title(surface, topology.title);
    Ok(())
}

#[tracing::instrument(skip(rasterizer, topology), fields(title = topology.title))]
pub fn render_topology(
    rasterizer: &Rasterizer,
    topology: &Topology<'_>,
    out: &Path,
) -> BenchfigResult<()> {
    rasterizer.render_png(topology.canvas, out, |surface| {
        draw_topology(surface, topology)
    })?;
    tracing::info!(path = %out.display(), "wrote architecture diagram");
    Ok(())
}
