//! The architecture drawn in the report: a browser talking to a local proxy over WebSocket, the
//! proxy bridging to the CVCP server over raw TCP across the internet, and direct WebRTC media
//! between the browser and a peer.

use crate::{
    diagram::shapes::{AnchorKind, BoxSpec, CloudSpec, Direction, LinkLabel, LinkStyle},
    foundation::core::{Canvas, Color, Point, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSpec {
    pub id: &'static str,
    pub shape: BoxSpec,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    /// An anchor of a node, displaced by `offset` data units.
    Anchor {
        node: &'static str,
        anchor: AnchorKind,
        offset: Vec2,
    },
    /// A raw coordinate, independent of any node.
    Fixed(Point),
}

impl Endpoint {
    pub const fn anchor(node: &'static str, anchor: AnchorKind) -> Self {
        Self::Anchor {
            node,
            anchor,
            offset: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSpec {
    pub from: Endpoint,
    pub to: Endpoint,
    pub style: LinkStyle,
    pub direction: Direction,
    pub label: Option<LinkLabel>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Topology<'a> {
    pub title: &'a str,
    pub canvas: Canvas,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub clouds: &'a [CloudSpec],
    pub nodes: &'a [NodeSpec],
    pub links: &'a [LinkSpec],
}

impl Topology<'_> {
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids referenced by links that name no node.
    pub fn dangling_refs(&self) -> Vec<&'static str> {
        self.links
            .iter()
            .flat_map(|l| [l.from, l.to])
            .filter_map(|e| match e {
                Endpoint::Anchor { node, .. } if self.node(node).is_none() => Some(node),
                _ => None,
            })
            .collect()
    }
}

const LIGHT_CYAN: Color = Color::hex(0xe1f5fe);
const LIGHT_YELLOW: Color = Color::hex(0xfff9c4);
const LIGHT_GREEN: Color = Color::hex(0xe8f5e9);
const LIGHT_PURPLE: Color = Color::hex(0xf3e5f5);

const LINK_WIDTH_PT: f64 = 2.0;

static NODES: [NodeSpec; 4] = [
    NodeSpec {
        id: "browser",
        shape: BoxSpec::new(
            1.0,
            4.0,
            2.0,
            3.0,
            "Web Browser\n(Chrome/Safari)\n\nUI: HTML/JS\nWebRTC Media",
            LIGHT_CYAN,
        ),
    },
    NodeSpec {
        id: "proxy",
        shape: BoxSpec::new(
            5.0,
            4.0,
            2.0,
            3.0,
            "Client Proxy\n(Node.js)\n\nLocal WebSocket\nProtocol Bridge",
            LIGHT_YELLOW,
        ),
    },
    NodeSpec {
        id: "server",
        shape: BoxSpec::new(
            8.0,
            2.0,
            2.0,
            2.0,
            "CVCP Server\n(Node.js)\n\nRaw TCP\nSignaling",
            LIGHT_GREEN,
        ),
    },
    NodeSpec {
        id: "peer",
        shape: BoxSpec::new(1.0, 0.0, 2.0, 1.0, "Peer User", LIGHT_CYAN),
    },
];

static CLOUDS: [CloudSpec; 1] = [CloudSpec {
    center: Point::new(9.0, 5.5),
    width: 3.0,
    height: 2.0,
    fill: LIGHT_PURPLE,
    edge: Color::GRAY,
    label: "Internet",
}];

static LINKS: [LinkSpec; 3] = [
    LinkSpec {
        from: Endpoint::anchor("browser", AnchorKind::Right),
        to: Endpoint::anchor("proxy", AnchorKind::Left),
        style: LinkStyle {
            color: Color::BLUE,
            width_pt: LINK_WIDTH_PT,
            dashed: false,
        },
        direction: Direction::Both,
        label: Some(LinkLabel {
            text: "WebSocket\n(ws://localhost)",
            offset: Vec2::new(0.0, 0.2),
            rotation: 0.0,
        }),
    },
    // Lands on the upper part of the server's left edge, below the cloud.
    LinkSpec {
        from: Endpoint::anchor("proxy", AnchorKind::Right),
        to: Endpoint::Anchor {
            node: "server",
            anchor: AnchorKind::Left,
            offset: Vec2::new(0.0, 1.0),
        },
        style: LinkStyle {
            color: Color::RED,
            width_pt: LINK_WIDTH_PT,
            dashed: false,
        },
        direction: Direction::Both,
        label: Some(LinkLabel {
            text: "Raw TCP\n(cvcp://)",
            offset: Vec2::new(0.0, 0.2),
            rotation: 0.0,
        }),
    },
    // Peer media does not pass through the proxy.
    LinkSpec {
        from: Endpoint::Fixed(Point::new(2.0, 4.0)),
        to: Endpoint::Fixed(Point::new(2.0, 1.0)),
        style: LinkStyle {
            color: Color::PURPLE,
            width_pt: LINK_WIDTH_PT,
            dashed: true,
        },
        direction: Direction::Both,
        label: Some(LinkLabel {
            text: "WebRTC Media\n(P2P UDP)",
            offset: Vec2::ZERO,
            rotation: 90.0,
        }),
    },
];

/// 12 x 8 in, data space 12 x 8 units.
pub static CVCP_TOPOLOGY: Topology<'static> = Topology {
    title: "CVCP System Architecture",
    canvas: Canvas {
        width: 1200,
        height: 800,
    },
    xlim: (0.0, 12.0),
    ylim: (0.0, 8.0),
    clouds: &CLOUDS,
    nodes: &NODES,
    links: &LINKS,
};
