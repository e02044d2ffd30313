use std::collections::BTreeMap;

use crate::ir::{EdgeDirection, NodeKind};

/// Positioned, sized node ready for rendering. `x`/`y` is the box center;
/// the label is drawn centered inside it.
#[derive(Debug, Clone)]
pub struct NodeBox {
    pub id: String,
    pub kind: NodeKind,
    pub degree: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

/// Straight edge segment between two node centers, tagged with the
/// direction that picks its color and arrowhead.
#[derive(Debug, Clone)]
pub struct EdgeLine {
    pub source: String,
    pub target: String,
    pub direction: EdgeDirection,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: BTreeMap<String, NodeBox>,
    pub edges: Vec<EdgeLine>,
    pub width: f32,
    pub height: f32,
}
