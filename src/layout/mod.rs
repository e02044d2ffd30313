mod force;
pub(crate) mod types;

pub use force::{SimNode, Simulation};
pub use types::*;

use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::AttachmentGraph;
use crate::text_metrics;
use crate::theme::Theme;
use std::collections::BTreeMap;

/// Rough per-character advance used when no system font is available, so
/// layout stays usable in fontless environments.
const FALLBACK_CHAR_WIDTH_EM: f32 = 0.6;

/// Run the force simulation to completion and size every node box from its
/// label, producing a layout ready for SVG assembly.
pub fn compute_layout(
    graph: &AttachmentGraph,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> Layout {
    let center = (render.width / 2.0, render.height / 2.0);
    let mut simulation = Simulation::new(graph, &config.simulation, center);
    simulation.run(config.simulation.iterations);
    finish_layout(graph, &simulation, theme, config, render)
}

/// Snapshot a simulation (finished or mid-drag) into a layout. Box sizing
/// is an explicit two-phase step: measure the label extent first, then
/// grow the box by the configured padding.
pub fn finish_layout(
    graph: &AttachmentGraph,
    simulation: &Simulation,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> Layout {
    let mut nodes = BTreeMap::new();
    for node in graph.nodes.values() {
        let Some(body) = simulation.node(&node.id) else {
            continue;
        };
        let (label_width, label_height) = label_extent(&node.id, theme);
        nodes.insert(
            node.id.clone(),
            NodeBox {
                id: node.id.clone(),
                kind: node.kind,
                degree: node.degree,
                x: body.x,
                y: body.y,
                width: label_width + 2.0 * config.node.padding_x,
                height: label_height + 2.0 * config.node.padding_y,
                label: node.id.clone(),
            },
        );
    }

    // Simulation coordinates can stray past the canvas origin, especially
    // on a small canvas; shift the whole layout so no box is clipped off
    // the top or left edge.
    let mut shift_x = 0.0f32;
    let mut shift_y = 0.0f32;
    for node in nodes.values() {
        shift_x = shift_x.max(node.width / 2.0 - node.x);
        shift_y = shift_y.max(node.height / 2.0 - node.y);
    }
    if shift_x > 0.0 || shift_y > 0.0 {
        for node in nodes.values_mut() {
            node.x += shift_x;
            node.y += shift_y;
        }
    }

    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let source = nodes.get(&edge.source)?;
            let target = nodes.get(&edge.target)?;
            Some(EdgeLine {
                source: edge.source.clone(),
                target: edge.target.clone(),
                direction: edge.direction,
                x1: source.x,
                y1: source.y,
                x2: target.x,
                y2: target.y,
            })
        })
        .collect();

    Layout {
        nodes,
        edges,
        width: render.width,
        height: render.height,
    }
}

/// Measure a label in the theme font. Width falls back to a character
/// estimate when font lookup fails; height is the font size.
pub fn label_extent(text: &str, theme: &Theme) -> (f32, f32) {
    let width = text_metrics::measure_text_width(text, theme.font_size, &theme.font_family)
        .unwrap_or_else(|| {
            text.chars().count() as f32 * theme.font_size * FALLBACK_CHAR_WIDTH_EM
        });
    (width, theme.font_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ir::{EdgeDirection, Record, build_graph};

    fn sample_layout() -> (Layout, Config) {
        let records = vec![
            Record {
                muscle: "Biceps".to_string(),
                origin: "Scapula".to_string(),
                insertion: "Radius".to_string(),
            },
            Record {
                muscle: "Triceps".to_string(),
                origin: "Scapula".to_string(),
                insertion: "Ulna".to_string(),
            },
        ];
        let graph = build_graph(&records).unwrap();
        let config = Config::default();
        let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
        (layout, config)
    }

    #[test]
    fn layout_carries_every_node_and_edge() {
        let (layout, _) = sample_layout();
        assert_eq!(layout.nodes.len(), 5);
        assert_eq!(layout.edges.len(), 4);
    }

    #[test]
    fn box_size_is_label_extent_plus_padding() {
        let (layout, config) = sample_layout();
        let node = &layout.nodes["Biceps"];
        let (label_width, label_height) = label_extent("Biceps", &config.theme);
        assert_eq!(node.width, label_width + 2.0 * config.layout.node.padding_x);
        assert_eq!(node.height, label_height + 2.0 * config.layout.node.padding_y);
    }

    #[test]
    fn edges_connect_node_centers() {
        let (layout, _) = sample_layout();
        for edge in &layout.edges {
            let source = &layout.nodes[&edge.source];
            let target = &layout.nodes[&edge.target];
            assert_eq!(edge.x1, source.x);
            assert_eq!(edge.y1, source.y);
            assert_eq!(edge.x2, target.x);
            assert_eq!(edge.y2, target.y);
        }
    }

    #[test]
    fn edge_order_and_direction_follow_the_input() {
        let (layout, _) = sample_layout();
        assert_eq!(layout.edges[0].direction, EdgeDirection::Origin);
        assert_eq!(layout.edges[0].source, "Scapula");
        assert_eq!(layout.edges[0].target, "Biceps");
        assert_eq!(layout.edges[1].direction, EdgeDirection::Insertion);
        assert_eq!(layout.edges[1].source, "Biceps");
        assert_eq!(layout.edges[1].target, "Radius");
    }

    #[test]
    fn layout_is_deterministic() {
        let (first, _) = sample_layout();
        let (second, _) = sample_layout();
        for (id, node) in &first.nodes {
            let other = &second.nodes[id];
            assert_eq!(node.x, other.x);
            assert_eq!(node.y, other.y);
        }
    }

    #[test]
    fn small_canvas_keeps_every_box_at_non_negative_coords() {
        // A canvas smaller than the simulated spread must not push boxes
        // past the origin, where the viewBox would clip them away.
        let records = vec![
            Record {
                muscle: "Biceps".to_string(),
                origin: "Scapula".to_string(),
                insertion: "Radius".to_string(),
            },
            Record {
                muscle: "Triceps".to_string(),
                origin: "Scapula".to_string(),
                insertion: "Ulna".to_string(),
            },
            Record {
                muscle: "Brachialis".to_string(),
                origin: "Humerus".to_string(),
                insertion: "Ulna".to_string(),
            },
            Record {
                muscle: "Deltoid".to_string(),
                origin: "Clavicle".to_string(),
                insertion: "Humerus".to_string(),
            },
            Record {
                muscle: "Brachioradialis".to_string(),
                origin: "Humerus".to_string(),
                insertion: "Radius".to_string(),
            },
            Record {
                muscle: "Supraspinatus".to_string(),
                origin: "Scapula".to_string(),
                insertion: "Humerus".to_string(),
            },
        ];
        let graph = build_graph(&records).unwrap();
        let mut config = Config::default();
        config.render.width = 120.0;
        config.render.height = 120.0;
        let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
        for node in layout.nodes.values() {
            let left = node.x - node.width / 2.0;
            let top = node.y - node.height / 2.0;
            assert!(left >= 0.0, "{} clipped off the left: {left}", node.id);
            assert!(top >= 0.0, "{} clipped off the top: {top}", node.id);
        }
    }

    #[test]
    fn empty_graph_yields_empty_layout() {
        let graph = crate::ir::AttachmentGraph::new();
        let config = Config::default();
        let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
        assert_eq!(layout.width, config.render.width);
    }
}
