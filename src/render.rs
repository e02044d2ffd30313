use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{EdgeDirection, NodeKind};
use crate::layout::Layout;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Assemble the SVG document: background, one arrow marker per edge
/// direction, color-coded edges, then labeled node boxes on top.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&arrow_marker(
        "arrow-origin",
        &theme.origin_edge_color,
        config,
    ));
    svg.push_str(&arrow_marker(
        "arrow-insertion",
        &theme.insertion_edge_color,
        config,
    ));
    svg.push_str("</defs>");

    svg.push_str(&format!(
        "<g stroke-opacity=\"{}\">",
        config.edge.stroke_opacity
    ));
    for edge in &layout.edges {
        let (stroke, marker) = match edge.direction {
            EdgeDirection::Origin => (theme.origin_edge_color.as_str(), "arrow-origin"),
            EdgeDirection::Insertion => (theme.insertion_edge_color.as_str(), "arrow-insertion"),
        };
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#{})\"/>",
            edge.x1, edge.y1, edge.x2, edge.y2, stroke, config.edge.stroke_width, marker
        ));
    }
    svg.push_str("</g>");

    for node in layout.nodes.values() {
        let (fill, border, text_color) = match node.kind {
            NodeKind::Muscle => (
                theme.muscle_fill.as_str(),
                theme.muscle_border.as_str(),
                theme.muscle_text_color.as_str(),
            ),
            NodeKind::Attachment => (
                theme.attachment_fill.as_str(),
                theme.attachment_border.as_str(),
                theme.attachment_text_color.as_str(),
            ),
        };
        let rect_x = node.x - node.width / 2.0;
        let rect_y = node.y - node.height / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{rect_x:.2}\" y=\"{rect_y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{fill}\" stroke=\"{border}\" stroke-width=\"{}\"/>",
            node.width,
            node.height,
            config.node.border_width,
            r = config.node.corner_radius,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{text_color}\" stroke=\"{}\" stroke-width=\"{}\">{}</text>",
            node.x,
            node.y,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.label_outline_color,
            config.node.label_outline_width,
            escape_xml(&node.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn arrow_marker(id: &str, fill: &str, config: &LayoutConfig) -> String {
    format!(
        "<marker id=\"{id}\" viewBox=\"0 -5 10 10\" refX=\"{}\" refY=\"0\" markerWidth=\"{size}\" markerHeight=\"{size}\" orient=\"auto\"><path d=\"M 0,-5 L 10,0 L 0,5\" fill=\"{fill}\"/></marker>",
        config.edge.marker_ref_x,
        size = config.edge.marker_size,
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the \"png\" feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
