#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::GraphError;
pub use ir::{AttachmentGraph, Edge, EdgeDirection, Node, NodeKind, Record, build_graph};
pub use layout::{Layout, Simulation, compute_layout};
pub use parser::parse_records;
pub use render::render_svg;
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;

/// Full pipeline: CSV text in, SVG document out. Any failure is fatal and
/// nothing is rendered.
pub fn render_csv(input: &str, config: &Config) -> Result<String, GraphError> {
    let records = parse_records(input)?;
    let graph = build_graph(&records)?;
    let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
    Ok(render_svg(&layout, &config.theme, &config.layout))
}
