use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Preferred length of a link between two connected nodes.
    pub link_distance: f32,
    /// Many-body strength; negative values repel.
    pub charge_strength: f32,
    /// Base collision radius around every node.
    pub collide_base_radius: f32,
    /// Extra collision radius per unit of node degree.
    pub collide_degree_step: f32,
    /// Flat padding added on top of the degree-scaled radius.
    pub collide_padding: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Ticks to run when laying out a static image.
    pub iterations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            link_distance: 80.0,
            charge_strength: -100.0,
            collide_base_radius: 8.0,
            collide_degree_step: 4.0,
            collide_padding: 10.0,
            velocity_decay: 0.6,
            alpha_min: 0.001,
            // Cools to alpha_min in roughly 300 ticks.
            alpha_decay: 1.0 - 0.001f32.powf(1.0 / 300.0),
            iterations: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeBoxConfig {
    pub corner_radius: f32,
    /// Horizontal padding on each side of the measured label.
    pub padding_x: f32,
    /// Vertical padding above and below the measured label.
    pub padding_y: f32,
    pub border_width: f32,
    pub label_outline_width: f32,
}

impl Default for NodeBoxConfig {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            padding_x: 8.0,
            padding_y: 5.0,
            border_width: 1.5,
            label_outline_width: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeStyleConfig {
    pub stroke_width: f32,
    pub stroke_opacity: f32,
    pub marker_size: f32,
    /// Arrow tip offset along the line, so the head sits outside the box.
    pub marker_ref_x: f32,
}

impl Default for EdgeStyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_opacity: 0.6,
            marker_size: 6.0,
            marker_ref_x: 20.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub simulation: SimulationConfig,
    pub node: NodeBoxConfig,
    pub edge: EdgeStyleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn anatomical() -> Self {
        Self {
            theme: Theme::anatomical(),
            ..Default::default()
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    muscle_fill: Option<String>,
    muscle_border: Option<String>,
    muscle_text_color: Option<String>,
    attachment_fill: Option<String>,
    attachment_border: Option<String>,
    attachment_text_color: Option<String>,
    origin_edge_color: Option<String>,
    insertion_edge_color: Option<String>,
    node_outline_color: Option<String>,
    label_outline_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SimulationConfigFile {
    link_distance: Option<f32>,
    charge_strength: Option<f32>,
    collide_base_radius: Option<f32>,
    collide_degree_step: Option<f32>,
    collide_padding: Option<f32>,
    velocity_decay: Option<f32>,
    alpha_min: Option<f32>,
    alpha_decay: Option<f32>,
    iterations: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct NodeBoxConfigFile {
    corner_radius: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    border_width: Option<f32>,
    label_outline_width: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EdgeStyleConfigFile {
    stroke_width: Option<f32>,
    stroke_opacity: Option<f32>,
    marker_size: Option<f32>,
    marker_ref_x: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    simulation: Option<SimulationConfigFile>,
    node: Option<NodeBoxConfigFile>,
    edge: Option<EdgeStyleConfigFile>,
    background: Option<String>,
}

/// Load a config file (JSON, with JSON5 accepted for hand-written files)
/// and merge it over the defaults. `None` returns the defaults untouched.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "anatomical" || theme_name == "default" {
            config.theme = Theme::anatomical();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.muscle_fill {
            config.theme.muscle_fill = v;
        }
        if let Some(v) = vars.muscle_border {
            config.theme.muscle_border = v;
        }
        if let Some(v) = vars.muscle_text_color {
            config.theme.muscle_text_color = v;
        }
        if let Some(v) = vars.attachment_fill {
            config.theme.attachment_fill = v;
        }
        if let Some(v) = vars.attachment_border {
            config.theme.attachment_border = v;
        }
        if let Some(v) = vars.attachment_text_color {
            config.theme.attachment_text_color = v;
        }
        if let Some(v) = vars.origin_edge_color {
            config.theme.origin_edge_color = v;
        }
        if let Some(v) = vars.insertion_edge_color {
            config.theme.insertion_edge_color = v;
        }
        if let Some(v) = vars.node_outline_color {
            config.theme.node_outline_color = v;
        }
        if let Some(v) = vars.label_outline_color {
            config.theme.label_outline_color = v;
        }
    }

    if let Some(sim) = parsed.simulation {
        let target = &mut config.layout.simulation;
        if let Some(v) = sim.link_distance {
            target.link_distance = v;
        }
        if let Some(v) = sim.charge_strength {
            target.charge_strength = v;
        }
        if let Some(v) = sim.collide_base_radius {
            target.collide_base_radius = v;
        }
        if let Some(v) = sim.collide_degree_step {
            target.collide_degree_step = v;
        }
        if let Some(v) = sim.collide_padding {
            target.collide_padding = v;
        }
        if let Some(v) = sim.velocity_decay {
            target.velocity_decay = v;
        }
        if let Some(v) = sim.alpha_min {
            target.alpha_min = v;
        }
        if let Some(v) = sim.alpha_decay {
            target.alpha_decay = v;
        }
        if let Some(v) = sim.iterations {
            target.iterations = v;
        }
    }

    if let Some(node) = parsed.node {
        let target = &mut config.layout.node;
        if let Some(v) = node.corner_radius {
            target.corner_radius = v;
        }
        if let Some(v) = node.padding_x {
            target.padding_x = v;
        }
        if let Some(v) = node.padding_y {
            target.padding_y = v;
        }
        if let Some(v) = node.border_width {
            target.border_width = v;
        }
        if let Some(v) = node.label_outline_width {
            target.label_outline_width = v;
        }
    }

    if let Some(edge) = parsed.edge {
        let target = &mut config.layout.edge;
        if let Some(v) = edge.stroke_width {
            target.stroke_width = v;
        }
        if let Some(v) = edge.stroke_opacity {
            target.stroke_opacity = v;
        }
        if let Some(v) = edge.marker_size {
            target.marker_size = v;
        }
        if let Some(v) = edge.marker_ref_x {
            target.marker_ref_x = v;
        }
    }

    if let Some(background) = parsed.background {
        config.theme.background = background;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = Config::default();
        assert_eq!(config.layout.simulation.link_distance, 80.0);
        assert_eq!(config.layout.simulation.charge_strength, -100.0);
        assert_eq!(config.layout.node.padding_x, 8.0);
        assert_eq!(config.layout.edge.marker_ref_x, 20.0);
    }

    #[test]
    fn merges_partial_json_over_defaults() {
        let config = parse_config(
            r#"{"theme":"modern","simulation":{"iterations":50},"edge":{"strokeWidth":3.0}}"#,
        )
        .unwrap();
        assert_eq!(config.theme.font_size, 13.0);
        assert_eq!(config.layout.simulation.iterations, 50);
        assert_eq!(config.layout.edge.stroke_width, 3.0);
        // Untouched values stay at their defaults.
        assert_eq!(config.layout.simulation.link_distance, 80.0);
    }

    #[test]
    fn accepts_json5_with_comments() {
        let config = parse_config(
            "{\n  // hand-written config\n  themeVariables: { fontSize: 16 },\n}",
        )
        .unwrap();
        assert_eq!(config.theme.font_size, 16.0);
    }
}
