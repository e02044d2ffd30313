use myograph::{Config, render_csv};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MuscleGraphOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    iterations: Option<usize>,
}

fn build_config(options: MuscleGraphOptions) -> Config {
    let mut config = if options.theme.as_deref() == Some("modern") {
        Config::modern()
    } else {
        Config::anatomical()
    };

    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    if let Some(iterations) = options.iterations {
        config.layout.simulation.iterations = iterations;
    }

    config
}

#[wasm_bindgen]
pub fn render_muscle_graph_svg(csv: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<MuscleGraphOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        MuscleGraphOptions::default()
    };

    let config = build_config(options);
    render_csv(csv, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use myograph::render_csv;

    use crate::{MuscleGraphOptions, build_config};

    #[test]
    fn renders_with_custom_options() {
        let options = MuscleGraphOptions {
            theme: Some("modern".to_string()),
            font_size: Some(12.0),
            iterations: Some(60),
            ..Default::default()
        };
        let config = build_config(options);
        assert_eq!(config.theme.font_size, 12.0);
        assert_eq!(config.layout.simulation.iterations, 60);

        let svg = render_csv("muscle,origin,insertion\nBiceps,Scapula,Radius\n", &config)
            .expect("render failed");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Biceps"));
    }
}
