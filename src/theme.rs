use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub muscle_fill: String,
    pub muscle_border: String,
    pub muscle_text_color: String,
    pub attachment_fill: String,
    pub attachment_border: String,
    pub attachment_text_color: String,
    pub origin_edge_color: String,
    pub insertion_edge_color: String,
    pub node_outline_color: String,
    pub label_outline_color: String,
}

impl Theme {
    /// Palette of the reference diagram: blue muscle boxes, pink
    /// attachment boxes, pink origin arrows, blue insertion arrows.
    pub fn anatomical() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            muscle_fill: "#D6E4FF".to_string(),
            muscle_border: "#4A90E2".to_string(),
            muscle_text_color: "#1a237e".to_string(),
            attachment_fill: "#F8C6D3".to_string(),
            attachment_border: "#E94E77".to_string(),
            attachment_text_color: "#b71c1c".to_string(),
            origin_edge_color: "pink".to_string(),
            insertion_edge_color: "#4A90E2".to_string(),
            node_outline_color: "#fff".to_string(),
            label_outline_color: "black".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            muscle_fill: "#F8FAFF".to_string(),
            muscle_border: "#C7D2E5".to_string(),
            muscle_text_color: "#1C2430".to_string(),
            attachment_fill: "#FDF2F5".to_string(),
            attachment_border: "#E5C0CC".to_string(),
            attachment_text_color: "#5A2432".to_string(),
            origin_edge_color: "#D9889E".to_string(),
            insertion_edge_color: "#7A8AA6".to_string(),
            node_outline_color: "#FFFFFF".to_string(),
            label_outline_color: "#1C2430".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::anatomical()
    }
}
