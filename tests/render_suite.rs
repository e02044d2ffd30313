use std::path::Path;

use myograph::{
    Config, EdgeDirection, NodeKind, build_graph, compute_layout, parse_records, render_svg,
};

fn fixture_csv() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("muscles.csv");
    std::fs::read_to_string(path).expect("fixture read failed")
}

#[test]
fn fixture_renders_end_to_end() {
    let input = fixture_csv();
    let records = parse_records(&input).expect("parse failed");
    assert_eq!(records.len(), 10);

    let graph = build_graph(&records).expect("build failed");
    assert_eq!(graph.edges.len(), 2 * records.len());

    let config = Config::default();
    let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
    assert_eq!(layout.nodes.len(), graph.nodes.len());
    assert_eq!(layout.edges.len(), graph.edges.len());

    let svg = render_svg(&layout, &config.theme, &config.layout);
    assert!(svg.contains("<svg"), "missing <svg tag");
    assert!(svg.contains("</svg>"), "missing </svg tag");
    assert!(svg.contains("Biceps brachii"));
    assert!(svg.contains("Thoracolumbar fascia, iliac crest"));
}

#[test]
fn fixture_graph_honors_the_data_model() {
    let records = parse_records(&fixture_csv()).unwrap();
    let graph = build_graph(&records).unwrap();

    // Every edge endpoint resolves to a known node.
    for edge in &graph.edges {
        assert!(graph.nodes.contains_key(&edge.source));
        assert!(graph.nodes.contains_key(&edge.target));
    }

    // Humerus is first seen as an origin, so it stays an attachment even
    // though plenty of rows also insert on it.
    let humerus = &graph.nodes["Humerus"];
    assert_eq!(humerus.kind, NodeKind::Attachment);

    // Scapula originates three muscles (plus the duplicated Biceps row).
    assert_eq!(graph.nodes["Scapula"].degree, 4);

    // The duplicated Biceps row keeps duplicate edges.
    let biceps_origins = graph
        .edges
        .iter()
        .filter(|edge| {
            edge.source == "Scapula"
                && edge.target == "Biceps brachii"
                && edge.direction == EdgeDirection::Origin
        })
        .count();
    assert_eq!(biceps_origins, 2);
}

#[test]
fn fixture_layout_is_reproducible() {
    let records = parse_records(&fixture_csv()).unwrap();
    let graph = build_graph(&records).unwrap();
    let config = Config::default();

    let first = compute_layout(&graph, &config.theme, &config.layout, &config.render);
    let second = compute_layout(&graph, &config.theme, &config.layout, &config.render);
    for (id, node) in &first.nodes {
        let other = &second.nodes[id];
        assert_eq!(node.x, other.x, "{id} drifted in x");
        assert_eq!(node.y, other.y, "{id} drifted in y");
    }

    let first_svg = render_svg(&first, &config.theme, &config.layout);
    let second_svg = render_svg(&second, &config.theme, &config.layout);
    assert_eq!(first_svg, second_svg);
}

#[test]
fn modern_theme_renders_the_same_structure() {
    let records = parse_records(&fixture_csv()).unwrap();
    let graph = build_graph(&records).unwrap();
    let config = Config::modern();
    let layout = compute_layout(&graph, &config.theme, &config.layout, &config.render);
    let svg = render_svg(&layout, &config.theme, &config.layout);
    assert!(svg.contains("id=\"arrow-origin\""));
    assert!(svg.contains("id=\"arrow-insertion\""));
    assert!(svg.contains(&config.theme.muscle_fill));
}
