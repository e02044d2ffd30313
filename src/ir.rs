use std::collections::BTreeMap;

use crate::error::GraphError;

/// One anatomical fact as it appears in the source table. Fields are kept
/// raw; trimming happens when the graph is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub muscle: String,
    pub origin: String,
    pub insertion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Muscle,
    Attachment,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Muscle => "muscle",
            NodeKind::Attachment => "attachment",
        }
    }
}

/// Graph vertex keyed by its trimmed anatomical name.
///
/// `kind` is fixed at creation: whichever field role first mentions a name
/// decides its kind for the rest of the build, even if the same name later
/// shows up in a different role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Number of edges incident to this node (as source or target). Used
    /// only as a rendering size hint.
    pub degree: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Attachment -> muscle: the muscle originates at the attachment.
    Origin,
    /// Muscle -> attachment: the muscle inserts at the attachment.
    Insertion,
}

impl EdgeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeDirection::Origin => "origin",
            EdgeDirection::Insertion => "insertion",
        }
    }
}

/// Directed relation between two node identifiers. Edges reference nodes by
/// name, never by index, so they stay valid as simulation keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub direction: EdgeDirection,
}

/// Deduplicated node set plus ordered edge list, ready for layout.
///
/// Built once per input load and treated as immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct AttachmentGraph {
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl AttachmentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the node on first sight; later sightings keep the original
    /// kind untouched.
    fn ensure_node(&mut self, id: &str, kind: NodeKind) {
        self.nodes.entry(id.to_string()).or_insert(Node {
            id: id.to_string(),
            kind,
            degree: 0,
        });
    }

    /// Append an edge and bump the degree of both endpoints. Duplicate
    /// edges are intentional: one edge per input row, never merged.
    fn push_edge(&mut self, source: &str, target: &str, direction: EdgeDirection) {
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            direction,
        });
        if let Some(node) = self.nodes.get_mut(source) {
            node.degree += 1;
        }
        if let Some(node) = self.nodes.get_mut(target) {
            node.degree += 1;
        }
    }
}

/// Transform an ordered sequence of records into an attachment graph.
///
/// Single pass in input order. Node identity is the trimmed name, so
/// `"Biceps "` and `"Biceps"` resolve to the same node. A row with an
/// empty field after trimming rejects the whole build without applying any
/// part of that row. Empty input yields an empty graph, not an error.
pub fn build_graph(records: &[Record]) -> Result<AttachmentGraph, GraphError> {
    let mut graph = AttachmentGraph::new();

    for (row, record) in records.iter().enumerate() {
        let muscle = record.muscle.trim();
        let origin = record.origin.trim();
        let insertion = record.insertion.trim();
        if muscle.is_empty() || origin.is_empty() || insertion.is_empty() {
            return Err(GraphError::MalformedRecord { row });
        }

        graph.ensure_node(muscle, NodeKind::Muscle);

        graph.ensure_node(origin, NodeKind::Attachment);
        graph.push_edge(origin, muscle, EdgeDirection::Origin);

        graph.ensure_node(insertion, NodeKind::Attachment);
        graph.push_edge(muscle, insertion, EdgeDirection::Insertion);
    }

    Ok(graph)
}
