//! Node-graph editor state: nodes, links, edit sessions and JSON exchange.
//!
//! Links always refer to nodes by identifier, both in memory and in the
//! exported document, so export followed by import is lossless.

use eframe::egui::{Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius of a drawn node, in pixels.
pub const NODE_RADIUS: f32 = 20.0;

/// Margin kept between randomly placed nodes and the canvas edge.
const PLACEMENT_MARGIN: f32 = NODE_RADIUS * 2.0;

/// Errors surfaced to the user by graph operations.
#[derive(Debug)]
pub enum GraphError {
    /// Another node already uses the requested identifier
    DuplicateId(String),
    /// The import document lacks a required top-level field
    MissingField(&'static str),
    /// The import document is not valid JSON or has the wrong shape
    Parse(serde_json::Error),
    /// The graph could not be serialized
    Serialize(serde_json::Error),
    /// Save was requested with no edit in progress
    NoActiveEdit,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateId(id) => {
                write!(f, "A node named \"{id}\" already exists. Choose a different name.")
            }
            GraphError::MissingField(field) => {
                write!(f, "Invalid graph file: missing \"{field}\" field.")
            }
            GraphError::Parse(err) => write!(f, "Invalid graph file: {err}"),
            GraphError::Serialize(err) => write!(f, "Failed to export graph: {err}"),
            GraphError::NoActiveEdit => write!(f, "No node is being edited."),
        }
    }
}

impl std::error::Error for GraphError {}

/// A labeled node at a fixed canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub x: f32,
    pub y: f32,
}

impl GraphNode {
    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

/// An edge between two nodes, by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Serialized form of the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Node as accepted on import; positions may be omitted.
#[derive(Debug, Deserialize)]
struct ImportNode {
    id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
}

/// In-progress edit of one node, held by the modal dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub node_index: usize,
    pub id: String,
    pub content: String,
    pub category: String,
}

/// The editable graph.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    /// Open edit dialog, if any
    pub editing: Option<EditSession>,
}

impl GraphState {
    /// A small sample graph placed at random positions inside `canvas`.
    pub fn sample(canvas: Vec2, rng: &mut impl Rng) -> Self {
        let nodes = [
            ("USA", "United States of America", "Country"),
            ("Canada", "Canada", "Country"),
            ("Mexico", "United Mexican States", "Country"),
        ]
        .into_iter()
        .map(|(id, content, category)| {
            let pos = random_position(canvas, rng);
            GraphNode {
                id: id.to_string(),
                content: content.to_string(),
                category: category.to_string(),
                x: pos.x,
                y: pos.y,
            }
        })
        .collect();

        Self {
            nodes,
            links: vec![
                GraphLink {
                    source: "USA".to_string(),
                    target: "Canada".to_string(),
                },
                GraphLink {
                    source: "USA".to_string(),
                    target: "Mexico".to_string(),
                },
            ],
            editing: None,
        }
    }

    /// Index of the node whose position lies closest to `pos` within [`NODE_RADIUS`].
    ///
    /// Later nodes are drawn on top, so they win ties.
    pub fn node_at(&self, pos: Pos2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| n.position().distance(pos) <= NODE_RADIUS)
            .map(|(i, _)| i)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Opens the edit dialog for a node, pre-filled with its fields.
    pub fn begin_edit(&mut self, node_index: usize) {
        if let Some(node) = self.nodes.get(node_index) {
            self.editing = Some(EditSession {
                node_index,
                id: node.id.clone(),
                content: node.content.clone(),
                category: node.category.clone(),
            });
        }
    }

    /// Discards the open edit without touching the graph.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commits the open edit.
    ///
    /// Fails if any other node already has the new identifier, leaving the
    /// graph and the edit session untouched. On success, links pointing at the
    /// old identifier follow the rename.
    pub fn save_edit(&mut self) -> Result<(), GraphError> {
        let session = self.editing.as_ref().ok_or(GraphError::NoActiveEdit)?;
        let index = session.node_index;

        let duplicate = self
            .nodes
            .iter()
            .enumerate()
            .any(|(i, n)| i != index && n.id == session.id);
        if duplicate {
            return Err(GraphError::DuplicateId(session.id.clone()));
        }

        let Some(session) = self.editing.take() else {
            return Err(GraphError::NoActiveEdit);
        };
        let Some(node) = self.nodes.get_mut(index) else {
            return Err(GraphError::NoActiveEdit);
        };

        let old_id = std::mem::replace(&mut node.id, session.id);
        node.content = session.content;
        node.category = session.category;
        let new_id = node.id.clone();

        // Imported files may repeat an id; only rename links once no node keeps the old one.
        if old_id != new_id && !self.nodes.iter().any(|n| n.id == old_id) {
            for link in &mut self.links {
                if link.source == old_id {
                    link.source = new_id.clone();
                }
                if link.target == old_id {
                    link.target = new_id.clone();
                }
            }
        }

        log::info!("Saved node {}", new_id);
        Ok(())
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            links: self.links.clone(),
        }
    }

    /// Serializes the graph as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(&self.to_document()).map_err(GraphError::Serialize)
    }

    /// Replaces the whole graph from a JSON document.
    ///
    /// Both `nodes` and `links` must be present, and each entry must have
    /// string ids. On any error the current
    /// graph is left unchanged. Nodes without a position are placed randomly
    /// inside `canvas`. Identifiers are taken as given.
    pub fn import_json(&mut self, json: &str, canvas: Vec2, rng: &mut impl Rng) -> Result<(), GraphError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(GraphError::Parse)?;
        let nodes_value = value.get("nodes").ok_or(GraphError::MissingField("nodes"))?;
        let links_value = value.get("links").ok_or(GraphError::MissingField("links"))?;

        let nodes: Vec<ImportNode> =
            serde_json::from_value(nodes_value.clone()).map_err(GraphError::Parse)?;
        let links: Vec<GraphLink> =
            serde_json::from_value(links_value.clone()).map_err(GraphError::Parse)?;

        self.nodes = nodes
            .into_iter()
            .map(|n| {
                let (x, y) = match (n.x, n.y) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        let pos = random_position(canvas, rng);
                        (pos.x, pos.y)
                    }
                };
                GraphNode {
                    id: n.id,
                    content: n.content,
                    category: n.category,
                    x,
                    y,
                }
            })
            .collect();
        self.links = links;
        self.editing = None;

        log::info!(
            "Imported graph with {} nodes and {} links",
            self.nodes.len(),
            self.links.len()
        );
        Ok(())
    }
}

fn random_position(canvas: Vec2, rng: &mut impl Rng) -> Pos2 {
    let span_x = (canvas.x - 2.0 * PLACEMENT_MARGIN).max(1.0);
    let span_y = (canvas.y - 2.0 * PLACEMENT_MARGIN).max(1.0);
    Pos2::new(
        PLACEMENT_MARGIN + rng.gen::<f32>() * span_x,
        PLACEMENT_MARGIN + rng.gen::<f32>() * span_y,
    )
}
