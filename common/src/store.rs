use serde_json::Value;
use std::collections::HashSet;

/// View state for graph display: the loaded graph document plus the set of
/// currently highlighted node ids.
#[derive(Debug, Default)]
pub struct ViewState {
    graph_json: Option<Value>,
    highlighted_nodes: HashSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_graph(&mut self, graph: Value) {
        self.graph_json = Some(graph);
    }

    pub fn graph(&self) -> Option<&Value> {
        self.graph_json.as_ref()
    }

    /// Replace the highlighted set wholesale with the given node ids.
    pub fn highlight_nodes<I>(&mut self, node_ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.highlighted_nodes = node_ids.into_iter().map(Into::into).collect();
    }

    pub fn highlighted_nodes(&self) -> &HashSet<String> {
        &self.highlighted_nodes
    }

    pub fn is_highlighted(&self, node_id: &str) -> bool {
        self.highlighted_nodes.contains(node_id)
    }
}
