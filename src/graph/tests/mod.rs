mod node;

use super::{Graph, Node, NodeId};

/// 测试用简写
pub(super) fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

pub(super) fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

/// 按 (id, op) 列表和边列表建图（边不带标签）
pub(super) fn graph_of(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> Graph {
    let mut graph = Graph::new_with_seed(7);
    for (uid, op) in nodes {
        graph.add_node(Node::new(*uid, *op));
    }
    for (a, b) in edges {
        graph.add_edge(&id(a), &id(b), None);
    }
    graph
}
