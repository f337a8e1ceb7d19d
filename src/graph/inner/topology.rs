/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 拓扑查询：incoming/outgoing/siblings
 */

use super::super::types::NodeId;
use super::Graph;
use indexmap::IndexSet;

impl Graph {
    /// 返回从给定节点（一个或多个）出发的边所指向的节点ID（已去重）
    ///
    /// 结果应视为集合；顺序为各目标首次出现的顺序。
    pub fn outgoing(&self, ids: &[NodeId]) -> Vec<NodeId> {
        let targets: IndexSet<&NodeId> = self
            .edges
            .iter()
            .filter(|e| ids.contains(&e.source))
            .map(|e| &e.target)
            .collect();
        targets.into_iter().cloned().collect()
    }

    /// 返回指向给定节点的边的源节点ID（按边顺序，不去重）
    pub fn incoming(&self, id: &NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| &e.target == id)
            .map(|e| e.source.clone())
            .collect()
    }

    /// 返回与给定节点共享同一父节点的所有节点（包括自身）
    ///
    /// 仅处理恰好一条入边的情况；无入边或有多条入边时只返回节点自身。
    pub fn siblings(&self, id: &NodeId) -> Vec<NodeId> {
        match self.incoming(id).as_slice() {
            [parent] => self.outgoing(std::slice::from_ref(parent)),
            _ => vec![id.clone()],
        }
    }
}
