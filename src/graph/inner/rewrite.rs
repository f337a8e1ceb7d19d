/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 改写操作：节点组替换（replace）、模式搜索（search）、序列ID生成
 */

use super::super::error::GraphError;
use super::super::node::Node;
use super::super::types::NodeId;
use super::Graph;
use crate::transform::{Pattern, PatternMatch};
use rand::Rng;

impl Graph {
    /// 用一个节点替换一条节点链
    ///
    /// 指向 `nodes[0]` 的边改为指向新节点，`nodes[-1]` 的出边改为从新节点出发；
    /// 边标签由新端点的输出形状重新推导。
    /// 若新节点的ID是被替换节点之一（折叠），则该节点被新值覆盖而不会被删除；
    /// 若与其他既有节点重名则报错，图保持不变。
    pub fn replace(&mut self, nodes: &[NodeId], node: Node) -> Result<(), GraphError> {
        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            return Err(GraphError::InvalidOperation(
                "replace 至少需要一个被替换节点".to_string(),
            ));
        };

        let new_id = self.id(&node);
        let collapse = nodes.contains(&new_id);
        if !collapse && self.nodes.contains_key(&new_id) {
            return Err(GraphError::InvalidOperation(format!(
                "新节点ID {new_id} 已被图中其他节点占用"
            )));
        }
        tracing::debug!(
            replaced = nodes.len(),
            node = %new_id,
            collapse,
            "替换节点"
        );

        // 折叠时覆盖原位置上的节点，使 repeat/caption 等更新生效
        let new_shape = node.output_shape.clone();
        self.add_node(node);

        for k in self.incoming(first) {
            let in_shape = self
                .nodes
                .get(&k)
                .ok_or_else(|| GraphError::NodeNotFound(k.clone()))?
                .output_shape
                .clone();
            self.add_edge(&k, &new_id, in_shape);
        }
        for k in self.outgoing(std::slice::from_ref(last)) {
            if !self.nodes.contains_key(&k) {
                return Err(GraphError::NodeNotFound(k));
            }
            self.add_edge(&new_id, &k, new_shape.clone());
        }

        for n in nodes {
            if collapse && n == &new_id {
                continue;
            }
            self.remove_node(n)?;
        }
        Ok(())
    }

    /// 用一个节点替换单个节点
    pub fn replace_node(&mut self, id: &NodeId, node: Node) -> Result<(), GraphError> {
        self.replace(std::slice::from_ref(id), node)
    }

    /// 按插入顺序在图中搜索与模式匹配的子图，返回第一个匹配
    ///
    /// 无匹配时返回空的 [`PatternMatch`]。
    pub fn search(&self, pattern: &dyn Pattern) -> PatternMatch {
        self.nodes
            .values()
            .map(|node| pattern.match_at(self, node))
            .find(|m| !m.is_empty())
            .unwrap_or_default()
    }

    /// 为将被折叠成一个节点的节点序列生成ID
    ///
    /// 可读模式下将成员ID以 `><` 连接；否则生成随机64位ID。
    pub fn sequence_id(&mut self, sequence: &[NodeId]) -> NodeId {
        if self.meaningful_ids {
            let ids: Vec<&str> = sequence.iter().map(NodeId::as_str).collect();
            NodeId(ids.join("><"))
        } else {
            NodeId::from(self.rng.r#gen::<u64>())
        }
    }
}
