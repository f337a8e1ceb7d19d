/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 核心操作：创建、身份解析、节点/边的增删与索引
 */

use super::super::config::GraphConfig;
use super::super::error::GraphError;
use super::super::node::Node;
use super::super::theme::Theme;
use super::super::types::{Edge, HasId, NodeId, Shape};
use super::Graph;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            meaningful_ids: false,
            theme: Theme::basic(),
            rng: StdRng::from_entropy(),
        }
    }

    /// 创建一个带固定种子的图（随机序列ID可复现）
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// 按配置创建空图
    pub fn with_config(config: &GraphConfig) -> Result<Self, GraphError> {
        let theme = Theme::named(&config.theme)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            meaningful_ids: config.meaningful_ids,
            theme,
            rng,
        })
    }

    // ========== 基础访问器 ==========

    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// 按内置主题名切换主题
    pub fn set_theme_named(&mut self, name: &str) -> Result<(), GraphError> {
        self.theme = Theme::named(name)?;
        Ok(())
    }

    pub const fn meaningful_ids(&self) -> bool {
        self.meaningful_ids
    }

    pub fn set_meaningful_ids(&mut self, meaningful_ids: bool) {
        self.meaningful_ids = meaningful_ids;
    }

    /// 按插入顺序迭代所有节点
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, entity: &impl HasId) -> bool {
        self.nodes.contains_key(entity.uid())
    }

    // ========== 身份解析 ==========

    /// 返回图成员的唯一标识
    pub fn id(&self, entity: &impl HasId) -> NodeId {
        entity.uid().clone()
    }

    // ========== 索引 ==========

    /// 按ID取节点，不存在时返回 None
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// 按ID序列取节点，结果与输入一一对应，缺失的ID对应 None
    pub fn get_many(&self, ids: &[NodeId]) -> Vec<Option<&Node>> {
        ids.iter().map(|id| self.nodes.get(id)).collect()
    }

    // ========== 增删 ==========

    /// 插入节点；ID已存在时覆盖（保留原有位置）
    pub fn add_node(&mut self, node: Node) {
        let id = self.id(&node);
        self.nodes.insert(id, node);
    }

    /// 添加边；若完全相同的 (源, 目标, 标签) 已存在则不重复添加
    ///
    /// 仅标签不同的两条边会同时保留。
    pub fn add_edge(&mut self, node1: &impl HasId, node2: &impl HasId, label: Option<Shape>) {
        let edge = Edge::new(self.id(node1), self.id(node2), label);
        if !self.edges.contains(&edge) {
            tracing::trace!(source = %edge.source, target = %edge.target, "添加边");
            self.edges.push(edge);
        }
    }

    /// 无条件追加边（不做去重检查），供批量导入使用
    pub fn add_edge_by_id(&mut self, id1: NodeId, id2: NodeId, label: Option<Shape>) {
        self.edges.push(Edge::new(id1, id2, label));
    }

    /// 删除单个节点及所有与其相连的边
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        self.edges.retain(|e| !e.touches(id));
        tracing::debug!(node = %id, "删除节点");
        Ok(node)
    }

    /// 依次删除多个节点及其边
    ///
    /// 遇到不存在的节点时返回错误，此前已删除的节点不会恢复。
    pub fn remove(&mut self, ids: &[NodeId]) -> Result<(), GraphError> {
        for id in ids {
            self.remove_node(id)?;
        }
        Ok(())
    }

    /// 列出所有层（调试用）
    pub fn list_layers(&self) -> Vec<String> {
        let layers: Vec<String> = self.nodes.values().map(ToString::to_string).collect();
        for layer in &layers {
            tracing::debug!("{layer}");
        }
        layers
    }
}
