/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 结构图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建、身份解析、增删节点与边、索引
 * - topology.rs: incoming/outgoing/siblings
 * - rewrite.rs: replace/search/sequence_id
 * - visualization.rs: DOT 投影与渲染
 */

mod core;
mod rewrite;
mod topology;
mod visualization;

use super::node::Node;
use super::theme::Theme;
use super::types::{Edge, NodeId};
use indexmap::IndexMap;
use rand::rngs::StdRng;

/// 有向图：跟踪节点和边，并支持逐步简化所需的各种操作
///
/// 图独占其所有节点和边；节点按插入顺序迭代。
#[derive(Debug, Clone)]
pub struct Graph {
    pub(in crate::graph) nodes: IndexMap<NodeId, Node>,
    /// 按插入顺序存储的边
    pub(in crate::graph) edges: Vec<Edge>,
    pub(in crate::graph) meaningful_ids: bool,
    pub(in crate::graph) theme: Theme,
    /// 生成随机序列ID用
    pub(in crate::graph) rng: StdRng,
}
