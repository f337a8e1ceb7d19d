/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 通用简化规则：折叠模式、折叠重复块、剪除模式、重命名算子/名称
 */

use super::pattern::{parse_pattern, NodePattern, SerialPattern};
use super::{Pattern, PatternMatch, Transform};
use crate::graph::{Graph, GraphError, Node, NodeId};

/// 将匹配到的节点链折叠为一个新节点
pub struct Fold {
    pattern: Box<dyn Pattern>,
    op: String,
    name: Option<String>,
}

impl Fold {
    /// `pattern` 为 `"Conv > Relu"` 形式的串行模式，`op` 为折叠后的算子名
    pub fn new(pattern: &str, op: &str) -> Result<Self, GraphError> {
        // 单节点模式折叠成同名算子会无限匹配
        if pattern.trim() == op {
            return Err(GraphError::InvalidPattern(format!(
                "折叠结果的算子 '{op}' 会再次匹配模式 '{pattern}'"
            )));
        }
        Ok(Self {
            pattern: parse_pattern(pattern)?,
            op: op.to_string(),
            name: None,
        })
    }

    /// 指定折叠后节点的显示名称（默认由各成员的 title 以 ` > ` 连接）
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn combine(&self, graph: &mut Graph, matched: &PatternMatch) -> Result<Node, GraphError> {
        let members: Vec<&Node> = matched
            .nodes
            .iter()
            .map(|id| graph.get(id).ok_or_else(|| GraphError::NodeNotFound(id.clone())))
            .collect::<Result<_, _>>()?;

        let name = self.name.clone().unwrap_or_else(|| {
            members
                .iter()
                .map(|n| n.title())
                .collect::<Vec<_>>()
                .join(" > ")
        });
        let caption = members
            .iter()
            .map(|n| n.caption())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let output_shape = members.last().and_then(|n| n.output_shape.clone());

        let id = graph.sequence_id(&matched.nodes);
        let mut combo = Node::new(id, self.op.clone()).with_name(name);
        combo.output_shape = output_shape;
        combo.set_caption(caption);
        Ok(combo)
    }
}

impl Transform for Fold {
    fn apply(&self, graph: &mut Graph) -> Result<(), GraphError> {
        loop {
            let matched = graph.search(self.pattern.as_ref());
            if matched.is_empty() {
                return Ok(());
            }
            let combo = self.combine(graph, &matched)?;
            tracing::debug!(op = %self.op, members = matched.len(), "折叠节点链");
            graph.replace(&matched.nodes, combo)?;
        }
    }
}

/// 将连续的结构相同（算子与参数都相同）的节点折叠为一个，并累加重复次数
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldDuplicates;

impl FoldDuplicates {
    fn find_duplicates(graph: &Graph) -> PatternMatch {
        graph
            .nodes()
            .map(|node| {
                let pattern = SerialPattern::new(vec![
                    Box::new(NodePattern::like(node)),
                    Box::new(NodePattern::like(node)),
                ]);
                pattern.match_at(graph, node)
            })
            .find(|m| !m.is_empty())
            .unwrap_or_default()
    }
}

impl Transform for FoldDuplicates {
    fn apply(&self, graph: &mut Graph) -> Result<(), GraphError> {
        loop {
            let matched = Self::find_duplicates(graph);
            let Some(first) = matched.nodes.first() else {
                return Ok(());
            };

            let repeat: usize = matched
                .nodes
                .iter()
                .filter_map(|id| graph.get(id))
                .map(|n| n.repeat)
                .sum();
            let mut combo = graph
                .get(first)
                .cloned()
                .ok_or_else(|| GraphError::NodeNotFound(first.clone()))?;
            combo.repeat = repeat;
            combo.id = graph.sequence_id(&matched.nodes);

            tracing::debug!(op = %combo.op, repeat, "折叠重复节点");
            graph.replace(&matched.nodes, combo)?;
        }
    }
}

/// 删除所有与模式匹配的节点（及其边）
pub struct Prune {
    pattern: Box<dyn Pattern>,
}

impl Prune {
    pub fn new(pattern: &str) -> Result<Self, GraphError> {
        Ok(Self {
            pattern: parse_pattern(pattern)?,
        })
    }
}

impl Transform for Prune {
    fn apply(&self, graph: &mut Graph) -> Result<(), GraphError> {
        loop {
            let matched = graph.search(self.pattern.as_ref());
            if matched.is_empty() {
                return Ok(());
            }
            tracing::debug!(members = matched.len(), "剪除节点");
            graph.remove(&matched.nodes)?;
        }
    }
}

/// 重命名目标
#[derive(Debug, Clone, PartialEq, Eq)]
enum RenameTarget {
    Op(String),
    Name(String),
}

/// 将算子名或节点名中的子串替换为新文本（目标文本可为空，即删除该子串）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    target: RenameTarget,
    to: String,
}

impl Rename {
    pub fn op(from: &str, to: &str) -> Result<Self, GraphError> {
        Self::build(RenameTarget::Op(from.to_string()), to)
    }

    pub fn name(from: &str, to: &str) -> Result<Self, GraphError> {
        Self::build(RenameTarget::Name(from.to_string()), to)
    }

    fn build(target: RenameTarget, to: &str) -> Result<Self, GraphError> {
        let (RenameTarget::Op(from) | RenameTarget::Name(from)) = &target;
        if from.is_empty() {
            return Err(GraphError::InvalidOperation("重命名的匹配文本不能为空".to_string()));
        }
        Ok(Self {
            target,
            to: to.to_string(),
        })
    }
}

impl Transform for Rename {
    fn apply(&self, graph: &mut Graph) -> Result<(), GraphError> {
        let ids: Vec<NodeId> = graph.node_ids();
        for id in &ids {
            let Some(node) = graph.get_mut(id) else {
                continue;
            };
            match &self.target {
                RenameTarget::Op(from) => node.op = node.op.replace(from.as_str(), &self.to),
                RenameTarget::Name(from) => {
                    if let Some(name) = &node.name {
                        node.name = Some(name.replace(from.as_str(), &self.to));
                    }
                }
            }
        }
        Ok(())
    }
}

/// 默认的通用简化规则集
pub fn simplicity_transforms() -> Vec<Box<dyn Transform>> {
    let folds = [
        ("Conv > BatchNorm > Relu", "ConvBnRelu"),
        ("Conv > BatchNorm", "ConvBn"),
        ("Conv > Relu", "ConvRelu"),
    ];

    let mut transforms: Vec<Box<dyn Transform>> = Vec::new();
    for (pattern, op) in folds {
        // 内置模式均为合法文本
        if let Ok(fold) = Fold::new(pattern, op) {
            transforms.push(Box::new(fold));
        }
    }
    transforms.push(Box::new(FoldDuplicates));
    transforms
}
