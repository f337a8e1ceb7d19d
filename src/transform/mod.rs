/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 模式与变换：在图中定位可折叠的子图（Pattern），并将其简化（Transform）
 *
 * - pattern.rs: NodePattern / SerialPattern / 文本模式解析
 * - rules.rs: Fold / FoldDuplicates / Prune / Rename 及默认简化规则集
 */

mod pattern;
mod rules;

pub use pattern::{parse_pattern, NodePattern, SerialPattern};
pub use rules::{simplicity_transforms, Fold, FoldDuplicates, Prune, Rename};

use crate::graph::{Graph, GraphError, Node, NodeId};

/// 一次模式匹配的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    /// 匹配到的节点ID（按链的先后顺序）
    pub nodes: Vec<NodeId>,
    /// 匹配链之后紧跟的节点（恰有一个后继时）
    pub following: Option<NodeId>,
}

impl PatternMatch {
    pub fn new(nodes: Vec<NodeId>, following: Option<NodeId>) -> Self {
        Self { nodes, following }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// 模式：给定起始节点，尝试识别特定形状的子图
pub trait Pattern {
    /// 以 `node` 为起点匹配，失败时返回空的 [`PatternMatch`]
    fn match_at(&self, graph: &Graph, node: &Node) -> PatternMatch;
}

/// 变换：对图执行零次或多次 search + replace
pub trait Transform {
    fn apply(&self, graph: &mut Graph) -> Result<(), GraphError>;
}

/// 依次应用一组变换
pub fn apply_all(transforms: &[Box<dyn Transform>], graph: &mut Graph) -> Result<(), GraphError> {
    for transform in transforms {
        transform.apply(graph)?;
    }
    Ok(())
}
