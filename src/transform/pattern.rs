/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 基本模式：单节点（按算子匹配）、串行链，以及 "Conv > Relu" 形式的文本解析
 */

use super::{Pattern, PatternMatch};
use crate::graph::{Graph, GraphError, Node, Params};

/// 单节点模式：算子名相同（给定参数时参数也须相同）即匹配
#[derive(Debug, Clone, PartialEq)]
pub struct NodePattern {
    pub op: String,
    pub params: Option<Params>,
}

impl NodePattern {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            params: None,
        }
    }

    /// 要求算子和参数都与 `node` 一致
    pub fn like(node: &Node) -> Self {
        Self {
            op: node.op.clone(),
            params: Some(node.params.clone()),
        }
    }
}

impl Pattern for NodePattern {
    fn match_at(&self, graph: &Graph, node: &Node) -> PatternMatch {
        if node.op != self.op {
            return PatternMatch::default();
        }
        if let Some(params) = &self.params {
            if params != &node.params {
                return PatternMatch::default();
            }
        }

        // 只有唯一后继时才能继续向后匹配
        let following = match graph.outgoing(std::slice::from_ref(&node.id)).as_slice() {
            [next] => Some(next.clone()),
            _ => None,
        };
        PatternMatch::new(vec![node.id.clone()], following)
    }
}

/// 串行模式：各子模式沿唯一后继依次匹配
pub struct SerialPattern {
    patterns: Vec<Box<dyn Pattern>>,
}

impl SerialPattern {
    pub fn new(patterns: Vec<Box<dyn Pattern>>) -> Self {
        Self { patterns }
    }
}

impl Pattern for SerialPattern {
    fn match_at(&self, graph: &Graph, node: &Node) -> PatternMatch {
        let mut all = PatternMatch::default();
        let mut current = node;

        for (i, pattern) in self.patterns.iter().enumerate() {
            let m = pattern.match_at(graph, current);
            if m.is_empty() {
                return PatternMatch::default();
            }
            all.nodes.extend(m.nodes);
            all.following = m.following;

            if i + 1 < self.patterns.len() {
                let next = all.following.as_ref().and_then(|id| graph.get(id));
                match next {
                    Some(next) => current = next,
                    None => return PatternMatch::default(),
                }
            }
        }
        all
    }
}

/// 解析 `"Conv > BatchNorm > Relu"` 形式的串行模式
pub fn parse_pattern(text: &str) -> Result<Box<dyn Pattern>, GraphError> {
    let terms: Vec<&str> = text.split('>').map(str::trim).collect();
    if terms.iter().any(|t| t.is_empty()) {
        return Err(GraphError::InvalidPattern(format!("模式中存在空的算子名: '{text}'")));
    }

    match terms.as_slice() {
        [op] => Ok(Box::new(NodePattern::new(*op))),
        _ => Ok(Box::new(SerialPattern::new(
            terms
                .iter()
                .map(|op| Box::new(NodePattern::new(*op)) as Box<dyn Pattern>)
                .collect(),
        ))),
    }
}
