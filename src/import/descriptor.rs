/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 图描述符（Graph Descriptor）
 *                 框架无关的 JSON 中间表示，由外部导出工具生成，再导入为 Graph
 */

use super::{Framework, GraphImporter};
use crate::graph::{shape_from_value, Edge, Graph, GraphError, Node, NodeId, Params};
use serde::{Deserialize, Serialize};

/// 图的可序列化描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// 格式版本（用于向后兼容）
    #[serde(default = "default_version")]
    pub version: String,
    /// 模型来源框架
    #[serde(default)]
    pub framework: Framework,
    /// 所有节点描述
    pub nodes: Vec<NodeDescriptor>,
    /// 所有边（按导入顺序）
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// 节点描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// 节点 ID
    pub id: NodeId,
    /// 节点名称
    #[serde(default)]
    pub name: Option<String>,
    /// 算子名称
    pub op: String,
    /// 输出形状（须为数组或 null，导入时校验）
    #[serde(default)]
    pub output_shape: serde_json::Value,
    /// 层参数
    #[serde(default)]
    pub params: Params,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl NodeDescriptor {
    /// 转换为节点，输出形状不是序列时报错
    pub fn to_node(&self) -> Result<Node, GraphError> {
        let mut node = Node::new(self.id.clone(), self.op.clone()).with_params(self.params.clone());
        node.name = self.name.clone();
        node.output_shape = shape_from_value(&self.output_shape).map_err(|e| match e {
            GraphError::InvalidShape(msg) => {
                GraphError::InvalidShape(format!("节点 {} 的 output_shape {msg}", self.id))
            }
            other => other,
        })?;
        Ok(node)
    }
}

/// 从 JSON 图描述符导入
#[derive(Debug, Clone)]
pub struct DescriptorImporter {
    descriptor: GraphDescriptor,
}

impl DescriptorImporter {
    pub fn new(descriptor: GraphDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let descriptor = serde_json::from_str(json)
            .map_err(|e| GraphError::Descriptor(format!("JSON 解析失败: {e}")))?;
        Ok(Self::new(descriptor))
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Io(format!("读取 {} 失败: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub const fn descriptor(&self) -> &GraphDescriptor {
        &self.descriptor
    }
}

impl GraphImporter for DescriptorImporter {
    fn framework(&self) -> Framework {
        self.descriptor.framework
    }

    fn import(&self, graph: &mut Graph) -> Result<(), GraphError> {
        for desc in &self.descriptor.nodes {
            graph.add_node(desc.to_node()?);
        }
        for edge in &self.descriptor.edges {
            graph.add_edge_by_id(edge.source.clone(), edge.target.clone(), edge.label.clone());
        }
        tracing::debug!(
            framework = ?self.descriptor.framework,
            nodes = self.descriptor.nodes.len(),
            edges = self.descriptor.edges.len(),
            "导入图描述符"
        );
        Ok(())
    }
}
