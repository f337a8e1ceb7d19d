/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 模型导入：显式的框架标记、导入器接口，以及“导入 → 框架变换 → 简化变换”的构建流程
 */

mod descriptor;

pub use descriptor::{DescriptorImporter, GraphDescriptor, NodeDescriptor};

use crate::graph::{Graph, GraphConfig, GraphError};
use crate::transform::{apply_all, simplicity_transforms, Prune, Rename, Transform};
use serde::{Deserialize, Serialize};

/// 模型来源框架
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    PyTorch,
    TensorFlow,
    /// 已是框架无关的算子名，无需框架专属变换
    #[default]
    Generic,
}

impl Framework {
    /// 各框架默认的专属变换（统一算子命名、去除无关节点）
    pub fn default_transforms(self) -> Result<Vec<Box<dyn Transform>>, GraphError> {
        let transforms: Vec<Box<dyn Transform>> = match self {
            Self::PyTorch => vec![
                Box::new(Rename::op("onnx::", "")?),
                Box::new(Rename::op("Gemm", "Linear")?),
                Box::new(Rename::op("aten::max_pool2d_with_indices", "MaxPool")?),
                Box::new(Rename::op("BatchNormalization", "BatchNorm")?),
            ],
            Self::TensorFlow => vec![
                Box::new(Prune::new("Const")?),
                Box::new(Rename::op("Conv2D", "Conv")?),
                Box::new(Rename::op("FusedBatchNorm", "BatchNorm")?),
                Box::new(Rename::op("MatMul", "Linear")?),
            ],
            Self::Generic => Vec::new(),
        };
        Ok(transforms)
    }
}

/// 导入器：把某个框架的模型填充进一个空图
pub trait GraphImporter {
    fn framework(&self) -> Framework;

    /// 通过 add_node/add_edge/add_edge_by_id 填充图
    fn import(&self, graph: &mut Graph) -> Result<(), GraphError>;

    /// 导入后、通用简化前执行的框架专属变换
    fn framework_transforms(&self) -> Result<Vec<Box<dyn Transform>>, GraphError> {
        self.framework().default_transforms()
    }
}

/// 变换集合的选择
pub enum TransformSet {
    /// 使用默认集合
    Default,
    /// 不做任何变换
    Skip,
    /// 使用自定义集合
    Custom(Vec<Box<dyn Transform>>),
}

impl Graph {
    /// 从模型构建图
    ///
    /// 依次执行：导入 → 框架专属变换 → 通用简化变换。
    /// 没有导入器时得到一个空图（不执行任何变换）。
    pub fn build(
        importer: Option<&dyn GraphImporter>,
        config: &GraphConfig,
        framework_transforms: TransformSet,
        transforms: TransformSet,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::with_config(config)?;
        let Some(importer) = importer else {
            return Ok(graph);
        };

        importer.import(&mut graph)?;

        let framework_transforms = match framework_transforms {
            TransformSet::Default => importer.framework_transforms()?,
            TransformSet::Skip => Vec::new(),
            TransformSet::Custom(list) => list,
        };
        apply_all(&framework_transforms, &mut graph)?;

        let transforms = match transforms {
            TransformSet::Default => simplicity_transforms(),
            TransformSet::Skip => Vec::new(),
            TransformSet::Custom(list) => list,
        };
        apply_all(&transforms, &mut graph)?;

        tracing::debug!(
            framework = ?importer.framework(),
            nodes = graph.nodes_count(),
            edges = graph.edges_count(),
            "图构建完成"
        );
        Ok(graph)
    }
}
