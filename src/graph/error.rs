/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 模块的错误类型和可视化相关类型
 */

use super::types::NodeId;
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点{0}不存在于图中")]
    NodeNotFound(NodeId),
    /// output_shape 不是序列（tuple 或 list）
    #[error("shape must be tuple or list：{0}")]
    InvalidShape(String),
    #[error("非法操作：{0}")]
    InvalidOperation(String),
    #[error("非法模式：{0}")]
    InvalidPattern(String),
    #[error("未知主题：{0}")]
    UnknownTheme(String),
    #[error("图描述符解析失败：{0}")]
    Descriptor(String),
    #[error("文件读写失败：{0}")]
    Io(String),
    #[error("渲染失败：{0}")]
    Render(String),
}

// ========== 可视化相关类型 ==========

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PDF 格式（默认）
    #[default]
    Pdf,
    /// PNG 格式
    Png,
    /// SVG 矢量格式
    Svg,
}

impl ImageFormat {
    /// 获取文件扩展名（不含点号）
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// 可视化输出结果
#[derive(Debug)]
pub struct VisualizationOutput {
    /// DOT 文件路径（仅当渲染失败、源文件被保留时存在）
    pub dot_path: Option<std::path::PathBuf>,
    /// 图像文件路径（仅当 Graphviz 可用时生成）
    pub image_path: Option<std::path::PathBuf>,
    /// Graphviz 是否可用
    pub graphviz_available: bool,
    /// 如果 Graphviz 不可用，提供安装提示
    pub graphviz_hint: Option<String>,
}
