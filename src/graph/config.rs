/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 配置：可读ID模式、主题名、随机种子
 */

use super::error::GraphError;
use serde::{Deserialize, Serialize};

/// 图的构建配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 为折叠后的节点序列生成可读ID（成员ID以 `><` 连接），否则生成随机64位ID
    pub meaningful_ids: bool,
    /// 主题名（见 [`Theme::named`](super::Theme::named)）
    pub theme: String,
    /// 随机ID的种子（None 表示每次运行都不同）
    pub seed: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            meaningful_ids: false,
            theme: "basic".to_string(),
            seed: None,
        }
    }
}

impl GraphConfig {
    /// 从 JSON 字符串加载配置，缺失字段取默认值
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::Descriptor(format!("配置解析失败: {e}")))
    }
}
