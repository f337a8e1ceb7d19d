/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 可视化主题（背景色、填充色、边框色、字体、边距），按主题名索引
 */

use super::error::GraphError;
use serde::{Deserialize, Serialize};

/// 可视化主题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background_color: String,
    pub fill_color: String,
    pub outline_color: String,
    pub font_color: String,
    pub font_name: String,
    pub font_size: String,
    pub margin: String,
    pub padding: String,
}

impl Theme {
    /// 内置主题名称
    pub const NAMES: [&'static str; 2] = ["basic", "blue"];

    /// 白底灰框（默认）
    pub fn basic() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            fill_color: "#E8E8E8".to_string(),
            outline_color: "#000000".to_string(),
            font_color: "#000000".to_string(),
            font_name: "Times".to_string(),
            font_size: "10".to_string(),
            margin: "0,0".to_string(),
            padding: "1.0,0.5".to_string(),
        }
    }

    /// 白底浅蓝框
    pub fn blue() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            fill_color: "#BCD6FC".to_string(),
            outline_color: "#7C96BC".to_string(),
            font_color: "#202020".to_string(),
            font_name: "Verdana".to_string(),
            font_size: "10".to_string(),
            margin: "0,0".to_string(),
            padding: "1.0,0.5".to_string(),
        }
    }

    /// 按名称查找内置主题
    pub fn named(name: &str) -> Result<Self, GraphError> {
        match name {
            "basic" => Ok(Self::basic()),
            "blue" => Ok(Self::blue()),
            other => Err(GraphError::UnknownTheme(format!(
                "{other}（可选：{}）",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::basic()
    }
}
