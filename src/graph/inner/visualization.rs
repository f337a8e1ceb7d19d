/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 的 Graphviz DOT 投影、内嵌 SVG 预览与保存
 */

use super::super::error::{GraphError, ImageFormat, VisualizationOutput};
use super::super::node::Node;
use super::Graph;
use crate::dot::{AttrScope, Digraph};
use std::path::{Path, PathBuf};

impl Graph {
    // ========== Graphviz DOT 可视化 ==========

    /// 按当前主题将节点和边投影为 DOT 绘图对象
    ///
    /// 纯投影，不改变图本身。节点标签由 title、caption（非空时）
    /// 和重复次数标记（repeat > 1 时）组成；边标签为形状（以 `x` 连接）。
    pub fn build_dot(&self) -> Digraph {
        let theme = &self.theme;
        let mut dot = Digraph::new();

        for (key, value) in [
            ("bgcolor", theme.background_color.as_str()),
            ("color", theme.outline_color.as_str()),
            ("fontsize", theme.font_size.as_str()),
            ("fontcolor", theme.font_color.as_str()),
            ("fontname", theme.font_name.as_str()),
            ("margin", theme.margin.as_str()),
            ("pad", theme.padding.as_str()),
        ] {
            dot.attr(AttrScope::Graph, key, value);
        }
        for (key, value) in [
            ("shape", "box"),
            ("style", "filled"),
            ("margin", "0,0"),
            ("fillcolor", theme.fill_color.as_str()),
            ("color", theme.outline_color.as_str()),
            ("fontsize", theme.font_size.as_str()),
            ("fontcolor", theme.font_color.as_str()),
            ("fontname", theme.font_name.as_str()),
        ] {
            dot.attr(AttrScope::Node, key, value);
        }
        for (key, value) in [
            ("style", "dotted"),
            ("color", theme.outline_color.as_str()),
            ("fontsize", theme.font_size.as_str()),
            ("fontcolor", theme.font_color.as_str()),
            ("fontname", theme.font_name.as_str()),
        ] {
            dot.attr(AttrScope::Edge, key, value);
        }

        for (id, node) in &self.nodes {
            dot.node(id.as_str(), Self::dot_node_label(node));
        }
        for edge in &self.edges {
            dot.edge(
                edge.source.as_str(),
                edge.target.as_str(),
                edge.label.as_ref().map(ToString::to_string),
            );
        }
        dot
    }

    /// 生成 Graphviz DOT 格式的图描述字符串
    pub fn to_dot(&self) -> String {
        self.build_dot().source()
    }

    /// 生成 SVG 字符串（用于内嵌预览，需要 Graphviz）
    pub fn to_svg(&self) -> Result<String, GraphError> {
        self.build_dot().pipe_svg()
    }

    /// 保存图像
    ///
    /// # 参数
    /// - `path`: 目标路径，如 `"outputs/model"` 或 `"outputs/model.pdf"`
    ///   （与所选格式一致的后缀会被去掉，渲染时再加回）
    /// - `format`: 图像格式，默认为 PDF
    ///
    /// # 行为
    /// - 先生成 `{dir}/{name}.dot`，Graphviz 可用时渲染出 `{dir}/{name}.{format}` 并删除 `.dot`
    /// - Graphviz 不可用时保留 `.dot`，返回结果中包含安装提示
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        format: Option<ImageFormat>,
    ) -> Result<VisualizationOutput, GraphError> {
        let format = format.unwrap_or_default();
        let (directory, file_name) = Self::split_save_path(path.as_ref(), format)?;

        let mut dot = self.build_dot();
        dot.format = format;
        dot.render(&directory, &file_name, true)
    }

    /// 将保存路径拆分为 (目录, 不含格式后缀的文件名)
    pub(in crate::graph) fn split_save_path(
        path: &Path,
        format: ImageFormat,
    ) -> Result<(PathBuf, String), GraphError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                GraphError::InvalidOperation(format!("保存路径缺少文件名: {}", path.display()))
            })?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let suffix = format!(".{}", format.extension());
        let file_name = file_name
            .strip_suffix(&suffix)
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .unwrap_or(file_name);
        Ok((directory, file_name))
    }

    /// 节点的 HTML-like 标签
    fn dot_node_label(node: &Node) -> String {
        let mut rows = format!(
            "<tr><td cellpadding='6'>{}</td></tr>",
            escape_html(&node.title())
        );
        let caption = node.caption();
        if !caption.is_empty() {
            rows.push_str(&format!("<tr><td>{}</td></tr>", escape_html(&caption)));
        }
        if node.repeat > 1 {
            rows.push_str(&format!(
                "<tr><td align='right' cellpadding='2'>x{}</td></tr>",
                node.repeat
            ));
        }
        format!("<table border='0' cellborder='0' cellpadding='0'>{rows}</table>")
    }
}

/// HTML-like 标签中的文本转义
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
