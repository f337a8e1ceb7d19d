/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graphviz DOT 绘图对象：图/节点/边的默认属性、节点与边语句、源码生成与渲染
 */

use crate::graph::{GraphError, ImageFormat, VisualizationOutput};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// DOT 节点语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    pub id: String,
    /// HTML-like 标签（不含外层尖括号）
    pub label: String,
}

/// DOT 边语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    pub tail: String,
    pub head: String,
    pub label: Option<String>,
}

/// 有向绘图对象（只描述图，不做任何布局）
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    graph_attrs: Vec<(String, String)>,
    node_attrs: Vec<(String, String)>,
    edge_attrs: Vec<(String, String)>,
    nodes: Vec<DotNode>,
    edges: Vec<DotEdge>,
    /// 渲染格式
    pub format: ImageFormat,
}

/// 属性作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrScope {
    Graph,
    Node,
    Edge,
}

impl AttrScope {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某作用域的默认属性（同名属性后写覆盖前写）
    pub fn attr(&mut self, scope: AttrScope, key: &str, value: &str) {
        let attrs = match scope {
            AttrScope::Graph => &mut self.graph_attrs,
            AttrScope::Node => &mut self.node_attrs,
            AttrScope::Edge => &mut self.edge_attrs,
        };
        match attrs.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => attrs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn attrs(&self, scope: AttrScope) -> &[(String, String)] {
        match scope {
            AttrScope::Graph => &self.graph_attrs,
            AttrScope::Node => &self.node_attrs,
            AttrScope::Edge => &self.edge_attrs,
        }
    }

    /// 添加节点，`label` 为 HTML-like 标签
    pub fn node(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.nodes.push(DotNode {
            id: id.into(),
            label: label.into(),
        });
    }

    pub fn edge(&mut self, tail: impl Into<String>, head: impl Into<String>, label: Option<String>) {
        self.edges.push(DotEdge {
            tail: tail.into(),
            head: head.into(),
            label,
        });
    }

    pub fn nodes(&self) -> &[DotNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DotEdge] {
        &self.edges
    }

    /// 生成 DOT 源码
    pub fn source(&self) -> String {
        let mut dot = String::from("digraph {\n");

        for scope in [AttrScope::Graph, AttrScope::Node, AttrScope::Edge] {
            let attrs = self.attrs(scope);
            if attrs.is_empty() {
                continue;
            }
            let list: Vec<String> = attrs
                .iter()
                .map(|(k, v)| format!("{k}={}", quote(v)))
                .collect();
            dot.push_str(&format!("\t{} [{}]\n", scope.keyword(), list.join(" ")));
        }

        for node in &self.nodes {
            dot.push_str(&format!("\t{} [label=<{}>]\n", quote(&node.id), node.label));
        }
        for edge in &self.edges {
            match &edge.label {
                Some(label) => dot.push_str(&format!(
                    "\t{} -> {} [label={}]\n",
                    quote(&edge.tail),
                    quote(&edge.head),
                    quote(label)
                )),
                None => dot.push_str(&format!(
                    "\t{} -> {}\n",
                    quote(&edge.tail),
                    quote(&edge.head)
                )),
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// 通过 Graphviz 生成 SVG（用于内嵌预览）
    pub fn pipe_svg(&self) -> Result<String, GraphError> {
        if !is_graphviz_available() {
            return Err(GraphError::Render(graphviz_hint()));
        }

        let mut child = Command::new("dot")
            .arg("-Tsvg")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GraphError::Render(format!("执行 Graphviz 命令失败: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(self.source().as_bytes())
                .map_err(|e| GraphError::Io(format!("写入 Graphviz 输入失败: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| GraphError::Render(format!("等待 Graphviz 结束失败: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GraphError::Render(format!("Graphviz 渲染失败: {stderr}")));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// 保存 DOT 源码并渲染为 `{directory}/{file_name}.{format}`（目录不存在时自动创建）
    ///
    /// 渲染成功且 `cleanup` 为真时删除源文件；Graphviz 不可用时保留源文件并返回安装提示。
    pub fn render(
        &self,
        directory: &Path,
        file_name: &str,
        cleanup: bool,
    ) -> Result<VisualizationOutput, GraphError> {
        std::fs::create_dir_all(directory)
            .map_err(|e| GraphError::Io(format!("创建目录 {} 失败: {e}", directory.display())))?;
        let dot_path = directory.join(format!("{file_name}.dot"));
        std::fs::write(&dot_path, self.source())
            .map_err(|e| GraphError::Io(format!("保存 DOT 文件失败: {e}")))?;

        let image_path = directory.join(format!("{file_name}.{}", self.format.extension()));
        match render_with_graphviz(&dot_path, &image_path, self.format) {
            Ok(()) => {
                let dot_path = if cleanup {
                    std::fs::remove_file(&dot_path)
                        .map_err(|e| GraphError::Io(format!("删除 DOT 文件失败: {e}")))?;
                    None
                } else {
                    Some(dot_path)
                };
                Ok(VisualizationOutput {
                    dot_path,
                    image_path: Some(image_path),
                    graphviz_available: true,
                    graphviz_hint: None,
                })
            }
            Err(hint) => {
                tracing::warn!("{hint}");
                Ok(VisualizationOutput {
                    dot_path: Some(dot_path),
                    image_path: None,
                    graphviz_available: false,
                    graphviz_hint: Some(hint),
                })
            }
        }
    }
}

/// 为 DOT 标识符/属性值加引号并转义
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// 检测 Graphviz 是否可用
pub fn is_graphviz_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn graphviz_hint() -> String {
    "Graphviz 未安装或不在 PATH 中。\n\
     安装方式:\n\
     - Windows: winget install graphviz 或 choco install graphviz\n\
     - macOS: brew install graphviz\n\
     - Linux: sudo apt install graphviz\n\
     安装后可用在线预览: https://dreampuf.github.io/GraphvizOnline/"
        .to_string()
}

/// 使用 Graphviz 渲染 DOT 文件为图像
fn render_with_graphviz(
    dot_path: &Path,
    output_path: &Path,
    format: ImageFormat,
) -> Result<(), String> {
    if !is_graphviz_available() {
        return Err(graphviz_hint());
    }

    let output = Command::new("dot")
        .arg(format!("-T{}", format.extension()))
        .arg(dot_path)
        .arg("-o")
        .arg(output_path)
        .output();

    match output {
        Ok(result) if result.status.success() => Ok(()),
        Ok(result) => {
            let stderr = String::from_utf8_lossy(&result.stderr);
            Err(format!("Graphviz 渲染失败: {stderr}"))
        }
        Err(e) => Err(format!("执行 Graphviz 命令失败: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_overwrite() {
        let mut dot = Digraph::new();
        dot.attr(AttrScope::Node, "shape", "ellipse");
        dot.attr(AttrScope::Node, "shape", "box");
        assert_eq!(
            dot.attrs(AttrScope::Node),
            &[("shape".to_string(), "box".to_string())]
        );
        assert!(dot.attrs(AttrScope::Edge).is_empty());
    }

    #[test]
    fn test_source_format() {
        let mut dot = Digraph::new();
        dot.attr(AttrScope::Graph, "bgcolor", "#FFFFFF");
        dot.node("a", "<table><tr><td>Conv</td></tr></table>");
        dot.node("b", "<table><tr><td>Relu</td></tr></table>");
        dot.edge("a", "b", Some("1x64".to_string()));
        dot.edge("b", "a", None);

        let source = dot.source();
        assert!(source.starts_with("digraph {\n"));
        assert!(source.contains("\tgraph [bgcolor=\"#FFFFFF\"]\n"));
        assert!(source.contains("\t\"a\" [label=<<table><tr><td>Conv</td></tr></table>>]\n"));
        assert!(source.contains("\t\"a\" -> \"b\" [label=\"1x64\"]\n"));
        assert!(source.contains("\t\"b\" -> \"a\"\n"));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
