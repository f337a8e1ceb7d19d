/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 模块：框架无关的网络结构图
 *
 * 公开 API：
 * - `Graph`: 节点/边存储、拓扑查询、replace/search 等改写操作、DOT 投影
 * - `Node`: 单个网络层
 * - `GraphError`: 错误类型
 */

mod config;
mod error;
mod inner;
mod node;
mod theme;
mod types;

pub use config::GraphConfig;
pub use error::{GraphError, ImageFormat, VisualizationOutput};
pub use inner::Graph;
pub use node::Node;
pub(crate) use node::shape_from_value;
pub use theme::Theme;
pub use types::{Edge, HasId, NodeId, ParamValue, Params, Shape};

#[cfg(test)]
mod tests;
