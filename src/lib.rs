//! # Layer Viz
//!
//! `layer_viz`把训练好的神经网络的计算图转换为框架无关的有向图，
//! 通过基于模式的改写（折叠 Conv+BN+Relu、合并重复块等）逐步简化，
//! 最后投影为 [Graphviz](https://graphviz.org) DOT 并渲染为图像。
//!

pub mod dot;
pub mod graph;
pub mod import;
pub mod transform;
pub mod utils;

pub use graph::{Graph, GraphConfig, GraphError, Node, NodeId};
