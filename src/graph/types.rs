/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 模块的基础类型：节点ID、形状、参数值、边，以及身份解析特性
 */

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 节点的唯一标识（由构建者提供，在单个图内不重复）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// 身份解析：所有可参与以ID为键的图操作的成员都必须显式携带ID
pub trait HasId {
    fn uid(&self) -> &NodeId;
}

impl HasId for NodeId {
    fn uid(&self) -> &NodeId {
        self
    }
}

impl<T: HasId + ?Sized> HasId for &T {
    fn uid(&self) -> &NodeId {
        (**self).uid()
    }
}

/// 张量形状（各维度大小的有序序列，维度值可为 -1 表示未知）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Shape(pub Vec<i64>);

impl Shape {
    /// 未知维度（如动态 batch）
    pub const UNKNOWN_DIM: i64 = -1;

    pub fn new(dims: impl Into<Vec<i64>>) -> Self {
        Self(dims.into())
    }

    /// 由动态维度值构造
    ///
    /// 整数（含整数值的浮点数）原样保留；`null`、符号维度（如 `"batch"`）
    /// 等其余取值记为 [`Shape::UNKNOWN_DIM`]。
    pub fn from_json_dims(values: &[serde_json::Value]) -> Self {
        Self(values.iter().map(dim_from_value).collect())
    }

    pub fn dims(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 以 `x` 连接各维度，如 `1x64x56x56`
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("x");
        f.write_str(&text)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_json_dims(&values))
    }
}

fn dim_from_value(value: &serde_json::Value) -> i64 {
    if let Some(dim) = value.as_i64() {
        return dim;
    }
    match value.as_f64() {
        Some(dim) if dim.is_finite() && dim.fract() == 0.0 => dim as i64,
        _ => Shape::UNKNOWN_DIM,
    }
}

impl From<Vec<i64>> for Shape {
    fn from(dims: Vec<i64>) -> Self {
        Self(dims)
    }
}

impl<const N: usize> From<[i64; N]> for Shape {
    fn from(dims: [i64; N]) -> Self {
        Self(dims.to_vec())
    }
}

/// 层参数值（如 kernel_shape、stride、padding 等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Text(String),
}

impl ParamValue {
    /// 以整数序列的形式查看（标量整数视为单元素序列）
    pub fn as_ints(&self) -> Option<Vec<i64>> {
        match self {
            Self::Int(v) => Some(vec![*v]),
            Self::Ints(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// 以数值序列的形式查看（整数与浮点统一为 f64，标量视为单元素序列）
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        match self {
            Self::Int(v) => Some(vec![*v as f64]),
            Self::Ints(v) => Some(v.iter().map(|d| *d as f64).collect()),
            Self::Float(v) => Some(vec![*v]),
            Self::Floats(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Ints(v) => write!(f, "{v:?}"),
            Self::Floats(v) => write!(f, "{v:?}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(v: Vec<i64>) -> Self {
        Self::Ints(v)
    }
}

impl<const N: usize> From<[i64; N]> for ParamValue {
    fn from(v: [i64; N]) -> Self {
        Self::Ints(v.to_vec())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// 参数表：参数名 -> 参数值
pub type Params = IndexMap<String, ParamValue>;

/// 有向边：(源节点ID, 目标节点ID, 标签)
///
/// 标签为沿该边流动的张量形状，`None` 表示未知。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub label: Option<Shape>,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, label: Option<Shape>) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// 边是否与给定节点相连（作为源或目标）
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}
