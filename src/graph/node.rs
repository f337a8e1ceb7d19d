/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 图节点：框架无关的神经网络层，附带由参数推导出的显示属性（title、caption）
 */

use super::error::GraphError;
use super::types::{HasId, NodeId, ParamValue, Params, Shape};
use std::fmt;

/// 表示有向图中一个框架无关的神经网络层
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// 在计算图中不重复的层ID
    pub id: NodeId,
    /// 显示用名称
    pub name: Option<String>,
    /// 框架无关的算子名称（如 Conv、Relu）
    pub op: String,
    /// 输出形状
    pub output_shape: Option<Shape>,
    /// 层参数（如 kernel_shape、stride）
    pub params: Params,
    /// 折叠重复结构后的重复次数（≥ 1）
    pub repeat: usize,
    caption_override: String,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, op: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            op: op.into(),
            output_shape: None,
            params: Params::new(),
            repeat: 1,
            caption_override: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_output_shape(mut self, shape: impl Into<Shape>) -> Self {
        self.output_shape = Some(shape.into());
        self
    }

    /// 从动态值设置输出形状
    ///
    /// `null` 表示无形状；数组（各元素须为整数）作为形状；
    /// 其它任何值（标量、字符串、对象）均报错。
    pub fn with_shape_value(mut self, value: &serde_json::Value) -> Result<Self, GraphError> {
        self.output_shape = shape_from_value(value)?;
        Ok(self)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// 显示标题：名称（缺省时为算子名）+ 卷积核尺寸（若有）
    pub fn title(&self) -> String {
        let mut title = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.op.clone(),
        };

        if let Some(kernel) = self.params.get("kernel_shape") {
            match kernel.as_ints() {
                Some(dims) => {
                    let dims: Vec<String> = dims.iter().map(ToString::to_string).collect();
                    title.push_str(&dims.join("x"));
                }
                None => title.push_str(&kernel.to_string()),
            }
        }
        title
    }

    /// 显示注解：目前只包含步长（stride ≠ 1 时为 `/步长`）
    ///
    /// 若通过 [`Node::set_caption`] 显式设置过，则直接返回该值。
    pub fn caption(&self) -> String {
        if !self.caption_override.is_empty() {
            return self.caption_override.clone();
        }

        let Some(stride) = self.params.get("stride") else {
            return String::new();
        };
        // 整数值的浮点步长与整数步长显示一致（2.0 显示为 2）
        match stride.as_numbers() {
            Some(dims) if dims.is_empty() => String::new(),
            Some(dims) if dims.iter().all(|d| *d == dims[0]) => {
                // 各维度一致的步长视为标量
                if dims[0] == 1.0 {
                    String::new()
                } else {
                    format!("/{}", dims[0])
                }
            }
            Some(dims) => {
                let dims: Vec<String> = dims.iter().map(ToString::to_string).collect();
                format!("/({})", dims.join(", "))
            }
            None => format!("/{stride}"),
        }
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption_override = caption.into();
    }
}

impl HasId for Node {
    fn uid(&self) -> &NodeId {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Node: op: {}, name: {}, id: {}, title: {}, repeat: {}",
            self.op,
            self.name.as_deref().unwrap_or("None"),
            self.id,
            self.title(),
            self.repeat
        )?;
        if let Some(shape) = &self.output_shape {
            write!(f, ", shape: {:?}", shape.dims())?;
        }
        if !self.params.is_empty() {
            let params: Vec<String> = self
                .params
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            write!(f, ", params: {{{}}}", params.join(", "))?;
        }
        f.write_str(">")
    }
}

/// 将动态值解析为形状，非序列值报错（序列中无法识别的维度记为未知）
pub(crate) fn shape_from_value(value: &serde_json::Value) -> Result<Option<Shape>, GraphError> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(Shape::from_json_dims(items))),
        other => Err(GraphError::InvalidShape(format!(
            "实际得到 {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
