use crate::assert_err;
use crate::graph::{GraphError, Node, NodeId, ParamValue, Shape};
use serde_json::json;

#[test]
fn test_node_defaults() {
    let node = Node::new("n0", "Conv");
    assert_eq!(node.id, NodeId::from("n0"));
    assert_eq!(node.name, None);
    assert_eq!(node.repeat, 1);
    assert_eq!(node.output_shape, None);
    assert!(node.params.is_empty());
}

#[test]
fn test_shape_from_sequence_value() {
    for value in [json!([1, 3, 224, 224]), json!([]), json!([-1, 10])] {
        let node = Node::new("n", "Input").with_shape_value(&value).unwrap();
        assert!(node.output_shape.is_some());
    }
    let node = Node::new("n", "Input").with_shape_value(&json!(null)).unwrap();
    assert_eq!(node.output_shape, None);
}

#[test]
fn test_shape_from_non_sequence_value() {
    for value in [json!(3), json!(2.5), json!("1x3"), json!(true), json!({"d": 1})] {
        assert_err!(
            Node::new("n", "Input").with_shape_value(&value),
            GraphError::InvalidShape(_)
        );
    }
}

#[test]
fn test_shape_with_unknown_dims() {
    let shape_of = |value: serde_json::Value| {
        Node::new("n", "Input")
            .with_shape_value(&value)
            .unwrap()
            .output_shape
            .unwrap()
    };
    // 动态 batch
    assert_eq!(shape_of(json!([null, 28, 28, 1])), Shape::from([-1, 28, 28, 1]));
    // 整数值的浮点维度
    assert_eq!(shape_of(json!([1.0, 3])), Shape::from([1, 3]));
    // 符号维度与非整数值都记为未知
    assert_eq!(shape_of(json!(["batch", 2.5, 8])), Shape::from([-1, -1, 8]));
    assert_eq!(Shape::UNKNOWN_DIM, -1);
}

#[test]
fn test_shape_deserialize_unknown_dims() {
    let shape: Shape = serde_json::from_str("[null, 3]").unwrap();
    assert_eq!(shape, Shape::from([-1, 3]));
    let shape: Shape = serde_json::from_str("[1.0, 16, 16]").unwrap();
    assert_eq!(shape, Shape::from([1, 16, 16]));
    assert!(serde_json::from_str::<Shape>("4").is_err());
    assert_eq!(serde_json::to_string(&shape).unwrap(), "[1,16,16]");
}

#[test]
fn test_invalid_shape_message() {
    let err = Node::new("n", "Input")
        .with_shape_value(&json!(4))
        .unwrap_err();
    assert!(err.to_string().starts_with("shape must be tuple or list"));
}

#[test]
fn test_title() {
    assert_eq!(Node::new("n", "Relu").title(), "Relu");
    assert_eq!(Node::new("n", "Relu").with_name("act1").title(), "act1");
    // 空名称视为无名称
    assert_eq!(Node::new("n", "Relu").with_name("").title(), "Relu");

    let conv = Node::new("n", "Conv").with_param("kernel_shape", [3i64, 3]);
    assert_eq!(conv.title(), "Conv3x3");
    let conv = Node::new("n", "Conv")
        .with_name("stem")
        .with_param("kernel_shape", [7i64, 1]);
    assert_eq!(conv.title(), "stem7x1");
}

#[test]
fn test_caption_stride() {
    let caption = |stride: ParamValue| Node::new("n", "Conv").with_param("stride", stride).caption();

    assert_eq!(caption(ParamValue::Ints(vec![2, 2])), "/2");
    assert_eq!(caption(ParamValue::Ints(vec![1, 1])), "");
    assert_eq!(caption(ParamValue::Int(2)), "/2");
    assert_eq!(caption(ParamValue::Int(1)), "");
    assert_eq!(caption(ParamValue::Ints(vec![2, 1])), "/(2, 1)");
    // 浮点步长
    assert_eq!(caption(ParamValue::Float(1.0)), "");
    assert_eq!(caption(ParamValue::Floats(vec![1.0, 1.0])), "");
    assert_eq!(caption(ParamValue::Float(2.0)), "/2");
    assert_eq!(caption(ParamValue::Floats(vec![2.0, 1.5])), "/(2, 1.5)");
    assert_eq!(caption(ParamValue::Text("same".into())), "/same");
    assert_eq!(Node::new("n", "Conv").caption(), "");
}

#[test]
fn test_caption_override() {
    let mut node = Node::new("n", "Conv").with_param("stride", [2i64, 2]);
    node.set_caption("/2/2");
    assert_eq!(node.caption(), "/2/2");
    // 清空覆盖值后回到推导值
    node.set_caption("");
    assert_eq!(node.caption(), "/2");
}

#[test]
fn test_title_caption_follow_params() {
    let mut node = Node::new("n", "MaxPool").with_param("kernel_shape", [2i64, 2]);
    assert_eq!(node.title(), "MaxPool2x2");
    node.params.insert("kernel_shape".to_string(), ParamValue::Ints(vec![3, 3]));
    node.params.insert("stride".to_string(), ParamValue::Int(3));
    assert_eq!(node.title(), "MaxPool3x3");
    assert_eq!(node.caption(), "/3");
}

#[test]
fn test_node_display() {
    let node = Node::new("n7", "Conv")
        .with_name("conv1")
        .with_output_shape([1, 8, 4, 4])
        .with_param("stride", 2i64);
    assert_eq!(
        node.to_string(),
        "<Node: op: Conv, name: conv1, id: n7, title: conv1, repeat: 1, shape: [1, 8, 4, 4], params: {stride: 2}>"
    );
    assert_eq!(
        Node::new("n8", "Relu").to_string(),
        "<Node: op: Relu, name: None, id: n8, title: Relu, repeat: 1>"
    );
}

#[test]
fn test_shape_display() {
    assert_eq!(Shape::from([1, 64, 56, 56]).to_string(), "1x64x56x56");
    assert_eq!(Shape::default().to_string(), "");
}
