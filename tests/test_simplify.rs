/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 端到端简化测试 - 从 JSON 图描述符导入，经框架专属变换与通用简化后检查结果图及其 DOT 输出
 *                 网络结构：Input -> Conv(3x3,/2) -> BatchNorm -> Relu -> Linear x3
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-18
 */
use layer_viz::graph::Shape;
use layer_viz::import::{DescriptorImporter, Framework, GraphImporter, TransformSet};
use layer_viz::transform::{apply_all, Fold, Transform};
use layer_viz::{Graph, GraphConfig, GraphError, NodeId};

const PYTORCH_MODEL: &str = r#"{
    "version": "1.0",
    "framework": "pytorch",
    "nodes": [
        {"id": "x", "op": "Input", "output_shape": [1, 3, 32, 32]},
        {"id": "0", "op": "onnx::Conv", "output_shape": [1, 16, 16, 16],
         "params": {"kernel_shape": [3, 3], "stride": [2, 2]}},
        {"id": "1", "op": "onnx::BatchNormalization", "output_shape": [1, 16, 16, 16]},
        {"id": "2", "op": "onnx::Relu", "output_shape": [1, 16, 16, 16]},
        {"id": "3", "op": "onnx::Gemm", "output_shape": [1, 64]},
        {"id": "4", "op": "onnx::Gemm", "output_shape": [1, 64]},
        {"id": "5", "op": "onnx::Gemm", "output_shape": [1, 10]}
    ],
    "edges": [
        {"source": "x", "target": "0", "label": [1, 3, 32, 32]},
        {"source": "0", "target": "1", "label": [1, 16, 16, 16]},
        {"source": "1", "target": "2", "label": [1, 16, 16, 16]},
        {"source": "2", "target": "3", "label": [1, 16, 16, 16]},
        {"source": "3", "target": "4", "label": [1, 64]},
        {"source": "4", "target": "5", "label": [1, 64]}
    ]
}"#;

fn readable() -> GraphConfig {
    GraphConfig {
        meaningful_ids: true,
        ..GraphConfig::default()
    }
}

fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

#[test]
fn test_pytorch_model_simplified() -> Result<(), GraphError> {
    let importer = DescriptorImporter::from_json(PYTORCH_MODEL)?;
    assert_eq!(importer.framework(), Framework::PyTorch);

    let graph = Graph::build(
        Some(&importer),
        &readable(),
        TransformSet::Default,
        TransformSet::Default,
    )?;

    assert_eq!(graph.node_ids(), ids(&["x", "0><1><2", "3><4><5"]));
    assert_eq!(graph.edges_count(), 2);

    let block = graph.get(&NodeId::from("0><1><2")).unwrap();
    assert_eq!(block.op, "ConvBnRelu");
    assert_eq!(block.title(), "Conv3x3 > BatchNorm > Relu");
    assert_eq!(block.caption(), "/2");
    assert_eq!(block.output_shape, Some(Shape::from([1, 16, 16, 16])));

    let fc = graph.get(&NodeId::from("3><4><5")).unwrap();
    assert_eq!(fc.op, "Linear");
    assert_eq!(fc.repeat, 3);

    let labels: Vec<String> = graph
        .edges()
        .iter()
        .filter_map(|e| e.label.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(labels, vec!["1x3x32x32", "1x16x16x16"]);

    let dot = graph.to_dot();
    assert!(dot.contains("Conv3x3 &gt; BatchNorm &gt; Relu"));
    assert!(dot.contains(">x3</td>"));
    assert!(dot.contains("\"x\" -> \"0><1><2\" [label=\"1x3x32x32\"]"));
    Ok(())
}

#[test]
fn test_random_ids_keep_structure() -> Result<(), GraphError> {
    let importer = DescriptorImporter::from_json(PYTORCH_MODEL)?;
    let config = GraphConfig {
        seed: Some(11),
        ..GraphConfig::default()
    };
    let graph = Graph::build(Some(&importer), &config, TransformSet::Default, TransformSet::Default)?;

    let ops: Vec<&str> = graph.nodes().map(|n| n.op.as_str()).collect();
    assert_eq!(ops, vec!["Input", "ConvBnRelu", "Linear"]);
    let fc = graph.nodes().last().unwrap();
    assert_eq!(fc.repeat, 3);
    assert!(fc.id.as_str().parse::<u64>().is_ok());

    // 同一种子得到相同的ID
    let again = Graph::build(Some(&importer), &config, TransformSet::Default, TransformSet::Default)?;
    assert_eq!(graph.node_ids(), again.node_ids());
    Ok(())
}

#[test]
fn test_framework_transforms_only() -> Result<(), GraphError> {
    let importer = DescriptorImporter::from_json(PYTORCH_MODEL)?;
    let graph = Graph::build(Some(&importer), &readable(), TransformSet::Default, TransformSet::Skip)?;

    let ops: Vec<&str> = graph.nodes().map(|n| n.op.as_str()).collect();
    assert_eq!(
        ops,
        vec!["Input", "Conv", "BatchNorm", "Relu", "Linear", "Linear", "Linear"]
    );
    assert_eq!(graph.edges_count(), 6);
    Ok(())
}

#[test]
fn test_custom_transforms() -> Result<(), GraphError> {
    let importer = DescriptorImporter::from_json(PYTORCH_MODEL)?;
    let custom: Vec<Box<dyn Transform>> = vec![Box::new(Fold::new("Conv > BatchNorm", "ConvBn")?)];
    let graph = Graph::build(
        Some(&importer),
        &readable(),
        TransformSet::Default,
        TransformSet::Custom(custom),
    )?;

    let ops: Vec<&str> = graph.nodes().map(|n| n.op.as_str()).collect();
    assert_eq!(ops, vec!["Input", "Relu", "Linear", "Linear", "Linear", "ConvBn"]);
    assert_eq!(graph.outgoing(&ids(&["0><1"])), ids(&["2"]));
    Ok(())
}

#[test]
fn test_tensorflow_const_pruned() -> Result<(), GraphError> {
    let json = r#"{
        "framework": "tensorflow",
        "nodes": [
            {"id": "in", "op": "Placeholder"},
            {"id": "w", "op": "Const"},
            {"id": "conv", "op": "Conv2D", "params": {"stride": 1}},
            {"id": "act", "op": "Relu"}
        ],
        "edges": [
            {"source": "in", "target": "conv"},
            {"source": "w", "target": "conv"},
            {"source": "conv", "target": "act"}
        ]
    }"#;
    let importer = DescriptorImporter::from_json(json)?;
    let mut graph = Graph::with_config(&readable())?;
    importer.import(&mut graph)?;
    apply_all(&importer.framework_transforms()?, &mut graph)?;

    assert!(graph.get(&NodeId::from("w")).is_none());
    assert_eq!(graph.incoming(&NodeId::from("conv")), ids(&["in"]));
    assert_eq!(graph.get(&NodeId::from("conv")).unwrap().op, "Conv");
    assert_eq!(graph.get(&NodeId::from("conv")).unwrap().caption(), "");
    Ok(())
}

#[test]
fn test_empty_model() -> Result<(), GraphError> {
    let importer = DescriptorImporter::from_json(r#"{"nodes": []}"#)?;
    let graph = Graph::build(Some(&importer), &readable(), TransformSet::Default, TransformSet::Default)?;
    assert_eq!(graph.nodes_count(), 0);
    assert!(graph.to_dot().starts_with("digraph {"));
    Ok(())
}
