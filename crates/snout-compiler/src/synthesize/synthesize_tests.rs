use snout_core::{ActionCatalog, ActionMetadata, CallStyle, TerminalId, TypeDescriptor};

use crate::graph::{Edge, MinimalTransitionGraph, Node, NodeId, TransitionGraph, minimize};
use crate::synthesize::{
    GenericArg, OperationKind, OperationTarget, ParamDescriptor, StatePrinter, SynthesisConfig,
    synthesize,
};
use crate::test_utils::{catalog, shape_catalog};

fn minimal(nodes: &[&[(u32, NodeId)]]) -> MinimalTransitionGraph {
    let graph = TransitionGraph::new(
        nodes
            .iter()
            .map(|edges| {
                Node::new(
                    edges
                        .iter()
                        .map(|&(t, n)| Edge::new(TerminalId::new(t), n))
                        .collect(),
                )
            })
            .collect(),
    );
    minimize(&graph).0
}

#[test]
fn shape_states() {
    // AddCircle=0 WithRadius=1 AddRectangle=2 WithWidth=3 WithHeight=4
    let graph = minimal(&[&[(0, 1), (2, 2)], &[(1, 3)], &[(3, 4)], &[], &[(4, 3)]]);

    let states = synthesize(&graph, &shape_catalog(), &SynthesisConfig::default());

    insta::assert_snapshot!(StatePrinter::new(&states).dump(), @r"
    Syntax (N0)
      AddCircle → Syntax1
      AddRectangle → Syntax2

    Syntax1 (N1)
      WithRadius(radius: i32) → end

    Syntax2 (N2)
      WithWidth(width: i32) → Syntax4

    Syntax4 (N4)
      WithHeight(height: i32) → end
    ");
    assert!(states[0].is_entry());
    assert_eq!(states[0].operations[0].documentation, "Add a circle");
    assert_eq!(states[0].operations[0].builder_method, "add_circle");
}

#[test]
fn method_signatures() {
    let catalog = ActionCatalog::new(vec![
        ActionMetadata::new("insert")
            .generic(TypeDescriptor::generic("K").with_bound("Hash"))
            .generic(TypeDescriptor::concrete("String"))
            .param("key", TypeDescriptor::generic("K"))
            .param("value", TypeDescriptor::Dynamic),
        ActionMetadata::new("finish").style(CallStyle::Method),
    ])
    .unwrap();
    let graph = minimal(&[&[(0, 0), (1, 1)], &[]]);

    let config = SynthesisConfig::new().dynamic_marker("Value");
    let states = synthesize(&graph, &catalog, &config);

    let [insert, finish] = states[0].operations.as_slice() else {
        panic!("expected two operations");
    };
    assert_eq!(
        insert.kind,
        OperationKind::Method {
            params: vec![
                ParamDescriptor {
                    name: "key".to_string(),
                    ty: "K".to_string(),
                },
                ParamDescriptor {
                    name: "value".to_string(),
                    ty: "Value".to_string(),
                },
            ],
            generics: vec![
                GenericArg {
                    rendered: "K".to_string(),
                    declaration: Some("K: Hash".to_string()),
                },
                GenericArg {
                    rendered: "String".to_string(),
                    declaration: None,
                },
            ],
        }
    );
    assert_eq!(
        insert.target,
        OperationTarget::State {
            name: "Syntax".to_string(),
            node: 0,
        }
    );
    assert_eq!(
        finish.kind,
        OperationKind::Method {
            params: Vec::new(),
            generics: Vec::new(),
        }
    );
    assert_eq!(finish.target, OperationTarget::End);
    insta::assert_snapshot!(StatePrinter::new(&states).dump(), @r"
    Syntax (N0)
      Insert<K, String>(key: K, value: Value) → Syntax
      Finish() → end
    ");
}

#[test]
fn terminal_without_action_is_skipped() {
    let graph = minimal(&[&[(0, 1), (9, 1)], &[]]);

    let states = synthesize(&graph, &catalog(&["A"]), &SynthesisConfig::default());

    assert_eq!(states.len(), 1);
    assert_eq!(states[0].operations.len(), 1);
}

#[test]
fn prune_unreachable_states() {
    let graph = minimal(&[&[(0, 1)], &[], &[(1, 1)]]);
    let catalog = catalog(&["A", "B"]);

    let all = synthesize(&graph, &catalog, &SynthesisConfig::default());
    let pruned = synthesize(&graph, &catalog, &SynthesisConfig::new().prune_unreachable(true));

    assert_eq!(all.iter().map(|s| s.node).collect::<Vec<_>>(), [0, 2]);
    assert_eq!(pruned.iter().map(|s| s.node).collect::<Vec<_>>(), [0]);
}

#[test]
fn base_name_prefixes_states() {
    let graph = minimal(&[&[(0, 1)], &[(0, 2)], &[]]);
    let config = SynthesisConfig::new().base_name("Shape");

    let states = synthesize(&graph, &catalog(&["A"]), &config);

    let names: Vec<_> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Shape", "Shape1"]);
}
