//! Integration tests for pf-graph.

use pf_graph::{End, GraphBuilder, GraphError};
use proptest::prelude::*;

#[test]
fn incidence_follows_link_order() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node("a");
    let b = builder.add_node("b");
    let h = builder.add_node("h");
    let ab = builder.add_link("a-b", a, b);
    let ah = builder.add_link("a-h", a, h);
    let hb = builder.add_link("h-b", h, b);

    let graph = builder.build().unwrap();

    let at_a: Vec<_> = graph.incident(a).iter().map(|i| i.link).collect();
    assert_eq!(at_a, vec![ab, ah]);

    let at_b: Vec<_> = graph.incident(b).iter().map(|i| (i.link, i.end)).collect();
    assert_eq!(at_b, vec![(ab, End::End), (hb, End::End)]);

    let at_h: Vec<_> = graph.incident(h).iter().map(|i| (i.link, i.end)).collect();
    assert_eq!(at_h, vec![(ah, End::End), (hb, End::Start)]);
}

#[test]
fn lookup_by_name() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node("a");
    let b = builder.add_node("b");
    let ab = builder.add_link("a-b", a, b);

    let graph = builder.build().unwrap();

    assert_eq!(graph.find_node("b"), Some(b));
    assert_eq!(graph.find_link("a-b"), Some(ab));
    assert_eq!(graph.find_node("z"), None);
    assert_eq!(graph.find_link("b-a"), None);
}

#[test]
fn graph_accessors() {
    let mut builder = GraphBuilder::new();
    let n1 = builder.add_node("N1");
    let n2 = builder.add_node("N2");
    let l1 = builder.add_link("L1", n1, n2);

    let graph = builder.build().unwrap();

    assert_eq!(graph.nodes()[n1.slot()].name, "N1");
    assert_eq!(graph.links()[l1.slot()].start, n1);
    assert_eq!(graph.links()[l1.slot()].end, n2);

    let bogus = pf_core::NodeId::from_index(999);
    assert!(graph.incident(bogus).is_empty());
}

#[test]
fn empty_graph() {
    let graph = GraphBuilder::new().build().unwrap();
    assert!(graph.nodes().is_empty());
    assert!(graph.links().is_empty());
}

#[test]
fn isolated_node_has_no_incidence() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node("a");
    let b = builder.add_node("b");
    let lonely = builder.add_node("z");
    builder.add_link("a-b", a, b);
    let graph = builder.build().unwrap();
    assert_eq!(graph.incident(lonely).len(), 0);
}

#[test]
fn parallel_links() {
    let mut builder = GraphBuilder::new();
    let n1 = builder.add_node("N1");
    let n2 = builder.add_node("N2");
    builder.add_link("L1", n1, n2);
    builder.add_link("L2", n1, n2);

    let graph = builder.build().unwrap();
    assert_eq!(graph.incident(n1).len(), 2);
    assert_eq!(graph.incident(n2).len(), 2);
}

#[test]
fn self_loop_rejected() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node("a");
    builder.add_link("a-a", a, a);
    assert!(matches!(builder.build(), Err(GraphError::SelfLoop { .. })));
}

proptest! {
    /// Every link contributes exactly one Start and one End incidence.
    #[test]
    fn degree_sum_is_twice_link_count(
        n in 2usize..20,
        edges in proptest::collection::vec((0usize..20, 0usize..20), 0..40),
    ) {
        let mut builder = GraphBuilder::new();
        let nodes: Vec<_> = (0..n).map(|i| builder.add_node(format!("n{i}"))).collect();
        let mut count = 0;
        for (k, (s, e)) in edges.into_iter().enumerate() {
            let (s, e) = (s % n, e % n);
            if s == e {
                continue;
            }
            builder.add_link(format!("l{k}"), nodes[s], nodes[e]);
            count += 1;
        }
        let graph = builder.build().unwrap();

        let degree_sum: usize = nodes.iter().map(|&id| graph.incident(id).len()).sum();
        prop_assert_eq!(degree_sum, 2 * count);

        let signed: f64 = nodes
            .iter()
            .flat_map(|&id| graph.incident(id).iter().map(|i| i.end.sign()))
            .sum();
        prop_assert_eq!(signed, 0.0);
    }
}
