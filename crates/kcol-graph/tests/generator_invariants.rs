use kcol_core::errors::KcolError;
use kcol_core::rng::RngHandle;
use kcol_graph::{canonical_hash, generate, GeneratorKind, GeneratorParams, Graph};
use proptest::prelude::*;

fn check_invariants(graph: &Graph, max_degree: Option<usize>) {
    for (handle, node) in graph.nodes() {
        if let Some(cap) = max_degree {
            assert!(node.degree() <= cap, "node {} exceeds cap {cap}", node.id());
        }
        let mut neighbours = node.connections().to_vec();
        neighbours.sort();
        neighbours.dedup();
        assert_eq!(neighbours.len(), node.degree(), "duplicate neighbour");
        for neighbour in node.connections() {
            assert_ne!(*neighbour, handle, "self loop");
            assert!(graph[*neighbour].connections().contains(&handle), "asymmetric edge");
            assert_ne!(
                graph[*neighbour].partition(),
                node.partition(),
                "edge inside a planted class"
            );
        }
    }
    let degrees: Vec<usize> = graph.nodes().map(|(_, node)| node.degree()).collect();
    assert!(degrees.windows(2).all(|pair| pair[0] >= pair[1]), "order not degree-descending");
}

#[test]
fn complete_tripartite_graph_at_full_density() {
    let params = GeneratorParams::new(9, 3, 1.0).with_set_sizes(vec![3, 3, 3]);
    let graph = generate(&params, &mut RngHandle::from_seed(1)).unwrap();
    assert_eq!(graph.len(), 9);
    assert!(graph.is_connected());
    assert_eq!(graph.num_edges(), 27);
    assert_eq!(graph.max_degree(), 6);
    check_invariants(&graph, None);
}

#[test]
fn two_node_graph_has_exactly_one_edge() {
    let params = GeneratorParams::new(2, 2, 0.0).with_set_sizes(vec![1, 1]);
    let graph = generate(&params, &mut RngHandle::from_seed(5)).unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.num_edges(), 1);
}

#[test]
fn zero_density_yields_a_spanning_path() {
    let params = GeneratorParams::new(12, 3, 0.0);
    let graph = generate(&params, &mut RngHandle::from_seed(9)).unwrap();
    assert_eq!(graph.num_edges(), 11);
    assert!(graph.is_connected());
    check_invariants(&graph, None);
}

#[test]
fn ids_interleave_across_classes() {
    let params = GeneratorParams::new(7, 3, 0.0).with_set_sizes(vec![3, 2, 2]);
    let graph = generate(&params, &mut RngHandle::from_seed(0)).unwrap();
    let mut tagged: Vec<(u64, Option<usize>)> = graph
        .nodes()
        .map(|(_, node)| (node.id().as_raw(), node.partition()))
        .collect();
    tagged.sort();
    let partitions: Vec<usize> = tagged.into_iter().map(|(_, p)| p.unwrap()).collect();
    assert_eq!(partitions, vec![0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn degree_cap_of_one_leaves_nodes_detached() {
    let params = GeneratorParams::new(6, 2, 1.0).with_max_degree(1);
    let graph = generate(&params, &mut RngHandle::from_seed(3)).unwrap();
    assert!(graph.max_degree() <= 1);
    assert!(!graph.is_connected());
    check_invariants(&graph, Some(1));
}

#[test]
fn invalid_parameters_fail_fast() {
    let cases = vec![
        (GeneratorParams::new(5, 1, 0.5), "k"),
        (GeneratorParams::new(5, 2, 1.5), "density"),
        (GeneratorParams::new(5, 2, -0.1), "density"),
        (GeneratorParams::new(5, 2, 0.5).with_max_degree(0), "max_degree"),
        (GeneratorParams::new(5, 2, 0.5).with_set_sizes(vec![5]), "set_sizes"),
        (GeneratorParams::new(5, 2, 0.5).with_set_sizes(vec![5, 0]), "set_sizes"),
    ];
    for (params, parameter) in cases {
        match generate(&params, &mut RngHandle::from_seed(0)) {
            Err(KcolError::InvalidParameter(info)) => {
                assert_eq!(info.context.get("parameter").map(String::as_str), Some(parameter));
            }
            other => panic!("expected invalid parameter for {parameter}, got {other:?}"),
        }
    }
}

#[test]
fn negative_node_count_is_rejected_at_the_config_boundary() {
    let parsed: Result<GeneratorParams, _> =
        serde_json::from_str(r#"{"num_nodes": -3, "k": 3}"#);
    assert!(parsed.is_err());

    let parsed: GeneratorParams =
        serde_json::from_str(r#"{"num_nodes": 10, "k": 3, "kind": "line-mod-k"}"#).unwrap();
    assert_eq!(parsed.kind, GeneratorKind::LineModK);
    assert_eq!(parsed.density, 0.5);
    assert_eq!(parsed.max_degree, None);
}

#[test]
fn same_seed_same_graph() {
    let params = GeneratorParams::new(40, 4, 0.3).with_max_degree(6);
    let a = generate(&params, &mut RngHandle::from_seed(77)).unwrap();
    let b = generate(&params, &mut RngHandle::from_seed(77)).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(a.order(), b.order());
}

#[test]
fn legacy_generator_guard_stops_under_tight_cap() {
    let mut params = GeneratorParams::new(200, 2, 1.0)
        .with_max_degree(1)
        .with_kind(GeneratorKind::UnconnectedModK);
    params.max_failed_draws = Some(500);
    let graph = generate(&params, &mut RngHandle::from_seed(11)).unwrap();
    assert!(graph.max_degree() <= 1);
    assert!(graph.num_edges() <= 100);
}

#[test]
fn triangles_are_three_colorable_by_construction() {
    let params = GeneratorParams::new(14, 3, 0.0).with_kind(GeneratorKind::Triangles);
    let graph = generate(&params, &mut RngHandle::from_seed(2)).unwrap();
    assert_eq!(graph.len(), 12);
    assert!(graph.num_edges() >= 12);
    check_invariants(&graph, None);
}

#[test]
fn triangles_reject_parameters_they_cannot_honour() {
    let cases = vec![
        (GeneratorParams::new(30, 3, 0.5).with_max_degree(2), "max_degree"),
        (GeneratorParams::new(30, 5, 0.5), "k"),
        (GeneratorParams::new(30, 3, 0.5).with_set_sizes(vec![10, 10, 10]), "set_sizes"),
    ];
    for (params, parameter) in cases {
        let params = params.with_kind(GeneratorKind::Triangles);
        match generate(&params, &mut RngHandle::from_seed(0)) {
            Err(KcolError::InvalidParameter(info)) => {
                assert_eq!(info.context.get("parameter").map(String::as_str), Some(parameter));
            }
            other => panic!("expected invalid parameter for {parameter}, got {other:?}"),
        }
    }

    let params = GeneratorParams::new(30, 3, 0.5).with_kind(GeneratorKind::Triangles);
    assert!(generate(&params, &mut RngHandle::from_seed(0)).is_ok());
}

proptest! {
    #[test]
    fn partitioned_generator_respects_invariants(
        seed in any::<u64>(),
        k in 2usize..6,
        nodes in 0usize..40,
        density in 0.0f64..=1.0,
        cap in proptest::option::of(1usize..8),
    ) {
        let mut params = GeneratorParams::new(nodes, k, density);
        params.max_degree = cap;
        let graph = generate(&params, &mut RngHandle::from_seed(seed)).unwrap();
        prop_assert_eq!(graph.len(), nodes);
        check_invariants(&graph, cap);
        if cap.map_or(true, |cap| cap >= 2) && nodes >= 1 {
            prop_assert!(graph.is_connected());
        }
    }

    #[test]
    fn mod_k_generators_respect_invariants(
        seed in any::<u64>(),
        k in 2usize..5,
        nodes in 0usize..30,
        density in 0.0f64..=1.0,
        cap in proptest::option::of(1usize..6),
        kind in prop_oneof![
            Just(GeneratorKind::ConnectedModK),
            Just(GeneratorKind::LineModK),
            Just(GeneratorKind::UnconnectedModK),
        ],
    ) {
        let mut params = GeneratorParams::new(nodes, k, density).with_kind(kind);
        params.max_degree = cap;
        let graph = generate(&params, &mut RngHandle::from_seed(seed)).unwrap();
        prop_assert_eq!(graph.len(), nodes);
        check_invariants(&graph, cap);
        for (_, node) in graph.nodes() {
            prop_assert_eq!(node.partition(), Some(node.id().as_raw() as usize % k));
        }
    }
}
